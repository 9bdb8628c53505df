pub mod loader;

pub use loader::{is_pdf_upload, load_resume};
