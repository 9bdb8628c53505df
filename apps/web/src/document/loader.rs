//! Document Loader — turns an uploaded PDF into one plain-text string.
//!
//! Extraction is delegated to `pdf-extract`; this module only concatenates
//! pages in order and maps every parser failure (including panics) to
//! `AppError::DocumentRead`.

use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use tracing::{debug, error};

use crate::errors::AppError;

const PDF_MIME: &str = "application/pdf";

/// Accepts an upload when either its declared content type or its file name says PDF.
pub fn is_pdf_upload(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    let by_type = content_type
        .map(|ct| ct.split(';').next().unwrap_or("").trim().eq_ignore_ascii_case(PDF_MIME))
        .unwrap_or(false);
    let by_name = file_name
        .map(|n| n.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);
    by_type || by_name
}

/// Best-effort text of every page, in page order.
///
/// Pages without extractable text (scans, blank pages) yield an empty string.
pub fn extract_pages(pdf: &[u8]) -> Result<Vec<String>, AppError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(pdf)
    }));

    let pages = match outcome {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => return Err(AppError::DocumentRead(e.to_string())),
        Err(_) => {
            error!("PDF parser panicked on a {} byte upload", pdf.len());
            return Err(AppError::DocumentRead(
                "the PDF structure could not be parsed".to_string(),
            ));
        }
    };

    Ok(pages
        .into_iter()
        .map(|page| {
            if page.trim().is_empty() {
                String::new()
            } else {
                page
            }
        })
        .collect())
}

/// Concatenation of [`extract_pages`].
pub fn extract_text(pdf: &[u8]) -> Result<String, AppError> {
    let pages = extract_pages(pdf)?;
    debug!("Extracted text from {} page(s)", pages.len());
    Ok(pages.concat())
}

/// Runs extraction on the blocking pool so large PDFs never stall the runtime.
pub async fn load_resume(pdf: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extract_text(&pdf))
        .await
        .map_err(|e| AppError::DocumentRead(format!("PDF extraction was aborted: {e}")))?
}
