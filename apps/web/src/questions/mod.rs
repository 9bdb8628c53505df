// Interview question generation: prompt, category checks, generator.
// All LLM calls go through llm_client; no direct Mistral calls here.

pub mod categories;
pub mod generator;
pub mod prompts;

pub use generator::QuestionGenerator;
