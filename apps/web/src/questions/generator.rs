//! Question Generator — fills the prompt template and asks the chat model.
//!
//! Flow: validate text → build prompt → one `ChatModel::complete` call
//!       (the client retries transient failures) → return markdown verbatim.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::questions::categories::missing_categories;
use crate::questions::prompts::build_question_prompt;

/// Generates categorized interview questions for a resume.
///
/// Constructed once at startup, and only when a credential is configured.
#[derive(Clone)]
pub struct QuestionGenerator {
    model: Arc<dyn ChatModel>,
}

impl QuestionGenerator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Returns the model's markdown unmodified.
    ///
    /// Output that lacks some category headings is still a success; the
    /// gap is only logged.
    pub async fn generate(&self, resume_text: &str) -> Result<String, AppError> {
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation(
                "no extractable text found in the resume".to_string(),
            ));
        }

        let prompt = build_question_prompt(resume_text);
        info!(
            "Generating interview questions with {} ({} chars of resume text)",
            self.model.model_name(),
            resume_text.len()
        );

        let questions = self.model.complete(&prompt).await?;

        let missing = missing_categories(&questions);
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            warn!(
                "Generated questions are missing category headings: {}",
                names.join(", ")
            );
        }

        Ok(questions)
    }
}
