//! Presentation — server-rendered page built from minijinja templates.

pub mod markdown;

use std::sync::Arc;

use minijinja::{context, Environment};
use serde::Serialize;

use crate::errors::{AppError, MISSING_CREDENTIAL_MESSAGE};
use crate::ui::markdown::render_markdown;

const PAGE_TITLE: &str = "Help Hire - Interview Question Generator";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot message shown after a generate action.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Holds the compiled templates; cheap to clone.
#[derive(Clone)]
pub struct PageRenderer {
    env: Arc<Environment<'static>>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        for (name, source) in [
            ("base.html", include_str!("../../templates/base.html")),
            ("index.html", include_str!("../../templates/index.html")),
            (
                "missing_credential.html",
                include_str!("../../templates/missing_credential.html"),
            ),
        ] {
            env.add_template(name, source)
                .map_err(|e| AppError::Internal(e.into()))?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    /// Main page: upload form on the left, stored questions (or a hint) on the right.
    pub fn index(&self, questions: Option<&str>, notice: Option<&Notice>) -> Result<String, AppError> {
        let questions_html = questions.map(render_markdown);
        self.render(
            "index.html",
            context! {
                page_title => PAGE_TITLE,
                questions_html => questions_html,
                notice => notice,
            },
        )
    }

    /// The only thing rendered when no credential is configured.
    pub fn missing_credential(&self) -> Result<String, AppError> {
        self.render(
            "missing_credential.html",
            context! {
                page_title => PAGE_TITLE,
                message => MISSING_CREDENTIAL_MESSAGE,
            },
        )
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, AppError> {
        self.env
            .get_template(name)
            .and_then(|t| t.render(ctx))
            .map_err(|e| AppError::Internal(e.into()))
    }
}
