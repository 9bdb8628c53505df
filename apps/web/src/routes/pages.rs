//! Axum route handlers for the interview-question page.
//!
//! Every failure in a generate pass is caught here and shown inline; the
//! session's stored result only changes when the whole pass succeeds.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        StatusCode,
    },
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use bytes::Bytes;
use tracing::{error, info};
use uuid::Uuid;

use crate::document::{is_pdf_upload, load_resume};
use crate::errors::AppError;
use crate::questions::QuestionGenerator;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::ui::{Notice, NoticeKind};

pub const SESSION_COOKIE: &str = "helphire_session";
pub const DOWNLOAD_FILE_NAME: &str = "interview_questions.txt";
const RESUME_FIELD: &str = "resume";
const SUCCESS_MESSAGE: &str = "Questions generated successfully!";

/// Resolves the caller's session id, issuing a fresh cookie when absent or invalid.
fn session_id(jar: CookieJar) -> (CookieJar, Uuid) {
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        return (jar, id);
    }

    let id = Uuid::new_v4();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

fn missing_credential_page(state: &AppState, jar: CookieJar) -> Result<Response, AppError> {
    let html = state.pages.missing_credential()?;
    Ok((StatusCode::SERVICE_UNAVAILABLE, jar, Html(html)).into_response())
}

/// GET /
pub async fn handle_index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, session_id) = session_id(jar);
    if state.generator.is_none() {
        return missing_credential_page(&state, jar);
    }

    let session = state.sessions.snapshot(session_id).await;
    let html = state.pages.index(session.questions.as_deref(), None)?;
    Ok((jar, Html(html)).into_response())
}

/// POST /generate
///
/// One handling pass: read upload → extract text → generate → commit.
pub async fn handle_generate(
    State(state): State<AppState>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (jar, session_id) = session_id(jar);
    let generator = match state.generator() {
        Ok(generator) => generator,
        Err(_) => return missing_credential_page(&state, jar),
    };

    let notice = match generate_for_session(&state.sessions, generator, session_id, multipart).await
    {
        Ok(()) => Notice::success(SUCCESS_MESSAGE),
        Err(e) => {
            error!("Generate pass for session {session_id} failed: {e}");
            Notice::error(e.user_message())
        }
    };

    let session = state.sessions.snapshot(session_id).await;
    if notice.kind == NoticeKind::Success {
        info!(
            "Stored generated questions for session {session_id} ({} chars of resume text)",
            session.resume_text.as_deref().map(str::len).unwrap_or(0)
        );
    }
    let html = state.pages.index(session.questions.as_deref(), Some(&notice))?;
    Ok((jar, Html(html)).into_response())
}

/// GET /download
///
/// The stored markdown, byte for byte, as a plain-text attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, session_id) = session_id(jar);
    let questions = state
        .sessions
        .snapshot(session_id)
        .await
        .questions
        .ok_or_else(|| AppError::NotFound("No generated questions to download".to_string()))?;

    Ok((
        jar,
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        questions,
    )
        .into_response())
}

async fn generate_for_session(
    sessions: &SessionStore,
    generator: &QuestionGenerator,
    session_id: Uuid,
    multipart: Multipart,
) -> Result<(), AppError> {
    let pdf = read_resume_upload(multipart).await?;
    let resume_text = load_resume(pdf).await?;
    let questions = generator.generate(&resume_text).await?;
    sessions
        .commit_generation(session_id, resume_text, questions)
        .await;
    Ok(())
}

/// Pulls the single `resume` file out of the form, rejecting non-PDF uploads.
async fn read_resume_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(upload_error)?;

        if data.is_empty() {
            break;
        }
        if !is_pdf_upload(file_name.as_deref(), content_type.as_deref()) {
            return Err(AppError::DocumentRead(
                "only PDF files are supported".to_string(),
            ));
        }
        return Ok(data);
    }

    Err(AppError::Validation("please upload a resume PDF".to_string()))
}

/// The body-limit layer surfaces an oversized form as a 413 multipart error.
fn upload_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation("file exceeds the upload size limit".to_string());
    }
    AppError::Validation(format!("invalid upload: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{header::COOKIE, header::SET_COOKIE, Request},
        Router,
    };
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::routes::build_router;
    use crate::test_support::{down_generator, pdf_with_pages, static_generator};

    const BOUNDARY: &str = "helphire-test-boundary";
    const REPLY: &str = "## Technical Experience\n- Why Go channels?\n\n## Career Goals\n- Why us?\n";

    fn app_with(state: AppState) -> Router {
        build_router(state)
    }

    fn state_with(generator: Option<QuestionGenerator>) -> AppState {
        AppState::new(Config::default(), generator).unwrap()
    }

    fn cookie_for(id: Uuid) -> String {
        format!("{SESSION_COOKIE}={id}")
    }

    fn upload(id: Uuid, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/generate")
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .header(COOKIE, cookie_for(id))
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str, id: Option<Uuid>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(id) = id {
            builder = builder.header(COOKIE, cookie_for(id));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_without_credential_only_shows_error() {
        let app = app_with(state_with(None));
        let response = app.oneshot(get("/", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let html = body_string(response).await;
        assert!(html.contains("Mistral API key not found in environment variables"));
        assert!(!html.contains("Generate Questions"));
    }

    #[tokio::test]
    async fn test_generate_without_credential_is_not_offered() {
        let app = app_with(state_with(None));
        let pdf = pdf_with_pages(&["Backend engineer"]);
        let response = app
            .oneshot(upload(Uuid::new_v4(), "cv.pdf", "application/pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_first_visit_issues_session_cookie_and_hint() {
        let app = app_with(state_with(Some(static_generator(REPLY))));
        let response = app.oneshot(get("/", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
        assert!(cookie.contains("HttpOnly"));
        let html = body_string(response).await;
        assert!(html.contains("to start"));
    }

    #[tokio::test]
    async fn test_successful_generation_is_stored_and_downloadable() {
        let state = state_with(Some(static_generator(REPLY)));
        let app = app_with(state.clone());
        let id = Uuid::new_v4();
        let pdf = pdf_with_pages(&["Backend engineer", "Go concurrency"]);

        let response = app
            .clone()
            .oneshot(upload(id, "resume.pdf", "application/pdf", &pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(SUCCESS_MESSAGE));
        assert!(html.contains("<h2>Technical Experience</h2>"));

        let session = state.sessions.snapshot(id).await;
        assert_eq!(session.questions.as_deref(), Some(REPLY));
        let resume_text = session.resume_text.unwrap();
        assert!(resume_text.contains("Backend"));

        let download = app.oneshot(get("/download", Some(id))).await.unwrap();
        assert_eq!(download.status(), StatusCode::OK);
        assert_eq!(
            download.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"interview_questions.txt\""
        );
        assert!(download.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        let bytes = to_bytes(download.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], REPLY.as_bytes());
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_previous_result() {
        let state = state_with(Some(down_generator()));
        let id = Uuid::new_v4();
        state
            .sessions
            .commit_generation(id, "old resume".into(), "## Previous\n- kept?".into())
            .await;
        let pdf = pdf_with_pages(&["Backend engineer"]);

        let response = app_with(state.clone())
            .oneshot(upload(id, "resume.pdf", "application/pdf", &pdf))
            .await
            .unwrap();
        let html = body_string(response).await;

        assert!(html.contains("notice error"));
        assert!(html.contains("Error processing resume"));
        assert!(html.contains("<h2>Previous</h2>"));
        let session = state.sessions.snapshot(id).await;
        assert_eq!(session.questions.as_deref(), Some("## Previous\n- kept?"));
        assert_eq!(session.resume_text.as_deref(), Some("old resume"));
    }

    #[tokio::test]
    async fn test_failed_first_generation_leaves_no_result() {
        let state = state_with(Some(down_generator()));
        let id = Uuid::new_v4();
        let pdf = pdf_with_pages(&["Backend engineer"]);

        let response = app_with(state.clone())
            .oneshot(upload(id, "resume.pdf", "application/pdf", &pdf))
            .await
            .unwrap();
        let html = body_string(response).await;

        assert!(html.contains("Error processing resume"));
        assert!(html.contains("to start"));
        assert!(state.sessions.snapshot(id).await.questions.is_none());
    }

    #[tokio::test]
    async fn test_unparseable_pdf_shows_document_error() {
        let state = state_with(Some(static_generator(REPLY)));
        let id = Uuid::new_v4();

        let response = app_with(state.clone())
            .oneshot(upload(id, "resume.pdf", "application/pdf", b"not really a pdf"))
            .await
            .unwrap();
        let html = body_string(response).await;

        assert!(html.contains("could not read PDF"));
        assert!(state.sessions.snapshot(id).await.questions.is_none());
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected_inline() {
        let config = Config {
            max_upload_bytes: 1024,
            ..Config::default()
        };
        let state = AppState::new(config, Some(static_generator(REPLY))).unwrap();
        let id = Uuid::new_v4();
        state
            .sessions
            .commit_generation(id, "old resume".into(), "## Previous\n- kept?".into())
            .await;

        let response = app_with(state.clone())
            .oneshot(upload(id, "resume.pdf", "application/pdf", &[b'x'; 4096]))
            .await
            .unwrap();
        let html = body_string(response).await;

        assert!(html.contains("notice error"));
        assert!(html.contains("file exceeds the upload size limit"));
        let session = state.sessions.snapshot(id).await;
        assert_eq!(session.questions.as_deref(), Some("## Previous\n- kept?"));
        assert_eq!(session.resume_text.as_deref(), Some("old resume"));
    }

    #[tokio::test]
    async fn test_pdf_without_text_stores_nothing() {
        let state = state_with(Some(static_generator(REPLY)));
        let id = Uuid::new_v4();
        let pdf = pdf_with_pages(&["", ""]);

        let response = app_with(state.clone())
            .oneshot(upload(id, "scan.pdf", "application/pdf", &pdf))
            .await
            .unwrap();
        let html = body_string(response).await;

        assert!(html.contains("no extractable text"));
        assert!(state.sessions.snapshot(id).await.questions.is_none());
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_rejected() {
        let state = state_with(Some(static_generator(REPLY)));
        let response = app_with(state)
            .oneshot(upload(Uuid::new_v4(), "resume.txt", "text/plain", b"plain text resume"))
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("only PDF files are supported"));
    }

    #[tokio::test]
    async fn test_download_without_result_is_404() {
        let app = app_with(state_with(Some(static_generator(REPLY))));
        let response = app.oneshot(get("/download", Some(Uuid::new_v4()))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_reports_llm_configuration() {
        let app = app_with(state_with(None));
        let response = app.oneshot(get("/health", None)).await.unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["llm_configured"], false);
        let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["llm_configured", "service", "status", "version"]);
    }
}
