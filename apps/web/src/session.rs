//! Per-session state. Each browser session owns one `SessionState`; nothing
//! is shared across sessions and nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Derived state for the single resume a session is working with.
///
/// `questions` is `Some` iff a generation has succeeded in this session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub resume_text: Option<String>,
    pub questions: Option<String>,
    last_seen: Instant,
}

impl SessionState {
    fn new() -> Self {
        Self {
            resume_text: None,
            questions: None,
            last_seen: Instant::now(),
        }
    }
}

/// In-memory map of session id to state, pruned lazily on access.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionState>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Returns a copy of the session's state, creating it if unknown.
    /// Never hold the lock across PDF parsing or LLM calls; work on the copy.
    pub async fn snapshot(&self, id: Uuid) -> SessionState {
        let mut sessions = self.inner.write().await;
        self.prune(&mut sessions);
        let state = sessions.entry(id).or_insert_with(SessionState::new);
        state.last_seen = Instant::now();
        state.clone()
    }

    /// Replaces the session's derived state after a successful generation.
    pub async fn commit_generation(&self, id: Uuid, resume_text: String, questions: String) {
        let mut sessions = self.inner.write().await;
        let state = sessions.entry(id).or_insert_with(SessionState::new);
        state.resume_text = Some(resume_text);
        state.questions = Some(questions);
        state.last_seen = Instant::now();
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, SessionState>) {
        let before = sessions.len();
        let timeout = self.idle_timeout;
        sessions.retain(|_, s| s.last_seen.elapsed() < timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {evicted} idle session(s)");
        }
    }
}
