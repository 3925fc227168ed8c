use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::session::{SessionView, TrainingSession};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Repository record wrapping a live session with its metadata.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    pub session: TrainingSession,
}

impl SessionRecord {
    pub fn view(&self) -> SessionRecordView {
        SessionRecordView {
            session_id: self.id.clone(),
            started_at: self.started_at,
            state: self.session.view(),
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
    /// Runs `op` on the stored record with exclusive access, so concurrent
    /// requests against one session never interleave their writes.
    fn modify<T, F>(&self, id: &SessionId, op: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut SessionRecord) -> T;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionRecordView {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub state: SessionView,
}
