use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::curriculum::Curriculum;
use super::decision::{DecisionPoint, DecisionPointView};
use super::domain::TrainingError;
use super::matching::{MatchingExercise, MatchingExerciseView, PlacementResult};
use super::report::AggregatedReport;
use super::repository::{
    RepositoryError, SessionId, SessionRecord, SessionRecordView, SessionRepository,
};
use super::session::{AcceptedDecision, TrainingSession};

/// Service composing the curriculum with session storage.
pub struct TrainingSessionService<R> {
    repository: Arc<R>,
    curriculum: Curriculum,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

impl<R> TrainingSessionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, curriculum: Curriculum) -> Self {
        Self {
            repository,
            curriculum,
        }
    }

    /// Start a fresh session from the configured curriculum.
    pub fn start(&self) -> Result<SessionRecord, SessionServiceError> {
        let session = TrainingSession::new(self.curriculum.clone())?;
        let record = SessionRecord {
            id: next_session_id(),
            started_at: Utc::now(),
            session,
        };

        let stored = self.repository.insert(record)?;
        info!(session = %stored.id, "training session started");
        Ok(stored)
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionRecord, SessionServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn place(
        &self,
        id: &SessionId,
        exercise: &str,
        item: &str,
        category: &str,
    ) -> Result<PlacementResult, SessionServiceError> {
        let result = self.repository.modify(id, |record| {
            record.session.attempt_placement(exercise, item, category)
        })??;
        Ok(result)
    }

    pub fn tick(
        &self,
        id: &SessionId,
        exercise: &str,
        delta_seconds: f32,
    ) -> Result<MatchingExerciseView, SessionServiceError> {
        let view = self.repository.modify(id, |record| {
            record.session.tick(exercise, delta_seconds)?;
            record
                .session
                .exercise(exercise)
                .map(MatchingExercise::view)
                .ok_or_else(|| TrainingError::not_found("exercise", exercise))
        })??;
        Ok(view)
    }

    pub fn select(
        &self,
        id: &SessionId,
        decision: &str,
        option: &str,
    ) -> Result<DecisionPointView, SessionServiceError> {
        let view = self.repository.modify(id, |record| {
            record.session.select(decision, option)?;
            record
                .session
                .decision(decision)
                .map(DecisionPoint::view)
                .ok_or_else(|| TrainingError::not_found("decision", decision))
        })??;
        Ok(view)
    }

    pub fn accept(
        &self,
        id: &SessionId,
        decision: &str,
    ) -> Result<AcceptedDecision, SessionServiceError> {
        let accepted = self
            .repository
            .modify(id, |record| record.session.accept(decision))??;
        Ok(accepted)
    }

    /// Abandon the session's progress and start it over under the same id.
    pub fn reset(&self, id: &SessionId) -> Result<SessionRecordView, SessionServiceError> {
        let view = self.repository.modify(id, |record| {
            record.session.abandon()?;
            record.started_at = Utc::now();
            Ok::<_, TrainingError>(record.view())
        })??;
        info!(session = %id, "training session reset");
        Ok(view)
    }

    pub fn report(&self, id: &SessionId) -> Result<AggregatedReport, SessionServiceError> {
        Ok(self.get(id)?.session.report())
    }
}

/// Error raised by the session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error(transparent)]
    Training(#[from] TrainingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
