use decision_trainer::training::{RepositoryError, SessionId, SessionRecord, SessionRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session store. Sessions live until the process exits.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store mutex poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn modify<T, F>(&self, id: &SessionId, op: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut SessionRecord) -> T,
    {
        let mut guard = self.lock()?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(op(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use decision_trainer::training::{Curriculum, TrainingSession};

    fn record(id: &str) -> SessionRecord {
        SessionRecord {
            id: SessionId(id.to_string()),
            started_at: Utc::now(),
            session: TrainingSession::new(Curriculum::standard()).expect("session"),
        }
    }

    #[test]
    fn duplicate_ids_conflict() {
        let repository = InMemorySessionRepository::default();
        repository.insert(record("session-1")).expect("insert");
        assert!(matches!(
            repository.insert(record("session-1")),
            Err(RepositoryError::Conflict)
        ));
    }

    #[test]
    fn modify_applies_in_place() {
        let repository = InMemorySessionRepository::default();
        let id = repository.insert(record("session-2")).expect("insert").id;

        let terminated = repository
            .modify(&id, |record| record.session.tick("priority_sort_2", 31.0))
            .expect("record present")
            .expect("known exercise");
        assert!(terminated);

        let stored = repository.fetch(&id).expect("fetch").expect("present");
        assert!(stored
            .session
            .exercise("priority_sort_2")
            .is_some_and(|exercise| exercise.is_terminated()));
    }

    #[test]
    fn modify_on_missing_session_is_not_found() {
        let repository = InMemorySessionRepository::default();
        let result = repository.modify(&SessionId("nope".to_string()), |_| ());
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }
}
