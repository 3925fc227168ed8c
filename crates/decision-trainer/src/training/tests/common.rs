use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::training::curriculum::{FIRST_SORT, SECOND_SORT};
use crate::training::repository::{
    RepositoryError, SessionId, SessionRecord, SessionRepository,
};
use crate::training::{
    session_router, CategorySpec, Curriculum, FeedbackPolicy, ItemSpec, MatchingExerciseConfig,
    Quadrant, ScoreKey, TrainingSessionService,
};

/// Answer key of the first priority sort, by card number.
pub(super) const FIRST_SORT_ANSWERS: [(&str, Quadrant); 8] = [
    ("task_card_1", Quadrant::UrgentImportant),
    ("task_card_2", Quadrant::UrgentNotImportant),
    ("task_card_3", Quadrant::NotUrgentImportant),
    ("task_card_4", Quadrant::NotUrgentNotImportant),
    ("task_card_5", Quadrant::UrgentImportant),
    ("task_card_6", Quadrant::UrgentNotImportant),
    ("task_card_7", Quadrant::NotUrgentImportant),
    ("task_card_8", Quadrant::NotUrgentNotImportant),
];

pub(super) const SECOND_SORT_ANSWERS: [(&str, Quadrant); 8] = [
    ("task_card_1", Quadrant::NotUrgentImportant),
    ("task_card_2", Quadrant::UrgentImportant),
    ("task_card_3", Quadrant::NotUrgentImportant),
    ("task_card_4", Quadrant::NotUrgentNotImportant),
    ("task_card_5", Quadrant::UrgentNotImportant),
    ("task_card_6", Quadrant::UrgentImportant),
    ("task_card_7", Quadrant::UrgentNotImportant),
    ("task_card_8", Quadrant::NotUrgentImportant),
];

pub(super) fn answers_for(exercise: &str) -> &'static [(&'static str, Quadrant); 8] {
    if exercise == SECOND_SORT {
        &SECOND_SORT_ANSWERS
    } else {
        &FIRST_SORT_ANSWERS
    }
}

/// A quadrant that is never the right answer for `correct`.
pub(super) fn wrong_quadrant(correct: Quadrant) -> Quadrant {
    match correct {
        Quadrant::UrgentImportant => Quadrant::NotUrgentNotImportant,
        _ => Quadrant::UrgentImportant,
    }
}

pub(super) fn sort_config(seconds: f32, feedback: FeedbackPolicy) -> MatchingExerciseConfig {
    MatchingExerciseConfig {
        key: ScoreKey::from(FIRST_SORT),
        title: "Sort the backlog".to_string(),
        items: FIRST_SORT_ANSWERS
            .iter()
            .map(|(id, quadrant)| ItemSpec {
                id: (*id).to_string(),
                correct_category: quadrant.key().to_string(),
            })
            .collect(),
        categories: Quadrant::ordered()
            .into_iter()
            .map(|quadrant| CategorySpec {
                id: quadrant.key().to_string(),
                label: quadrant.label().to_string(),
            })
            .collect(),
        time_budget_seconds: seconds,
        reward_per_item: 5,
        feedback,
    }
}

pub(super) fn build_service() -> (TrainingSessionService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = TrainingSessionService::new(repository.clone(), Curriculum::standard());
    (service, repository)
}

pub(super) fn session_router_with_service(
    service: TrainingSessionService<MemoryRepository>,
) -> axum::Router {
    session_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn modify<T, F>(&self, id: &SessionId, op: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut SessionRecord) -> T,
    {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(op(record))
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn modify<T, F>(&self, _id: &SessionId, _op: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut SessionRecord) -> T,
    {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
