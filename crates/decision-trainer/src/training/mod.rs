//! Scoring engine for the decision-training simulation.
//!
//! Matching exercises and decision points publish their terminal scores into
//! a per-session registry; the report module grades the registry on demand.

pub mod curriculum;
pub mod decision;
pub mod domain;
pub mod matching;
pub mod registry;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use curriculum::Curriculum;
pub use decision::{DecisionPoint, DecisionPointConfig, OptionSpec, ScoreTuple};
pub use domain::{Quadrant, ScoreKey, SkillCategory, TrainingError};
pub use matching::{
    CategorySpec, FeedbackPolicy, ItemSpec, MatchingExercise, MatchingExerciseConfig,
    PlacementFeedback, PlacementResult,
};
pub use registry::SessionScoreRegistry;
pub use report::{
    AggregatedReport, CategoryDefinition, LevelRating, PerformanceBand, ReportDefinition,
    ScoreAggregator,
};
pub use repository::{
    RepositoryError, SessionId, SessionRecord, SessionRecordView, SessionRepository,
};
pub use router::session_router;
pub use service::{SessionServiceError, TrainingSessionService};
pub use session::{AcceptedDecision, SessionView, TrainingSession};
