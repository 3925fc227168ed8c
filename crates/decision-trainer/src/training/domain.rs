use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity under which an exercise or decision publishes its score.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreKey(pub String);

impl ScoreKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScoreKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Eisenhower quadrants used as buckets by the priority sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    UrgentImportant,
    UrgentNotImportant,
    NotUrgentImportant,
    NotUrgentNotImportant,
}

impl Quadrant {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::UrgentImportant,
            Self::UrgentNotImportant,
            Self::NotUrgentImportant,
            Self::NotUrgentNotImportant,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::UrgentImportant => "urgent_important",
            Self::UrgentNotImportant => "urgent_not_important",
            Self::NotUrgentImportant => "not_urgent_important",
            Self::NotUrgentNotImportant => "not_urgent_not_important",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UrgentImportant => "Urgent & Important",
            Self::UrgentNotImportant => "Urgent, Not Important",
            Self::NotUrgentImportant => "Not Urgent, Important",
            Self::NotUrgentNotImportant => "Not Urgent, Not Important",
        }
    }
}

/// Skill areas the final report grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    TimeManagement,
    Communication,
    Teamwork,
    ProblemSolving,
}

impl SkillCategory {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::TimeManagement,
            Self::Communication,
            Self::Teamwork,
            Self::ProblemSolving,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TimeManagement => "Time Management",
            Self::Communication => "Effective Communication",
            Self::Teamwork => "Teamwork",
            Self::ProblemSolving => "Problem Solving",
        }
    }
}

/// Failure kinds shared by every engine operation.
///
/// A rejected call never leaves partial mutations behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrainingError {
    /// Malformed setup; the instance never becomes usable.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Operation attempted in a state that forbids it.
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

impl TrainingError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
