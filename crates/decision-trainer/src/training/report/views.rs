use super::super::domain::SkillCategory;
use serde::Serialize;

/// Percentages at or below this value fall into the lower band.
pub const BAND_THRESHOLD_PERCENT: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    NeedsImprovement,
    Proficient,
}

impl PerformanceBand {
    pub fn from_percent(percent: f32) -> Self {
        if percent <= BAND_THRESHOLD_PERCENT {
            Self::NeedsImprovement
        } else {
            Self::Proficient
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NeedsImprovement => "Needs Improvement",
            Self::Proficient => "Proficient",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelRating {
    NoviceStrategist,
    MasterTechnician,
}

impl LevelRating {
    pub fn from_percent(percent: f32) -> Self {
        match PerformanceBand::from_percent(percent) {
            PerformanceBand::NeedsImprovement => Self::NoviceStrategist,
            PerformanceBand::Proficient => Self::MasterTechnician,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NoviceStrategist => "Novice Strategist",
            Self::MasterTechnician => "Master Technician",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResult {
    pub category: SkillCategory,
    pub label: &'static str,
    pub score: i64,
    pub max: u32,
    pub percent: f32,
    pub band: PerformanceBand,
    pub summary: &'static str,
}

/// Final performance report. Derived on demand, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedReport {
    pub total_score: i64,
    pub total_max: u32,
    pub total_grade_percent: f32,
    pub categories: Vec<CategoryResult>,
    pub level_rating: LevelRating,
    pub level_label: &'static str,
}

impl AggregatedReport {
    pub fn category(&self, category: SkillCategory) -> Option<&CategoryResult> {
        self.categories
            .iter()
            .find(|result| result.category == category)
    }
}
