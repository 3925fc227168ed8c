use super::super::domain::{ScoreKey, SkillCategory, TrainingError};
use super::super::registry::SessionScoreRegistry;
use super::narrative::category_summary;
use super::views::{AggregatedReport, CategoryResult, LevelRating, PerformanceBand};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Registry keys summed into one skill category, with its denominator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub category: SkillCategory,
    pub keys: Vec<ScoreKey>,
    pub max: u32,
}

/// Category membership and maxima for the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDefinition {
    categories: Vec<CategoryDefinition>,
    total_max: u32,
}

impl ReportDefinition {
    pub fn new(categories: Vec<CategoryDefinition>, total_max: u32) -> Self {
        Self {
            categories,
            total_max,
        }
    }

    fn validate(&self) -> Result<(), TrainingError> {
        if self.categories.is_empty() {
            return Err(TrainingError::Configuration(
                "report needs at least one category".to_string(),
            ));
        }
        if self.total_max == 0 {
            return Err(TrainingError::Configuration(
                "report total maximum must be positive".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for definition in &self.categories {
            if !seen.insert(definition.category) {
                return Err(TrainingError::Configuration(format!(
                    "category {} is defined twice",
                    definition.category.label()
                )));
            }
            if definition.max == 0 {
                return Err(TrainingError::Configuration(format!(
                    "category {} needs a positive maximum",
                    definition.category.label()
                )));
            }
        }

        Ok(())
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn total_max(&self) -> u32 {
        self.total_max
    }

    /// Every key any category reads, each listed once in definition order.
    pub fn tracked_keys(&self) -> Vec<&ScoreKey> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .flat_map(|definition| definition.keys.iter())
            .filter(|key| seen.insert(*key))
            .collect()
    }
}

/// Pure read-side projection of a session registry into a graded report.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    definition: ReportDefinition,
}

impl ScoreAggregator {
    /// Fails with a configuration error when a maximum is zero or a
    /// category is defined twice.
    pub fn new(definition: ReportDefinition) -> Result<Self, TrainingError> {
        definition.validate()?;
        Ok(Self { definition })
    }

    pub fn definition(&self) -> &ReportDefinition {
        &self.definition
    }

    pub fn compute_report(&self, registry: &SessionScoreRegistry) -> AggregatedReport {
        let total_score: i64 = self
            .definition
            .tracked_keys()
            .into_iter()
            .map(|key| i64::from(registry.read(key)))
            .sum();
        let total_grade_percent = percent_of(total_score, self.definition.total_max);

        let categories = self
            .definition
            .categories
            .iter()
            .map(|definition| {
                let score: i64 = definition
                    .keys
                    .iter()
                    .map(|key| i64::from(registry.read(key)))
                    .sum();
                let percent = percent_of(score, definition.max);
                let band = PerformanceBand::from_percent(percent);
                CategoryResult {
                    category: definition.category,
                    label: definition.category.label(),
                    score,
                    max: definition.max,
                    percent,
                    band,
                    summary: category_summary(definition.category, band),
                }
            })
            .collect();

        let level_rating = LevelRating::from_percent(total_grade_percent);

        AggregatedReport {
            total_score,
            total_max: self.definition.total_max,
            total_grade_percent,
            categories,
            level_rating,
            level_label: level_rating.label(),
        }
    }
}

fn percent_of(score: i64, max: u32) -> f32 {
    ((score as f64 / f64::from(max)) * 100.0) as f32
}
