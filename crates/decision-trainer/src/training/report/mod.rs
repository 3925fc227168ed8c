mod aggregator;
mod narrative;
pub mod views;

pub use aggregator::{CategoryDefinition, ReportDefinition, ScoreAggregator};
pub use views::{AggregatedReport, CategoryResult, LevelRating, PerformanceBand};
