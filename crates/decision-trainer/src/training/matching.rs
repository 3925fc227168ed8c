//! Timed classification exercise: place each item into its category before
//! the countdown runs out.
//!
//! Scoring is per item and fires at most once: the first correct placement of
//! an item awards the reward, every later attempt for that item is inert.
//! Wrong guesses are never penalised, so repeated attempts are free. The
//! exercise terminates when every item is matched or the countdown reaches
//! zero, and publishes its final score on that transition.

use super::domain::{ScoreKey, TrainingError};
use super::registry::SessionScoreRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

pub const DEFAULT_REWARD_PER_ITEM: i32 = 5;

fn default_reward() -> i32 {
    DEFAULT_REWARD_PER_ITEM
}

/// Which highlight signals a category emits after a placement attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackPolicy {
    /// Correct placements highlight green, wrong ones red.
    #[default]
    Symmetric,
    /// Only correct placements highlight; wrong ones leave the panel as is.
    CorrectOnly,
}

impl FeedbackPolicy {
    fn signal(self, correct: bool) -> Option<PlacementFeedback> {
        match (self, correct) {
            (_, true) => Some(PlacementFeedback::Correct),
            (Self::Symmetric, false) => Some(PlacementFeedback::Incorrect),
            (Self::CorrectOnly, false) => None,
        }
    }
}

/// Transient rendering hint for a category panel. Not scored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementFeedback {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    pub correct_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub id: String,
    pub label: String,
}

/// Data that distinguishes one matching exercise from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingExerciseConfig {
    pub key: ScoreKey,
    pub title: String,
    pub items: Vec<ItemSpec>,
    pub categories: Vec<CategorySpec>,
    pub time_budget_seconds: f32,
    #[serde(default = "default_reward")]
    pub reward_per_item: i32,
    #[serde(default)]
    pub feedback: FeedbackPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchingItem {
    pub id: String,
    pub correct_category: String,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchingCategory {
    pub id: String,
    pub label: String,
    pub last_placement: Option<PlacementFeedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementResult {
    pub item: String,
    pub category: String,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<PlacementFeedback>,
    pub score: i32,
    pub terminated: bool,
}

#[derive(Debug, Clone)]
pub struct MatchingExercise {
    key: ScoreKey,
    title: String,
    items: Vec<MatchingItem>,
    categories: Vec<MatchingCategory>,
    reward_per_item: i32,
    feedback: FeedbackPolicy,
    time_budget_seconds: f32,
    remaining_seconds: f32,
    terminated: bool,
    score: i32,
    max_score: i32,
}

impl MatchingExercise {
    pub fn configure(config: &MatchingExerciseConfig) -> Result<Self, TrainingError> {
        let key = &config.key;

        if config.items.is_empty() {
            return Err(TrainingError::Configuration(format!(
                "exercise '{key}' has no items"
            )));
        }
        if !config.time_budget_seconds.is_finite() || config.time_budget_seconds <= 0.0 {
            return Err(TrainingError::Configuration(format!(
                "exercise '{key}' needs a positive time budget, got {}",
                config.time_budget_seconds
            )));
        }
        if config.reward_per_item <= 0 {
            return Err(TrainingError::Configuration(format!(
                "exercise '{key}' needs a positive reward per item"
            )));
        }
        let max_score = i32::try_from(config.items.len())
            .ok()
            .and_then(|count| count.checked_mul(config.reward_per_item))
            .ok_or_else(|| {
                TrainingError::Configuration(format!(
                    "exercise '{key}' can award more points than a score can hold"
                ))
            })?;

        let mut category_ids = HashSet::new();
        for category in &config.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(TrainingError::Configuration(format!(
                    "exercise '{key}' declares category '{}' twice",
                    category.id
                )));
            }
        }

        let mut item_ids = HashSet::new();
        for item in &config.items {
            if !item_ids.insert(item.id.as_str()) {
                return Err(TrainingError::Configuration(format!(
                    "exercise '{key}' declares item '{}' twice",
                    item.id
                )));
            }
            if !category_ids.contains(item.correct_category.as_str()) {
                return Err(TrainingError::Configuration(format!(
                    "item '{}' of exercise '{key}' references unknown category '{}'",
                    item.id, item.correct_category
                )));
            }
        }

        let items = config
            .items
            .iter()
            .map(|spec| MatchingItem {
                id: spec.id.clone(),
                correct_category: spec.correct_category.clone(),
                matched: false,
            })
            .collect();

        let categories = config
            .categories
            .iter()
            .map(|spec| MatchingCategory {
                id: spec.id.clone(),
                label: spec.label.clone(),
                last_placement: None,
            })
            .collect();

        Ok(Self {
            key: key.clone(),
            title: config.title.clone(),
            items,
            categories,
            reward_per_item: config.reward_per_item,
            feedback: config.feedback,
            time_budget_seconds: config.time_budget_seconds,
            remaining_seconds: config.time_budget_seconds,
            terminated: false,
            score: 0,
            max_score,
        })
    }

    /// Drops `item_id` onto `target_category`.
    ///
    /// An item that is already matched reports `correct = false` and never
    /// scores again, though its panel still highlights. Completing the last
    /// item terminates the exercise.
    pub fn attempt_placement(
        &mut self,
        item_id: &str,
        target_category: &str,
        registry: &mut SessionScoreRegistry,
    ) -> Result<PlacementResult, TrainingError> {
        if self.terminated {
            return Err(TrainingError::InvalidState(format!(
                "exercise '{}' has already terminated",
                self.key
            )));
        }

        let item_index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| TrainingError::not_found("item", item_id))?;
        let category_index = self
            .categories
            .iter()
            .position(|category| category.id == target_category)
            .ok_or_else(|| TrainingError::not_found("category", target_category))?;

        let item = &mut self.items[item_index];
        let fits = item.correct_category == target_category;
        let correct = fits && !item.matched;
        if correct {
            item.matched = true;
            self.score += self.reward_per_item;
        }

        let feedback = self.feedback.signal(fits);
        if feedback.is_some() {
            self.categories[category_index].last_placement = feedback;
        }

        debug!(
            exercise = %self.key,
            item = item_id,
            category = target_category,
            correct,
            score = self.score,
            "placement attempted"
        );

        if correct && self.is_complete() {
            self.terminate(registry);
        }

        Ok(PlacementResult {
            item: item_id.to_owned(),
            category: target_category.to_owned(),
            correct,
            feedback,
            score: self.score,
            terminated: self.terminated,
        })
    }

    /// Advances the countdown and returns whether the exercise has terminated.
    ///
    /// Non-finite or non-positive deltas leave the countdown untouched.
    pub fn tick(&mut self, delta_seconds: f32, registry: &mut SessionScoreRegistry) -> bool {
        if self.terminated {
            return true;
        }
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return false;
        }

        let remaining = self.remaining_seconds - delta_seconds;
        if remaining <= 0.0 {
            self.remaining_seconds = 0.0;
            self.terminate(registry);
        } else {
            self.remaining_seconds = remaining;
        }

        self.terminated
    }

    pub fn is_complete(&self) -> bool {
        self.items.iter().all(|item| item.matched)
    }

    /// Freezes the score and publishes it. Repeated calls do nothing.
    pub fn terminate(&mut self, registry: &mut SessionScoreRegistry) {
        if self.terminated {
            return;
        }

        self.terminated = true;
        registry.publish(&self.key, self.score);
        info!(
            exercise = %self.key,
            score = self.score,
            max_score = self.max_score(),
            remaining_seconds = self.remaining_seconds,
            "matching exercise terminated"
        );
    }

    pub fn key(&self) -> &ScoreKey {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn max_score(&self) -> i32 {
        self.max_score
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn time_budget_seconds(&self) -> f32 {
        self.time_budget_seconds
    }

    pub fn remaining_seconds(&self) -> f32 {
        self.remaining_seconds
    }

    /// Countdown as the label shows it, rounded up to whole seconds.
    pub fn remaining_display_seconds(&self) -> u32 {
        self.remaining_seconds.max(0.0).ceil() as u32
    }

    pub fn matched_count(&self) -> usize {
        self.items.iter().filter(|item| item.matched).count()
    }

    pub fn items(&self) -> &[MatchingItem] {
        &self.items
    }

    pub fn categories(&self) -> &[MatchingCategory] {
        &self.categories
    }

    pub fn view(&self) -> MatchingExerciseView {
        MatchingExerciseView {
            key: self.key.clone(),
            title: self.title.clone(),
            score: self.score,
            max_score: self.max_score(),
            remaining_seconds: self.remaining_display_seconds(),
            terminated: self.terminated,
            matched_items: self.matched_count(),
            total_items: self.items.len(),
            items: self
                .items
                .iter()
                .map(|item| ItemView {
                    id: item.id.clone(),
                    matched: item.matched,
                })
                .collect(),
            categories: self
                .categories
                .iter()
                .map(|category| CategoryView {
                    id: category.id.clone(),
                    label: category.label.clone(),
                    last_placement: category.last_placement,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: String,
    pub matched: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_placement: Option<PlacementFeedback>,
}

/// Host-facing snapshot. Correct categories stay hidden.
#[derive(Debug, Clone, Serialize)]
pub struct MatchingExerciseView {
    pub key: ScoreKey,
    pub title: String,
    pub score: i32,
    pub max_score: i32,
    pub remaining_seconds: u32,
    pub terminated: bool,
    pub matched_items: usize,
    pub total_items: usize,
    pub items: Vec<ItemView>,
    pub categories: Vec<CategoryView>,
}
