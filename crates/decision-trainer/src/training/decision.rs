use super::domain::{ScoreKey, TrainingError};
use super::registry::SessionScoreRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Points an option awards when accepted.
///
/// Either a single value or a sustainability/satisfaction pair; the decision's
/// score is always the sum of the components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreTuple {
    Scalar(i32),
    Pair {
        sustainability: i32,
        satisfaction: i32,
    },
}

impl ScoreTuple {
    pub const fn pair(sustainability: i32, satisfaction: i32) -> Self {
        Self::Pair {
            sustainability,
            satisfaction,
        }
    }

    pub const fn total(self) -> i32 {
        match self {
            Self::Scalar(value) => value,
            Self::Pair {
                sustainability,
                satisfaction,
            } => sustainability + satisfaction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    pub id: String,
    pub label: String,
    pub score: ScoreTuple,
}

/// Option table for one decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionPointConfig {
    pub key: ScoreKey,
    pub title: String,
    pub options: Vec<OptionSpec>,
    /// Score whose value is added to this decision's own score on the
    /// feedback panel. Only the decision's own score is published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_base: Option<ScoreKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_max: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOption {
    pub id: String,
    pub label: String,
    pub score: ScoreTuple,
    pub consumed: bool,
}

#[derive(Debug, Clone)]
pub struct DecisionPoint {
    key: ScoreKey,
    title: String,
    options: Vec<DecisionOption>,
    selected: Option<usize>,
    accepted: bool,
    score: Option<i32>,
}

impl DecisionPoint {
    pub fn configure(config: &DecisionPointConfig) -> Result<Self, TrainingError> {
        if config.options.is_empty() {
            return Err(TrainingError::Configuration(format!(
                "decision '{}' has no options",
                config.key
            )));
        }

        let mut seen = HashSet::new();
        for option in &config.options {
            if !seen.insert(option.id.as_str()) {
                return Err(TrainingError::Configuration(format!(
                    "decision '{}' declares option '{}' twice",
                    config.key, option.id
                )));
            }
        }

        let options = config
            .options
            .iter()
            .map(|spec| DecisionOption {
                id: spec.id.clone(),
                label: spec.label.clone(),
                score: spec.score,
                consumed: false,
            })
            .collect();

        Ok(Self {
            key: config.key.clone(),
            title: config.title.clone(),
            options,
            selected: None,
            accepted: false,
            score: None,
        })
    }

    /// Sets the pending choice. May be changed freely until acceptance.
    pub fn select(&mut self, option_id: &str) -> Result<(), TrainingError> {
        if self.accepted {
            return Err(self.already_accepted());
        }

        let index = self
            .options
            .iter()
            .position(|option| option.id == option_id)
            .ok_or_else(|| TrainingError::not_found("option", option_id))?;

        self.selected = Some(index);
        debug!(decision = %self.key, option = option_id, "option selected");
        Ok(())
    }

    /// Locks in the pending choice and publishes its score.
    pub fn accept(&mut self, registry: &mut SessionScoreRegistry) -> Result<i32, TrainingError> {
        if self.accepted {
            return Err(self.already_accepted());
        }
        let index = self.selected.ok_or_else(|| {
            TrainingError::InvalidState(format!("decision '{}' has no selected option", self.key))
        })?;

        let option = &mut self.options[index];
        option.consumed = true;
        let score = option.score.total();

        self.accepted = true;
        self.score = Some(score);
        registry.publish(&self.key, score);

        info!(decision = %self.key, option = %option.id, score, "decision accepted");
        Ok(score)
    }

    fn already_accepted(&self) -> TrainingError {
        TrainingError::InvalidState(format!("decision '{}' was already accepted", self.key))
    }

    pub fn key(&self) -> &ScoreKey {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[DecisionOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<&DecisionOption> {
        self.selected.map(|index| &self.options[index])
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// `None` until the decision is accepted.
    pub fn score(&self) -> Option<i32> {
        self.score
    }

    pub fn view(&self) -> DecisionPointView {
        DecisionPointView {
            key: self.key.clone(),
            title: self.title.clone(),
            options: self
                .options
                .iter()
                .map(|option| DecisionOptionView {
                    id: option.id.clone(),
                    label: option.label.clone(),
                    consumed: option.consumed,
                })
                .collect(),
            selected: self.selected().map(|option| option.id.clone()),
            accepted: self.accepted,
            score: self.score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionOptionView {
    pub id: String,
    pub label: String,
    pub consumed: bool,
}

/// Host-facing snapshot. Option weights stay hidden until acceptance.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionPointView {
    pub key: ScoreKey,
    pub title: String,
    pub options: Vec<DecisionOptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
}
