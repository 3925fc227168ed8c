use super::curriculum::{ensure_unique_keys, Curriculum};
use super::decision::{DecisionPoint, DecisionPointView};
use super::domain::{ScoreKey, TrainingError};
use super::matching::{MatchingExercise, MatchingExerciseView, PlacementResult};
use super::registry::SessionScoreRegistry;
use super::report::{AggregatedReport, ScoreAggregator};
use serde::Serialize;
use tracing::info;

/// One playthrough: every exercise and decision of a curriculum plus the
/// registry they publish into.
///
/// The session is the only owner of its registry, so scores from one session
/// can never leak into another.
#[derive(Debug, Clone)]
pub struct TrainingSession {
    curriculum: Curriculum,
    aggregator: ScoreAggregator,
    registry: SessionScoreRegistry,
    exercises: Vec<MatchingExercise>,
    decisions: Vec<DecisionPoint>,
}

/// Outcome of accepting a decision, including the combined figure shown on
/// the feedback panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedDecision {
    pub decision: ScoreKey,
    pub option: String,
    pub score: i32,
    pub feedback_total: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_max: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub finished: bool,
    pub exercises: Vec<MatchingExerciseView>,
    pub decisions: Vec<DecisionPointView>,
}

impl TrainingSession {
    pub fn new(curriculum: Curriculum) -> Result<Self, TrainingError> {
        ensure_unique_keys(&curriculum)?;
        let aggregator = ScoreAggregator::new(curriculum.report().clone())?;
        let (exercises, decisions) = instantiate(&curriculum)?;

        Ok(Self {
            curriculum,
            aggregator,
            registry: SessionScoreRegistry::new(),
            exercises,
            decisions,
        })
    }

    pub fn attempt_placement(
        &mut self,
        exercise: &str,
        item: &str,
        category: &str,
    ) -> Result<PlacementResult, TrainingError> {
        find_exercise(&mut self.exercises, exercise)?.attempt_placement(
            item,
            category,
            &mut self.registry,
        )
    }

    /// Advances one exercise's countdown; returns whether it has terminated.
    pub fn tick(&mut self, exercise: &str, delta_seconds: f32) -> Result<bool, TrainingError> {
        let exercise = find_exercise(&mut self.exercises, exercise)?;
        Ok(exercise.tick(delta_seconds, &mut self.registry))
    }

    pub fn select(&mut self, decision: &str, option: &str) -> Result<(), TrainingError> {
        find_decision(&mut self.decisions, decision)?.select(option)
    }

    pub fn accept(&mut self, decision: &str) -> Result<AcceptedDecision, TrainingError> {
        let point = find_decision(&mut self.decisions, decision)?;
        let score = point.accept(&mut self.registry)?;
        let option = point
            .selected()
            .map(|option| option.id.clone())
            .unwrap_or_default();

        let config = self
            .curriculum
            .decisions()
            .iter()
            .find(|config| config.key.as_str() == decision);
        let base = config
            .and_then(|config| config.feedback_base.as_ref())
            .map(|key| self.registry.read(key))
            .unwrap_or(0);

        Ok(AcceptedDecision {
            decision: ScoreKey::from(decision),
            option,
            score,
            feedback_total: score + base,
            feedback_max: config.and_then(|config| config.feedback_max),
        })
    }

    /// Gives up on the session: clears every published score and rebuilds
    /// every exercise and decision in its initial state.
    pub fn abandon(&mut self) -> Result<(), TrainingError> {
        let (exercises, decisions) = instantiate(&self.curriculum)?;
        self.registry.reset_all();
        self.exercises = exercises;
        self.decisions = decisions;
        info!("training session abandoned and reset");
        Ok(())
    }

    pub fn report(&self) -> AggregatedReport {
        self.aggregator.compute_report(&self.registry)
    }

    pub fn registry(&self) -> &SessionScoreRegistry {
        &self.registry
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn exercise(&self, key: &str) -> Option<&MatchingExercise> {
        self.exercises
            .iter()
            .find(|exercise| exercise.key().as_str() == key)
    }

    pub fn decision(&self, key: &str) -> Option<&DecisionPoint> {
        self.decisions
            .iter()
            .find(|decision| decision.key().as_str() == key)
    }

    pub fn exercises(&self) -> &[MatchingExercise] {
        &self.exercises
    }

    pub fn decisions(&self) -> &[DecisionPoint] {
        &self.decisions
    }

    pub fn is_finished(&self) -> bool {
        self.exercises.iter().all(MatchingExercise::is_terminated)
            && self.decisions.iter().all(DecisionPoint::is_accepted)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            finished: self.is_finished(),
            exercises: self.exercises.iter().map(MatchingExercise::view).collect(),
            decisions: self.decisions.iter().map(DecisionPoint::view).collect(),
        }
    }
}

fn instantiate(
    curriculum: &Curriculum,
) -> Result<(Vec<MatchingExercise>, Vec<DecisionPoint>), TrainingError> {
    let exercises = curriculum
        .exercises()
        .iter()
        .map(MatchingExercise::configure)
        .collect::<Result<Vec<_>, _>>()?;
    let decisions = curriculum
        .decisions()
        .iter()
        .map(DecisionPoint::configure)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((exercises, decisions))
}

fn find_exercise<'a>(
    exercises: &'a mut [MatchingExercise],
    key: &str,
) -> Result<&'a mut MatchingExercise, TrainingError> {
    exercises
        .iter_mut()
        .find(|exercise| exercise.key().as_str() == key)
        .ok_or_else(|| TrainingError::not_found("exercise", key))
}

fn find_decision<'a>(
    decisions: &'a mut [DecisionPoint],
    key: &str,
) -> Result<&'a mut DecisionPoint, TrainingError> {
    decisions
        .iter_mut()
        .find(|decision| decision.key().as_str() == key)
        .ok_or_else(|| TrainingError::not_found("decision", key))
}
