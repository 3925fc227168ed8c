use super::decision::{DecisionPointConfig, OptionSpec, ScoreTuple};
use super::domain::{Quadrant, ScoreKey, SkillCategory, TrainingError};
use super::matching::{
    CategorySpec, FeedbackPolicy, ItemSpec, MatchingExerciseConfig, DEFAULT_REWARD_PER_ITEM,
};
use super::report::{CategoryDefinition, ReportDefinition};

pub const FIRST_SORT_SECONDS: f32 = 120.0;
pub const SECOND_SORT_SECONDS: f32 = 30.0;

pub const FIRST_SORT: &str = "priority_sort_1";
pub const SECOND_SORT: &str = "priority_sort_2";

const ADVISORS: [(&str, &str); 4] = [
    ("andrew", "Andrew"),
    ("zara", "Zara"),
    ("smith", "Smith"),
    ("stacy", "Stacy"),
];

/// Everything needed to build a session: exercises, decisions, and grading.
#[derive(Debug, Clone)]
pub struct Curriculum {
    exercises: Vec<MatchingExerciseConfig>,
    decisions: Vec<DecisionPointConfig>,
    report: ReportDefinition,
}

impl Curriculum {
    pub fn new(
        exercises: Vec<MatchingExerciseConfig>,
        decisions: Vec<DecisionPointConfig>,
        report: ReportDefinition,
    ) -> Self {
        Self {
            exercises,
            decisions,
            report,
        }
    }

    pub fn standard() -> Self {
        Self::standard_with_timing(FIRST_SORT_SECONDS, SECOND_SORT_SECONDS)
    }

    pub fn standard_with_timing(first_sort_seconds: f32, second_sort_seconds: f32) -> Self {
        let exercises = vec![
            priority_sort(
                FIRST_SORT,
                "Recess: sort the morning's tasks",
                first_sort_seconds,
                FeedbackPolicy::Symmetric,
                &[
                    Quadrant::UrgentImportant,
                    Quadrant::UrgentNotImportant,
                    Quadrant::NotUrgentImportant,
                    Quadrant::NotUrgentNotImportant,
                    Quadrant::UrgentImportant,
                    Quadrant::UrgentNotImportant,
                    Quadrant::NotUrgentImportant,
                    Quadrant::NotUrgentNotImportant,
                ],
            ),
            priority_sort(
                SECOND_SORT,
                "Recess: sort the afternoon's tasks",
                second_sort_seconds,
                FeedbackPolicy::CorrectOnly,
                &[
                    Quadrant::NotUrgentImportant,
                    Quadrant::UrgentImportant,
                    Quadrant::NotUrgentImportant,
                    Quadrant::NotUrgentNotImportant,
                    Quadrant::UrgentNotImportant,
                    Quadrant::UrgentImportant,
                    Quadrant::UrgentNotImportant,
                    Quadrant::NotUrgentImportant,
                ],
            ),
        ];

        let decisions = vec![
            advisor_round(
                "advisor_round_1",
                "Stakeholder briefing",
                [
                    ScoreTuple::Scalar(0),
                    ScoreTuple::Scalar(30),
                    ScoreTuple::Scalar(30),
                    ScoreTuple::Scalar(60),
                ],
                Some(FIRST_SORT),
            ),
            advisor_round(
                "advisor_round_2",
                "Client escalation",
                [
                    ScoreTuple::Scalar(60),
                    ScoreTuple::Scalar(30),
                    ScoreTuple::Scalar(30),
                    ScoreTuple::Scalar(0),
                ],
                Some(SECOND_SORT),
            ),
            advisor_round(
                "advisor_round_3",
                "Team workload dispute",
                [
                    ScoreTuple::pair(0, 0),
                    ScoreTuple::pair(0, 50),
                    ScoreTuple::pair(50, 50),
                    ScoreTuple::pair(50, 0),
                ],
                None,
            ),
            advisor_round(
                "advisor_round_4",
                "Equipment failure on site",
                [
                    ScoreTuple::pair(50, 0),
                    ScoreTuple::pair(0, 50),
                    ScoreTuple::pair(0, 50),
                    ScoreTuple::pair(50, 50),
                ],
                None,
            ),
            advisor_round(
                "advisor_round_5",
                "Cross-team handover",
                [
                    ScoreTuple::pair(50, 0),
                    ScoreTuple::pair(0, 50),
                    ScoreTuple::pair(0, 0),
                    ScoreTuple::pair(50, 50),
                ],
                None,
            ),
            advisor_round(
                "advisor_round_6",
                "Budget overrun",
                [
                    ScoreTuple::pair(50, 0),
                    ScoreTuple::pair(0, 50),
                    ScoreTuple::pair(0, 0),
                    ScoreTuple::pair(50, 50),
                ],
                None,
            ),
        ];

        Self {
            exercises,
            decisions,
            report: standard_report_definition(),
        }
    }

    pub fn exercises(&self) -> &[MatchingExerciseConfig] {
        &self.exercises
    }

    pub fn decisions(&self) -> &[DecisionPointConfig] {
        &self.decisions
    }

    pub fn report(&self) -> &ReportDefinition {
        &self.report
    }
}

fn priority_sort(
    key: &str,
    title: &str,
    time_budget_seconds: f32,
    feedback: FeedbackPolicy,
    answers: &[Quadrant],
) -> MatchingExerciseConfig {
    MatchingExerciseConfig {
        key: ScoreKey::from(key),
        title: title.to_string(),
        items: answers
            .iter()
            .enumerate()
            .map(|(index, quadrant)| ItemSpec {
                id: format!("task_card_{}", index + 1),
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
        time_budget_seconds,
        reward_per_item: DEFAULT_REWARD_PER_ITEM,
        feedback,
    }
}

fn advisor_round(
    key: &str,
    title: &str,
    scores: [ScoreTuple; 4],
    feedback_base: Option<&str>,
) -> DecisionPointConfig {
    DecisionPointConfig {
        key: ScoreKey::from(key),
        title: title.to_string(),
        options: ADVISORS
            .iter()
            .zip(scores)
            .map(|((id, label), score)| OptionSpec {
                id: (*id).to_string(),
                label: (*label).to_string(),
                score,
            })
            .collect(),
        feedback_base: feedback_base.map(ScoreKey::from),
        feedback_max: feedback_base.map(|_| 100),
    }
}

fn standard_report_definition() -> ReportDefinition {
    let category = |category: SkillCategory, keys: [&str; 2], max: u32| CategoryDefinition {
        category,
        keys: keys.into_iter().map(ScoreKey::from).collect(),
        max,
    };

    ReportDefinition::new(
        vec![
            category(SkillCategory::TimeManagement, [FIRST_SORT, SECOND_SORT], 80),
            category(
                SkillCategory::Communication,
                ["advisor_round_1", "advisor_round_2"],
                120,
            ),
            category(
                SkillCategory::Teamwork,
                ["advisor_round_3", "advisor_round_5"],
                200,
            ),
            category(
                SkillCategory::ProblemSolving,
                ["advisor_round_4", "advisor_round_6"],
                200,
            ),
        ],
        600,
    )
}

/// Validates that no two instances of a curriculum share a score key.
pub(crate) fn ensure_unique_keys(curriculum: &Curriculum) -> Result<(), TrainingError> {
    let mut seen = std::collections::HashSet::new();
    let keys = curriculum
        .exercises
        .iter()
        .map(|exercise| &exercise.key)
        .chain(curriculum.decisions.iter().map(|decision| &decision.key));

    for key in keys {
        if !seen.insert(key) {
            return Err(TrainingError::Configuration(format!(
                "score key '{key}' is owned by more than one instance"
            )));
        }
    }

    Ok(())
}
