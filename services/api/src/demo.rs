use crate::infra::InMemorySessionRepository;
use clap::{Args, ValueEnum};
use decision_trainer::error::AppError;
use decision_trainer::scoresheet::{self, ScoreSheetImporter};
use decision_trainer::training::curriculum::{FIRST_SORT, SECOND_SORT};
use decision_trainer::training::{
    AggregatedReport, Curriculum, ScoreAggregator, SessionRecord, TrainingSessionService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Score sheet CSV with `Key,Score` columns
    #[arg(long)]
    pub(crate) scores: PathBuf,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// How the scripted trainee plays
    #[arg(long, value_enum, default_value_t = DemoStrategy::Diligent)]
    pub(crate) strategy: DemoStrategy,
    /// Write the final score sheet to this CSV path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoStrategy {
    /// Sorts every card and picks the strongest advisor each round
    #[default]
    Diligent,
    /// Sorts a few cards before the clock runs out and picks middling advice
    Hesitant,
}

struct DemoScript {
    cards_per_sort: usize,
    choices: [(&'static str, &'static str); 6],
}

impl DemoStrategy {
    fn script(self) -> DemoScript {
        match self {
            DemoStrategy::Diligent => DemoScript {
                cards_per_sort: 8,
                choices: [
                    ("advisor_round_1", "stacy"),
                    ("advisor_round_2", "andrew"),
                    ("advisor_round_3", "smith"),
                    ("advisor_round_4", "stacy"),
                    ("advisor_round_5", "stacy"),
                    ("advisor_round_6", "stacy"),
                ],
            },
            DemoStrategy::Hesitant => DemoScript {
                cards_per_sort: 3,
                choices: [
                    ("advisor_round_1", "zara"),
                    ("advisor_round_2", "smith"),
                    ("advisor_round_3", "zara"),
                    ("advisor_round_4", "andrew"),
                    ("advisor_round_5", "smith"),
                    ("advisor_round_6", "zara"),
                ],
            },
        }
    }
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let registry = ScoreSheetImporter::from_path(&args.scores)?;
    let aggregator = ScoreAggregator::new(Curriculum::standard().report().clone())?;
    let report = aggregator.compute_report(&registry);

    if args.json {
        print_json(&report);
    } else {
        println!("Score sheet report ({})", args.scores.display());
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let record = play_scripted_session(args.strategy)?;
    let report = record.session.report();

    if args.json {
        print_json(&report);
    } else {
        println!("Decision trainer demo ({:?} trainee)", args.strategy);
        for exercise in record.session.exercises() {
            println!(
                "- {}: {}/{} with {}s left",
                exercise.title(),
                exercise.score(),
                exercise.max_score(),
                exercise.remaining_display_seconds()
            );
        }
        for decision in record.session.decisions() {
            let choice = decision
                .selected()
                .map(|option| option.label.as_str())
                .unwrap_or("-");
            println!(
                "- {}: followed {} ({} points)",
                decision.title(),
                choice,
                decision.score().unwrap_or(0)
            );
        }
        println!();
        render_report(&report);
    }

    if let Some(path) = args.export {
        scoresheet::export_to_path(record.session.registry(), &path)?;
        if !args.json {
            println!("\nScore sheet written to {}", path.display());
        }
    }

    Ok(())
}

/// Drives a full session through the service the HTTP routes use.
pub(crate) fn play_scripted_session(strategy: DemoStrategy) -> Result<SessionRecord, AppError> {
    let service = TrainingSessionService::new(
        Arc::new(InMemorySessionRepository::default()),
        Curriculum::standard(),
    );
    let script = strategy.script();
    let record = service.start()?;
    let id = record.id.clone();

    for exercise in [FIRST_SORT, SECOND_SORT] {
        let answers: Vec<(String, String)> = record
            .session
            .curriculum()
            .exercises()
            .iter()
            .filter(|config| config.key.as_str() == exercise)
            .flat_map(|config| config.items.iter())
            .take(script.cards_per_sort)
            .map(|item| (item.id.clone(), item.correct_category.clone()))
            .collect();

        for (item, category) in &answers {
            service.place(&id, exercise, item, category)?;
        }

        let mut terminated = service
            .get(&id)?
            .session
            .exercise(exercise)
            .is_some_and(|exercise| exercise.is_terminated());
        while !terminated {
            terminated = service.tick(&id, exercise, 1.0)?.terminated;
        }
    }

    for (decision, option) in script.choices {
        service.select(&id, decision, option)?;
        service.accept(&id, decision)?;
    }

    Ok(service.get(&id)?)
}

fn print_json(report: &AggregatedReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Report payload unavailable: {err}"),
    }
}

pub(crate) fn render_report(report: &AggregatedReport) {
    println!(
        "Total score: {}/{} ({:.1}%)",
        report.total_score, report.total_max, report.total_grade_percent
    );
    println!("Level: {}", report.level_label);
    println!("Skill breakdown:");
    for category in &report.categories {
        println!(
            "  - {}: {}/{} ({:.0}%) {}",
            category.label,
            category.score,
            category.max,
            category.percent,
            category.band.label()
        );
        println!("    {}", category.summary);
    }
}
