use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use decision_trainer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Decision Trainer",
    about = "Run the decision-training scoring service or grade sessions offline",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Grade a saved score sheet and print the performance report
    Report(ReportArgs),
    /// Play a scripted session end to end and print its report
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoStrategy;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["decision-trainer-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn demo_accepts_strategy_and_export() {
        let cli = Cli::try_parse_from([
            "decision-trainer-api",
            "demo",
            "--strategy",
            "hesitant",
            "--export",
            "scores.csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.strategy, DemoStrategy::Hesitant);
                assert_eq!(
                    args.export.as_deref(),
                    Some(std::path::Path::new("scores.csv"))
                );
            }
            other => panic!("expected demo command, got {other:?}"),
        }
    }

    #[test]
    fn report_requires_a_score_sheet() {
        assert!(Cli::try_parse_from(["decision-trainer-api", "report"]).is_err());
    }
}
