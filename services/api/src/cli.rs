use crate::demo::{run_check, run_demo, run_match, CheckArgs, MatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use govaid::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "GovAid Scheme Matcher",
    about = "Match students and entrepreneurs against benefit schemes from the command line or over HTTP",
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
    /// Filter a CSV scheme catalog for one applicant profile document
    Match(MatchArgs),
    /// Evaluate a single eligibility rule against a profile document
    Check(CheckArgs),
    /// Seed a sample catalog and print matches for sample applicants
    Demo,
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
        Command::Match(args) => run_match(args),
        Command::Check(args) => run_check(args),
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["govaid-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_match_arguments() {
        let cli = Cli::try_parse_from([
            "govaid-api",
            "match",
            "--catalog",
            "schemes.csv",
            "--profile",
            "student.json",
            "--skip-malformed",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Match(args)) => {
                assert_eq!(args.catalog.to_str(), Some("schemes.csv"));
                assert!(args.skip_malformed);
            }
            other => panic!("expected match command, got {other:?}"),
        }
    }
}
