use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_analyze, run_rank, AnalyzeArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rental_analytics::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rental Analytics",
    about = "Score, rank, and project rental property investments",
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
    /// Print metrics and scores for properties in a portfolio CSV
    Analyze(AnalyzeArgs),
    /// Rank a portfolio and print the top recommendations
    Rank(RankArgs),
    /// Walk through the sample portfolio end to end
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
        Command::Analyze(args) => run_analyze(args),
        Command::Rank(args) => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}
