use crate::demo::{run_demo, run_queue, DemoArgs, QueueArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use civic_report::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Civic Report Desk",
    about = "Run and demonstrate the civic issue reporting desk from the command line",
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
    /// Print the ranked triage queue from a state file or seeded demo data
    Queue(QueueArgs),
    /// Run an end-to-end CLI demo covering intake, triage, and rewards
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
    /// Override the configured JSON state file path
    #[arg(long)]
    pub(crate) state_path: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Queue(args) => run_queue(args),
        Command::Demo(args) => run_demo(args),
    }
}
