use crate::demo::{
    run_batch, run_demo, run_diagnose, run_diseases, BatchArgs, DemoArgs, DiagnoseArgs,
    DiseasesArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use poultry_dx::config::AppConfig;
use poultry_dx::error::AppError;
use poultry_dx::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Poultry Diagnosis Engine",
    about = "Score and rank likely poultry diseases from flock evidence",
    version
)]
struct Cli {
    /// JSON knowledge base to use instead of the configured disease table
    #[arg(long, global = true)]
    knowledge_base: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Diagnose a single flock from evidence flags
    Diagnose(DiagnoseArgs),
    /// Diagnose every case in a CSV export
    Batch(BatchArgs),
    /// List the diseases and breeds in the knowledge base
    Diseases(DiseasesArgs),
    /// Run simulated specimen diagnoses end to end
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

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.knowledge_base {
        config.diagnosis.knowledge_base_path = Some(path);
    }
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(args, config).await,
        Command::Diagnose(args) => run_diagnose(args, &config),
        Command::Batch(args) => run_batch(args, &config),
        Command::Diseases(args) => run_diseases(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
