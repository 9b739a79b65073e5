use crate::demo::{run_demo, run_shift_report, DemoArgs, ShiftReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use complychef::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ComplyChef Diary Service",
    about = "Demonstrate and run the ComplyChef compliance diary from the command line",
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
    /// Generate a shift completion report for stakeholder demos
    Shift {
        #[command(subcommand)]
        command: ShiftCommand,
    },
    /// Run an end-to-end CLI demo covering monitoring, assessment, and onboarding
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ShiftCommand {
    /// Reconcile a shift against the check catalog and print the outcome
    Report(ShiftReportArgs),
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
        Command::Shift {
            command: ShiftCommand::Report(args),
        } => run_shift_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
