use crate::demo::{run_memo, run_simulate, run_target, MemoArgs, SimulateArgs, TargetArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cpo_sim::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CPO Policy Simulator",
    about = "Explore India's crude palm oil tariff policy trade-offs from the command line",
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
    /// Run a one-shot policy simulation and print the dashboard rundown
    Simulate(SimulateArgs),
    /// Back-solve the policy mix for a self-reliance target
    Target(TargetArgs),
    /// Compose an executive memo for a parameter set
    Memo(MemoArgs),
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
        Command::Simulate(args) => run_simulate(args),
        Command::Target(args) => run_target(args),
        Command::Memo(args) => run_memo(args),
    }
}
