use crate::demo::{run_demo, run_materials, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recycle_rewards::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recycling Rewards",
    about = "Run the recycling rewards service or explore its rules from the command line",
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
    /// List the accepted materials with their points and daily caps
    Materials,
    /// Replay a scripted day of submissions and print every decision
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
        Command::Materials => run_materials(),
        Command::Demo(args) => run_demo(args),
    }
}
