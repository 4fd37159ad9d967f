use crate::demo::{run_bonus_evaluate, run_demo, BonusEvaluateArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rentdesk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "rentdesk",
    about = "Serve and exercise the rentdesk bonus discount service from the command line",
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
    /// Evaluate client bonuses against saved quotes
    Bonus {
        #[command(subcommand)]
        command: BonusCommand,
    },
    /// Walk through a scripted discount-entry session
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum BonusCommand {
    /// Compute the maximum discount for a client and a line item CSV
    Evaluate(BonusEvaluateArgs),
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
        Command::Bonus {
            command: BonusCommand::Evaluate(args),
        } => run_bonus_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}
