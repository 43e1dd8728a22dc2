use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fintrack::core::log::init_logging;
use fintrack::core::model::Period;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fintrack::AppCommand {
    fn from(cmd: Commands) -> fintrack::AppCommand {
        match cmd {
            Commands::Budgets { month } => fintrack::AppCommand::Budgets { period: month },
            Commands::Dashboard { month } => fintrack::AppCommand::Dashboard { period: month },
            Commands::Transactions => fintrack::AppCommand::Transactions,
            Commands::Categories => fintrack::AppCommand::Categories,
            Commands::Convert { amount, from, to } => {
                fintrack::AppCommand::Convert { amount, from, to }
            }
            Commands::Currencies => fintrack::AppCommand::Currencies,
            Commands::Serve { bind } => fintrack::AppCommand::Serve { bind },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display budget progress for a month
    Budgets {
        /// Month to report as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<Period>,
    },
    /// Display income, expenses and recent activity for a month
    Dashboard {
        /// Month to report as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<Period>,
    },
    /// List every transaction with monthly totals
    Transactions,
    /// List income and expense categories
    Categories,
    /// Convert an amount between two currencies
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        from: String,
        to: String,
    },
    /// List supported currencies
    Currencies,
    /// Serve the currency conversion API
    Serve {
        /// Address to listen on, overriding the configuration
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fintrack::cli::setup::setup(),
        Some(cmd) => fintrack::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
