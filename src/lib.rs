pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

use crate::core::config::AppConfig;
use crate::core::convert::CurrencyConverter;
use crate::core::model::Period;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Budgets {
        period: Option<Period>,
    },
    Dashboard {
        period: Option<Period>,
    },
    Transactions,
    Categories,
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    Currencies,
    Serve {
        bind: Option<String>,
    },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fintrack starting...");

    if command == AppCommand::Currencies {
        println!("{}", cli::convert::list_currencies());
        return Ok(());
    }

    let config = load_config(config_path)?;
    let converter = CurrencyConverter::new(providers::rate_provider(&config.providers.frankfurter));

    match command {
        AppCommand::Budgets { period } => {
            cli::budgets::run(&config.ledger, period.unwrap_or_else(Period::current))
        }
        AppCommand::Dashboard { period } => cli::dashboard::run(
            &config.ledger,
            period.unwrap_or_else(Period::current),
            &config.base_currency,
        ),
        AppCommand::Transactions => cli::transactions::run(&config.ledger, &config.base_currency),
        AppCommand::Categories => cli::categories::run(&config.ledger),
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&converter, amount, &from, &to).await
        }
        AppCommand::Serve { bind } => {
            let bind = bind.unwrap_or(config.server.bind);
            server::serve(&bind, converter).await
        }
        AppCommand::Currencies => unreachable!("Currencies command should be handled separately"),
    }
}
