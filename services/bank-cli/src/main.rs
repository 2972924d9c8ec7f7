//! SimpleBank CLI - 通过命令行调用银行存储函数
//!
//! Usage:
//! ```bash
//! simplebank create --social-number 123456789 --birthdate 1990-05-17 --mother "Maria Souza" \
//!     --first-name Ana --last-name Lima --address "Rua A, 10" --balance 100.00
//! simplebank info --social-number 123456789 --birthdate 1990-05-17 --mother "Maria Souza"
//! simplebank deposit 1001 50.00
//! simplebank --legacy withdraw 1001 500.00
//! simplebank ping
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use simplebank_adapter_postgres::{PgConnector, PostgresConfig, SslMode};
use simplebank_config::{AppConfig, DatabaseConfig};
use simplebank_domain::AccountIdentity;
use simplebank_gateway::{BankGateway, GatewayOptions, SentinelGateway};

mod commands;

/// SimpleBank - 存储函数网关命令行
#[derive(Debug, Parser)]
#[command(name = "simplebank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration directory (default.toml + {APP_ENV}.toml)
    #[arg(long, default_value = "config", global = true)]
    pub config_dir: String,

    /// Print the legacy sentinel values instead of typed errors
    #[arg(long, global = true)]
    pub legacy: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 身份三元组参数
#[derive(Debug, Clone, Args)]
pub struct IdentityArgs {
    /// Social number of the account holder
    #[arg(long)]
    pub social_number: i32,
    /// Birthdate (YYYY-MM-DD)
    #[arg(long)]
    pub birthdate: NaiveDate,
    /// Mother's full name
    #[arg(long = "mother")]
    pub mother_full_name: String,
}

impl From<IdentityArgs> for AccountIdentity {
    fn from(args: IdentityArgs) -> Self {
        AccountIdentity::new(args.social_number, args.birthdate, args.mother_full_name)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Account(AccountCommand),

    /// Check database connectivity
    Ping,
}

/// 七个存储函数对应的子命令
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Open a new account
    Create {
        #[command(flatten)]
        identity: IdentityArgs,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        address: String,
        /// Opening balance
        #[arg(long)]
        balance: Decimal,
    },

    /// Close an account
    Close {
        account: i32,
        #[command(flatten)]
        identity: IdentityArgs,
    },

    /// Show account information
    Info {
        #[command(flatten)]
        identity: IdentityArgs,
    },

    /// Update name and address
    Update {
        account: i32,
        #[command(flatten)]
        identity: IdentityArgs,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        address: String,
    },

    /// Deposit money into an account
    Deposit { account: i32, amount: Decimal },

    /// Withdraw money from an account
    Withdraw { account: i32, amount: Decimal },

    /// Transfer money between accounts
    Transfer {
        sender: i32,
        destination: i32,
        amount: Decimal,
        /// Identity of the sender
        #[command(flatten)]
        identity: IdentityArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config_dir).context("Failed to load configuration")?;
    simplebank_telemetry::init(&config.telemetry.log_level, config.telemetry.json);

    let connector = PgConnector::new(postgres_config(&config.database)?)?;
    let gateway = BankGateway::new(
        GatewayOptions::new()
            .with_transaction_scope(config.gateway.transaction_scope)
            .with_isolation_level(config.gateway.isolation_level),
    );

    tracing::debug!(
        app_env = %config.app_env,
        legacy = cli.legacy,
        "Starting {}",
        config.app_name
    );

    let output = match cli.command {
        Commands::Ping => commands::ping(&connector).await?,
        Commands::Account(command) if cli.legacy => {
            commands::run_legacy(&SentinelGateway::new(gateway), &connector, command).await?
        }
        Commands::Account(command) => commands::run(&gateway, &connector, command).await?,
    };

    println!("{}", output);
    Ok(())
}

/// 将应用配置转换为适配器配置
fn postgres_config(database: &DatabaseConfig) -> Result<PostgresConfig> {
    let ssl_mode: SslMode = database.ssl_mode.parse()?;

    let mut config = PostgresConfig::new(database.url.expose_secret().as_str())
        .with_ssl_mode(ssl_mode)
        .with_connect_timeout(Duration::from_secs(database.connect_timeout_secs))
        .with_statement_cache_size(database.statement_cache_size);

    if let Some(name) = &database.application_name {
        config = config.with_application_name(name);
    }
    if let Some(schema) = &database.schema {
        config = config.with_schema(schema);
    }

    Ok(config)
}
