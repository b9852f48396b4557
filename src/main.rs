use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use coinrate::core::log::init_logging;

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

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display BTC and XMR rates for every supported currency
    Rates,
    /// Convert a fiat amount into crypto
    ToCrypto {
        /// Fiat amount to convert
        amount: f64,
        /// Fiat currency code, defaults to the configured currency
        fiat: Option<String>,
        /// Crypto asset (BTC or XMR), defaults to the configured asset
        #[arg(short, long)]
        asset: Option<String>,
    },
    /// Convert a crypto amount into fiat
    FromCrypto {
        /// Crypto amount to convert
        amount: f64,
        /// Fiat currency code, defaults to the configured currency
        fiat: Option<String>,
        /// Crypto asset (BTC or XMR), defaults to the configured asset
        #[arg(short, long)]
        asset: Option<String>,
    },
}

impl From<Commands> for coinrate::AppCommand {
    fn from(cmd: Commands) -> coinrate::AppCommand {
        match cmd {
            Commands::Rates => coinrate::AppCommand::Rates,
            Commands::ToCrypto {
                amount,
                fiat,
                asset,
            } => coinrate::AppCommand::ToCrypto {
                amount,
                fiat,
                asset,
            },
            Commands::FromCrypto {
                amount,
                fiat,
                asset,
            } => coinrate::AppCommand::FromCrypto {
                amount,
                fiat,
                asset,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => coinrate::cli::setup::setup(),
        Some(cmd) => coinrate::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
