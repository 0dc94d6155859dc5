use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use walletticker::core::Chain;
use walletticker::core::log::init_logging;

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
    /// Fetch and display tickers
    Prices,
    /// Display the units of a chain
    Units {
        /// Chain to select, e.g. bitcoin or actinium
        chain: Chain,
    },
    /// Select the display unit of a chain
    SetUnit {
        /// Chain to select, e.g. bitcoin or actinium
        chain: Chain,
        /// Unit key, e.g. btc, bits or sats
        unit: String,
    },
    /// Select the fiat currency prices are shown in
    SetFiat {
        /// Currency code, e.g. EUR
        fiat_ticker: String,
    },
}

impl From<Commands> for walletticker::AppCommand {
    fn from(cmd: Commands) -> walletticker::AppCommand {
        match cmd {
            Commands::Prices => walletticker::AppCommand::Prices,
            Commands::Units { chain } => walletticker::AppCommand::Units { chain, unit: None },
            Commands::SetUnit { chain, unit } => walletticker::AppCommand::Units {
                chain,
                unit: Some(unit),
            },
            Commands::SetFiat { fiat_ticker } => walletticker::AppCommand::SetFiat { fiat_ticker },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => walletticker::cli::setup::setup(),
        Some(cmd) => walletticker::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
