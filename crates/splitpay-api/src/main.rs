use std::path::PathBuf;

use clap::{Parser, Subcommand};
use splitpay_api::config::SplitPayConfig;
use splitpay_api::tracing_setup;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "splitpay", version, about = "Split-payment allocation service")]
struct Cli {
    /// Configuration file (default: $SPLITPAY_CONFIG_PATH or splitpay.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Load and validate the configuration, then print it
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_setup::init_tracing()?;
    let cli = Cli::parse();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting SplitPay");
    splitpay_core::init();

    let config = SplitPayConfig::load(cli.config.as_deref())?;
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => start_server(config).await,
        Command::CheckConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn start_server(config: SplitPayConfig) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let app = splitpay_api::create_app(config)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "Web server started successfully");
    axum::serve(listener, app).await?;
    Ok(())
}
