//! Command-line interface definitions.

pub mod check;
pub mod commands;
pub mod output;
pub mod reads;
pub mod status;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::app::Config;
use crate::engine::auth::{CredentialOverrides, Credentials};
use crate::engine::transport::HttpTransport;
use crate::engine::EngineClient;
use crate::error::Result;

/// Helmsman - operator console for a remote trading engine.
#[derive(Parser, Debug)]
#[command(name = "helmsman")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show connection state and aggregated engine status
    Status(StatusArgs),

    /// Re-render engine status on a fixed interval
    Watch(WatchArgs),

    /// Start the engine's trade loop
    Start(ConnectionArgs),

    /// Stop the engine's trade loop
    Stop(ConnectionArgs),

    /// Force an entry for a pair
    ForceEntry(ForceEntryArgs),

    /// Force an exit for an open trade
    ForceExit(ForceExitArgs),

    /// Show profit totals
    Profit(ConnectionArgs),

    /// List recent trades
    Trades(TradesArgs),

    /// Show recent engine log lines
    Logs(LogsArgs),

    /// Show the traded pair whitelist
    Whitelist(ConnectionArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `helmsman check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConnectionArgs),
    /// Test reachability of the engine API
    Connection(ConnectionArgs),
}

/// Shared arguments for commands that talk to the engine.
#[derive(Parser, Debug)]
pub struct ConnectionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "helmsman.toml")]
    pub config: PathBuf,

    /// Override the engine API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override the engine username
    #[arg(long)]
    pub username: Option<String>,

    /// Override the engine password
    #[arg(long)]
    pub password: Option<String>,
}

impl ConnectionArgs {
    fn overrides(&self) -> CredentialOverrides {
        CredentialOverrides {
            base_url: self.api_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Arguments for the `status` subcommand.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Probe even when auto-connect is disabled in the config
    #[arg(long)]
    pub connect: bool,
}

/// Arguments for the `watch` subcommand.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Seconds between refreshes
    #[arg(short, long, default_value = "10")]
    pub interval: u64,
}

/// Arguments for the `force-entry` subcommand.
#[derive(Parser, Debug)]
pub struct ForceEntryArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Pair to enter, e.g. BTC/USDT
    pub pair: String,

    /// Optional limit price; market price when omitted
    #[arg(long)]
    pub price: Option<f64>,

    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the `force-exit` subcommand.
#[derive(Parser, Debug)]
pub struct ForceExitArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Trade id to exit
    pub trade_id: i64,

    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the `trades` subcommand.
#[derive(Parser, Debug)]
pub struct TradesArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Number of trades to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for the `logs` subcommand.
#[derive(Parser, Debug)]
pub struct LogsArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Number of lines to show
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,
}

/// Resolve configuration and construct one client for a CLI invocation.
pub(crate) fn connect(args: &ConnectionArgs) -> Result<(Config, EngineClient)> {
    let config = Config::load_or_default(&args.config)?;
    let credentials = Credentials::resolve(&config.engine, &args.overrides());
    let transport = HttpTransport::with_timeouts(
        credentials.clone(),
        Duration::from_millis(config.engine.timeout_ms),
        Duration::from_millis(config.engine.connect_timeout_ms),
    );
    let base_url = credentials.base_url().to_string();
    let client = EngineClient::with_transport(base_url, Box::new(transport));
    Ok((config, client))
}
