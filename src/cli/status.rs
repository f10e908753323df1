//! Handlers for the `status` and `watch` commands.
//!
//! A failed refresh never hides data: the last good snapshot stays on
//! screen next to the error banner.

use owo_colors::OwoColorize;
use tokio::signal;
use tokio::time::{sleep, Duration};

use super::{output, StatusArgs, WatchArgs};
use crate::engine::classify::ClassifiedError;
use crate::engine::status::StatusSnapshot;
use crate::engine::{ConnectionState, EngineClient};
use crate::error::Result;

/// Execute the status command.
pub async fn execute(args: &StatusArgs) -> Result<()> {
    let (config, client) = super::connect(&args.connection)?;

    output::header();

    let mut refresh_error = None;
    if config.engine.auto_connect || args.connect {
        output::progress("Probing engine");
        match client.probe().await {
            Ok(()) => {
                output::progress_done(true);
                // The probe's own refresh is best-effort; if it left no
                // snapshot behind, re-run the aggregation to surface why.
                if client.status().is_none() {
                    refresh_error = client.aggregate().await.err();
                }
            }
            Err(err) => {
                output::progress_done(false);
                refresh_error = Some(err);
            }
        }
    } else {
        output::note("auto-connect is disabled; pass --connect to probe");
    }

    render(&client, refresh_error.as_ref());
    println!();
    Ok(())
}

/// Execute the watch command: probe once, then poll the aggregation.
pub async fn watch(args: &WatchArgs) -> Result<()> {
    let (config, client) = super::connect(&args.connection)?;
    config.init_logging();

    output::header();

    if let Err(err) = client.probe().await {
        render(&client, Some(&err));
        println!();
        return Err(err.into());
    }

    render(&client, None);
    println!();
    output::note("Press Ctrl-C to stop.");

    let interval = Duration::from_secs(args.interval.max(1));
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => break,
            _ = sleep(interval) => {}
        }

        match client.aggregate().await {
            Ok(Some(snapshot)) => {
                println!(
                    "{}  state {}  balance {:.2}",
                    snapshot.fetched_at.format("%H:%M:%S"),
                    snapshot.state,
                    snapshot.balance
                );
            }
            Ok(None) => output::warn("not connected; skipping refresh"),
            Err(err) => output::warn(&format!("refresh failed: {err}")),
        }
    }

    println!();
    Ok(())
}

/// Render connection state, the latest snapshot (possibly stale), and the
/// current error, side by side. Stale data and error are never merged into
/// one ambiguous state.
pub(crate) fn render(client: &EngineClient, error: Option<&ClassifiedError>) {
    println!();

    let state = client.connection_state();
    let badge = match state {
        ConnectionState::Connected => format!("{} connected", "●".green()),
        ConnectionState::Checking => format!("{} checking", "●".yellow()),
        ConnectionState::Disconnected => format!("{} disconnected", "○".red()),
    };
    output::key_value("Connection:", badge);
    output::key_value("Engine:", client.base_url());

    if let Some(snapshot) = client.status() {
        println!();
        render_snapshot(&snapshot);
        if error.is_some() {
            println!();
            output::key_value(
                "As of:",
                snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
            );
        }
    }

    if let Some(err) = error {
        println!();
        output::error(&err.message);
        if client.status().is_some() {
            output::note("  showing the last good snapshot");
        }
    }
}

fn render_snapshot(snapshot: &StatusSnapshot) {
    let mode = if snapshot.dry_run {
        format!("dry-run ({})", snapshot.trading_mode)
    } else {
        format!("live ({})", snapshot.trading_mode)
    };

    output::key_value("State:", &snapshot.state);
    output::key_value("Version:", &snapshot.version);
    output::key_value("Strategy:", &snapshot.strategy);
    output::key_value("Mode:", mode);
    output::key_value("Exchange:", &snapshot.exchange);
    output::key_value("Timeframe:", &snapshot.timeframe);
    output::key_value("Balance:", format!("{:.2}", snapshot.balance));
    output::key_value(
        "Profit:",
        format!(
            "{:.2} ({:.2}%)",
            snapshot.profit_total,
            snapshot.profit_ratio * 100.0
        ),
    );
}
