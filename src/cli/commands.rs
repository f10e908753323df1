//! Handlers for engine commands: start, stop, force-entry, force-exit.
//!
//! Command success and refresh success are reported independently; a
//! command that lands is never rolled back because the follow-up status
//! read failed.

use super::{output, ConnectionArgs, ForceEntryArgs, ForceExitArgs};
use crate::engine::EngineClient;
use crate::error::Result;

/// Execute the start command.
pub async fn start(args: &ConnectionArgs) -> Result<()> {
    let (config, client) = super::connect(args)?;

    if config.engine.auto_connect {
        probe(&client).await?;
    }

    output::progress("Starting engine");
    match client.start().await {
        Ok(()) => output::progress_done(true),
        Err(err) => {
            output::progress_done(false);
            return Err(err.into());
        }
    }

    report_refresh(&client);
    Ok(())
}

/// Execute the stop command.
pub async fn stop(args: &ConnectionArgs) -> Result<()> {
    let (config, client) = super::connect(args)?;

    if config.engine.auto_connect {
        probe(&client).await?;
    }

    output::progress("Stopping engine");
    match client.stop().await {
        Ok(()) => output::progress_done(true),
        Err(err) => {
            output::progress_done(false);
            return Err(err.into());
        }
    }

    report_refresh(&client);
    Ok(())
}

/// Execute the force-entry command.
pub async fn force_entry(args: &ForceEntryArgs) -> Result<()> {
    let (_, client) = super::connect(&args.connection)?;

    let at = match args.price {
        Some(price) => format!("at {price}"),
        None => "at market price".into(),
    };
    if !args.yes && !output::confirm(&format!("Force entry for {} {at}?", args.pair)) {
        output::note("Aborted.");
        return Ok(());
    }

    output::progress("Submitting entry");
    match client.force_entry(&args.pair, args.price).await {
        Ok(()) => {
            output::progress_done(true);
            output::ok(&format!("force entry for {} accepted", args.pair));
            Ok(())
        }
        Err(err) => {
            output::progress_done(false);
            Err(err.into())
        }
    }
}

/// Execute the force-exit command.
pub async fn force_exit(args: &ForceExitArgs) -> Result<()> {
    let (_, client) = super::connect(&args.connection)?;

    if !args.yes && !output::confirm(&format!("Force exit for trade {}?", args.trade_id)) {
        output::note("Aborted.");
        return Ok(());
    }

    output::progress("Submitting exit");
    match client.force_exit(args.trade_id).await {
        Ok(()) => {
            output::progress_done(true);
            output::ok(&format!("force exit for trade {} accepted", args.trade_id));
            Ok(())
        }
        Err(err) => {
            output::progress_done(false);
            Err(err.into())
        }
    }
}

async fn probe(client: &EngineClient) -> Result<()> {
    output::progress("Probing engine");
    match client.probe().await {
        Ok(()) => {
            output::progress_done(true);
            Ok(())
        }
        Err(err) => {
            output::progress_done(false);
            Err(err.into())
        }
    }
}

/// Report the post-command snapshot if the refresh landed; the command
/// itself already succeeded either way.
fn report_refresh(client: &EngineClient) {
    match client.status() {
        Some(snapshot) => output::key_value("State:", &snapshot.state),
        None => output::warn("status refresh failed; run 'helmsman status'"),
    }
}
