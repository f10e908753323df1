//! Configuration and connection validation commands.

use super::{output, ConnectionArgs};
use crate::app::config::{Config, PASSWORD_ENV};
use crate::error::Result;

/// Validate the configuration file without touching the engine.
pub fn config(args: &ConnectionArgs) -> Result<()> {
    let path = &args.config;
    println!("Checking configuration: {}", path.display());
    println!();

    if !path.exists() {
        output::warn(&format!("{} not found; stock defaults apply", path.display()));
        println!();
    }

    let config = Config::load_or_default(path)?;

    output::ok("Configuration is valid");
    println!();
    output::note("Summary:");
    output::key_value("  API URL:", &config.engine.api_url);
    output::key_value("  Username:", &config.engine.username);
    output::key_value("  Auto-connect:", config.engine.auto_connect);
    output::key_value(
        "  Timeouts:",
        format!(
            "{} ms request, {} ms connect",
            config.engine.timeout_ms, config.engine.connect_timeout_ms
        ),
    );
    output::key_value("  Log level:", &config.logging.level);
    println!();

    if std::env::var(PASSWORD_ENV).is_ok() {
        output::ok(&format!("Password taken from {PASSWORD_ENV} env var"));
    } else {
        output::note(&format!(
            "  Set {PASSWORD_ENV} to avoid keeping the password in the file."
        ));
    }

    println!();
    output::note("Configuration is ready to use.");
    Ok(())
}

/// Reachability probe as a diagnostic: probe the engine and report.
pub async fn connection(args: &ConnectionArgs) -> Result<()> {
    let (_, client) = super::connect(args)?;

    println!("Testing connection to {}...", client.base_url());
    println!();

    output::progress("Probing engine");
    match client.probe().await {
        Ok(()) => {
            output::progress_done(true);
            println!();
            output::ok(&format!("engine reachable at {}", client.base_url()));
            if let Some(snapshot) = client.status() {
                output::key_value("State:", &snapshot.state);
                output::key_value("Version:", &snapshot.version);
            }
            println!();
            Ok(())
        }
        Err(err) => {
            output::progress_done(false);
            println!();
            Err(err.into())
        }
    }
}
