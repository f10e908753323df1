//! Handlers for the auxiliary read commands: profit, trades, logs,
//! whitelist.

use owo_colors::OwoColorize;
use tabled::{Table, Tabled};

use super::{output, ConnectionArgs, LogsArgs, TradesArgs};
use crate::engine::status::Trade;
use crate::error::Result;

#[derive(Tabled)]
struct TradeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Pair")]
    pair: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Open Rate")]
    open_rate: String,
    #[tabled(rename = "Close Rate")]
    close_rate: String,
    #[tabled(rename = "Profit %")]
    profit: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&Trade> for TradeRow {
    fn from(trade: &Trade) -> Self {
        Self {
            id: trade.trade_id,
            pair: trade.pair.clone(),
            status: if trade.is_open { "open" } else { "closed" },
            open_rate: format!("{:.4}", trade.open_rate),
            close_rate: trade
                .close_rate
                .map(|rate| format!("{rate:.4}"))
                .unwrap_or_else(|| "-".into()),
            profit: trade
                .profit_ratio
                .map(|ratio| format!("{:+.2}", ratio * 100.0))
                .unwrap_or_else(|| "-".into()),
            reason: trade.sell_reason.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

/// Show profit totals from the dedicated endpoint.
pub async fn profit(args: &ConnectionArgs) -> Result<()> {
    let (_, client) = super::connect(args)?;
    let profit = client.profit().await?;

    output::header();
    output::section("Profit");
    output::key_value("Closed:", format!("{:.2}", profit.profit_closed_fiat));
    output::key_value(
        "Mean ratio:",
        format!("{:.2}%", profit.profit_closed_ratio_mean * 100.0),
    );
    output::key_value("All:", format!("{:.2}", profit.profit_all_fiat));
    output::key_value(
        "Trades:",
        format!(
            "{} total, {} closed",
            profit.trade_count, profit.closed_trade_count
        ),
    );
    output::key_value(
        "Win/loss:",
        format!("{}/{}", profit.winning_trades, profit.losing_trades),
    );
    if !profit.best_pair.is_empty() {
        output::key_value(
            "Best pair:",
            format!("{} ({:+.2}%)", profit.best_pair, profit.best_rate),
        );
    }
    println!();
    Ok(())
}

/// List recent trades as a table.
pub async fn trades(args: &TradesArgs) -> Result<()> {
    let (_, client) = super::connect(&args.connection)?;
    let trades = client.trades(args.limit).await?;

    output::header();

    if trades.is_empty() {
        println!();
        output::note("No trades yet.");
        println!();
        return Ok(());
    }

    let rows: Vec<TradeRow> = trades.iter().map(TradeRow::from).collect();
    let table = Table::new(rows).to_string();

    println!();
    for line in table.lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}

/// Print recent engine log lines, levels colored.
pub async fn logs(args: &LogsArgs) -> Result<()> {
    let (_, client) = super::connect(&args.connection)?;
    let entries = client.logs(args.limit).await?;

    println!();
    for entry in &entries {
        let level = match entry.level.as_str() {
            "ERROR" => entry.level.red().to_string(),
            "WARNING" | "WARN" => entry.level.yellow().to_string(),
            _ => entry.level.clone(),
        };
        println!("{}  {:<7}  {}", entry.date, level, entry.message);
    }
    if entries.is_empty() {
        output::note("No log lines returned.");
    }
    println!();
    Ok(())
}

/// Show the traded pair whitelist.
pub async fn whitelist(args: &ConnectionArgs) -> Result<()> {
    let (_, client) = super::connect(args)?;
    let pairs = client.whitelist().await?;

    output::header();
    output::section(&format!("Whitelist ({} pairs)", pairs.whitelist.len()));
    for pair in &pairs.whitelist {
        println!("  {pair}");
    }
    println!();
    Ok(())
}
