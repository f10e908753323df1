//! Status snapshot assembly and engine payload shapes.
//!
//! The snapshot is assembled from two reads (`/show_config`, then
//! `/balance`) and is strictly full-replace: a new snapshot supersedes the
//! previous one wholesale, and a failed aggregation leaves the previous one
//! untouched.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::TransportError;

/// Point-in-time view of the remote engine, assembled atomically by one
/// aggregation run. Never partially populated.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    /// Engine run state as reported by the engine (`running`, `stopped`, ..).
    pub state: String,
    pub version: String,
    pub strategy: String,
    /// Whether commands are simulated rather than executed against funds.
    pub dry_run: bool,
    pub trading_mode: String,
    pub timeframe: String,
    pub exchange: String,
    /// Total balance from the balance payload.
    pub balance: f64,
    /// Pinned to zero: this aggregation path does not consult the dedicated
    /// profit endpoint. See [`crate::engine::EngineClient::profit`] for the
    /// richer read, kept separate on purpose.
    pub profit_total: f64,
    /// Pinned to zero, same reason as `profit_total`.
    pub profit_ratio: f64,
    /// When this snapshot was assembled.
    pub fetched_at: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Assemble a snapshot from the two raw payloads, applying per-field
    /// placeholders for anything the engine left out.
    pub(crate) fn assemble(config: Value, balance: Value) -> Result<Self, TransportError> {
        let config: ConfigPayload = serde_json::from_value(config)
            .map_err(|err| TransportError::Parse(err.to_string()))?;
        let balance: BalancePayload = serde_json::from_value(balance)
            .map_err(|err| TransportError::Parse(err.to_string()))?;

        Ok(Self {
            state: config.state,
            version: config.version,
            strategy: config.strategy,
            dry_run: config.dry_run,
            trading_mode: config.trading_mode,
            timeframe: config.timeframe,
            exchange: config.exchange,
            balance: balance.total,
            profit_total: 0.0,
            profit_ratio: 0.0,
            fetched_at: Utc::now(),
        })
    }
}

/// Wire shape of `GET /show_config`, reduced to the fields the snapshot
/// consumes. Every field defaults independently when absent.
#[derive(Debug, Deserialize)]
struct ConfigPayload {
    #[serde(default = "unknown")]
    state: String,
    #[serde(default = "unknown")]
    version: String,
    #[serde(default = "unknown")]
    strategy: String,
    #[serde(default = "default_true")]
    dry_run: bool,
    #[serde(default = "spot")]
    trading_mode: String,
    #[serde(default = "unknown")]
    timeframe: String,
    #[serde(default = "unknown")]
    exchange: String,
}

/// Wire shape of `GET /balance`, reduced to the one consumed field.
#[derive(Debug, Deserialize)]
struct BalancePayload {
    #[serde(default)]
    total: f64,
}

fn unknown() -> String {
    "unknown".into()
}

fn spot() -> String {
    "spot".into()
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Auxiliary reads (outside the snapshot)
// ---------------------------------------------------------------------------

/// Subset of `GET /profit` the console displays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfitSummary {
    #[serde(default)]
    pub profit_closed_fiat: f64,
    #[serde(default)]
    pub profit_closed_ratio_mean: f64,
    #[serde(default)]
    pub profit_all_fiat: f64,
    #[serde(default)]
    pub trade_count: u32,
    #[serde(default)]
    pub closed_trade_count: u32,
    #[serde(default)]
    pub winning_trades: u32,
    #[serde(default)]
    pub losing_trades: u32,
    #[serde(default)]
    pub best_pair: String,
    #[serde(default)]
    pub best_rate: f64,
}

/// One trade row from `GET /trades`.
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    pub trade_id: i64,
    pub pair: String,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub open_date: String,
    #[serde(default)]
    pub open_rate: f64,
    #[serde(default)]
    pub close_date: Option<String>,
    #[serde(default)]
    pub close_rate: Option<f64>,
    #[serde(default)]
    pub stake_amount: f64,
    #[serde(default)]
    pub profit_abs: Option<f64>,
    #[serde(default)]
    pub profit_ratio: Option<f64>,
    #[serde(default)]
    pub sell_reason: Option<String>,
}

/// Envelope around the trade list on the wire.
#[derive(Debug, Deserialize)]
pub struct TradesPage {
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub trades_count: usize,
}

/// One engine log line from `GET /logs`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub message: String,
}

/// Envelope around the log lines on the wire.
#[derive(Debug, Deserialize)]
pub struct LogsPage {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// Currently traded pair whitelist from `GET /whitelist`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairList {
    #[serde(default)]
    pub whitelist: Vec<String>,
    #[serde(default)]
    pub method: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assemble_maps_both_payloads() {
        let config = json!({
            "state": "running",
            "version": "2024.1",
            "strategy": "SampleStrategy",
            "dry_run": false,
            "trading_mode": "futures",
            "timeframe": "5m",
            "exchange": "binance",
            "max_open_trades": 3
        });
        let balance = json!({ "total": 1234.5, "currencies": [] });

        let snapshot = StatusSnapshot::assemble(config, balance).unwrap();
        assert_eq!(snapshot.state, "running");
        assert_eq!(snapshot.version, "2024.1");
        assert_eq!(snapshot.strategy, "SampleStrategy");
        assert!(!snapshot.dry_run);
        assert_eq!(snapshot.trading_mode, "futures");
        assert_eq!(snapshot.timeframe, "5m");
        assert_eq!(snapshot.exchange, "binance");
        assert_eq!(snapshot.balance, 1234.5);
    }

    #[test]
    fn absent_fields_default_individually() {
        let snapshot = StatusSnapshot::assemble(json!({}), json!({})).unwrap();
        assert_eq!(snapshot.state, "unknown");
        assert_eq!(snapshot.version, "unknown");
        assert_eq!(snapshot.strategy, "unknown");
        assert!(snapshot.dry_run);
        assert_eq!(snapshot.trading_mode, "spot");
        assert_eq!(snapshot.exchange, "unknown");
        assert_eq!(snapshot.balance, 0.0);
    }

    #[test]
    fn dry_run_false_survives_when_present() {
        let snapshot =
            StatusSnapshot::assemble(json!({ "dry_run": false }), json!({})).unwrap();
        assert!(!snapshot.dry_run);
    }

    #[test]
    fn profit_fields_stay_pinned_to_zero() {
        let config = json!({ "state": "running" });
        let balance = json!({ "total": 50.0 });
        let snapshot = StatusSnapshot::assemble(config, balance).unwrap();
        assert_eq!(snapshot.profit_total, 0.0);
        assert_eq!(snapshot.profit_ratio, 0.0);
    }

    #[test]
    fn non_object_payload_is_a_parse_failure() {
        let result = StatusSnapshot::assemble(json!("running"), json!({}));
        assert!(matches!(result, Err(TransportError::Parse(_))));
    }

    #[test]
    fn trades_page_tolerates_sparse_rows() {
        let page: TradesPage = serde_json::from_value(json!({
            "trades": [
                { "trade_id": 3, "pair": "SOL/USDT", "is_open": true, "open_rate": 60.0 }
            ],
            "trades_count": 1
        }))
        .unwrap();

        assert_eq!(page.trades_count, 1);
        let trade = &page.trades[0];
        assert_eq!(trade.trade_id, 3);
        assert!(trade.is_open);
        assert!(trade.close_rate.is_none());
        assert!(trade.sell_reason.is_none());
    }
}
