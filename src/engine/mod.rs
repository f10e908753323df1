//! Remote control-plane client for the trading engine.
//!
//! The engine is an opaque, Basic-Auth-protected HTTP service. This module
//! owns everything stateful about talking to it: the resolved credentials,
//! the tri-state connection value, and the latest status snapshot. The UI
//! layers above only consume accessors and classified results; they never
//! mutate client state directly.

pub mod auth;
pub mod classify;
pub mod status;
pub mod transport;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use self::auth::Credentials;
use self::classify::ClassifiedError;
use self::status::{LogEntry, LogsPage, PairList, ProfitSummary, StatusSnapshot, Trade, TradesPage};
use self::transport::{HttpTransport, Transport};
use crate::error::TransportError;

/// Connection state owned by the client.
///
/// Only [`EngineClient::probe`] transitions this value; no other operation
/// may set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Initial state, and the landing state of every failed probe.
    #[default]
    Disconnected,
    /// Transient, entered only while a probe is in flight.
    Checking,
    /// Reached only through a successful probe; held until one fails.
    Connected,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Checking => write!(f, "checking"),
            Self::Connected => write!(f, "connected"),
        }
    }
}

/// Client for the engine's control-plane API.
///
/// Construct one per engine, probe it, then read status and issue commands.
/// All operations return classified results; nothing here panics for
/// expected failures.
///
/// # Concurrency
///
/// Operations take `&self` and may be awaited concurrently. The client does
/// not serialize overlapping `probe()`/`aggregate()` calls: their
/// completions may interleave and the last one to finish wins, which can
/// overwrite fresh state with stale state. Callers wanting stricter ordering
/// must provide it themselves.
pub struct EngineClient {
    transport: Box<dyn Transport>,
    base_url: String,
    connection: RwLock<ConnectionState>,
    snapshot: RwLock<Option<StatusSnapshot>>,
}

impl EngineClient {
    /// Build a client over HTTP with the given resolved credentials.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        let base_url = credentials.base_url().to_string();
        Self::with_transport(base_url, Box::new(HttpTransport::new(credentials)))
    }

    /// Build a client over an arbitrary transport; tests inject a scripted
    /// one through this seam.
    #[must_use]
    pub fn with_transport(base_url: String, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            base_url,
            connection: RwLock::new(ConnectionState::Disconnected),
            snapshot: RwLock::new(None),
        }
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        *self.connection.read()
    }

    /// Latest successfully aggregated snapshot, if any. A failed aggregation
    /// leaves this at the previous (stale-but-valid) value.
    pub fn status(&self) -> Option<StatusSnapshot> {
        self.snapshot.read().clone()
    }

    /// Base URL the client was resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reachability probe: the only operation that transitions
    /// [`ConnectionState`].
    ///
    /// Moves to `Checking`, pings the engine, and on a `pong` reply moves to
    /// `Connected` and triggers one best-effort aggregation. Any other
    /// outcome lands on `Disconnected` with a classified error.
    pub async fn probe(&self) -> Result<(), ClassifiedError> {
        *self.connection.write() = ConnectionState::Checking;
        info!(url = %self.base_url, "probing engine");

        let payload = match self.transport.get("/ping").await {
            Ok(payload) => payload,
            Err(err) => {
                *self.connection.write() = ConnectionState::Disconnected;
                return Err(self.classified(&err));
            }
        };

        let pong = payload.get("status").and_then(Value::as_str) == Some("pong");
        if !pong {
            *self.connection.write() = ConnectionState::Disconnected;
            return Err(classify::unexpected(
                "unexpected reply from the reachability endpoint",
            ));
        }

        *self.connection.write() = ConnectionState::Connected;
        info!("engine reachable");

        // Refresh is best-effort: a failed aggregation does not undo the
        // successful probe. The error surfaces on the next explicit call.
        if let Err(err) = self.aggregate().await {
            warn!(error = %err, "post-probe status refresh failed");
        }

        Ok(())
    }

    /// Aggregate the engine's configuration and balance reads into one
    /// full-replace snapshot.
    ///
    /// Precondition: only meaningful while `Connected`. Anywhere else this
    /// is a deliberate no-op returning the previous snapshot unchanged, with
    /// no transport traffic.
    ///
    /// The two reads run sequentially, configuration first. If either
    /// fails, no snapshot is produced and the previous one is retained.
    pub async fn aggregate(&self) -> Result<Option<StatusSnapshot>, ClassifiedError> {
        if self.connection_state() != ConnectionState::Connected {
            debug!("skipping status aggregation while not connected");
            return Ok(self.status());
        }

        let config = self
            .transport
            .get("/show_config")
            .await
            .map_err(|err| self.classified(&err))?;
        let balance = self
            .transport
            .get("/balance")
            .await
            .map_err(|err| self.classified(&err))?;

        let snapshot =
            StatusSnapshot::assemble(config, balance).map_err(|err| self.classified(&err))?;

        *self.snapshot.write() = Some(snapshot.clone());
        debug!(state = %snapshot.state, balance = snapshot.balance, "status snapshot replaced");
        Ok(Some(snapshot))
    }

    /// Start the engine's trade loop, then refresh status best-effort.
    pub async fn start(&self) -> Result<(), ClassifiedError> {
        self.command("/start", None).await?;
        info!("engine start acknowledged");
        self.refresh_after_command().await;
        Ok(())
    }

    /// Stop the engine's trade loop, then refresh status best-effort.
    pub async fn stop(&self) -> Result<(), ClassifiedError> {
        self.command("/stop", None).await?;
        info!("engine stop acknowledged");
        self.refresh_after_command().await;
        Ok(())
    }

    /// Force an entry for a pair, optionally at a limit price. Forwarded
    /// as-is; the engine's own semantics govern duplicates and rejections.
    pub async fn force_entry(&self, pair: &str, price: Option<f64>) -> Result<(), ClassifiedError> {
        let mut body = json!({ "pair": pair });
        if let Some(price) = price {
            body["price"] = json!(price);
        }
        self.command("/forcebuy", Some(body)).await?;
        info!(pair, "force entry acknowledged");
        Ok(())
    }

    /// Force an exit for an open trade.
    pub async fn force_exit(&self, trade_id: i64) -> Result<(), ClassifiedError> {
        self.command("/forcesell", Some(json!({ "tradeid": trade_id })))
            .await?;
        info!(trade_id, "force exit acknowledged");
        Ok(())
    }

    /// Profit totals from the dedicated endpoint. Deliberately separate from
    /// the snapshot, whose profit fields stay zeroed.
    pub async fn profit(&self) -> Result<ProfitSummary, ClassifiedError> {
        self.read("/profit").await
    }

    /// Recent trades, as the engine pages them.
    pub async fn trades(&self, limit: usize) -> Result<Vec<Trade>, ClassifiedError> {
        let page: TradesPage = self.read(&format!("/trades?limit={limit}")).await?;
        Ok(page.trades)
    }

    /// Recent engine log lines.
    pub async fn logs(&self, limit: usize) -> Result<Vec<LogEntry>, ClassifiedError> {
        let page: LogsPage = self.read(&format!("/logs?limit={limit}")).await?;
        Ok(page.logs)
    }

    /// Currently traded pair whitelist.
    pub async fn whitelist(&self) -> Result<PairList, ClassifiedError> {
        self.read("/whitelist").await
    }

    async fn command(&self, path: &str, body: Option<Value>) -> Result<(), ClassifiedError> {
        // Acknowledgement payloads carry no fields this client consumes.
        self.transport
            .post(path, body)
            .await
            .map(|_| ())
            .map_err(|err| self.classified(&err))
    }

    /// Post-command refresh. Command success and refresh success are
    /// independent outcomes; a failed refresh is logged, not returned.
    async fn refresh_after_command(&self) {
        if let Err(err) = self.aggregate().await {
            warn!(error = %err, "status refresh after command failed");
        }
    }

    async fn read<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClassifiedError> {
        let payload = self
            .transport
            .get(path)
            .await
            .map_err(|err| self.classified(&err))?;
        serde_json::from_value(payload)
            .map_err(|err| self.classified(&TransportError::Parse(err.to_string())))
    }

    fn classified(&self, err: &TransportError) -> ClassifiedError {
        classify::classify(err, &self.base_url)
    }
}
