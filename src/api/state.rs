use std::sync::Arc;

use tokio::sync::RwLock;

use crate::clock::Clock;
use crate::complaints::ComplaintLog;
use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::error::DispatchError;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable. The dispatcher lock is the single serialization point
/// for ticks: writers run one operation to completion, readers see a
/// consistent snapshot.
#[derive(Clone)]
pub struct AppState {
    /// The scheduling engine.
    pub dispatcher: Arc<RwLock<Dispatcher>>,
    /// Customer feedback log.
    pub complaints: Arc<RwLock<ComplaintLog>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Time source for every engine call.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Builds a fresh engine from the configuration.
    pub fn new(config: ServerConfig, clock: Arc<dyn Clock>) -> Result<Self, DispatchError> {
        let dispatcher = Dispatcher::new(config.dispatch.clone())?;
        Ok(Self {
            dispatcher: Arc::new(RwLock::new(dispatcher)),
            complaints: Arc::new(RwLock::new(ComplaintLog::new())),
            config: Arc::new(config),
            clock,
        })
    }

    /// Current time from the configured clock.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }
}
