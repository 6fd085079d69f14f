// Telemetry feed seam between the dashboard core and the observed system

mod mock;

pub use mock::MockTelemetryFeed;

use crate::fleet::AgentStatus;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Live status reported by the feed for one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTelemetry {
    pub status: AgentStatus,
    pub battery_percent: u8,
    pub active_tasks: u32,
}

/// Feed failures. Callers treat every variant as "data unavailable this pass".
#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    Unavailable(String),
    Timeout(Duration),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Unavailable(reason) => write!(f, "telemetry feed unavailable: {}", reason),
            FeedError::Timeout(after) => {
                write!(f, "telemetry feed timed out after {}ms", after.as_millis())
            }
        }
    }
}

impl std::error::Error for FeedError {}

/// External source of fleet telemetry and resource distribution samples.
///
/// Implementations may block on I/O; the core bounds every call with a
/// timeout and never retries within a pass.
#[async_trait]
pub trait TelemetryFeed: Send + Sync {
    /// Current resource allocation sample, one non-negative share per unit
    async fn sample_distribution(&self) -> Result<Vec<f64>, FeedError>;

    /// Live status for the given agent ids. Ids the feed knows nothing
    /// about are simply absent from the returned map.
    async fn fleet_telemetry(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, AgentTelemetry>, FeedError>;
}

/// Run a feed call, mapping an elapsed `limit` to `FeedError::Timeout`.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, FeedError>
where
    F: std::future::Future<Output = Result<T, FeedError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(FeedError::Timeout(limit)),
    }
}
