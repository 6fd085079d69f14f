use crate::fleet::{FleetSnapshot, FleetSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot field a degradation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotField {
    Fairness,
    Fleet,
}

/// Why part of a snapshot is stale or defaulted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// Feed failed or timed out; the field holds a fallback value
    FeedUnavailable { field: SnapshotField, reason: String },
    /// Distribution sample was rejected; fairness is the previous value
    InvalidDistribution { reason: String },
}

/// Immutable bundle published by one refresh pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub session_id: Uuid,
    /// Published pass number; 0 is the seed snapshot
    pub pass: u64,
    pub timestamp: DateTime<Utc>,
    /// Atkinson index, lower is more equal
    pub fairness: f64,
    /// Change from the previously published fairness
    pub fairness_delta: Option<f64>,
    pub fleet: FleetSnapshot,
    pub degraded: Vec<Degradation>,
}

impl DisplaySnapshot {
    /// Pass-0 snapshot: seed fairness, no fleet data yet
    pub fn seed(session_id: Uuid, fairness: f64) -> Self {
        Self {
            session_id,
            pass: 0,
            timestamp: Utc::now(),
            fairness,
            fairness_delta: None,
            fleet: Vec::new(),
            degraded: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    pub fn summary(&self) -> FleetSummary {
        FleetSummary::from_fleet(&self.fleet)
    }
}
