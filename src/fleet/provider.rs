use super::{AgentRecord, FleetSnapshot, Roster};
use crate::telemetry::{with_timeout, FeedError, TelemetryFeed};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Result of one fleet read: always a full snapshot, plus the feed error
/// if the whole telemetry call failed.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetReading {
    pub fleet: FleetSnapshot,
    pub feed_error: Option<FeedError>,
}

/// Builds fleet snapshots from the telemetry feed
#[derive(Clone)]
pub struct FleetSnapshotProvider {
    feed: Arc<dyn TelemetryFeed>,
    timeout: Duration,
}

impl FleetSnapshotProvider {
    pub fn new(feed: Arc<dyn TelemetryFeed>, timeout: Duration) -> Self {
        Self { feed, timeout }
    }

    /// One record per roster identity, in roster order.
    ///
    /// Agents without telemetry are reported as `Unknown`; if the feed call
    /// fails outright every agent is `Unknown`. Identities are never
    /// invented here, so the caller must keep `roster.len() == agent_count`.
    pub async fn snapshot(&self, agent_count: usize, roster: &Roster) -> FleetReading {
        if roster.len() != agent_count {
            warn!(
                agent_count = agent_count,
                roster_len = roster.len(),
                "Roster length does not match agent count"
            );
        }
        let ids = &roster.ids()[..agent_count.min(roster.len())];

        let telemetry = match with_timeout(self.timeout, self.feed.fleet_telemetry(ids)).await {
            Ok(telemetry) => telemetry,
            Err(e) => {
                warn!(error = %e, agents = ids.len(), "Fleet telemetry unavailable");
                return FleetReading {
                    fleet: ids.iter().map(|id| AgentRecord::unknown(id)).collect(),
                    feed_error: Some(e),
                };
            }
        };

        let fleet = ids
            .iter()
            .map(|id| match telemetry.get(id) {
                Some(reading) => {
                    if reading.battery_percent > 100 {
                        warn!(
                            agent = %id,
                            battery_percent = reading.battery_percent,
                            "Battery reading above 100%, clamping"
                        );
                    }
                    AgentRecord::from_telemetry(id, reading)
                }
                None => AgentRecord::unknown(id),
            })
            .collect();

        FleetReading {
            fleet,
            feed_error: None,
        }
    }
}
