use super::{Degradation, DisplaySnapshot, Session, SnapshotField};
use crate::control::RunState;
use crate::fairness::{atkinson_index, DEFAULT_EPSILON};
use crate::fleet::FleetSnapshotProvider;
use crate::telemetry::{with_timeout, TelemetryFeed};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

/// Tunables for refresh passes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshOptions {
    /// Atkinson inequality aversion
    pub epsilon: f64,
    /// Upper bound on each feed call
    pub feed_timeout: Duration,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            feed_timeout: Duration::from_millis(500),
        }
    }
}

/// Runs refresh passes for one session and publishes the results.
///
/// Passes are serialized: each one reads the run state, pulls fairness and
/// fleet data, and swaps in a complete `DisplaySnapshot`. Readers never see
/// a snapshot assembled from two passes.
pub struct RefreshCoordinator {
    session: Session,
    feed: Arc<dyn TelemetryFeed>,
    fleet: FleetSnapshotProvider,
    options: RefreshOptions,

    /// Held for the whole pass
    pass_lock: Mutex<()>,

    /// Published snapshots for push subscribers
    snapshot_tx: broadcast::Sender<Arc<DisplaySnapshot>>,
}

impl RefreshCoordinator {
    pub fn new(session: Session, feed: Arc<dyn TelemetryFeed>, options: RefreshOptions) -> Self {
        let (snapshot_tx, _) = broadcast::channel(16);
        let fleet = FleetSnapshotProvider::new(Arc::clone(&feed), options.feed_timeout);

        Self {
            session,
            feed,
            fleet,
            options,
            pass_lock: Mutex::new(()),
            snapshot_tx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Last published snapshot, without running a pass
    pub fn current(&self) -> Arc<DisplaySnapshot> {
        self.session.published()
    }

    /// Subscribe to snapshots as they are published
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DisplaySnapshot>> {
        self.snapshot_tx.subscribe()
    }

    /// Run one refresh pass.
    ///
    /// While paused this returns the published snapshot unchanged. While
    /// running it builds, stores and broadcasts a new one. Feed and metric
    /// failures never fail the pass; they fall back to previous values and
    /// are listed in `degraded`.
    pub async fn refresh(&self) -> Arc<DisplaySnapshot> {
        let _pass = self.pass_lock.lock().await;

        let (run_state, config, roster, previous) = {
            let state = self.session.read();
            (
                state.run_state,
                state.config,
                state.roster.clone(),
                Arc::clone(&state.published),
            )
        };

        if run_state == RunState::Paused {
            return previous;
        }

        let mut degraded = Vec::new();

        let fairness = match with_timeout(
            self.options.feed_timeout,
            self.feed.sample_distribution(),
        )
        .await
        {
            Ok(sample) => match atkinson_index(&sample, self.options.epsilon) {
                Ok(index) => index,
                Err(e) => {
                    warn!(error = %e, "Distribution rejected, keeping previous fairness");
                    degraded.push(Degradation::InvalidDistribution {
                        reason: e.to_string(),
                    });
                    previous.fairness
                }
            },
            Err(e) => {
                warn!(error = %e, "Distribution sample unavailable, keeping previous fairness");
                degraded.push(Degradation::FeedUnavailable {
                    field: SnapshotField::Fairness,
                    reason: e.to_string(),
                });
                previous.fairness
            }
        };

        let reading = self
            .fleet
            .snapshot(config.agent_count as usize, &roster)
            .await;
        if let Some(e) = reading.feed_error {
            degraded.push(Degradation::FeedUnavailable {
                field: SnapshotField::Fleet,
                reason: e.to_string(),
            });
        }

        let snapshot = Arc::new(DisplaySnapshot {
            session_id: self.session.id(),
            pass: previous.pass + 1,
            timestamp: Utc::now(),
            fairness,
            fairness_delta: Some(fairness - previous.fairness),
            fleet: reading.fleet,
            degraded,
        });

        self.session.write().published = Arc::clone(&snapshot);

        debug!(
            session = %self.session.id(),
            pass = snapshot.pass,
            fairness = snapshot.fairness,
            agents = snapshot.fleet.len(),
            degraded = snapshot.degraded.len(),
            "Published display snapshot"
        );

        // No subscribers is fine
        let _ = self.snapshot_tx.send(Arc::clone(&snapshot));

        snapshot
    }
}
