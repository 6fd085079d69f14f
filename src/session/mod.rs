// Session state and the refresh engine that publishes display snapshots

mod coordinator;
mod snapshot;
mod ticker;

pub use coordinator::{RefreshCoordinator, RefreshOptions};
pub use snapshot::{Degradation, DisplaySnapshot, SnapshotField};
pub use ticker::{run_refresh_ticker, tick_interval};

use crate::control::{ConfigError, RunConfig, RunState};
use crate::fleet::Roster;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;


/// Everything a dashboard instance owns. Mutated only through
/// `RunControl` and `RefreshCoordinator`.
#[derive(Debug)]
pub struct SessionState {
    pub(crate) run_state: RunState,
    pub(crate) config: RunConfig,
    pub(crate) roster: Roster,
    pub(crate) published: Arc<DisplaySnapshot>,
}

/// Run state, config and published snapshot taken under one read
#[derive(Debug, Clone)]
pub struct SessionView {
    pub run_state: RunState,
    pub config: RunConfig,
    pub published: Arc<DisplaySnapshot>,
}

/// Cloneable handle to one dashboard session's state
#[derive(Clone, Debug)]
pub struct Session {
    id: Uuid,
    state: Arc<RwLock<SessionState>>,
}

impl Session {
    /// Create a paused session.
    ///
    /// The roster is seeded from `roster_seed` and sized to the config's
    /// agent count. The published snapshot starts at pass 0 with the seed
    /// fairness and an empty fleet.
    pub fn new(
        config: RunConfig,
        roster_seed: Vec<String>,
        initial_fairness: f64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let roster = Roster::new(roster_seed, config.agent_count as usize);
        Ok(Self::build(config, roster, initial_fairness))
    }

    /// Paused session with the default config and roster
    pub fn with_defaults(initial_fairness: f64) -> Self {
        let config = RunConfig::default();
        let roster = Roster::with_defaults(config.agent_count as usize);
        Self::build(config, roster, initial_fairness)
    }

    fn build(config: RunConfig, roster: Roster, initial_fairness: f64) -> Self {
        let id = Uuid::now_v7();
        let published = Arc::new(DisplaySnapshot::seed(id, initial_fairness.clamp(0.0, 1.0)));

        Self {
            id,
            state: Arc::new(RwLock::new(SessionState {
                run_state: RunState::Paused,
                config,
                roster,
                published,
            })),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Last published snapshot
    pub fn published(&self) -> Arc<DisplaySnapshot> {
        Arc::clone(&self.read().published)
    }

    /// Consistent point-in-time read for display. `config` may already
    /// hold an operator change that the next pass will apply.
    pub fn view(&self) -> SessionView {
        let state = self.read();
        SessionView {
            run_state: state.run_state,
            config: state.config,
            published: Arc::clone(&state.published),
        }
    }

    /// Current roster identities
    pub fn roster(&self) -> Roster {
        self.read().roster.clone()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().expect("session lock poisoned")
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().expect("session lock poisoned")
    }
}
