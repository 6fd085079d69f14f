// Run control: RUNNING/PAUSED state machine and operator-set parameters

use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};


pub const MIN_AGENTS: u32 = 1;
pub const MAX_AGENTS: u32 = 20;
pub const ALLOWED_SPEEDS: [u32; 4] = [1, 2, 5, 10];

/// Whether refresh passes pull new data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunState {
    Running,
    Paused,
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Paused
    }
}

/// Simulation mode selected by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    OfflineTraining,
    LiveDeployment,
    Replay,
}

impl Default for SimulationMode {
    fn default() -> Self {
        SimulationMode::OfflineTraining
    }
}

/// Operator-set run parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub mode: SimulationMode,
    pub agent_count: u32,
    pub speed_multiplier: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: SimulationMode::default(),
            agent_count: 4,
            speed_multiplier: 1,
        }
    }
}

impl RunConfig {
    /// Check ranges: 1..=20 agents, speed one of 1x/2x/5x/10x
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_AGENTS..=MAX_AGENTS).contains(&self.agent_count) {
            return Err(ConfigError::AgentCountOutOfRange(self.agent_count));
        }
        if !ALLOWED_SPEEDS.contains(&self.speed_multiplier) {
            return Err(ConfigError::UnsupportedSpeed(self.speed_multiplier));
        }
        Ok(())
    }
}

/// Rejected operator input. The previous config stays in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    AgentCountOutOfRange(u32),
    UnsupportedSpeed(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::AgentCountOutOfRange(n) => write!(
                f,
                "invalid config: agent_count {} outside {}..={}",
                n, MIN_AGENTS, MAX_AGENTS
            ),
            ConfigError::UnsupportedSpeed(s) => write!(
                f,
                "invalid config: speed_multiplier {} not one of {:?}",
                s, ALLOWED_SPEEDS
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Operator-facing handle over a session's run state and config
#[derive(Clone)]
pub struct RunControl {
    session: Session,
}

impl RunControl {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Set RUNNING. No-op when already running.
    pub fn start(&self) {
        let mut state = self.session.write();
        if state.run_state != RunState::Running {
            state.run_state = RunState::Running;
            info!(session = %self.session.id(), "Simulation started");
        }
    }

    /// Set PAUSED. No-op when already paused.
    pub fn stop(&self) {
        let mut state = self.session.write();
        if state.run_state != RunState::Paused {
            state.run_state = RunState::Paused;
            info!(session = %self.session.id(), "Simulation paused");
        }
    }

    /// Validate and apply `config`, resizing the roster to match.
    ///
    /// On error nothing changes.
    pub fn set_config(&self, config: RunConfig) -> Result<(), ConfigError> {
        if let Err(e) = config.validate() {
            warn!(session = %self.session.id(), error = %e, "Rejected run config");
            return Err(e);
        }

        let mut state = self.session.write();
        state.config = config;
        state.roster.resize(config.agent_count as usize);

        info!(
            session = %self.session.id(),
            mode = ?config.mode,
            agent_count = config.agent_count,
            speed_multiplier = config.speed_multiplier,
            "Run config applied"
        );
        Ok(())
    }

    /// Apply `config` then start. An invalid config leaves the run state as it was.
    pub fn start_with(&self, config: RunConfig) -> Result<(), ConfigError> {
        self.set_config(config)?;
        self.start();
        Ok(())
    }

    pub fn current_state(&self) -> RunState {
        self.session.read().run_state
    }

    pub fn current_config(&self) -> RunConfig {
        self.session.read().config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
