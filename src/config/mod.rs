mod env;

use crate::control::{RunConfig, SimulationMode};
use crate::fairness::DEFAULT_EPSILON;
use crate::fleet::DEFAULT_ROSTER;
use crate::geo::MapView;
use crate::session::RefreshOptions;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

/// Complete dashboard configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AncaConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub fleet: FleetConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub map: MapView,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Initial run parameters and metric settings for new sessions
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub mode: SimulationMode,
    #[serde(default = "default_agent_count")]
    pub agent_count: u32,
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: u32,
    /// Fairness shown before the first pass
    #[serde(default = "default_initial_fairness")]
    pub initial_fairness: f64,
    /// Atkinson inequality aversion
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_agent_count() -> u32 {
    4
}

fn default_speed_multiplier() -> u32 {
    1
}

fn default_initial_fairness() -> f64 {
    0.45
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: SimulationMode::default(),
            agent_count: default_agent_count(),
            speed_multiplier: default_speed_multiplier(),
            initial_fairness: default_initial_fairness(),
            epsilon: default_epsilon(),
        }
    }
}

impl SessionConfig {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            mode: self.mode,
            agent_count: self.agent_count,
            speed_multiplier: self.speed_multiplier,
        }
    }
}

/// Roster seed names
#[derive(Debug, Clone, Deserialize)]
pub struct FleetConfig {
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,
}

fn default_roster() -> Vec<String> {
    DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect()
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
        }
    }
}

/// Telemetry feed settings
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Upper bound on a single feed call (milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Side of the mock resource heatmap
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Chance the mock feed drops an agent from a reading
    #[serde(default)]
    pub dropout_probability: f64,
}

fn default_timeout_ms() -> u64 {
    500
}

/// Largest accepted mock heatmap side
pub const MAX_GRID_SIZE: usize = 1000;

fn default_grid_size() -> usize {
    10
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            grid_size: default_grid_size(),
            dropout_probability: 0.0,
        }
    }
}

/// How refresh passes are triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMode {
    /// One pass per dashboard read
    Render,
    /// Background ticker at `base_interval_ms / speed_multiplier`
    Scheduled,
}

impl std::str::FromStr for RefreshMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "render" => Ok(RefreshMode::Render),
            "scheduled" => Ok(RefreshMode::Scheduled),
            other => Err(format!("unknown refresh mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_refresh_mode")]
    pub mode: RefreshMode,
    /// Scheduled interval at 1x speed (milliseconds)
    #[serde(default = "default_base_interval_ms")]
    pub base_interval_ms: u64,
}

fn default_refresh_mode() -> RefreshMode {
    RefreshMode::Render
}

fn default_base_interval_ms() -> u64 {
    2000
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            mode: default_refresh_mode(),
            base_interval_ms: default_base_interval_ms(),
        }
    }
}

impl RefreshConfig {
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Bearer token required on control routes. None = unrestricted.
    #[serde(default)]
    pub control_token: Option<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8501".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            control_token: None,
        }
    }
}

impl AncaConfig {
    /// Options for the refresh coordinator
    pub fn refresh_options(&self) -> RefreshOptions {
        RefreshOptions {
            epsilon: self.session.epsilon,
            feed_timeout: Duration::from_millis(self.telemetry.timeout_ms),
        }
    }

    /// Reject settings the session could not start with
    pub fn validate(&self) -> Result<()> {
        self.session
            .run_config()
            .validate()
            .context("Invalid [session] defaults")?;

        if !(0.0..=1.0).contains(&self.session.initial_fairness) {
            bail!(
                "session.initial_fairness must be within [0, 1], got {}",
                self.session.initial_fairness
            );
        }
        if !self.session.epsilon.is_finite() || self.session.epsilon < 0.0 {
            bail!(
                "session.epsilon must be finite and non-negative, got {}",
                self.session.epsilon
            );
        }

        let mut seen = HashSet::new();
        for name in &self.fleet.roster {
            if name.trim().is_empty() {
                bail!("fleet.roster contains an empty name");
            }
            if !seen.insert(name) {
                bail!("fleet.roster contains duplicate name '{}'", name);
            }
        }

        if !(0.0..=1.0).contains(&self.telemetry.dropout_probability) {
            bail!(
                "telemetry.dropout_probability must be within [0, 1], got {}",
                self.telemetry.dropout_probability
            );
        }
        if !(1..=MAX_GRID_SIZE).contains(&self.telemetry.grid_size) {
            bail!(
                "telemetry.grid_size must be within 1..={}, got {}",
                MAX_GRID_SIZE,
                self.telemetry.grid_size
            );
        }
        if self.telemetry.timeout_ms == 0 {
            bail!("telemetry.timeout_ms must be positive");
        }
        if self.refresh.base_interval_ms == 0 {
            bail!("refresh.base_interval_ms must be positive");
        }

        self.map.validate().context("Invalid [map] settings")?;

        Ok(())
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<AncaConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: AncaConfig =
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path))?;
    Ok(config)
}

/// Build the effective configuration: the file at `ANCA_CONFIG` if set
/// (defaults otherwise), then env overrides, then validation.
pub fn resolve_config() -> Result<AncaConfig> {
    let mut config = match std::env::var("ANCA_CONFIG") {
        Ok(path) => load_config(&path)?,
        Err(_) => AncaConfig::default(),
    };
    env::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}
