// Fleet status rows and the roster they are built over

mod provider;
mod roster;

pub use provider::{FleetReading, FleetSnapshotProvider};
pub use roster::{Roster, DEFAULT_ROSTER};

use crate::telemetry::AgentTelemetry;
use serde::{Deserialize, Serialize};

/// Agent status as shown in the fleet table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentStatus {
    Active,
    Idle,
    Planning,
    Moving,
    /// No telemetry was available for this agent in the pass
    Unknown,
}

impl AgentStatus {
    /// True for statuses that count towards "active agents"
    pub fn is_engaged(self) -> bool {
        matches!(
            self,
            AgentStatus::Active | AgentStatus::Planning | AgentStatus::Moving
        )
    }
}

/// One row of the fleet table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: String,
    pub status: AgentStatus,
    /// None when status is Unknown
    pub battery_percent: Option<u8>,
    /// None when status is Unknown
    pub active_tasks: Option<u32>,
}

impl AgentRecord {
    pub fn unknown(id: &str) -> Self {
        Self {
            id: id.to_string(),
            status: AgentStatus::Unknown,
            battery_percent: None,
            active_tasks: None,
        }
    }

    pub fn from_telemetry(id: &str, telemetry: &AgentTelemetry) -> Self {
        Self {
            id: id.to_string(),
            status: telemetry.status,
            battery_percent: Some(telemetry.battery_percent.min(100)),
            active_tasks: Some(telemetry.active_tasks),
        }
    }
}

/// Ordered fleet rows, one per roster identity
pub type FleetSnapshot = Vec<AgentRecord>;

/// Aggregates shown on the dashboard's metric cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total: usize,
    /// Agents with telemetry this pass
    pub reporting: usize,
    /// Agents Active, Planning or Moving
    pub active: usize,
    pub mean_battery_percent: Option<f64>,
    pub total_active_tasks: u64,
}

impl FleetSummary {
    pub fn from_fleet(fleet: &[AgentRecord]) -> Self {
        let batteries: Vec<f64> = fleet
            .iter()
            .filter_map(|r| r.battery_percent)
            .map(f64::from)
            .collect();

        let mean_battery_percent = if batteries.is_empty() {
            None
        } else {
            Some(batteries.iter().sum::<f64>() / batteries.len() as f64)
        };

        Self {
            total: fleet.len(),
            reporting: fleet
                .iter()
                .filter(|r| r.status != AgentStatus::Unknown)
                .count(),
            active: fleet.iter().filter(|r| r.status.is_engaged()).count(),
            mean_battery_percent,
            total_active_tasks: fleet
                .iter()
                .filter_map(|r| r.active_tasks)
                .map(u64::from)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: AgentStatus, battery: u8, tasks: u32) -> AgentRecord {
        AgentRecord::from_telemetry(
            id,
            &AgentTelemetry {
                status,
                battery_percent: battery,
                active_tasks: tasks,
            },
        )
    }

    #[test]
    fn test_summary_counts() {
        let fleet = vec![
            record("a", AgentStatus::Active, 80, 2),
            record("b", AgentStatus::Idle, 40, 0),
            record("c", AgentStatus::Moving, 60, 3),
            AgentRecord::unknown("d"),
        ];

        let summary = FleetSummary::from_fleet(&fleet);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.reporting, 3);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.mean_battery_percent, Some(60.0));
        assert_eq!(summary.total_active_tasks, 5);
    }

    #[test]
    fn test_summary_of_unknown_fleet() {
        let fleet = vec![AgentRecord::unknown("a"), AgentRecord::unknown("b")];
        let summary = FleetSummary::from_fleet(&fleet);
        assert_eq!(summary.reporting, 0);
        assert_eq!(summary.mean_battery_percent, None);
        assert_eq!(summary.total_active_tasks, 0);
    }

    #[test]
    fn test_battery_capped_at_full() {
        let r = record("a", AgentStatus::Active, 250, 1);
        assert_eq!(r.battery_percent, Some(100));
    }

    #[test]
    fn test_status_serializes_by_name() {
        assert_eq!(
            serde_json::to_string(&AgentStatus::Planning).unwrap(),
            "\"Planning\""
        );
    }
}
