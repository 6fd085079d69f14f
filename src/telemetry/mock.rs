use super::{AgentTelemetry, FeedError, TelemetryFeed};
use crate::config::TelemetryConfig;
use crate::fleet::AgentStatus;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

const REPORTED_STATUSES: [AgentStatus; 4] = [
    AgentStatus::Active,
    AgentStatus::Idle,
    AgentStatus::Planning,
    AgentStatus::Moving,
];

/// Random stand-in for a live telemetry feed.
///
/// Draws a fresh `grid_size x grid_size` resource heatmap per sample and
/// random per-agent status. Agents are dropped from a reading with
/// probability `dropout_probability`.
#[derive(Debug, Clone)]
pub struct MockTelemetryFeed {
    grid_size: usize,
    dropout_probability: f64,
}

impl MockTelemetryFeed {
    pub fn new(grid_size: usize, dropout_probability: f64) -> Self {
        Self {
            grid_size,
            dropout_probability: dropout_probability.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self::new(config.grid_size, config.dropout_probability)
    }
}

impl Default for MockTelemetryFeed {
    fn default() -> Self {
        Self::new(10, 0.0)
    }
}

#[async_trait]
impl TelemetryFeed for MockTelemetryFeed {
    async fn sample_distribution(&self) -> Result<Vec<f64>, FeedError> {
        let mut rng = rand::thread_rng();
        let cells = self.grid_size.checked_mul(self.grid_size).ok_or_else(|| {
            FeedError::Unavailable(format!("grid size {} too large", self.grid_size))
        })?;
        Ok((0..cells).map(|_| rng.gen_range(0..100) as f64).collect())
    }

    async fn fleet_telemetry(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, AgentTelemetry>, FeedError> {
        let mut rng = rand::thread_rng();
        let mut readings = HashMap::with_capacity(ids.len());

        for id in ids {
            if rng.gen_bool(self.dropout_probability) {
                continue;
            }
            let status = *REPORTED_STATUSES
                .choose(&mut rng)
                .unwrap_or(&AgentStatus::Idle);
            readings.insert(
                id.clone(),
                AgentTelemetry {
                    status,
                    battery_percent: rng.gen_range(20..100),
                    active_tasks: rng.gen_range(0..5),
                },
            );
        }

        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("agent-{:02}", i)).collect()
    }

    #[tokio::test]
    async fn test_distribution_covers_grid() {
        let feed = MockTelemetryFeed::new(10, 0.0);
        let sample = feed.sample_distribution().await.unwrap();
        assert_eq!(sample.len(), 100);
        assert!(sample.iter().all(|&x| (0.0..100.0).contains(&x)));
    }

    #[tokio::test]
    async fn test_fleet_readings_in_range() {
        let feed = MockTelemetryFeed::default();
        let readings = feed.fleet_telemetry(&ids(20)).await.unwrap();

        assert_eq!(readings.len(), 20);
        for reading in readings.values() {
            assert!((20..100).contains(&reading.battery_percent));
            assert!(reading.active_tasks < 5);
            assert_ne!(reading.status, AgentStatus::Unknown);
        }
    }

    #[tokio::test]
    async fn test_oversized_grid_is_unavailable() {
        let feed = MockTelemetryFeed::new(1 << 33, 0.0);
        let result = feed.sample_distribution().await;
        assert!(matches!(result, Err(FeedError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_full_dropout_reports_nothing() {
        let feed = MockTelemetryFeed::new(10, 1.0);
        let readings = feed.fleet_telemetry(&ids(5)).await.unwrap();
        assert!(readings.is_empty());
    }
}
