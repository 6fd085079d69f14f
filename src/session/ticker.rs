use super::RefreshCoordinator;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Interval between scheduled passes at the given speed
pub fn tick_interval(base: Duration, speed_multiplier: u32) -> Duration {
    base / speed_multiplier.max(1)
}

/// Periodically run refresh passes while the session is running.
///
/// The interval is `base_interval / speed_multiplier`, re-read every tick so
/// a speed change applies from the next tick on. Paused ticks do nothing.
/// Runs until the task is aborted.
pub async fn run_refresh_ticker(coordinator: Arc<RefreshCoordinator>, base_interval: Duration) {
    info!(
        session = %coordinator.session().id(),
        base_interval_ms = base_interval.as_millis() as u64,
        "Starting scheduled refresh"
    );

    loop {
        let speed = coordinator.session().read().config.speed_multiplier;
        tokio::time::sleep(tick_interval(base_interval, speed)).await;

        // A paused session republishes nothing
        coordinator.refresh().await;
    }
}
