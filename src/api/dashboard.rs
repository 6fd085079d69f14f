use crate::config::RefreshMode;
use crate::control::{RunConfig, RunState};
use crate::fleet::FleetSummary;
use crate::geo::MapView;
use crate::session::{DisplaySnapshot, RefreshCoordinator};
use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Shared state for the display read API
pub struct DashboardAppState {
    pub coordinator: Arc<RefreshCoordinator>,
    pub refresh_mode: RefreshMode,
    pub map: MapView,
}

/// Everything one dashboard render needs
#[derive(Serialize)]
pub struct DashboardResponse {
    pub state: RunState,
    pub config: RunConfig,
    pub snapshot: Arc<DisplaySnapshot>,
    pub summary: FleetSummary,
}

pub fn create_dashboard_router(state: Arc<DashboardAppState>) -> Router {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/map", get(get_map))
        .with_state(state)
}

/// GET /api/dashboard
///
/// In render mode each request is a render pass and runs one refresh. In
/// scheduled mode the ticker owns refreshing and this only reads. The
/// response fields come from a single session read.
async fn get_dashboard(State(state): State<Arc<DashboardAppState>>) -> Json<DashboardResponse> {
    if state.refresh_mode == RefreshMode::Render {
        state.coordinator.refresh().await;
    }

    let view = state.coordinator.session().view();
    Json(DashboardResponse {
        state: view.run_state,
        config: view.config,
        summary: view.published.summary(),
        snapshot: view.published,
    })
}

/// GET /api/map - geospatial overlay markers
async fn get_map(State(state): State<Arc<DashboardAppState>>) -> Response {
    Json(state.map.clone()).into_response()
}
