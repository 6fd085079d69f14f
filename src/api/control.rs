use crate::control::{RunConfig, RunControl, RunState};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use std::sync::Arc;

/// State for the operator control API
#[derive(Clone)]
pub struct ControlAppState {
    pub control: RunControl,
    /// Required bearer token for mutating routes. None = unrestricted.
    pub control_token: Option<String>,
}

/// Run state and config as shown in the control panel
#[derive(Debug, Serialize)]
pub struct ControlStatus {
    pub state: RunState,
    pub config: RunConfig,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn create_control_router(state: ControlAppState) -> Router {
    Router::new()
        .route("/api/control", get(get_status))
        .route("/api/control/start", post(start))
        .route("/api/control/stop", post(stop))
        .route("/api/control/config", put(put_config))
        .with_state(Arc::new(state))
}

fn status(control: &RunControl) -> Json<ControlStatus> {
    Json(ControlStatus {
        state: control.current_state(),
        config: control.current_config(),
    })
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn unauthorized() -> Response {
    error_response(StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
}

/// GET /api/control - current run state and config
async fn get_status(State(state): State<Arc<ControlAppState>>) -> Response {
    status(&state.control).into_response()
}

/// POST /api/control/start - optional RunConfig body is applied first
async fn start(
    State(state): State<Arc<ControlAppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !validate_control_token(&headers, &state.control_token) {
        return unauthorized();
    }

    if body.is_empty() {
        state.control.start();
    } else {
        let config: RunConfig = match serde_json::from_slice(&body) {
            Ok(config) => config,
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, format!("invalid body: {}", e))
            }
        };
        if let Err(e) = state.control.start_with(config) {
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    }

    status(&state.control).into_response()
}

/// POST /api/control/stop
async fn stop(State(state): State<Arc<ControlAppState>>, headers: HeaderMap) -> Response {
    if !validate_control_token(&headers, &state.control_token) {
        return unauthorized();
    }

    state.control.stop();
    status(&state.control).into_response()
}

/// PUT /api/control/config - full RunConfig, validated
async fn put_config(
    State(state): State<Arc<ControlAppState>>,
    headers: HeaderMap,
    Json(config): Json<RunConfig>,
) -> Response {
    if !validate_control_token(&headers, &state.control_token) {
        return unauthorized();
    }

    if let Err(e) = state.control.set_config(config) {
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    status(&state.control).into_response()
}

/// Returns true if the bearer token in `Authorization` matches the expected token.
/// Returns true (no restriction) when `expected` is None.
fn validate_control_token(headers: &HeaderMap, expected: &Option<String>) -> bool {
    let Some(expected_token) = expected else {
        return true;
    };

    let Some(auth_header) = headers.get("Authorization") else {
        return false;
    };
    let Ok(value) = auth_header.to_str() else {
        return false;
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return false;
    };

    token == expected_token
}
