use crate::api::protocol::{ErrorMessage, SnapshotMessage};
use crate::session::{DisplaySnapshot, RefreshCoordinator};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Shared application state for the WebSocket handler
#[derive(Clone)]
pub struct WsAppState {
    pub coordinator: Arc<RefreshCoordinator>,
}

/// GET /api/ws - WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsAppState>>) -> Response {
    info!("WebSocket upgrade request received");
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

pub fn create_ws_router(state: Arc<WsAppState>) -> Router {
    Router::new()
        .route("/api/ws", get(ws_handler))
        .with_state(state)
}

/// Push the current snapshot, then every newly published one
async fn handle_socket(mut socket: WebSocket, state: Arc<WsAppState>) {
    // Subscribe before reading current so nothing published in between is lost
    let mut snapshot_rx = state.coordinator.subscribe();

    info!("WebSocket connection established");

    if let Err(e) = send_snapshot(&mut socket, state.coordinator.current()).await {
        error!(error = %e, "Failed to send initial snapshot");
        return;
    }

    loop {
        tokio::select! {
            Some(msg) = socket.recv() => {
                match msg {
                    Ok(Message::Close(_)) => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Ok(Message::Ping(data)) => {
                        if let Err(e) = socket.send(Message::Pong(data)).await {
                            error!(error = %e, "Failed to send pong");
                            break;
                        }
                    }
                    Ok(_) => {
                        // Read-only feed; client text is ignored
                    }
                    Err(e) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                }
            }

            result = snapshot_rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        if let Err(e) = send_snapshot(&mut socket, snapshot).await {
                            error!(error = %e, "Failed to send snapshot");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped = skipped, "WebSocket lagged, skipped snapshots");
                        let notice = ErrorMessage::new(format!("lagged, skipped {} snapshots", skipped));
                        if let Err(e) = send_json(&mut socket, &notice).await {
                            error!(error = %e, "Failed to send lag notice");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        error!("Snapshot broadcast channel closed");
                        break;
                    }
                }
            }

            else => {
                break;
            }
        }
    }

    info!("WebSocket connection closed");
}

async fn send_snapshot(socket: &mut WebSocket, snapshot: Arc<DisplaySnapshot>) -> anyhow::Result<()> {
    send_json(socket, &SnapshotMessage::from(snapshot)).await
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, msg: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string(msg)?;
    socket.send(Message::Text(json)).await?;
    Ok(())
}
