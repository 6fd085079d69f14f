// HTTP and WebSocket APIs: operator control, dashboard reads, snapshot push

pub mod control;
pub mod dashboard;
pub mod protocol;
pub mod websocket;

pub use control::{create_control_router, ControlAppState, ControlStatus};
pub use dashboard::{create_dashboard_router, DashboardAppState, DashboardResponse};
pub use protocol::{ErrorMessage, SnapshotMessage};
pub use websocket::{create_ws_router, ws_handler, WsAppState};
