// Configuration loading
pub mod config;

// Run control state machine
pub mod control;

// Atkinson fairness index
pub mod fairness;

// Fleet records, roster and snapshot provider
pub mod fleet;

// Geospatial overlay markers
pub mod geo;

// Session state and refresh engine
pub mod session;

// Telemetry feed interface and mock feed
pub mod telemetry;

// HTTP and WebSocket APIs
pub mod api;
