use crate::session::DisplaySnapshot;
use serde::Serialize;
use std::sync::Arc;

/// Server → Client: newly published display snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub snapshot: Arc<DisplaySnapshot>,
}

impl From<Arc<DisplaySnapshot>> for SnapshotMessage {
    fn from(snapshot: Arc<DisplaySnapshot>) -> Self {
        Self {
            msg_type: "snapshot".to_string(),
            snapshot,
        }
    }
}

/// Server → Client: error message
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub error: String,
}

impl ErrorMessage {
    pub fn new(error: String) -> Self {
        Self {
            msg_type: "error".to_string(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_snapshot_message_shape() {
        let snapshot = Arc::new(DisplaySnapshot::seed(Uuid::nil(), 0.45));
        let json = serde_json::to_value(SnapshotMessage::from(snapshot)).unwrap();

        assert_eq!(json["type"], "snapshot");
        assert_eq!(json["snapshot"]["pass"], 0);
        assert_eq!(json["snapshot"]["fairness"], 0.45);
        assert!(json["snapshot"]["fleet"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_error_message_shape() {
        let json = serde_json::to_value(ErrorMessage::new("lagged".to_string())).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["error"], "lagged");
    }
}
