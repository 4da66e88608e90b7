//! Health check handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "ok".to_string(),
        service: "myna".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub model_loaded: bool,
}

/// Readiness check - has the synthesis model finished loading?
///
/// Always answers 200 so load balancers can poll it; the body says
/// whether synthesis requests will succeed.
pub async fn readiness(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let model_loaded = state.engine.is_ready();
    let status = if model_loaded { "ready" } else { "loading" };

    Json(ReadinessResponse {
        status: status.to_string(),
        model_loaded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liveness_response_serialization() {
        let resp = LivenessResponse {
            status: "ok".to_string(),
            service: "myna".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"service\":\"myna\""));
        assert!(json.contains("version"));
    }

    #[test]
    fn readiness_response_serialization() {
        let resp = ReadinessResponse {
            status: "loading".to_string(),
            model_loaded: false,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"loading\""));
        assert!(json.contains("\"model_loaded\":false"));
    }

    #[test]
    fn readiness_response_deserialization() {
        let json = r#"{"status":"ready","model_loaded":true}"#;
        let resp: ReadinessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "ready");
        assert!(resp.model_loaded);
    }
}
