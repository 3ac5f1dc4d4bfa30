use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// An authenticated portal session, as issued by the service's login call.
///
/// Obtaining or refreshing a session is the caller's job; this crate only
/// replays it. Stored on disk as the JSON object the service returned:
/// ```json
/// {
///   "userId": 1234,
///   "serviceTicket": "AAABBBCCC",
///   "serverInfo": { "apiVersion": "2.1.1" },
///   "serverCurrentTime": "2014-09-01T12:00:00.000Z",
///   "userType": 2,
///   "studentIDs": [5678]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: serde_json::Value,
    pub service_ticket: String,
    pub server_info: ServerInfo,
    pub server_current_time: serde_json::Value,
    pub user_type: serde_json::Value,
    #[serde(rename = "studentIDs")]
    pub student_ids: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub api_version: String,
}

impl Session {
    /// Loads a session from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session file '{path}'"))?;
        serde_json::from_str(&content).with_context(|| format!("invalid session file '{path}'"))
    }
}
