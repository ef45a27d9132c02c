//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post body accepted by create, update and delete.
///
/// Every field is optional on the wire; which ones are required depends on
/// the operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Query string for listing posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostsQuery {
    pub poster: Option<String>,
}

/// Response to a successful reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_accepts_partial_bodies() {
        let payload: PostPayload = serde_json::from_str(r#"{"poster":"alice"}"#).unwrap();
        assert_eq!(payload.poster.as_deref(), Some("alice"));
        assert!(payload.title.is_none());
        assert!(payload.body.is_none());

        let empty: PostPayload = serde_json::from_str("{}").unwrap();
        assert!(empty.poster.is_none());
    }

    #[test]
    fn test_payload_rejects_wrong_types() {
        assert!(serde_json::from_str::<PostPayload>(r#"{"poster":42}"#).is_err());
        assert!(serde_json::from_str::<PostPayload>(r#"["alice"]"#).is_err());
    }
}
