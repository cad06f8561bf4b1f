//! Common API models
//!
//! Shared data structures used across services built on Stratum.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Discriminator value carried by every status message frame.
pub const STATUS_MESSAGE_TYPE: &str = "statusMessage";

/// Alert severity levels understood by the frontend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Error,
    Success,
    Info,
    Warning,
}

/// Status message pushed to the frontend over websockets and rendered as
/// an alert. Also the body of API error responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub status: u16,
    pub severity: AlertSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl StatusMessage {
    pub fn new(status: u16, severity: AlertSeverity, message: impl Into<String>) -> Self {
        Self {
            message_type: STATUS_MESSAGE_TYPE.to_string(),
            status,
            severity,
            message: message.into(),
            payload: None,
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, AlertSeverity::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(200, AlertSeverity::Success, message)
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Pagination envelope returned by all paged queries.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub page_number: u64,
    pub pages_available: u64,
    pub page_items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            page_number: 1,
            pages_available: 0,
            page_items: vec![],
        }
    }
}

impl<T> Page<T> {
    pub fn new(total_count: u64, page_number: u64, page_size: u64, page_items: Vec<T>) -> Self {
        Self {
            total_count,
            page_number,
            pages_available: if page_size > 0 {
                (total_count as f64 / page_size as f64).ceil() as u64
            } else {
                0
            },
            page_items,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Account lookup schema for dropdown menus. The full name is serialized
/// as `label`, which is what the frontend's autocomplete expects.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountLookup {
    pub id: Uuid,
    #[serde(rename = "label", alias = "full_name")]
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_serialization() {
        let msg = StatusMessage::error(404, "account not found");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "statusMessage");
        assert_eq!(json["status"], 404);
        assert_eq!(json["severity"], "error");
        assert_eq!(json["message"], "account not found");
        assert!(json.get("payload").is_none());
    }

    #[test]
    fn test_status_message_payload() {
        let msg = StatusMessage::success("saved")
            .with_payload(serde_json::json!({"id": "42"}));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["severity"], "success");
        assert_eq!(json["payload"]["id"], "42");
    }

    #[test]
    fn test_alert_severity_roundtrip() {
        for (severity, name) in [
            (AlertSeverity::Error, "\"error\""),
            (AlertSeverity::Success, "\"success\""),
            (AlertSeverity::Info, "\"info\""),
            (AlertSeverity::Warning, "\"warning\""),
        ] {
            assert_eq!(serde_json::to_string(&severity).unwrap(), name);
            let parsed: AlertSeverity = serde_json::from_str(name).unwrap();
            assert_eq!(parsed, severity);
        }
        assert!(serde_json::from_str::<AlertSeverity>("\"fatal\"").is_err());
    }

    #[test]
    fn test_page_math() {
        let page = Page::new(25, 1, 10, vec![1, 2, 3]);
        assert_eq!(page.pages_available, 3);
        assert_eq!(page.total_count, 25);

        let page = Page::<i32>::new(25, 1, 0, vec![]);
        assert_eq!(page.pages_available, 0);

        let empty = Page::<i32>::empty();
        assert_eq!(empty.page_number, 1);
        assert!(empty.page_items.is_empty());
    }

    #[test]
    fn test_account_lookup_label_alias() {
        let lookup = AccountLookup {
            id: Uuid::nil(),
            full_name: "Jane Doe".to_string(),
        };
        let json = serde_json::to_value(&lookup).unwrap();
        assert_eq!(json["label"], "Jane Doe");

        let parsed: AccountLookup = serde_json::from_value(
            serde_json::json!({"id": Uuid::nil(), "full_name": "Jane Doe"}),
        )
        .unwrap();
        assert_eq!(parsed.full_name, "Jane Doe");
    }
}
