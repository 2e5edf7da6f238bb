//! Canned message texts.

use serde::{Deserialize, Serialize};

use crate::status::Status;

/// Texts used when a status setter is called without a message.
///
/// Deserializes from a partial table: missing fields keep their defaults.
///
/// # Example
///
/// ```
/// use rest_response::ResponseDefaults;
///
/// let defaults: ResponseDefaults =
///     serde_json::from_str(r#"{"not_found": "no such user"}"#).unwrap();
/// assert_eq!(defaults.not_found, "no such user");
/// assert_eq!(defaults.forbidden, "access denied");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseDefaults {
    pub not_found: String,
    pub bad_request: String,
    pub forbidden: String,
    pub internal_server_error: String,
    pub property_required: String,
}

impl Default for ResponseDefaults {
    fn default() -> Self {
        Self {
            not_found: "resource not found".to_string(),
            bad_request: "bad request".to_string(),
            forbidden: "access denied".to_string(),
            internal_server_error: "internal server error".to_string(),
            property_required: "property required".to_string(),
        }
    }
}

impl ResponseDefaults {
    /// Text for a failure status. Statuses without a text of their own get
    /// the internal server error one.
    pub fn failure_text(&self, status: Status) -> &str {
        match status {
            Status::NotFound => &self.not_found,
            Status::BadRequest => &self.bad_request,
            Status::Forbidden => &self.forbidden,
            _ => &self.internal_server_error,
        }
    }
}
