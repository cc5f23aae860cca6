use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard `{ data, message, status, timestamp }` response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Response body that may or may not be wrapped in an envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaybeEnvelope<T> {
    Wrapped(ApiEnvelope<T>),
    Raw(T),
}

impl<T> MaybeEnvelope<T> {
    pub fn into_data(self) -> T {
        match self {
            MaybeEnvelope::Wrapped(envelope) => envelope.data,
            MaybeEnvelope::Raw(data) => data,
        }
    }
}

/// Error body of a non-2xx response.
///
/// Backends disagree on the shape: `{ message }`, `{ error }`, or
/// `{ message, errors: { field: message } }` / `errors: [{ field, message }]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Parse an error body; anything unparsable yields an empty body
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Most specific human-readable message available
    pub fn best_message(&self) -> Option<String> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }

    /// Field-scoped messages, if the server reported any
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        match &self.errors {
            Some(serde_json::Value::Object(map)) => {
                for (field, msg) in map {
                    if let Some(text) = message_text(msg) {
                        out.insert(field.clone(), text);
                    }
                }
            }
            Some(serde_json::Value::Array(items)) => {
                for item in items {
                    let field = item.get("field").and_then(|f| f.as_str());
                    let msg = item
                        .get("message")
                        .or_else(|| item.get("defaultMessage"))
                        .and_then(message_text);
                    if let (Some(field), Some(msg)) = (field, msg) {
                        out.insert(field.to_string(), msg);
                    }
                }
            }
            _ => {}
        }
        out
    }
}

fn message_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items.iter().find_map(message_text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwraps_envelope_and_raw() {
        let wrapped: MaybeEnvelope<Vec<i32>> =
            serde_json::from_value(json!({ "data": [1, 2], "message": "ok", "status": 200 }))
                .unwrap();
        assert_eq!(wrapped.into_data(), vec![1, 2]);

        let raw: MaybeEnvelope<Vec<i32>> = serde_json::from_value(json!([3])).unwrap();
        assert_eq!(raw.into_data(), vec![3]);
    }

    #[test]
    fn test_error_body_messages() {
        let body = ApiErrorBody::parse(
            br#"{"message":"Validation failed","errors":{"bankName":"Bank name already exists"}}"#,
        );
        assert_eq!(body.best_message().as_deref(), Some("Validation failed"));
        assert_eq!(
            body.field_errors().get("bankName").map(String::as_str),
            Some("Bank name already exists")
        );

        let spring = ApiErrorBody::parse(
            br#"{"error":"Bad Request","errors":[{"field":"ifscCode","defaultMessage":"Invalid IFSC"}]}"#,
        );
        assert_eq!(spring.best_message().as_deref(), Some("Bad Request"));
        assert_eq!(
            spring.field_errors().get("ifscCode").map(String::as_str),
            Some("Invalid IFSC")
        );
    }

    #[test]
    fn test_garbage_error_body() {
        let body = ApiErrorBody::parse(b"<html>502</html>");
        assert_eq!(body.best_message(), None);
        assert!(body.field_errors().is_empty());
    }
}
