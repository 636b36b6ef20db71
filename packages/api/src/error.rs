//! # Error envelope and normalization
//!
//! Failures reach the UI from three very different places: structured error
//! bodies produced by the backend, bare HTTP failures with no usable body,
//! and transport errors with no status at all. [`parse_api_error`] folds all
//! of them into one [`NormalizedError`] shape exactly once, as close to the
//! network boundary as possible; everything downstream (toasts, form error
//! slots, hook error state) consumes that shape and nothing else.
//!
//! Guarantee: every path produces a non-empty `code` and `message` and a
//! numeric `status`. Nothing is ever left blank for the UI to trip over.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One field-level validation failure inside the envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// Optional follow-up the server suggests alongside an error
/// (e.g. a redirect target after a 401).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub message: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// The error body the backend sends for non-2xx responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    pub status: u16,
    /// Whether the server copy should override any client-side default.
    #[serde(default, rename = "override")]
    pub override_message: bool,
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
    #[serde(default)]
    pub action: Option<ErrorAction>,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Everything that can go wrong talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response (DNS, refused, timeout).
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response carrying the structured envelope.
    #[error("{0}")]
    Api(ApiErrorBody),
    /// Non-2xx response whose body was not the envelope.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// 2xx response whose body failed to deserialize.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// The one error shape the UI consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedError {
    pub code: String,
    pub message: String,
    pub status: u16,
    /// Field name → first error for that field, from the envelope's `errors`.
    pub field_errors: Option<BTreeMap<String, String>>,
    pub action: Option<ErrorAction>,
}

/// Normalize any [`ApiError`] into a fully-populated [`NormalizedError`].
pub fn parse_api_error(error: &ApiError) -> NormalizedError {
    match error {
        ApiError::Api(body) => {
            let field_errors = body.errors.as_ref().map(|errors| {
                let mut map = BTreeMap::new();
                for e in errors {
                    // First error per field wins.
                    map.entry(e.field.clone()).or_insert_with(|| e.error.clone());
                }
                map
            });
            NormalizedError {
                code: non_empty(&body.code, "ERROR"),
                message: non_empty(&body.message, "Something went wrong"),
                status: body.status,
                field_errors,
                action: body.action.clone(),
            }
        }
        ApiError::Http { status, message } => NormalizedError {
            code: format!("HTTP_{status}"),
            message: non_empty(message, "Request failed"),
            status: *status,
            field_errors: None,
            action: None,
        },
        ApiError::Network(message) => NormalizedError {
            code: "NETWORK_ERROR".to_string(),
            message: non_empty(message, "Network error"),
            status: 0,
            field_errors: None,
            action: None,
        },
        ApiError::Decode(message) => NormalizedError {
            code: "ERROR".to_string(),
            message: non_empty(message, "Something went wrong"),
            status: 500,
            field_errors: None,
            action: None,
        },
    }
}

fn non_empty(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

impl From<&ApiError> for NormalizedError {
    fn from(error: &ApiError) -> Self {
        parse_api_error(error)
    }
}

impl NormalizedError {
    /// No response at all, or the server itself failed.
    pub fn is_network_error(&self) -> bool {
        self.status == 0 || self.status >= 500
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// User-facing copy for toasts, selected by status class.
    pub fn human_message(&self) -> String {
        match self.status {
            0 => "Unable to reach the server. Check your connection and try again.".to_string(),
            s if s >= 500 => "The server ran into a problem. Please try again shortly.".to_string(),
            401 => "Your session has expired. Please sign in again.".to_string(),
            403 => "You don't have permission to do that.".to_string(),
            404 => "That item could not be found.".to_string(),
            429 => "Too many requests. Wait a moment and try again.".to_string(),
            422 => "The server could not process that request.".to_string(),
            400 => match &self.field_errors {
                Some(fields) if !fields.is_empty() => fields
                    .iter()
                    .map(|(field, error)| format!("{field}: {error}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
                _ => self.message.clone(),
            },
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_populated(n: &NormalizedError) {
        assert!(!n.code.is_empty());
        assert!(!n.message.is_empty());
        assert!(!n.human_message().is_empty());
    }

    #[test]
    fn every_variant_normalizes_fully() {
        let variants = vec![
            ApiError::Network("connection refused".to_string()),
            ApiError::Http {
                status: 404,
                message: "Not Found".to_string(),
            },
            ApiError::Decode("missing field `id`".to_string()),
            ApiError::Api(ApiErrorBody {
                code: "ACCOUNT_LIMIT".to_string(),
                message: "Account limit reached".to_string(),
                status: 400,
                override_message: false,
                errors: None,
                action: None,
            }),
            // Degenerate envelope: empty strings still normalize to something.
            ApiError::Api(ApiErrorBody {
                code: String::new(),
                message: "   ".to_string(),
                status: 500,
                override_message: false,
                errors: None,
                action: None,
            }),
        ];
        for error in &variants {
            assert_populated(&parse_api_error(error));
        }
    }

    #[test]
    fn envelope_deserializes_and_collapses_field_errors() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"code":"X","message":"Y","status":404,
                "errors":[{"field":"a","error":"required"},{"field":"a","error":"too short"}]}"#,
        )
        .unwrap();
        let n = parse_api_error(&ApiError::Api(body));
        assert_eq!(n.code, "X");
        assert_eq!(n.message, "Y");
        assert_eq!(n.status, 404);
        let fields = n.field_errors.unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["a"], "required");
    }

    #[test]
    fn transport_error_synthesizes_http_code() {
        let n = parse_api_error(&ApiError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        });
        assert_eq!(n.code, "HTTP_503");
        assert_eq!(n.status, 503);
    }

    #[test]
    fn classification_is_exclusive() {
        let at = |status: u16| NormalizedError {
            code: "C".to_string(),
            message: "m".to_string(),
            status,
            field_errors: None,
            action: None,
        };
        assert!(at(0).is_network_error());
        assert!(!at(0).is_server_error());
        assert!(at(500).is_network_error());
        assert!(at(500).is_server_error());
        assert!(at(400).is_client_error());
        assert!(at(499).is_client_error());
        assert!(!at(499).is_server_error());
        assert!(!at(200).is_client_error());
        assert!(!at(399).is_client_error());
        // Client and server classes never overlap.
        for status in [0u16, 200, 400, 404, 499, 500, 503] {
            assert!(!(at(status).is_client_error() && at(status).is_server_error()));
        }
    }

    #[test]
    fn human_message_picks_status_copy() {
        let mut n = NormalizedError {
            code: "HTTP_401".to_string(),
            message: "Unauthorized".to_string(),
            status: 401,
            field_errors: None,
            action: None,
        };
        assert!(n.human_message().contains("session has expired"));

        n.status = 429;
        assert!(n.human_message().contains("Too many requests"));

        n.status = 400;
        n.field_errors = Some(BTreeMap::from([
            ("amount".to_string(), "must be positive".to_string()),
            ("name".to_string(), "required".to_string()),
        ]));
        let msg = n.human_message();
        assert!(msg.contains("amount: must be positive"));
        assert!(msg.contains("name: required"));
    }
}
