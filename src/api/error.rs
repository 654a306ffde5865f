//! API error types and status classification.

use serde::Deserialize;
use thiserror::Error;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by the API client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Rejected client-side before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// 404 from the server.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 401 from the server; the stored token has been cleared.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403 from the server.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 5xx from the server.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// No response received (connection failure or timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Any other non-2xx status.
    #[error("Request failed ({status}): {message}")]
    Unknown { status: u16, message: String },
}

/// Coarse classification used for logging and by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    Forbidden,
    Server,
    Network,
    Unknown,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::Forbidden(_) => ErrorKind::Forbidden,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Decode(_) | ApiError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Server { status, .. } | ApiError::Unknown { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classify a non-2xx response.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = error_message(status, body);
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Unknown { status, message },
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// FastAPI emits `{"detail": ...}`; the app's own handlers emit `{"error", "detail", "status_code"}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<serde_json::Value>,
}

fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match (parsed.detail, parsed.error) {
            (Some(serde_json::Value::String(detail)), _) => return detail,
            (_, Some(error)) => return error,
            // Pydantic validation failures arrive as a list of {loc, msg, type}
            (Some(serde_json::Value::Array(items)), None) => {
                if let Some(msg) = items
                    .first()
                    .and_then(|item| item.get("msg"))
                    .and_then(|msg| msg.as_str())
                {
                    return msg.to_string();
                }
            }
            _ => {}
        }
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status))
}
