use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status. `message` is whatever the
    /// server said, possibly empty.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("parse error: {0}")]
    Decode(String),

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the server, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Inline text for the view: the server's message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Invalid client configuration, reported at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid request timeout '{0}' (expected a positive number of seconds)")]
    InvalidTimeout(String),
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": "..."}`, a bare JSON string, or plain text.
pub(crate) fn extract_message(body: &str) -> String {
    let body = body.trim();
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string(),
        Ok(serde_json::Value::String(s)) => s,
        Ok(_) => String::new(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_field() {
        assert_eq!(extract_message(r#"{"message":"Class is full"}"#), "Class is full");
        assert_eq!(extract_message(r#"{"error":"conflict"}"#), "");
    }

    #[test]
    fn extracts_plain_text_and_json_strings() {
        assert_eq!(
            extract_message("Invalid username or password"),
            "Invalid username or password"
        );
        assert_eq!(extract_message(r#""Already booked""#), "Already booked");
        assert_eq!(extract_message(""), "");
        assert_eq!(extract_message("[1,2]"), "");
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 400,
            message: "Plan already booked".to_string(),
        };
        assert_eq!(err.user_message("Plan booking failed."), "Plan already booked");

        let blank = ApiError::Status {
            status: 500,
            message: "  ".to_string(),
        };
        assert_eq!(blank.user_message("Plan booking failed."), "Plan booking failed.");

        let network = ApiError::Network("connection refused".to_string());
        assert_eq!(network.user_message("Booking failed."), "Booking failed.");
        assert_eq!(network.status(), None);
    }
}
