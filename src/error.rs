use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx reply from the generation backend. Displays as the derived message.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        body: Value,
    },

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Build a status failure from the parsed error body.
    ///
    /// The message comes from `message`, then `error` (string or `{ message }`),
    /// then a generic `Request failed with status {code}`.
    pub fn from_status(status: u16, body: Value) -> Self {
        let message = non_empty_str(&body, "message")
            .or_else(|| non_empty_str(&body, "error"))
            .or_else(|| {
                body.get("error")
                    .and_then(|e| non_empty_str(e, "message"))
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        ApiError::Status {
            status,
            message,
            body,
        }
    }

    /// HTTP status code for backend failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Failures of a single outbound generation call: transport, HTTP status
    /// or an unreadable body. Fan-out converts exactly these to "no story".
    pub fn is_call_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(_) | ApiError::Status { .. } | ApiError::InvalidBody(_)
        )
    }
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

// Helper type for results
pub type Result<T> = std::result::Result<T, ApiError>;
