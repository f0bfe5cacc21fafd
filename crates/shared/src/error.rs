//! Application-wide error types.
//!
//! Every failed API call ends up as one of these variants. The variant decides
//! which single notification the user sees; the server text is kept
//! for logging.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The API could not be reached (connection refused, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// The request was rejected as invalid, locally or by the server.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or rejected credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A mutation for the same target is already in flight.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The server reported a failure that matches no other category.
    #[error("Server error: {0}")]
    Server(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything that is neither an API error nor a transport failure.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Classifies a server error string by substring match.
    ///
    /// The checks run in a fixed order against the lower-cased message:
    /// `network`, `not found`, `unauthorized`/`forbidden`, `validation`/`invalid`.
    /// Anything else is a server error.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        let message = message.to_string();

        if lowered.contains("network") {
            Self::Network(message)
        } else if lowered.contains("not found") {
            Self::NotFound(message)
        } else if lowered.contains("unauthorized") || lowered.contains("forbidden") {
            Self::Unauthorized(message)
        } else if lowered.contains("validation") || lowered.contains("invalid") {
            Self::Validation(message)
        } else {
            Self::Server(message)
        }
    }

    /// Classifies a failure that happened outside of the API envelope.
    ///
    /// Connection failures and timeouts are network errors; everything else is unknown.
    #[must_use]
    pub fn from_transport(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("network error")
            || lowered.contains("timeout")
            || lowered.contains("timed out")
            || lowered.contains("connect")
        {
            Self::Network(message.to_string())
        } else {
            Self::Unknown(message.to_string())
        }
    }

    /// Maps a non-success HTTP status plus the server's error text.
    #[must_use]
    pub fn from_status(status: u16, message: &str) -> Self {
        match status {
            400 | 422 => Self::Validation(message.to_string()),
            401 | 403 => Self::Unauthorized(message.to_string()),
            404 => Self::NotFound(message.to_string()),
            409 => Self::Conflict(message.to_string()),
            _ => Self::classify(message),
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK",
            Self::Validation(_) => "VALIDATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Conflict(_) => "CONFLICT",
            Self::Server(_) => "SERVER",
            Self::Config(_) => "CONFIG",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Returns the message shown to the user in a notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            Self::Validation(_) => "Please check your input and try again.".to_string(),
            Self::NotFound(_) => "The requested resource was not found.".to_string(),
            Self::Unauthorized(_) => "You are not authorized to perform this action.".to_string(),
            Self::Conflict(_) => "This action is already in progress.".to_string(),
            Self::Server(msg) if msg.is_empty() => "A server error occurred.".to_string(),
            Self::Unknown(msg) if msg.is_empty() => "An unexpected error occurred.".to_string(),
            Self::Server(msg) | Self::Unknown(msg) => msg.clone(),
            Self::Config(msg) => format!("Configuration error: {msg}"),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
