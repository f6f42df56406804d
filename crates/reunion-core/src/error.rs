//! Error types module
//!
//! All failures that can reach a client are unified under [`AppError`]. Each
//! variant self-describes its HTTP status, machine code and log level through
//! [`ErrorMetadata`], so the API layer renders every error the same way.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like bad query parameters
    Debug,
    /// Warning level - for upstream or quota issues outside our control
    Warn,
    /// Error level - for misconfiguration and unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPSTREAM_API_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required credential or identifier is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The storage or spreadsheet provider answered with a failure, or could not be reached
    #[error("{provider} API error{}: {message}", fmt_status(.status))]
    UpstreamApi {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    /// The provider answered successfully but nothing qualified
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// A provider payload could not be unwrapped or decoded
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: u64 },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Configuration(_) => (
            500,
            "CONFIGURATION_ERROR",
            false,
            Some("Set the missing environment variable and restart the server"),
            false,
            LogLevel::Error,
        ),
        AppError::UpstreamApi { status, .. } => match status {
            Some(403) => (
                403,
                "UPSTREAM_API_ERROR",
                false,
                Some("Check that the folder is shared publicly and the API key has the Drive API enabled"),
                false,
                LogLevel::Warn,
            ),
            Some(404) => (
                404,
                "UPSTREAM_API_ERROR",
                false,
                Some("Verify the configured folder or spreadsheet ID"),
                false,
                LogLevel::Warn,
            ),
            Some(429) => (
                429,
                "UPSTREAM_API_ERROR",
                true,
                Some("Wait a minute and retry"),
                false,
                LogLevel::Warn,
            ),
            _ => (
                500,
                "UPSTREAM_API_ERROR",
                true,
                Some("Retry after a short delay"),
                false,
                LogLevel::Warn,
            ),
        },
        AppError::EmptyResult(_) => (
            404,
            "NO_MEDIA_FOUND",
            false,
            Some("Add photos or videos to the shared folder (subfolders are not scanned)"),
            false,
            LogLevel::Debug,
        ),
        AppError::Parse(_) => (
            500,
            "PARSE_ERROR",
            false,
            Some("Check that the spreadsheet is shared with 'anyone with the link'"),
            false,
            LogLevel::Error,
        ),
        AppError::RateLimitExceeded { .. } => (
            429,
            "RATE_LIMIT_EXCEEDED",
            true,
            Some("Wait for the rate limit window to reset and retry"),
            false,
            LogLevel::Debug,
        ),
        AppError::Forbidden(_) => (403, "FORBIDDEN", false, None, false, LogLevel::Debug),
        AppError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            false,
            Some("Check request format and parameters"),
            false,
            LogLevel::Debug,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

/// What a 404 from the given provider refers to.
fn missing_resource(provider: &str) -> &'static str {
    match provider {
        "Google Drive" => "Folder",
        "Google Sheets" => "Spreadsheet",
        _ => "Resource",
    }
}

impl AppError {
    /// Shorthand for an upstream failure without an HTTP status (transport error).
    pub fn unreachable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::UpstreamApi {
            provider: provider.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Configuration(_) => "Configuration",
            AppError::UpstreamApi { .. } => "UpstreamApi",
            AppError::EmptyResult(_) => "EmptyResult",
            AppError::Parse(_) => "Parse",
            AppError::RateLimitExceeded { .. } => "RateLimitExceeded",
            AppError::Forbidden(_) => "Forbidden",
            AppError::BadRequest(_) => "BadRequest",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Configuration(ref msg) => msg.clone(),
            AppError::UpstreamApi {
                provider,
                status,
                message,
            } => match status {
                Some(403) => format!(
                    "Access denied by {}: make sure the folder is publicly shared, the API key has the API enabled, and the ID is correct",
                    provider
                ),
                Some(404) => format!(
                    "{} not found on {}: verify the configured ID",
                    missing_resource(provider),
                    provider
                ),
                Some(429) => format!("{} quota exceeded, try again later", provider),
                Some(code) => format!("{} returned {}: {}", provider, code, message),
                None => format!("Could not reach {}: {}", provider, message),
            },
            AppError::EmptyResult(ref msg) => msg.clone(),
            AppError::Parse(ref msg) => msg.clone(),
            AppError::RateLimitExceeded { .. } => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            AppError::Forbidden(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
