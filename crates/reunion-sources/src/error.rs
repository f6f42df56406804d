use reunion_core::AppError;
use thiserror::Error;

/// Upstream source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request never produced a response (DNS, connect, timeout)
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned {status}: {message}")]
    Upstream {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{0}")]
    EmptyResult(String),

    /// The visualization-query envelope could not be stripped
    #[error("Unexpected {provider} response envelope")]
    Envelope { provider: &'static str },

    #[error("Failed to decode {provider} response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Configuration(msg) => AppError::Configuration(msg),
            SourceError::Transport { provider, source } => {
                AppError::unreachable(provider, source.to_string())
            }
            SourceError::Upstream {
                provider,
                status,
                message,
            } => AppError::UpstreamApi {
                provider: provider.to_string(),
                status: Some(status),
                message,
            },
            SourceError::EmptyResult(msg) => AppError::EmptyResult(msg),
            err @ SourceError::Envelope { .. } => AppError::Parse(err.to_string()),
            err @ SourceError::Decode { .. } => AppError::Parse(err.to_string()),
        }
    }
}
