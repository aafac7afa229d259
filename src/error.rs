//! Error types for the stream checker.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the stream checker.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("{0} is not set. Export it before running stream-checker")]
    MissingCredential(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Query errors
    #[error("Title query must not be empty")]
    EmptyQuery,

    #[error("No title found matching \"{0}\"")]
    TitleNotFound(String),

    // TMDB errors
    #[error("TMDB has no resource at {0}")]
    ResourceNotFound(String),

    #[error("TMDB rejected the credentials (HTTP {0})")]
    AuthRejected(u16),

    #[error("TMDB rate limit reached (HTTP 429)")]
    RateLimited,

    #[error("TMDB server error (HTTP {0})")]
    ServerError(u16),

    #[error("TMDB request failed (HTTP {0})")]
    ApiError(u16),

    #[error("Invalid TMDB response: {0}")]
    InvalidResponse(String),

    // HTTP errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used to decide how an error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed configuration. Fatal at startup.
    Config,
    /// Credentials were rejected by TMDB.
    Auth,
    /// The title (or TMDB resource) does not exist.
    NotFound,
    /// Connectivity, timeout, rate limit or server-side failure. Worth re-submitting.
    Transient,
    /// Anything else.
    Other,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingCredential(_) | Error::InvalidConfig { .. } => ErrorKind::Config,
            Error::AuthRejected(_) => ErrorKind::Auth,
            Error::TitleNotFound(_) | Error::ResourceNotFound(_) => ErrorKind::NotFound,
            Error::RateLimited | Error::ServerError(_) | Error::Network(_) => ErrorKind::Transient,
            Error::InvalidArgument(_)
            | Error::EmptyQuery
            | Error::ApiError(_)
            | Error::InvalidResponse(_)
            | Error::Io(_)
            | Error::Json(_) => ErrorKind::Other,
        }
    }

    /// Whether re-submitting the same query may succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}
