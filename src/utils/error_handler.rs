use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while assembling the job configuration.
/// These are fatal, the job stops before any request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set in environment")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("unable to load credentials from {path}: {reason}")]
    Credentials { path: String, reason: String },
}

/// Errors raised while retrieving loans from the API
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach loan API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to fetch loans: status {0}")]
    HttpStatus(StatusCode),

    #[error("unable to decode loans response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("invalid return date {value:?}: {source}")]
pub struct DateParseError {
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Errors raised while delivering a single notification
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("unable to obtain access token: {0}")]
    Auth(String),

    #[error("failed to reach messaging service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notification rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("unable to decode messaging response: {0}")]
    Decode(#[from] serde_json::Error),
}
