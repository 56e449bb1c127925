use thiserror::Error;

/// Failures surfaced by the catalog transport.
///
/// Resolution strategies treat every variant the same way: the strategy
/// yields no id and the chain moves on. The variants exist so transport
/// failures stay diagnosable in logs.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
