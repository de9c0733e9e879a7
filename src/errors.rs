use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The upstream API key is missing from the process configuration.
    /// Raised before any network call is attempted.
    #[error("Missing API key: {0}")]
    Configuration(String),
    /// The outbound call failed or the response body could not be read or
    /// parsed (DNS failure, refused connection, truncated body).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The upstream API returned a non-success status code. Carries the
    /// upstream status and the best-effort extracted message.
    #[error("Upstream error: {1} (Status {0})")]
    Upstream(reqwest::StatusCode, String),
}

pub type ProxyResult<T> = Result<T, ProxyError>;
