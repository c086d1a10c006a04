// src/error.rs
use thiserror::Error;

/// Failures at the retrieval boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Host unreachable, timeout, or retries exhausted.
    #[error("Request to {endpoint} failed after {attempts} attempt(s): {message}")]
    Network {
        endpoint: String,
        attempts: u32,
        message: String,
    },

    /// Response did not match the expected data contract.
    #[error("Unexpected response from {endpoint}: {detail}")]
    Shape { endpoint: String, detail: String },

    /// Well-formed response reporting failure.
    #[error("Couldn't fetch {what}: Received {body}")]
    Rejected { what: String, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
