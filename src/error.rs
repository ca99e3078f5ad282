//! Error taxonomy for the fetch and normalization run.
//!
//! None of these errors is fatal to a run. Each one is logged by the
//! catalog builder, which then carries on with whatever fields it has.

use thiserror::Error;

/// Failure of a single remote call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, timeout or TLS error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a status other than 200.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Server answered 200 with an empty body.
    #[error("empty response body")]
    EmptyBody,

    /// Body could not be decoded as the expected JSON or text.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Every README location candidate was tried without success.
    #[error("no README found after {attempts} attempts")]
    NotFound { attempts: usize },
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Self::Status(code),
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}

/// Why a repository location produced no record at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    /// Location string does not yield both owner and name.
    #[error("malformed repository reference: {0}")]
    MalformedReference(String),
}

/// Failure inside the split, clean, convert and repair chain.
#[derive(Debug, Error)]
#[error("README processing failed during {stage}: {message}")]
pub struct ProcessingError {
    pub stage: &'static str,
    pub message: String,
}
