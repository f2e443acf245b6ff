#![allow(missing_docs)]
use thiserror::Error;

/// Custom Result type used in this crate
pub(crate) type MemFuzzResult<T> = Result<T, MemFuzzError>;

#[derive(Debug, Error)]
pub enum MemFuzzError {
    #[error("Cannot mutate a zero-length buffer.")]
    InvalidBuffer,
    #[error("Random source exhausted after {drawn} of {required} draws.")]
    ExhaustedRandomSource { drawn: usize, required: usize },
    #[error("Mutation step consumed more than the {capacity} pooled draws.")]
    DrawPoolOverrun { capacity: usize },
    #[error("{err_msg}")]
    Custom { err_msg: String },
    #[error("Command line error {command}")]
    CommandLineError { command: String },
    #[error("{err}")]
    IoError { err: std::io::Error },
    #[error("{err}")]
    Serde { err: serde_json::Error },
}

impl From<std::io::Error> for MemFuzzError {
    fn from(err: std::io::Error) -> Self {
        MemFuzzError::IoError { err }
    }
}

impl From<serde_json::Error> for MemFuzzError {
    fn from(err: serde_json::Error) -> Self {
        MemFuzzError::Serde { err }
    }
}
