use thiserror::Error;

/// Errors produced when parsing or transplanting identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OidError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid identifier length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
