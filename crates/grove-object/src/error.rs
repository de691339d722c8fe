use thiserror::Error;

/// Errors from object-model operations.
#[derive(Debug, Error)]
pub enum ObjectError {
    /// Reading streaming blob contents failed.
    #[error("blob stream read failed: {0}")]
    Read(#[from] std::io::Error),

    /// A sized stream produced a different number of bytes than declared.
    #[error("blob stream length mismatch: declared {declared}, read {actual}")]
    LengthMismatch { declared: u64, actual: u64 },
}
