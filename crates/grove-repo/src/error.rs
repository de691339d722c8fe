use grove_object::ObjectError;
use grove_types::{ObjectKind, Oid, OidError};

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The backend does not implement this operation.
    #[error("operation not supported by this backend: {operation}")]
    Unsupported { operation: &'static str },

    /// A kind-specific lookup found nothing.
    #[error("{kind} not found: {oid}")]
    ObjectNotFound { kind: ObjectKind, oid: Oid },

    /// A generic lookup or existence check found nothing under this
    /// identifier.
    #[error("no object: {oid}")]
    UnknownOid { oid: Oid },

    /// The named reference does not exist.
    #[error("reference not found: {name}")]
    ReferenceNotFound { name: String },

    /// A reference with this name already exists.
    #[error("reference already exists: {name}")]
    ReferenceExists { name: String },

    /// A commit designator could not be resolved.
    #[error("commit not found: {name}")]
    CommitNotFound { name: String },

    /// Blob creation was handed empty contents.
    #[error("cannot create an empty blob")]
    EmptyBlob,

    /// The backend rejected an object or reference creation.
    #[error("cannot create {what}: {reason}")]
    CreationRejected { what: &'static str, reason: String },

    /// A reference update would move the target off its descendant chain.
    #[error("non-fast-forward update of {name}")]
    NonFastForward { name: String },

    /// A reference was used before it resolves to a commit identifier.
    #[error("reference has no resolvable target yet: {name}")]
    UnbornReference { name: String },

    /// Symbolic dereferencing revisited a name.
    #[error("symbolic reference cycle through {name}")]
    SymbolicCycle { name: String },

    /// A declared backend quota was exceeded.
    #[error("quota exceeded: limit {limit}, observed {observed}")]
    QuotaExceeded { limit: u64, observed: u64 },

    /// An identifier failed to parse.
    #[error(transparent)]
    Oid(#[from] OidError),

    /// Blob contents could not be drained.
    #[error(transparent)]
    Object(#[from] ObjectError),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;
