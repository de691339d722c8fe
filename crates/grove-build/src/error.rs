use grove_repo::RepoError;
use thiserror::Error;

/// Errors from tree staging operations.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Path descent hit a blob or commit link where a subtree was expected.
    #[error("not a subtree: {path}")]
    NotASubtree { path: String },

    /// The empty path addresses the tree root and cannot name an entry.
    #[error("empty path")]
    EmptyPath,

    /// A path contained an empty segment (leading, trailing, or doubled
    /// slash).
    #[error("empty segment in path: {path}")]
    EmptySegment { path: String },

    /// Persisting staged state failed; the builder must be discarded.
    #[error("tree write failed")]
    WriteFailed {
        #[source]
        source: RepoError,
    },

    /// A repository operation failed during descent.
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Result alias for tree staging operations.
pub type BuildResult<T> = Result<T, BuildError>;
