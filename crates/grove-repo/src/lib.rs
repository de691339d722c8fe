//! The repository capability interface for Grove.
//!
//! [`Repository`] is the operation set a storage backend must provide:
//! reference management, kind-specific object lookup, object construction,
//! and lifecycle. Everything else in Grove composes on top of it: lazy
//! reference resolution ([`ResolveRef`]), commit-name resolution, graph and
//! ancestry traversal, and the incremental-transfer set difference
//! [`missing_objects`]. Pack and fetch operations are declared on the trait
//! but default to a capability-not-supported failure; a backend opts in by
//! overriding them.
//!
//! [`MemoryRepository`] is the in-process reference backend, suitable for
//! tests and embedding.

pub mod error;
pub mod hash;
pub mod memory;
pub mod resolve;
pub mod traits;
pub mod traversal;

pub use error::{RepoError, RepoResult};
pub use hash::ContentHasher;
pub use memory::MemoryRepository;
pub use resolve::{resolve_commit_name, Lookup, ResolveRef};
pub use traits::{Repository, RepositoryFacts};
pub use traversal::{
    missing_objects, visit_ancestry, visit_objects, walk_ancestry, walk_objects, WalkEntry,
};
