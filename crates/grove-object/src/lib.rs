//! The Grove object model.
//!
//! Value types for the content-addressed object graph: blobs (with
//! in-memory or streaming contents), trees and their entry union, commits,
//! signatures, tags, named references, and the lazy-vs-materialized object
//! handle [`ObjRef`]. Persisting and fetching these objects is the job of a
//! backend implementing the repository trait in `grove-repo`; this crate is
//! pure data.

pub mod blob;
pub mod commit;
pub mod error;
pub mod objref;
pub mod reference;
pub mod tag;
pub mod tree;

pub use blob::{Blob, BlobContents};
pub use commit::{Commit, Signature};
pub use error::ObjectError;
pub use objref::{AnyObject, ObjRef, RepoObject};
pub use reference::{copy_commit_name, CommitName, Reference};
pub use tag::Tag;
pub use tree::{FileMode, Tree, TreeEntry, TreeNode};
