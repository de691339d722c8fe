//! Lazy resolution: turning identifiers and designators into objects.

use grove_object::{Blob, Commit, CommitName, ObjRef, RepoObject, Tag, Tree};
use grove_types::TypedOid;

use crate::error::{RepoError, RepoResult};
use crate::traits::Repository;

/// An object type fetchable through the kind-specific repository lookups.
pub trait Lookup: RepoObject {
    /// Fetch the object named by `oid` from the backend.
    fn lookup(repo: &dyn Repository, oid: &TypedOid<Self::Kind>) -> RepoResult<Self>;
}

impl Lookup for Blob {
    fn lookup(repo: &dyn Repository, oid: &TypedOid<Self::Kind>) -> RepoResult<Self> {
        repo.lookup_blob(oid)
    }
}

impl Lookup for Tree {
    fn lookup(repo: &dyn Repository, oid: &TypedOid<Self::Kind>) -> RepoResult<Self> {
        repo.lookup_tree(oid)
    }
}

impl Lookup for Commit {
    fn lookup(repo: &dyn Repository, oid: &TypedOid<Self::Kind>) -> RepoResult<Self> {
        repo.lookup_commit(oid)
    }
}

impl Lookup for Tag {
    fn lookup(repo: &dyn Repository, oid: &TypedOid<Self::Kind>) -> RepoResult<Self> {
        repo.lookup_tag(oid)
    }
}

/// Resolution of an [`ObjRef`] against a repository.
pub trait ResolveRef<O: Lookup> {
    /// Yield the materialized object.
    ///
    /// Idempotent: a resolved reference returns its value with no I/O; a
    /// deferred reference costs exactly one backend lookup and fails with
    /// the kind-specific not-found error if the object is absent. The
    /// result is not cached anywhere.
    fn resolve(self, repo: &dyn Repository) -> RepoResult<O>;
}

impl<O: Lookup> ResolveRef<O> for ObjRef<O> {
    fn resolve(self, repo: &dyn Repository) -> RepoResult<O> {
        match self {
            ObjRef::Resolved(object) => Ok(*object),
            ObjRef::Deferred(oid) => O::lookup(repo, &oid),
        }
    }
}

/// Resolve a commit designator to a materialized commit.
///
/// - By identifier: one commit lookup.
/// - By reference name: reference lookup plus symbolic dereference, then a
///   commit lookup; a missing name fails with [`RepoError::CommitNotFound`].
/// - By held reference: plain [`ResolveRef::resolve`].
pub fn resolve_commit_name(repo: &dyn Repository, name: &CommitName) -> RepoResult<Commit> {
    match name {
        CommitName::Oid(oid) => repo.lookup_commit(oid),
        CommitName::Named(text) => {
            let reference =
                repo.resolve_reference(text)?
                    .ok_or_else(|| RepoError::CommitNotFound {
                        name: text.clone(),
                    })?;
            match reference.target_oid() {
                Some(oid) => repo.lookup_commit(&oid),
                None => Err(RepoError::UnbornReference {
                    name: text.clone(),
                }),
            }
        }
        CommitName::Ref(obj_ref) => obj_ref.clone().resolve(repo),
    }
}
