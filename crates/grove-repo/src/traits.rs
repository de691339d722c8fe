//! The [`Repository`] trait defining the backend capability interface.
//!
//! Any backend (in-memory, filesystem, database) implements this trait to
//! provide the content-addressed object graph and named references. Generic
//! code is written against `&dyn Repository`, never against a concrete
//! backend.

use grove_object::{
    AnyObject, Blob, BlobContents, Commit, Reference, Signature, Tag, Tree, TreeEntry,
};
use grove_types::{BlobOid, CommitOid, Oid, TagOid, TreeOid};

use crate::error::{RepoError, RepoResult};

/// Capabilities a backend reports, so generic code can branch without
/// probing for `Unsupported` failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepositoryFacts {
    /// Whether symbolic references exist in this backend.
    pub symbolic_references: bool,
    /// Whether pack build/index/write and fetch are implemented.
    pub pack_transport: bool,
}

/// The operation set a storage backend must provide.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written; content-addressing guarantees that
///   identical contents yield identical identifiers within one backend.
/// - Kind-specific lookups fail with a kind-specific not-found error;
///   reference lookup returns `Ok(None)` for an absent name instead.
/// - No operation retries internally; every failure surfaces to the caller
///   as a typed error.
pub trait Repository: Send + Sync {
    // -----------------------------------------------------------------
    // References
    // -----------------------------------------------------------------

    /// Create a reference. Fails with [`RepoError::ReferenceExists`] if the
    /// name is already taken.
    fn create_reference(&self, reference: &Reference) -> RepoResult<()>;

    /// Reassign an existing reference's target. Fails with
    /// [`RepoError::ReferenceNotFound`] if the name does not exist; backends
    /// may additionally reject moves that violate their preconditions, e.g.
    /// non-fast-forward updates.
    fn update_reference(&self, reference: &Reference) -> RepoResult<()>;

    /// Read a reference by name. Returns `Ok(None)` if it does not exist.
    fn lookup_reference(&self, name: &str) -> RepoResult<Option<Reference>>;

    /// Delete a reference by name. Returns `Ok(true)` if it existed.
    fn delete_reference(&self, name: &str) -> RepoResult<bool>;

    /// All reference names known to the backend.
    fn reference_names(&self) -> RepoResult<Vec<String>>;

    /// All references, by lookup over the enumerated names.
    ///
    /// A name that vanishes between enumeration and lookup is omitted from
    /// the result rather than failing the whole call.
    fn all_references(&self) -> RepoResult<Vec<Reference>> {
        let mut references = Vec::new();
        for name in self.reference_names()? {
            if let Some(reference) = self.lookup_reference(&name)? {
                references.push(reference);
            }
        }
        Ok(references)
    }

    /// Look up a reference and dereference symbolic links until a direct
    /// reference is reached.
    ///
    /// Returns `Ok(None)` if the starting name does not exist. A chain that
    /// ends in a missing name fails with [`RepoError::UnbornReference`]; a
    /// chain that revisits a name fails with [`RepoError::SymbolicCycle`].
    fn resolve_reference(&self, name: &str) -> RepoResult<Option<Reference>> {
        let mut current = match self.lookup_reference(name)? {
            Some(reference) => reference,
            None => return Ok(None),
        };
        let mut visited = std::collections::HashSet::new();
        visited.insert(name.to_string());
        while let Reference::Symbolic { target, .. } = &current {
            let target = target.clone();
            if !visited.insert(target.clone()) {
                return Err(RepoError::SymbolicCycle { name: target });
            }
            current = self
                .lookup_reference(&target)?
                .ok_or(RepoError::UnbornReference { name: target })?;
        }
        Ok(Some(current))
    }

    // -----------------------------------------------------------------
    // Object lookup
    // -----------------------------------------------------------------

    /// Fetch a blob by identifier.
    fn lookup_blob(&self, oid: &BlobOid) -> RepoResult<Blob>;

    /// Fetch a tree by identifier.
    fn lookup_tree(&self, oid: &TreeOid) -> RepoResult<Tree>;

    /// Fetch a commit by identifier.
    fn lookup_commit(&self, oid: &CommitOid) -> RepoResult<Commit>;

    /// Fetch a tag by identifier.
    fn lookup_tag(&self, oid: &TagOid) -> RepoResult<Tag>;

    /// Fetch any object by its rendered identifier text.
    fn lookup_any(&self, rendered: &str) -> RepoResult<AnyObject>;

    /// Whether an object with this identifier exists.
    fn has_object(&self, oid: &Oid) -> RepoResult<bool>;

    // -----------------------------------------------------------------
    // Object construction
    // -----------------------------------------------------------------

    /// Compute the identifier contents would be stored under, without
    /// storing anything.
    fn hash_contents(&self, data: &[u8]) -> RepoResult<BlobOid>;

    /// Persist a blob. Streaming contents are drained; empty contents are
    /// rejected with [`RepoError::EmptyBlob`].
    fn create_blob(&self, contents: BlobContents) -> RepoResult<Blob>;

    /// Persist one tree level from its entries.
    fn create_tree(&self, entries: Vec<TreeEntry>) -> RepoResult<Tree>;

    /// Persist a commit.
    #[allow(clippy::too_many_arguments)]
    fn create_commit(
        &self,
        parents: &[CommitOid],
        tree: &TreeOid,
        author: Signature,
        committer: Signature,
        message: &str,
        encoding: Option<&str>,
    ) -> RepoResult<Commit>;

    /// Persist a tag annotating a commit.
    fn create_tag(&self, name: &str, commit: &CommitOid) -> RepoResult<Tag>;

    // -----------------------------------------------------------------
    // Bulk / transport (opt-in)
    // -----------------------------------------------------------------

    /// Build a pack from the given objects.
    fn build_pack(&self, _oids: &[Oid]) -> RepoResult<Vec<u8>> {
        Err(RepoError::Unsupported {
            operation: "build_pack",
        })
    }

    /// Index a pack, returning the identifiers it contains.
    fn index_pack(&self, _pack: &[u8]) -> RepoResult<Vec<Oid>> {
        Err(RepoError::Unsupported {
            operation: "index_pack",
        })
    }

    /// Import a pack's objects, returning how many were written.
    fn write_pack(&self, _pack: &[u8]) -> RepoResult<u64> {
        Err(RepoError::Unsupported {
            operation: "write_pack",
        })
    }

    /// Fetch references and their objects from a remote.
    fn fetch(&self, _remote: &str, _refspecs: &[String]) -> RepoResult<Vec<Reference>> {
        Err(RepoError::Unsupported { operation: "fetch" })
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// What this backend can do.
    fn facts(&self) -> RepositoryFacts;

    /// Discard all backing storage.
    fn delete_repository(&self) -> RepoResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_types::TypedOid;

    /// A minimal backend where enumeration reports a name that lookup no
    /// longer finds, simulating a reference deleted mid-listing.
    struct RacingRefs;

    fn commit_oid(seed: u8) -> CommitOid {
        TypedOid::new(Oid::from_hash([seed; 32]))
    }

    impl Repository for RacingRefs {
        fn create_reference(&self, _reference: &Reference) -> RepoResult<()> {
            Ok(())
        }

        fn update_reference(&self, _reference: &Reference) -> RepoResult<()> {
            Ok(())
        }

        fn lookup_reference(&self, name: &str) -> RepoResult<Option<Reference>> {
            match name {
                "refs/heads/main" => Ok(Some(Reference::direct(name, commit_oid(1)))),
                "refs/heads/stable" => Ok(Some(Reference::direct(name, commit_oid(2)))),
                // "refs/heads/vanished" is enumerated but already gone.
                _ => Ok(None),
            }
        }

        fn delete_reference(&self, _name: &str) -> RepoResult<bool> {
            Ok(false)
        }

        fn reference_names(&self) -> RepoResult<Vec<String>> {
            Ok(vec![
                "refs/heads/main".into(),
                "refs/heads/stable".into(),
                "refs/heads/vanished".into(),
            ])
        }

        fn lookup_blob(&self, oid: &BlobOid) -> RepoResult<Blob> {
            Err(RepoError::ObjectNotFound {
                kind: grove_types::ObjectKind::Blob,
                oid: oid.untyped(),
            })
        }

        fn lookup_tree(&self, oid: &TreeOid) -> RepoResult<Tree> {
            Err(RepoError::ObjectNotFound {
                kind: grove_types::ObjectKind::Tree,
                oid: oid.untyped(),
            })
        }

        fn lookup_commit(&self, oid: &CommitOid) -> RepoResult<Commit> {
            Err(RepoError::ObjectNotFound {
                kind: grove_types::ObjectKind::Commit,
                oid: oid.untyped(),
            })
        }

        fn lookup_tag(&self, oid: &TagOid) -> RepoResult<Tag> {
            Err(RepoError::ObjectNotFound {
                kind: grove_types::ObjectKind::Tag,
                oid: oid.untyped(),
            })
        }

        fn lookup_any(&self, rendered: &str) -> RepoResult<AnyObject> {
            let oid: Oid = rendered.parse()?;
            Err(RepoError::UnknownOid { oid })
        }

        fn has_object(&self, _oid: &Oid) -> RepoResult<bool> {
            Ok(false)
        }

        fn hash_contents(&self, data: &[u8]) -> RepoResult<BlobOid> {
            Ok(TypedOid::new(crate::hash::ContentHasher::BLOB.hash(data)))
        }

        fn create_blob(&self, _contents: BlobContents) -> RepoResult<Blob> {
            Err(RepoError::Unsupported {
                operation: "create_blob",
            })
        }

        fn create_tree(&self, _entries: Vec<TreeEntry>) -> RepoResult<Tree> {
            Err(RepoError::Unsupported {
                operation: "create_tree",
            })
        }

        fn create_commit(
            &self,
            _parents: &[CommitOid],
            _tree: &TreeOid,
            _author: Signature,
            _committer: Signature,
            _message: &str,
            _encoding: Option<&str>,
        ) -> RepoResult<Commit> {
            Err(RepoError::Unsupported {
                operation: "create_commit",
            })
        }

        fn create_tag(&self, _name: &str, _commit: &CommitOid) -> RepoResult<Tag> {
            Err(RepoError::Unsupported {
                operation: "create_tag",
            })
        }

        fn facts(&self) -> RepositoryFacts {
            RepositoryFacts {
                symbolic_references: false,
                pack_transport: false,
            }
        }

        fn delete_repository(&self) -> RepoResult<()> {
            Ok(())
        }
    }

    #[test]
    fn all_references_omits_vanished_names() {
        let repo = RacingRefs;
        let refs = repo.all_references().unwrap();
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().all(|r| r.name() != "refs/heads/vanished"));
    }

    #[test]
    fn pack_operations_default_to_unsupported() {
        let repo = RacingRefs;
        assert!(matches!(
            repo.build_pack(&[]).unwrap_err(),
            RepoError::Unsupported {
                operation: "build_pack"
            }
        ));
        assert!(matches!(
            repo.index_pack(&[]).unwrap_err(),
            RepoError::Unsupported {
                operation: "index_pack"
            }
        ));
        assert!(matches!(
            repo.write_pack(&[]).unwrap_err(),
            RepoError::Unsupported {
                operation: "write_pack"
            }
        ));
        assert!(matches!(
            repo.fetch("origin", &[]).unwrap_err(),
            RepoError::Unsupported { operation: "fetch" }
        ));
    }

    #[test]
    fn facts_report_capabilities() {
        let repo = RacingRefs;
        let facts = repo.facts();
        assert!(!facts.symbolic_references);
        assert!(!facts.pack_transport);
    }
}
