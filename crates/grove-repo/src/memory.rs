//! In-memory repository backend for tests and embedding.
//!
//! [`MemoryRepository`] keeps all objects and references in `HashMap`s
//! behind `RwLock`s. Objects are serialized as JSON records and
//! content-addressed with domain-separated BLAKE3. Data is lost when the
//! repository is dropped.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use grove_object::{
    AnyObject, Blob, BlobContents, Commit, ObjRef, Reference, Signature, Tag, Tree, TreeEntry,
};
use grove_types::{BlobOid, CommitOid, ObjectKind, Oid, TagOid, TreeOid, TypedOid};

use crate::error::{RepoError, RepoResult};
use crate::hash::ContentHasher;
use crate::traits::{Repository, RepositoryFacts};

/// A stored object: kind tag plus serialized record.
#[derive(Clone, Debug, PartialEq, Eq)]
struct StoredObject {
    kind: ObjectKind,
    data: Vec<u8>,
}

/// Reference storage form: only the target is kept; the name is the map key.
#[derive(Clone, Debug, PartialEq, Eq)]
enum RefRecord {
    Direct(Oid),
    Symbolic(String),
}

#[derive(Serialize, Deserialize)]
struct TreeRecord {
    entries: Vec<TreeEntry>,
}

#[derive(Serialize, Deserialize)]
struct CommitRecord {
    parents: Vec<Oid>,
    tree: Oid,
    author: Signature,
    committer: Signature,
    message: String,
    encoding: String,
}

#[derive(Serialize, Deserialize)]
struct TagRecord {
    name: String,
    commit: Oid,
}

/// An in-memory implementation of [`Repository`].
///
/// Intended for tests and short-lived processes. Symbolic references are
/// supported; pack and fetch operations are not (the trait defaults
/// report them as unsupported).
pub struct MemoryRepository {
    objects: RwLock<HashMap<Oid, StoredObject>>,
    references: RwLock<HashMap<String, RefRecord>>,
    blob_limit: Option<u64>,
}

impl MemoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            references: RwLock::new(HashMap::new()),
            blob_limit: None,
        }
    }

    /// Create a repository that rejects blobs larger than `limit` bytes.
    pub fn with_blob_limit(limit: u64) -> Self {
        Self {
            blob_limit: Some(limit),
            ..Self::new()
        }
    }

    /// Number of objects currently stored.
    pub fn object_count(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    fn hasher_for(kind: ObjectKind) -> &'static ContentHasher {
        match kind {
            ObjectKind::Blob => &ContentHasher::BLOB,
            ObjectKind::Tree => &ContentHasher::TREE,
            ObjectKind::Commit => &ContentHasher::COMMIT,
            ObjectKind::Tag => &ContentHasher::TAG,
        }
    }

    /// Hash and store an object record; idempotent thanks to content
    /// addressing.
    fn insert_object(&self, kind: ObjectKind, data: Vec<u8>) -> Oid {
        let oid = Self::hasher_for(kind).hash(&data);
        let mut objects = self.objects.write().expect("lock poisoned");
        if objects
            .insert(oid, StoredObject { kind, data })
            .is_none()
        {
            debug!(kind = %kind, oid = %oid.short_hex(), "stored object");
        }
        oid
    }

    fn read_record(&self, kind: ObjectKind, oid: &Oid) -> RepoResult<Vec<u8>> {
        let objects = self.objects.read().expect("lock poisoned");
        match objects.get(oid) {
            Some(stored) if stored.kind == kind => Ok(stored.data.clone()),
            _ => Err(RepoError::ObjectNotFound { kind, oid: *oid }),
        }
    }

    fn decode<T: for<'de> Deserialize<'de>>(data: &[u8]) -> RepoResult<T> {
        serde_json::from_slice(data).map_err(|e| RepoError::Serialization(e.to_string()))
    }

    fn encode<T: Serialize>(value: &T) -> RepoResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| RepoError::Serialization(e.to_string()))
    }

    fn commit_from_record(oid: CommitOid, record: CommitRecord) -> Commit {
        Commit {
            oid,
            parents: record
                .parents
                .into_iter()
                .map(|p| ObjRef::deferred(TypedOid::new(p)))
                .collect(),
            tree: ObjRef::deferred(TypedOid::new(record.tree)),
            author: record.author,
            committer: record.committer,
            message: record.message,
            encoding: record.encoding,
        }
    }

    fn has_kind(&self, kind: ObjectKind, oid: &Oid) -> bool {
        let objects = self.objects.read().expect("lock poisoned");
        matches!(objects.get(oid), Some(stored) if stored.kind == kind)
    }

    /// Whether `ancestor` is reachable from `descendant` through parent
    /// edges (a commit is its own ancestor).
    fn is_ancestor(&self, ancestor: Oid, descendant: CommitOid) -> RepoResult<bool> {
        let mut seen = HashSet::new();
        let mut stack = vec![descendant];
        while let Some(oid) = stack.pop() {
            if oid.untyped() == ancestor {
                return Ok(true);
            }
            if !seen.insert(oid.untyped()) {
                continue;
            }
            let commit = self.lookup_commit(&oid)?;
            for parent in commit.parents.iter().rev() {
                stack.push(parent.oid());
            }
        }
        Ok(false)
    }

    fn record_for(reference: &Reference) -> RefRecord {
        match reference {
            Reference::Direct { target, .. } => RefRecord::Direct(target.oid().untyped()),
            Reference::Symbolic { target, .. } => RefRecord::Symbolic(target.clone()),
        }
    }

    fn reference_from_record(name: &str, record: &RefRecord) -> Reference {
        match record {
            RefRecord::Direct(oid) => Reference::direct(name, TypedOid::new(*oid)),
            RefRecord::Symbolic(target) => Reference::symbolic(name, target.clone()),
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRepository")
            .field("object_count", &self.object_count())
            .field(
                "reference_count",
                &self.references.read().expect("lock poisoned").len(),
            )
            .finish()
    }
}

impl Repository for MemoryRepository {
    // -----------------------------------------------------------------
    // References
    // -----------------------------------------------------------------

    fn create_reference(&self, reference: &Reference) -> RepoResult<()> {
        let mut references = self.references.write().expect("lock poisoned");
        let name = reference.name();
        if references.contains_key(name) {
            return Err(RepoError::ReferenceExists {
                name: name.to_string(),
            });
        }
        references.insert(name.to_string(), Self::record_for(reference));
        debug!(name, "created reference");
        Ok(())
    }

    fn update_reference(&self, reference: &Reference) -> RepoResult<()> {
        let name = reference.name();
        let old = {
            let references = self.references.read().expect("lock poisoned");
            references
                .get(name)
                .cloned()
                .ok_or_else(|| RepoError::ReferenceNotFound {
                    name: name.to_string(),
                })?
        };

        // Fast-forward enforcement: a direct reference may only advance
        // along its descendant chain. Only checked when both ends name
        // commits this backend actually holds.
        if let (RefRecord::Direct(old_oid), Reference::Direct { target, .. }) = (&old, reference) {
            let new_oid = target.oid();
            if *old_oid != new_oid.untyped()
                && self.has_kind(ObjectKind::Commit, old_oid)
                && self.has_kind(ObjectKind::Commit, &new_oid.untyped())
                && !self.is_ancestor(*old_oid, new_oid)?
            {
                return Err(RepoError::NonFastForward {
                    name: name.to_string(),
                });
            }
        }

        let mut references = self.references.write().expect("lock poisoned");
        references.insert(name.to_string(), Self::record_for(reference));
        debug!(name, "updated reference");
        Ok(())
    }

    fn lookup_reference(&self, name: &str) -> RepoResult<Option<Reference>> {
        let references = self.references.read().expect("lock poisoned");
        Ok(references
            .get(name)
            .map(|record| Self::reference_from_record(name, record)))
    }

    fn delete_reference(&self, name: &str) -> RepoResult<bool> {
        let mut references = self.references.write().expect("lock poisoned");
        let existed = references.remove(name).is_some();
        if existed {
            debug!(name, "deleted reference");
        }
        Ok(existed)
    }

    fn reference_names(&self) -> RepoResult<Vec<String>> {
        let references = self.references.read().expect("lock poisoned");
        let mut names: Vec<String> = references.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    // -----------------------------------------------------------------
    // Object lookup
    // -----------------------------------------------------------------

    fn lookup_blob(&self, oid: &BlobOid) -> RepoResult<Blob> {
        let data = self.read_record(ObjectKind::Blob, &oid.untyped())?;
        Ok(Blob::new(*oid, BlobContents::Bytes(data)))
    }

    fn lookup_tree(&self, oid: &TreeOid) -> RepoResult<Tree> {
        let data = self.read_record(ObjectKind::Tree, &oid.untyped())?;
        let record: TreeRecord = Self::decode(&data)?;
        Ok(Tree::new(*oid, record.entries))
    }

    fn lookup_commit(&self, oid: &CommitOid) -> RepoResult<Commit> {
        let data = self.read_record(ObjectKind::Commit, &oid.untyped())?;
        let record: CommitRecord = Self::decode(&data)?;
        Ok(Self::commit_from_record(*oid, record))
    }

    fn lookup_tag(&self, oid: &TagOid) -> RepoResult<Tag> {
        let data = self.read_record(ObjectKind::Tag, &oid.untyped())?;
        let record: TagRecord = Self::decode(&data)?;
        Ok(Tag::new(
            *oid,
            record.name,
            ObjRef::deferred(TypedOid::new(record.commit)),
        ))
    }

    fn lookup_any(&self, rendered: &str) -> RepoResult<AnyObject> {
        let oid: Oid = rendered.parse()?;
        let kind = {
            let objects = self.objects.read().expect("lock poisoned");
            objects
                .get(&oid)
                .map(|stored| stored.kind)
                .ok_or(RepoError::UnknownOid { oid })?
        };
        match kind {
            ObjectKind::Blob => Ok(AnyObject::Blob(self.lookup_blob(&TypedOid::new(oid))?)),
            ObjectKind::Tree => Ok(AnyObject::Tree(self.lookup_tree(&TypedOid::new(oid))?)),
            ObjectKind::Commit => Ok(AnyObject::Commit(self.lookup_commit(&TypedOid::new(oid))?)),
            ObjectKind::Tag => Ok(AnyObject::Tag(self.lookup_tag(&TypedOid::new(oid))?)),
        }
    }

    fn has_object(&self, oid: &Oid) -> RepoResult<bool> {
        let objects = self.objects.read().expect("lock poisoned");
        Ok(objects.contains_key(oid))
    }

    // -----------------------------------------------------------------
    // Object construction
    // -----------------------------------------------------------------

    fn hash_contents(&self, data: &[u8]) -> RepoResult<BlobOid> {
        Ok(TypedOid::new(ContentHasher::BLOB.hash(data)))
    }

    fn create_blob(&self, contents: BlobContents) -> RepoResult<Blob> {
        let data = contents.into_bytes().map_err(RepoError::Object)?;
        if data.is_empty() {
            return Err(RepoError::EmptyBlob);
        }
        if let Some(limit) = self.blob_limit {
            if data.len() as u64 > limit {
                return Err(RepoError::QuotaExceeded {
                    limit,
                    observed: data.len() as u64,
                });
            }
        }
        let oid = self.insert_object(ObjectKind::Blob, data.clone());
        Ok(Blob::new(TypedOid::new(oid), BlobContents::Bytes(data)))
    }

    fn create_tree(&self, mut entries: Vec<TreeEntry>) -> RepoResult<Tree> {
        entries.sort();
        for pair in entries.windows(2) {
            if pair[0].name == pair[1].name {
                return Err(RepoError::CreationRejected {
                    what: "tree",
                    reason: format!("duplicate entry name: {}", pair[0].name),
                });
            }
        }
        let data = Self::encode(&TreeRecord {
            entries: entries.clone(),
        })?;
        let oid = self.insert_object(ObjectKind::Tree, data);
        Ok(Tree::new(TypedOid::new(oid), entries))
    }

    fn create_commit(
        &self,
        parents: &[CommitOid],
        tree: &TreeOid,
        author: Signature,
        committer: Signature,
        message: &str,
        encoding: Option<&str>,
    ) -> RepoResult<Commit> {
        if !self.has_kind(ObjectKind::Tree, &tree.untyped()) {
            return Err(RepoError::ObjectNotFound {
                kind: ObjectKind::Tree,
                oid: tree.untyped(),
            });
        }
        for parent in parents {
            if !self.has_kind(ObjectKind::Commit, &parent.untyped()) {
                return Err(RepoError::ObjectNotFound {
                    kind: ObjectKind::Commit,
                    oid: parent.untyped(),
                });
            }
        }
        let record = CommitRecord {
            parents: parents.iter().map(|p| p.untyped()).collect(),
            tree: tree.untyped(),
            author,
            committer,
            message: message.to_string(),
            encoding: encoding.unwrap_or(Commit::DEFAULT_ENCODING).to_string(),
        };
        let data = Self::encode(&record)?;
        let oid = self.insert_object(ObjectKind::Commit, data);
        let typed = TypedOid::new(oid);
        Ok(Self::commit_from_record(typed, record))
    }

    fn create_tag(&self, name: &str, commit: &CommitOid) -> RepoResult<Tag> {
        if !self.has_kind(ObjectKind::Commit, &commit.untyped()) {
            return Err(RepoError::ObjectNotFound {
                kind: ObjectKind::Commit,
                oid: commit.untyped(),
            });
        }
        let record = TagRecord {
            name: name.to_string(),
            commit: commit.untyped(),
        };
        let data = Self::encode(&record)?;
        let oid = self.insert_object(ObjectKind::Tag, data);
        Ok(Tag::new(
            TypedOid::new(oid),
            name,
            ObjRef::deferred(*commit),
        ))
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    fn facts(&self) -> RepositoryFacts {
        RepositoryFacts {
            symbolic_references: true,
            pack_transport: false,
        }
    }

    fn delete_repository(&self) -> RepoResult<()> {
        self.objects.write().expect("lock poisoned").clear();
        self.references.write().expect("lock poisoned").clear();
        debug!("discarded repository storage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use grove_object::{FileMode, TreeNode};

    fn sig() -> Signature {
        let tz = FixedOffset::east_opt(7200).unwrap();
        Signature::new(
            "Ada",
            "ada@example.org",
            tz.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    fn blob(repo: &MemoryRepository, data: &[u8]) -> Blob {
        repo.create_blob(BlobContents::Bytes(data.to_vec())).unwrap()
    }

    fn empty_tree(repo: &MemoryRepository) -> Tree {
        repo.create_tree(Vec::new()).unwrap()
    }

    fn commit_on(repo: &MemoryRepository, parents: &[CommitOid], message: &str) -> Commit {
        let tree = repo
            .create_tree(vec![TreeEntry::new(
                format!("{message}.txt"),
                TreeNode::Blob {
                    oid: blob(repo, message.as_bytes()).oid,
                    mode: FileMode::Plain,
                },
            )])
            .unwrap();
        repo.create_commit(parents, &tree.oid(), sig(), sig(), message, None)
            .unwrap()
    }

    // -----------------------------------------------------------------
    // Blobs
    // -----------------------------------------------------------------

    #[test]
    fn blob_roundtrip() {
        let repo = MemoryRepository::new();
        let created = blob(&repo, b"hello world");
        let fetched = repo.lookup_blob(&created.oid).unwrap();
        assert_eq!(fetched.contents, BlobContents::Bytes(b"hello world".to_vec()));
    }

    #[test]
    fn blob_from_stream() {
        let repo = MemoryRepository::new();
        let contents = BlobContents::Stream(Box::new(std::io::Cursor::new(b"streamed".to_vec())));
        let created = repo.create_blob(contents).unwrap();
        let fetched = repo.lookup_blob(&created.oid).unwrap();
        assert_eq!(fetched.contents, BlobContents::Bytes(b"streamed".to_vec()));
    }

    #[test]
    fn blob_from_sized_stream_checks_length() {
        let repo = MemoryRepository::new();
        let contents = BlobContents::SizedStream {
            reader: Box::new(std::io::Cursor::new(b"four".to_vec())),
            length: 99,
        };
        let err = repo.create_blob(contents).unwrap_err();
        assert!(matches!(err, RepoError::Object(_)));
    }

    #[test]
    fn empty_blob_rejected() {
        let repo = MemoryRepository::new();
        let err = repo.create_blob(BlobContents::Bytes(Vec::new())).unwrap_err();
        assert!(matches!(err, RepoError::EmptyBlob));
    }

    #[test]
    fn blob_quota_enforced() {
        let repo = MemoryRepository::with_blob_limit(4);
        let err = repo
            .create_blob(BlobContents::Bytes(b"too large".to_vec()))
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::QuotaExceeded {
                limit: 4,
                observed: 9
            }
        ));
        assert!(blob(&repo, b"ok").contents.is_buffered());
    }

    #[test]
    fn identical_contents_share_an_identifier() {
        let repo = MemoryRepository::new();
        let a = blob(&repo, b"same");
        let b = blob(&repo, b"same");
        assert_eq!(a.oid, b.oid);
        assert_eq!(repo.object_count(), 1);
    }

    #[test]
    fn hash_contents_matches_create_blob() {
        let repo = MemoryRepository::new();
        let hashed = repo.hash_contents(b"content").unwrap();
        let created = blob(&repo, b"content");
        assert_eq!(hashed, created.oid);
    }

    #[test]
    fn hash_contents_does_not_store() {
        let repo = MemoryRepository::new();
        let oid = repo.hash_contents(b"phantom").unwrap();
        assert!(!repo.has_object(&oid.untyped()).unwrap());
    }

    // -----------------------------------------------------------------
    // Trees
    // -----------------------------------------------------------------

    #[test]
    fn tree_roundtrip() {
        let repo = MemoryRepository::new();
        let file = blob(&repo, b"contents");
        let created = repo
            .create_tree(vec![
                TreeEntry::new(
                    "b.txt",
                    TreeNode::Blob {
                        oid: file.oid,
                        mode: FileMode::Plain,
                    },
                ),
                TreeEntry::new("a", TreeNode::Tree { oid: empty_tree(&repo).oid() }),
            ])
            .unwrap();
        let fetched = repo.lookup_tree(&created.oid()).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.entries()[0].name, "a");
        assert_eq!(fetched.entries()[1].name, "b.txt");
    }

    #[test]
    fn equal_trees_share_an_identifier() {
        let repo = MemoryRepository::new();
        let a = empty_tree(&repo);
        let b = empty_tree(&repo);
        assert_eq!(a.oid(), b.oid());
    }

    #[test]
    fn duplicate_entry_names_rejected() {
        let repo = MemoryRepository::new();
        let file = blob(&repo, b"x");
        let err = repo
            .create_tree(vec![
                TreeEntry::new(
                    "same",
                    TreeNode::Blob {
                        oid: file.oid,
                        mode: FileMode::Plain,
                    },
                ),
                TreeEntry::new(
                    "same",
                    TreeNode::Blob {
                        oid: file.oid,
                        mode: FileMode::Executable,
                    },
                ),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::CreationRejected { what: "tree", .. }
        ));
    }

    // -----------------------------------------------------------------
    // Commits and tags
    // -----------------------------------------------------------------

    #[test]
    fn commit_roundtrip() {
        let repo = MemoryRepository::new();
        let root = commit_on(&repo, &[], "root");
        let child = commit_on(&repo, &[root.oid], "child");

        let fetched = repo.lookup_commit(&child.oid).unwrap();
        assert_eq!(fetched.message, "child");
        assert_eq!(fetched.encoding, "UTF-8");
        assert_eq!(fetched.parents.len(), 1);
        assert_eq!(fetched.parents[0].oid(), root.oid);
        assert!(!fetched.parents[0].is_resolved());
    }

    #[test]
    fn commit_with_declared_encoding() {
        let repo = MemoryRepository::new();
        let tree = empty_tree(&repo);
        let commit = repo
            .create_commit(&[], &tree.oid(), sig(), sig(), "latin", Some("ISO-8859-1"))
            .unwrap();
        assert_eq!(repo.lookup_commit(&commit.oid).unwrap().encoding, "ISO-8859-1");
    }

    #[test]
    fn commit_requires_existing_tree() {
        let repo = MemoryRepository::new();
        let missing: TreeOid = TypedOid::new(Oid::from_hash([9; 32]));
        let err = repo
            .create_commit(&[], &missing, sig(), sig(), "dangling", None)
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::ObjectNotFound {
                kind: ObjectKind::Tree,
                ..
            }
        ));
    }

    #[test]
    fn commit_requires_existing_parents() {
        let repo = MemoryRepository::new();
        let tree = empty_tree(&repo);
        let missing: CommitOid = TypedOid::new(Oid::from_hash([9; 32]));
        let err = repo
            .create_commit(&[missing], &tree.oid(), sig(), sig(), "orphan", None)
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::ObjectNotFound {
                kind: ObjectKind::Commit,
                ..
            }
        ));
    }

    #[test]
    fn tag_roundtrip() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "release");
        let tag = repo.create_tag("v1.0.0", &commit.oid).unwrap();
        let fetched = repo.lookup_tag(&tag.oid).unwrap();
        assert_eq!(fetched.name, "v1.0.0");
        assert_eq!(fetched.commit.oid(), commit.oid);
    }

    #[test]
    fn tag_requires_existing_commit() {
        let repo = MemoryRepository::new();
        let missing: CommitOid = TypedOid::new(Oid::from_hash([7; 32]));
        let err = repo.create_tag("v0", &missing).unwrap_err();
        assert!(matches!(
            err,
            RepoError::ObjectNotFound {
                kind: ObjectKind::Commit,
                ..
            }
        ));
    }

    // -----------------------------------------------------------------
    // Generic lookup
    // -----------------------------------------------------------------

    #[test]
    fn lookup_any_by_rendered_text() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "findme");
        let any = repo.lookup_any(&commit.oid.to_hex()).unwrap();
        assert_eq!(any.kind(), ObjectKind::Commit);
        assert_eq!(any.oid(), commit.oid.untyped());
    }

    #[test]
    fn lookup_any_missing_object() {
        let repo = MemoryRepository::new();
        let oid = Oid::from_hash([3; 32]);
        let err = repo.lookup_any(&oid.to_hex()).unwrap_err();
        assert!(matches!(err, RepoError::UnknownOid { .. }));
    }

    #[test]
    fn lookup_any_bad_text() {
        let repo = MemoryRepository::new();
        let err = repo.lookup_any("not-hex").unwrap_err();
        assert!(matches!(err, RepoError::Oid(_)));
    }

    #[test]
    fn kind_specific_lookup_rejects_wrong_kind() {
        let repo = MemoryRepository::new();
        let created = blob(&repo, b"data");
        let as_tree: TreeOid = TypedOid::new(created.oid.untyped());
        let err = repo.lookup_tree(&as_tree).unwrap_err();
        assert!(matches!(
            err,
            RepoError::ObjectNotFound {
                kind: ObjectKind::Tree,
                ..
            }
        ));
    }

    #[test]
    fn has_object_reports_presence() {
        let repo = MemoryRepository::new();
        let created = blob(&repo, b"present");
        assert!(repo.has_object(&created.oid.untyped()).unwrap());
        assert!(!repo.has_object(&Oid::from_hash([0xEE; 32])).unwrap());
    }

    // -----------------------------------------------------------------
    // References
    // -----------------------------------------------------------------

    #[test]
    fn create_and_lookup_reference() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "tip");
        repo.create_reference(&Reference::direct("refs/heads/main", commit.oid))
            .unwrap();

        let found = repo.lookup_reference("refs/heads/main").unwrap().unwrap();
        assert_eq!(found.name(), "refs/heads/main");
        assert_eq!(found.target_oid(), Some(commit.oid));
    }

    #[test]
    fn lookup_missing_reference_is_none() {
        let repo = MemoryRepository::new();
        assert!(repo.lookup_reference("refs/heads/nope").unwrap().is_none());
    }

    #[test]
    fn create_duplicate_reference_rejected() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "tip");
        let reference = Reference::direct("refs/heads/main", commit.oid);
        repo.create_reference(&reference).unwrap();
        let err = repo.create_reference(&reference).unwrap_err();
        assert!(matches!(err, RepoError::ReferenceExists { .. }));
    }

    #[test]
    fn update_missing_reference_rejected() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "tip");
        let err = repo
            .update_reference(&Reference::direct("refs/heads/ghost", commit.oid))
            .unwrap_err();
        assert!(matches!(err, RepoError::ReferenceNotFound { .. }));
    }

    #[test]
    fn fast_forward_update_accepted() {
        let repo = MemoryRepository::new();
        let root = commit_on(&repo, &[], "root");
        let child = commit_on(&repo, &[root.oid], "child");

        repo.create_reference(&Reference::direct("refs/heads/main", root.oid))
            .unwrap();
        repo.update_reference(&Reference::direct("refs/heads/main", child.oid))
            .unwrap();

        let found = repo.lookup_reference("refs/heads/main").unwrap().unwrap();
        assert_eq!(found.target_oid(), Some(child.oid));
    }

    #[test]
    fn non_fast_forward_update_rejected() {
        let repo = MemoryRepository::new();
        let root = commit_on(&repo, &[], "root");
        let child = commit_on(&repo, &[root.oid], "child");
        let sibling = commit_on(&repo, &[root.oid], "sibling");

        repo.create_reference(&Reference::direct("refs/heads/main", child.oid))
            .unwrap();
        let err = repo
            .update_reference(&Reference::direct("refs/heads/main", sibling.oid))
            .unwrap_err();
        assert!(matches!(err, RepoError::NonFastForward { .. }));
    }

    #[test]
    fn update_to_same_target_is_allowed() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "tip");
        let reference = Reference::direct("refs/heads/main", commit.oid);
        repo.create_reference(&reference).unwrap();
        repo.update_reference(&reference).unwrap();
    }

    #[test]
    fn delete_reference_reports_existence() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "tip");
        repo.create_reference(&Reference::direct("refs/heads/gone", commit.oid))
            .unwrap();
        assert!(repo.delete_reference("refs/heads/gone").unwrap());
        assert!(!repo.delete_reference("refs/heads/gone").unwrap());
    }

    #[test]
    fn reference_names_sorted() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "tip");
        for name in ["refs/heads/zeta", "refs/heads/alpha", "refs/tags/v1"] {
            repo.create_reference(&Reference::direct(name, commit.oid))
                .unwrap();
        }
        assert_eq!(
            repo.reference_names().unwrap(),
            vec!["refs/heads/alpha", "refs/heads/zeta", "refs/tags/v1"]
        );
    }

    #[test]
    fn symbolic_reference_resolution() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "tip");
        repo.create_reference(&Reference::direct("refs/heads/main", commit.oid))
            .unwrap();
        repo.create_reference(&Reference::symbolic("HEAD", "refs/heads/main"))
            .unwrap();

        let resolved = repo.resolve_reference("HEAD").unwrap().unwrap();
        assert!(!resolved.is_symbolic());
        assert_eq!(resolved.target_oid(), Some(commit.oid));
    }

    #[test]
    fn symbolic_chain_to_missing_name_is_unborn() {
        let repo = MemoryRepository::new();
        repo.create_reference(&Reference::symbolic("HEAD", "refs/heads/unborn"))
            .unwrap();
        let err = repo.resolve_reference("HEAD").unwrap_err();
        assert!(matches!(err, RepoError::UnbornReference { .. }));
    }

    #[test]
    fn symbolic_cycle_detected() {
        let repo = MemoryRepository::new();
        repo.create_reference(&Reference::symbolic("refs/a", "refs/b"))
            .unwrap();
        repo.create_reference(&Reference::symbolic("refs/b", "refs/a"))
            .unwrap();
        let err = repo.resolve_reference("refs/a").unwrap_err();
        assert!(matches!(err, RepoError::SymbolicCycle { .. }));
    }

    #[test]
    fn all_references_lists_every_kind() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "tip");
        repo.create_reference(&Reference::direct("refs/heads/main", commit.oid))
            .unwrap();
        repo.create_reference(&Reference::symbolic("HEAD", "refs/heads/main"))
            .unwrap();
        let refs = repo.all_references().unwrap();
        assert_eq!(refs.len(), 2);
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    #[test]
    fn facts_report_symbolic_support() {
        let repo = MemoryRepository::new();
        let facts = repo.facts();
        assert!(facts.symbolic_references);
        assert!(!facts.pack_transport);
    }

    #[test]
    fn delete_repository_discards_everything() {
        let repo = MemoryRepository::new();
        let commit = commit_on(&repo, &[], "tip");
        repo.create_reference(&Reference::direct("refs/heads/main", commit.oid))
            .unwrap();

        repo.delete_repository().unwrap();
        assert!(repo.is_empty());
        assert!(repo.lookup_reference("refs/heads/main").unwrap().is_none());
    }

    #[test]
    fn debug_format() {
        let repo = MemoryRepository::new();
        blob(&repo, b"x");
        let debug = format!("{repo:?}");
        assert!(debug.contains("MemoryRepository"));
        assert!(debug.contains("object_count"));
    }
}
