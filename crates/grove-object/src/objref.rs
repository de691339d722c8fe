use std::fmt;

use grove_types::{Kind, ObjectKind, Oid, TypedOid};

use crate::blob::Blob;
use crate::commit::Commit;
use crate::tag::Tag;
use crate::tree::Tree;

/// An object that lives in the content-addressed graph.
///
/// Ties each object type to its kind marker, so references and lookups stay
/// kind-correct at compile time.
pub trait RepoObject: Sized {
    /// The kind marker for this object type.
    type Kind: Kind;

    /// The object's content-addressed identifier.
    fn oid(&self) -> TypedOid<Self::Kind>;

    /// The runtime kind of this object type.
    fn kind() -> ObjectKind {
        <Self::Kind as Kind>::KIND
    }
}

impl RepoObject for Blob {
    type Kind = grove_types::BlobKind;

    fn oid(&self) -> TypedOid<Self::Kind> {
        self.oid
    }
}

impl RepoObject for Tree {
    type Kind = grove_types::TreeKind;

    fn oid(&self) -> TypedOid<Self::Kind> {
        self.oid()
    }
}

impl RepoObject for Commit {
    type Kind = grove_types::CommitKind;

    fn oid(&self) -> TypedOid<Self::Kind> {
        self.oid
    }
}

impl RepoObject for Tag {
    type Kind = grove_types::TagKind;

    fn oid(&self) -> TypedOid<Self::Kind> {
        self.oid
    }
}

/// A reference to an object: either an identifier not yet fetched, or the
/// object itself, already materialized in memory.
///
/// Resolution (in `grove-repo`) is idempotent: a resolved reference yields
/// its value with no I/O; a deferred reference costs exactly one backend
/// lookup. The core never caches resolutions behind the caller's back.
pub enum ObjRef<O: RepoObject> {
    /// Known only by identifier; not yet fetched.
    Deferred(TypedOid<O::Kind>),
    /// Fully materialized.
    Resolved(Box<O>),
}

impl<O: RepoObject> ObjRef<O> {
    /// Reference an object by identifier.
    pub fn deferred(oid: TypedOid<O::Kind>) -> Self {
        Self::Deferred(oid)
    }

    /// Wrap an already materialized object.
    pub fn resolved(object: O) -> Self {
        Self::Resolved(Box::new(object))
    }

    /// The identifier this reference names, fetched or not.
    pub fn oid(&self) -> TypedOid<O::Kind> {
        match self {
            Self::Deferred(oid) => *oid,
            Self::Resolved(object) => object.oid(),
        }
    }

    /// Returns `true` if the object is already materialized.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The materialized object, when resolved.
    pub fn as_resolved(&self) -> Option<&O> {
        match self {
            Self::Deferred(_) => None,
            Self::Resolved(object) => Some(object),
        }
    }
}

impl<O: RepoObject> From<TypedOid<O::Kind>> for ObjRef<O> {
    fn from(oid: TypedOid<O::Kind>) -> Self {
        Self::Deferred(oid)
    }
}

impl<O: RepoObject + Clone> Clone for ObjRef<O> {
    fn clone(&self) -> Self {
        match self {
            Self::Deferred(oid) => Self::Deferred(*oid),
            Self::Resolved(object) => Self::Resolved(object.clone()),
        }
    }
}

impl<O: RepoObject + PartialEq> PartialEq for ObjRef<O> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Deferred(a), Self::Deferred(b)) => a == b,
            (Self::Resolved(a), Self::Resolved(b)) => a == b,
            _ => false,
        }
    }
}

impl<O: RepoObject + fmt::Debug> fmt::Debug for ObjRef<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deferred(oid) => write!(f, "Deferred({oid:?})"),
            Self::Resolved(object) => write!(f, "Resolved({object:?})"),
        }
    }
}

/// A dynamically-typed object, as returned by text-based lookup.
#[derive(Debug)]
pub enum AnyObject {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl AnyObject {
    /// The runtime kind of the held object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
            Self::Tag(_) => ObjectKind::Tag,
        }
    }

    /// The untyped identifier of the held object.
    pub fn oid(&self) -> Oid {
        match self {
            Self::Blob(b) => b.oid.untyped(),
            Self::Tree(t) => t.oid().untyped(),
            Self::Commit(c) => c.oid.untyped(),
            Self::Tag(t) => t.oid.untyped(),
        }
    }
}
