use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// The kind of object an identifier names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Raw content (file contents, arbitrary data).
    Blob,
    /// Directory listing: named entries referencing other objects.
    Tree,
    /// A point in history: parents, a root tree, and authorship.
    Commit,
    /// An annotation of a commit.
    Tag,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Tree => write!(f, "tree"),
            Self::Commit => write!(f, "commit"),
            Self::Tag => write!(f, "tag"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Compile-time marker tying a [`TypedOid`](crate::TypedOid) to the object
/// kind it names.
///
/// The trait is sealed: the four markers below are the only implementors, so
/// every tagged identifier in the system names exactly one of the four
/// object kinds.
pub trait Kind:
    sealed::Sealed + Copy + Clone + fmt::Debug + PartialEq + Eq + PartialOrd + Ord + Hash + 'static
{
    /// The kind this marker denotes.
    const KIND: ObjectKind;
}

/// Marker for blob identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlobKind;

/// Marker for tree identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreeKind;

/// Marker for commit identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitKind;

/// Marker for tag identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagKind;

impl sealed::Sealed for BlobKind {}
impl sealed::Sealed for TreeKind {}
impl sealed::Sealed for CommitKind {}
impl sealed::Sealed for TagKind {}

impl Kind for BlobKind {
    const KIND: ObjectKind = ObjectKind::Blob;
}

impl Kind for TreeKind {
    const KIND: ObjectKind = ObjectKind::Tree;
}

impl Kind for CommitKind {
    const KIND: ObjectKind = ObjectKind::Commit;
}

impl Kind for TagKind {
    const KIND: ObjectKind = ObjectKind::Tag;
}
