use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::OidError;
use crate::kind::{BlobKind, CommitKind, Kind, TagKind, TreeKind};
use crate::oid::Oid;

/// An identifier tagged, at the type level, with the object kind it names.
///
/// A `TypedOid<TreeKind>` can only be passed to operations expecting a tree;
/// handing it a blob identifier is a compile error. Conversion to and from
/// the untyped [`Oid`] happens only at defined seams ([`TypedOid::new`] and
/// [`TypedOid::untyped`]), typically inside a backend, which knows what
/// kind of object a hash names.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedOid<K: Kind> {
    oid: Oid,
    _kind: PhantomData<K>,
}

/// Identifier of a blob object.
pub type BlobOid = TypedOid<BlobKind>;
/// Identifier of a tree object.
pub type TreeOid = TypedOid<TreeKind>;
/// Identifier of a commit object.
pub type CommitOid = TypedOid<CommitKind>;
/// Identifier of a tag object.
pub type TagOid = TypedOid<TagKind>;

impl<K: Kind> TypedOid<K> {
    /// Tag an untyped identifier with kind `K`.
    pub const fn new(oid: Oid) -> Self {
        Self {
            oid,
            _kind: PhantomData,
        }
    }

    /// The untyped identifier.
    pub fn untyped(&self) -> Oid {
        self.oid
    }

    /// Full hex-encoded rendering.
    pub fn to_hex(&self) -> String {
        self.oid.to_hex()
    }

    /// Short hex rendering, for logs and Debug output.
    pub fn short_hex(&self) -> String {
        self.oid.short_hex()
    }

    /// Parse from a hex rendering.
    pub fn from_hex(s: &str) -> Result<Self, OidError> {
        Ok(Self::new(Oid::from_hex(s)?))
    }
}

/// Transplant an identifier across backend instances.
///
/// The only sanctioned way to move identity between backends is the text
/// round-trip: render in the source, parse in the destination. It is O(1)
/// and fails only if the destination's identifier scheme cannot represent
/// the rendered text.
pub fn copy_oid<K: Kind>(source: &TypedOid<K>) -> Result<TypedOid<K>, OidError> {
    TypedOid::from_hex(&source.to_hex())
}

impl<K: Kind> fmt::Debug for TypedOid<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", K::KIND, self.oid.short_hex())
    }
}

impl<K: Kind> fmt::Display for TypedOid<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.oid)
    }
}

impl<K: Kind> FromStr for TypedOid<K> {
    type Err = OidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl<K: Kind> From<TypedOid<K>> for Oid {
    fn from(tagged: TypedOid<K>) -> Self {
        tagged.oid
    }
}

impl<K: Kind> Serialize for TypedOid<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.oid.serialize(serializer)
    }
}

impl<'de, K: Kind> Deserialize<'de> for TypedOid<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::new(Oid::deserialize(deserializer)?))
    }
}
