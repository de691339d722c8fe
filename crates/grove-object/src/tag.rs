use grove_types::TagOid;

use crate::commit::Commit;
use crate::objref::ObjRef;

/// An annotation of a commit.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    /// Content-addressed identifier of this tag.
    pub oid: TagOid,
    /// Tag name (e.g. "v1.0.0").
    pub name: String,
    /// The commit this tag annotates.
    pub commit: ObjRef<Commit>,
}

impl Tag {
    /// Create a new tag.
    pub fn new(oid: TagOid, name: impl Into<String>, commit: ObjRef<Commit>) -> Self {
        Self {
            oid,
            name: name.into(),
            commit,
        }
    }
}
