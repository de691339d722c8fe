use grove_types::{copy_oid, CommitOid, OidError};

use crate::commit::Commit;
use crate::objref::ObjRef;

/// A named pointer into the commit graph.
///
/// The name is fixed at creation; the target may be reassigned through the
/// repository's update operation. Names are caller-chosen paths (e.g.
/// `refs/heads/main`) and are independent of object identifiers.
#[derive(Clone, Debug, PartialEq)]
pub enum Reference {
    /// Points directly at a commit.
    Direct {
        /// Full reference name.
        name: String,
        /// The commit this reference points at.
        target: ObjRef<Commit>,
    },
    /// Points at another reference by name.
    Symbolic {
        /// Full reference name.
        name: String,
        /// Name of the reference this one aliases.
        target: String,
    },
}

impl Reference {
    /// Create a direct reference to a commit identifier.
    pub fn direct(name: impl Into<String>, target: CommitOid) -> Self {
        Self::Direct {
            name: name.into(),
            target: ObjRef::deferred(target),
        }
    }

    /// Create a symbolic reference aliasing another name.
    pub fn symbolic(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Symbolic {
            name: name.into(),
            target: target.into(),
        }
    }

    /// The reference's own name.
    pub fn name(&self) -> &str {
        match self {
            Self::Direct { name, .. } => name,
            Self::Symbolic { name, .. } => name,
        }
    }

    /// Returns `true` for a symbolic reference.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbolic { .. })
    }

    /// The commit identifier pointed at, for a direct reference.
    pub fn target_oid(&self) -> Option<CommitOid> {
        match self {
            Self::Direct { target, .. } => Some(target.oid()),
            Self::Symbolic { .. } => None,
        }
    }
}

/// A caller-facing commit designator, resolved only when needed.
#[derive(Clone, Debug)]
pub enum CommitName {
    /// A commit identifier.
    Oid(CommitOid),
    /// A reference name to look up and dereference.
    Named(String),
    /// A commit reference already in hand.
    Ref(ObjRef<Commit>),
}

impl From<CommitOid> for CommitName {
    fn from(oid: CommitOid) -> Self {
        Self::Oid(oid)
    }
}

impl From<&str> for CommitName {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

/// Transplant a commit designator across backend instances.
///
/// Identifier-bearing designators go through the text round-trip, the only
/// sanctioned way to move identity between backends; a resolved reference
/// is reduced to its identifier first. Reference names are plain text and
/// pass through unchanged.
pub fn copy_commit_name(source: &CommitName) -> Result<CommitName, OidError> {
    match source {
        CommitName::Oid(oid) => Ok(CommitName::Oid(copy_oid(oid)?)),
        CommitName::Named(name) => Ok(CommitName::Named(name.clone())),
        CommitName::Ref(obj_ref) => Ok(CommitName::Oid(copy_oid(&obj_ref.oid())?)),
    }
}
