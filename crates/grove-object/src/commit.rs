use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use grove_types::CommitOid;

use crate::objref::ObjRef;
use crate::tree::Tree;

/// Authorship record: who, with a timezone-aware timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// When the action happened, in the actor's timezone.
    pub when: DateTime<FixedOffset>,
}

impl Signature {
    /// Create a new signature.
    pub fn new(name: impl Into<String>, email: impl Into<String>, when: DateTime<FixedOffset>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A point in history.
///
/// Parents are ordered; the first parent is the mainline and is significant
/// to ancestry walks. Parent and tree references are lazy: they hold an
/// identifier until resolved against a repository.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    /// Content-addressed identifier of this commit.
    pub oid: CommitOid,
    /// Ordered parent commits, first-parent first.
    pub parents: Vec<ObjRef<Commit>>,
    /// The root tree this commit snapshots.
    pub tree: ObjRef<Tree>,
    /// Who wrote the change.
    pub author: Signature,
    /// Who recorded the change.
    pub committer: Signature,
    /// Free-text log message.
    pub message: String,
    /// Declared text encoding of the message.
    pub encoding: String,
}

impl Commit {
    /// The declared encoding used when none is specified.
    pub const DEFAULT_ENCODING: &'static str = "UTF-8";

    /// Returns `true` if this commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// The first (mainline) parent, if any.
    pub fn first_parent(&self) -> Option<&ObjRef<Commit>> {
        self.parents.first()
    }
}
