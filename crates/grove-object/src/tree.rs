use serde::{Deserialize, Serialize};

use grove_types::{BlobOid, CommitOid, TreeOid};

/// File mode of a blob entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileMode {
    /// Normal file (0o100644).
    Plain,
    /// Executable file (0o100755).
    Executable,
    /// Symbolic link (0o120000).
    Symlink,
    /// Mode not representable by this model; preserved opaquely.
    Unknown,
}

impl FileMode {
    /// Octal mode value (for display/serialization).
    pub fn mode_bits(&self) -> u32 {
        match self {
            Self::Plain => 0o100644,
            Self::Executable => 0o100755,
            Self::Symlink => 0o120000,
            Self::Unknown => 0,
        }
    }

    /// Parse from an octal mode value. Unrecognized bits map to `Unknown`.
    pub fn from_mode_bits(bits: u32) -> Self {
        match bits {
            0o100644 => Self::Plain,
            0o100755 => Self::Executable,
            0o120000 => Self::Symlink,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06o}", self.mode_bits())
    }
}

/// The value of a tree entry: what a name inside a tree points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeNode {
    /// A blob entry with its file mode.
    Blob { oid: BlobOid, mode: FileMode },
    /// A nested subtree.
    Tree { oid: TreeOid },
    /// A commit link (submodule-style reference into another repository).
    Commit { oid: CommitOid },
}

impl TreeNode {
    /// Returns `true` if this entry is a nested subtree.
    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree { .. })
    }

    /// The subtree identifier, when this entry is one.
    pub fn tree_oid(&self) -> Option<TreeOid> {
        match self {
            Self::Tree { oid } => Some(*oid),
            _ => None,
        }
    }
}

/// A single named entry in a tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Entry name (one path segment).
    pub name: String,
    /// What the name points at.
    pub node: TreeNode,
}

impl TreeEntry {
    /// Create a new tree entry.
    pub fn new(name: impl Into<String>, node: TreeNode) -> Self {
        Self {
            name: name.into(),
            node,
        }
    }
}

impl PartialOrd for TreeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreeEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

/// An immutable directory listing.
///
/// Entries are kept sorted lexicographically by name so the persisted form
/// is deterministic: the same mapping always serializes, and therefore
/// hashes, identically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    oid: TreeOid,
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Create a tree from an identifier and entries. Entries are sorted by
    /// name.
    pub fn new(oid: TreeOid, mut entries: Vec<TreeEntry>) -> Self {
        entries.sort();
        Self { oid, entries }
    }

    /// Content-addressed identifier of this tree.
    pub fn oid(&self) -> TreeOid {
        self.oid
    }

    /// The sorted entries.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Look up an entry by name.
    pub fn entry(&self, name: &str) -> Option<&TreeEntry> {
        self.entries
            .binary_search_by(|e| e.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
