//! Per-path merge disposition for Grove.
//!
//! Merge orchestration compares each branch against the common ancestor and
//! classifies every path as a [`ChangeKind`]. [`classify`] combines the two
//! sides' classifications into a [`MergeStatus`]: a pure decision table
//! with no I/O and no dependence on the rest of the system.

use serde::{Deserialize, Serialize};

/// How one side changed a path relative to the common ancestor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// The path is identical to the ancestor.
    Unchanged,
    /// The path's content changed.
    Modified,
    /// The path did not exist in the ancestor.
    Added,
    /// The path existed in the ancestor and is gone.
    Deleted,
    /// The entry kind changed (e.g. a file became a subtree).
    TypeChanged,
}

/// The pairwise merge disposition of one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergeStatus {
    /// At most one side touched the path; take the changed side.
    NoConflict,
    /// Both sides introduced the path. Not a conflict by itself: the merge
    /// accepts it when both sides agree on the value, which the caller
    /// decides by comparing the entries.
    BothAdded,
    /// Both sides modified the path.
    BothModified,
    /// Both sides changed the path's entry kind.
    BothTypeChanged,
    LeftModifiedRightDeleted,
    LeftDeletedRightModified,
    LeftModifiedRightTypeChanged,
    LeftTypeChangedRightModified,
    LeftDeletedRightTypeChanged,
    LeftTypeChangedRightDeleted,
}

impl MergeStatus {
    /// Whether this disposition needs conflict resolution before the merge
    /// can proceed.
    pub fn is_conflict(&self) -> bool {
        !matches!(self, Self::NoConflict | Self::BothAdded)
    }
}

/// Combine the two sides' change classifications for one path.
///
/// Left/right roles are preserved in the result: `(Modified, Deleted)` is
/// [`MergeStatus::LeftModifiedRightDeleted`] while the mirrored input is
/// [`MergeStatus::LeftDeletedRightModified`].
///
/// # Panics
///
/// Classifications are made against a common ancestor, so `Added` on one
/// side cannot meet anything but `Added` on the other (`Added` means the
/// path was absent in the ancestor; every other classification means it
/// was present). Calling `classify` with such a pair is a caller-contract
/// violation and panics.
pub fn classify(left: ChangeKind, right: ChangeKind) -> MergeStatus {
    use ChangeKind::*;
    use MergeStatus::*;

    match (left, right) {
        (Unchanged, Unchanged | Modified | Deleted | TypeChanged) => NoConflict,
        (Modified | Deleted | TypeChanged, Unchanged) => NoConflict,
        (Deleted, Deleted) => NoConflict,

        (Added, Added) => BothAdded,
        (Modified, Modified) => BothModified,
        (TypeChanged, TypeChanged) => BothTypeChanged,

        (Modified, Deleted) => LeftModifiedRightDeleted,
        (Deleted, Modified) => LeftDeletedRightModified,
        (Modified, TypeChanged) => LeftModifiedRightTypeChanged,
        (TypeChanged, Modified) => LeftTypeChangedRightModified,
        (Deleted, TypeChanged) => LeftDeletedRightTypeChanged,
        (TypeChanged, Deleted) => LeftTypeChangedRightDeleted,

        (Added, _) | (_, Added) => panic!(
            "change classifications disagree about ancestor presence: \
             left {left:?}, right {right:?}"
        ),
    }
}
