//! Depth-first traversal of the object graph and commit ancestry.
//!
//! All walks keep a visited set, so shared subtrees and merge ancestries are
//! visited once. Order is preorder: no object is yielded before an object
//! it is reachable from. Commit links inside trees reference objects in
//! other repositories and are never followed.

use std::collections::HashSet;

use grove_object::{Commit, CommitName, TreeNode};
use grove_types::{CommitOid, ObjectKind, Oid, TreeOid};

use crate::error::RepoResult;
use crate::resolve::resolve_commit_name;
use crate::traits::Repository;

/// One object encountered during a graph walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkEntry {
    /// The object's kind.
    pub kind: ObjectKind,
    /// The object's untyped identifier.
    pub oid: Oid,
}

/// Depth-first walk of every object reachable from a commit designator,
/// mapping a visitor over each and collecting the results.
pub fn walk_objects<T, F>(
    repo: &dyn Repository,
    start: &CommitName,
    mut visit: F,
) -> RepoResult<Vec<T>>
where
    F: FnMut(&WalkEntry) -> RepoResult<T>,
{
    let commit = resolve_commit_name(repo, start)?;
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk_graph(repo, commit.oid, &mut seen, &mut visit, &mut out)?;
    Ok(out)
}

/// Strict variant of [`walk_objects`]: runs the visitor for its effects and
/// discards results.
pub fn visit_objects<F>(repo: &dyn Repository, start: &CommitName, visit: F) -> RepoResult<()>
where
    F: FnMut(&WalkEntry) -> RepoResult<()>,
{
    walk_objects(repo, start, visit).map(|_| ())
}

/// Depth-first walk of commit ancestry, first parent first, mapping a
/// visitor over each commit and collecting the results.
pub fn walk_ancestry<T, F>(
    repo: &dyn Repository,
    start: &CommitName,
    mut visit: F,
) -> RepoResult<Vec<T>>
where
    F: FnMut(&Commit) -> RepoResult<T>,
{
    let commit = resolve_commit_name(repo, start)?;
    let mut seen = HashSet::new();
    let mut stack = vec![commit.oid];
    let mut out = Vec::new();
    while let Some(oid) = stack.pop() {
        if !seen.insert(oid.untyped()) {
            continue;
        }
        let commit = repo.lookup_commit(&oid)?;
        out.push(visit(&commit)?);
        // Reversed push so the first parent is walked first.
        for parent in commit.parents.iter().rev() {
            stack.push(parent.oid());
        }
    }
    Ok(out)
}

/// Strict variant of [`walk_ancestry`].
pub fn visit_ancestry<F>(repo: &dyn Repository, start: &CommitName, visit: F) -> RepoResult<()>
where
    F: FnMut(&Commit) -> RepoResult<()>,
{
    walk_ancestry(repo, start, visit).map(|_| ())
}

/// The objects reachable from `want` but not from `have`, the basis for
/// incremental transfer.
///
/// The result is in preorder: no object appears before an object it is
/// reachable from. Anything reachable from `have` is pruned, subtrees
/// included.
pub fn missing_objects(
    repo: &dyn Repository,
    have: &[CommitName],
    want: &[CommitName],
) -> RepoResult<Vec<WalkEntry>> {
    let mut present = HashSet::new();
    for name in have {
        visit_objects(repo, name, |entry| {
            present.insert(entry.oid);
            Ok(())
        })?;
    }

    // Seeding the visited set with the have-side prunes shared history and
    // shared subtrees without visiting them.
    let mut out = Vec::new();
    let mut visit = |entry: &WalkEntry| Ok(*entry);
    for name in want {
        let commit = resolve_commit_name(repo, name)?;
        walk_graph(repo, commit.oid, &mut present, &mut visit, &mut out)?;
    }
    Ok(out)
}

fn walk_graph<T, F>(
    repo: &dyn Repository,
    root: CommitOid,
    seen: &mut HashSet<Oid>,
    visit: &mut F,
    out: &mut Vec<T>,
) -> RepoResult<()>
where
    F: FnMut(&WalkEntry) -> RepoResult<T>,
{
    let mut stack = vec![root];
    while let Some(oid) = stack.pop() {
        if !seen.insert(oid.untyped()) {
            continue;
        }
        let commit = repo.lookup_commit(&oid)?;
        out.push(visit(&WalkEntry {
            kind: ObjectKind::Commit,
            oid: oid.untyped(),
        })?);
        walk_tree(repo, commit.tree.oid(), seen, visit, out)?;
        for parent in commit.parents.iter().rev() {
            stack.push(parent.oid());
        }
    }
    Ok(())
}

fn walk_tree<T, F>(
    repo: &dyn Repository,
    oid: TreeOid,
    seen: &mut HashSet<Oid>,
    visit: &mut F,
    out: &mut Vec<T>,
) -> RepoResult<()>
where
    F: FnMut(&WalkEntry) -> RepoResult<T>,
{
    if !seen.insert(oid.untyped()) {
        return Ok(());
    }
    out.push(visit(&WalkEntry {
        kind: ObjectKind::Tree,
        oid: oid.untyped(),
    })?);
    let tree = repo.lookup_tree(&oid)?;
    for entry in tree.entries() {
        match &entry.node {
            TreeNode::Blob { oid, .. } => {
                if seen.insert(oid.untyped()) {
                    out.push(visit(&WalkEntry {
                        kind: ObjectKind::Blob,
                        oid: oid.untyped(),
                    })?);
                }
            }
            TreeNode::Tree { oid } => walk_tree(repo, *oid, seen, visit, out)?,
            // A commit link points into another repository; not followed.
            TreeNode::Commit { .. } => {}
        }
    }
    Ok(())
}
