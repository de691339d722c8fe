//! The tree staging structure and its path-addressed edit primitive.
//!
//! A [`TreeBuilder`] holds the mutable staging state of one mutation scope.
//! It is single-owner: never shared across scopes or threads. Seeded
//! builders are copy-on-write over their base tree: a subtree stays shared
//! by identifier until an edit lands beneath it.
//!
//! # Invariants
//!
//! - A builder never aliases another builder's mutable state; sharing
//!   happens only through already-persisted immutable subtrees.
//! - A read-only walk (`get`, or any all-`Unchanged`/`Missing` update)
//!   leaves the builder exactly as it was.
//! - Removal that empties a subtree leaves the empty staging node in place;
//!   pruning happens at the next [`write`](TreeBuilder::write), never
//!   eagerly.

use std::collections::BTreeMap;

use tracing::debug;

use grove_object::{FileMode, TreeEntry, TreeNode};
use grove_repo::Repository;
use grove_types::{BlobOid, CommitOid, TreeOid};

use crate::error::{BuildError, BuildResult};

/// The outcome vocabulary of a staged path edit.
///
/// Every edit decision, including a no-op, is expressed through this type:
/// a decision closure produces one as its verdict, and the engine reports
/// one as the result of the operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryUpdate {
    /// Nothing at the path (or its parents, without auto-create).
    Missing,
    /// The entry was (or is to be) removed.
    Removed,
    /// The entry exists and stays as it is.
    Unchanged(TreeNode),
    /// A new value was (or is to be) installed at the path.
    Replaced(TreeNode),
}

impl EntryUpdate {
    /// The entry value observed or produced, if any.
    pub fn node(&self) -> Option<&TreeNode> {
        match self {
            Self::Missing | Self::Removed => None,
            Self::Unchanged(node) | Self::Replaced(node) => Some(node),
        }
    }

    /// Consume into the entry value observed or produced, if any.
    pub fn into_node(self) -> Option<TreeNode> {
        match self {
            Self::Missing | Self::Removed => None,
            Self::Unchanged(node) | Self::Replaced(node) => Some(node),
        }
    }
}

/// One staged level: a name-to-child mapping under edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct StagedTree {
    entries: BTreeMap<String, Staged>,
}

/// A child of a staged level.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Staged {
    /// An entry held by value: a blob, a commit link, or a subtree still
    /// shared with the base tree by identifier.
    Entry(TreeNode),
    /// A subtree materialized for editing.
    Open(StagedTree),
}

/// How to materialize one descended level once a mutating verdict lands.
enum LevelPlan {
    /// The level is already open for editing.
    Open,
    /// Replace the shared subtree entry with these loaded entries.
    Load(BTreeMap<String, TreeNode>),
    /// Create an empty level (auto-create).
    Create,
}

/// Read-phase position during descent.
enum Cursor<'a> {
    /// Inside an open staging node of the builder.
    Open(&'a StagedTree),
    /// Inside a persisted subtree, loaded but not yet staged.
    Loaded(BTreeMap<String, TreeNode>),
    /// Past an absent level that auto-create would bring into being.
    Vacant,
}

/// Mutable staging state of one tree mutation scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeBuilder {
    root: StagedTree,
}

impl TreeBuilder {
    /// Begin a fresh scope over an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a scope seeded from an existing tree.
    ///
    /// Costs one root-level lookup; deeper levels are loaded only when a
    /// path descends into them.
    pub fn seeded(repo: &dyn Repository, base: &TreeOid) -> BuildResult<Self> {
        let tree = repo.lookup_tree(base)?;
        let entries = tree
            .entries()
            .iter()
            .map(|e| (e.name.clone(), Staged::Entry(e.node.clone())))
            .collect();
        Ok(Self {
            root: StagedTree { entries },
        })
    }

    /// The staged path update primitive.
    ///
    /// Descends `path` segment by segment and hands the entry at the final
    /// segment (or its absence) to `decide`. The verdict is applied:
    /// `Missing` and `Unchanged` leave the builder untouched, `Removed`
    /// deletes the entry, `Replaced` installs a new value. Descent itself
    /// never mutates the builder; staging nodes materialize only when a
    /// mutating verdict lands.
    ///
    /// With `auto_create` off, an absent intermediate subtree short-circuits
    /// to `Missing` without consulting `decide`; with it on, the missing
    /// levels are brought into being if (and only if) the verdict mutates.
    /// A non-tree entry at an intermediate segment fails with
    /// [`BuildError::NotASubtree`].
    pub fn update_at<F>(
        &mut self,
        repo: &dyn Repository,
        path: &str,
        auto_create: bool,
        decide: F,
    ) -> BuildResult<EntryUpdate>
    where
        F: FnOnce(Option<&TreeNode>) -> EntryUpdate,
    {
        let mut segments = split_path(path)?;
        let last = match segments.pop() {
            Some(segment) => segment,
            None => return Err(BuildError::EmptyPath),
        };

        // Read phase: walk the parent segments, recording how each level
        // would be materialized, without touching the builder.
        let mut plans: Vec<LevelPlan> = Vec::with_capacity(segments.len());
        let mut cursor = Cursor::Open(&self.root);
        let mut walked = String::new();

        for segment in &segments {
            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(segment);

            cursor = match cursor {
                Cursor::Open(level) => match level.entries.get(*segment) {
                    Some(Staged::Open(child)) => {
                        plans.push(LevelPlan::Open);
                        Cursor::Open(child)
                    }
                    Some(Staged::Entry(TreeNode::Tree { oid })) => {
                        let loaded = load_entries(repo, oid)?;
                        plans.push(LevelPlan::Load(loaded.clone()));
                        Cursor::Loaded(loaded)
                    }
                    Some(Staged::Entry(_)) => {
                        return Err(BuildError::NotASubtree { path: walked })
                    }
                    None if auto_create => {
                        plans.push(LevelPlan::Create);
                        Cursor::Vacant
                    }
                    None => return Ok(EntryUpdate::Missing),
                },
                Cursor::Loaded(map) => match map.get(*segment) {
                    Some(TreeNode::Tree { oid }) => {
                        let loaded = load_entries(repo, oid)?;
                        plans.push(LevelPlan::Load(loaded.clone()));
                        Cursor::Loaded(loaded)
                    }
                    Some(_) => return Err(BuildError::NotASubtree { path: walked }),
                    None if auto_create => {
                        plans.push(LevelPlan::Create);
                        Cursor::Vacant
                    }
                    None => return Ok(EntryUpdate::Missing),
                },
                Cursor::Vacant => {
                    plans.push(LevelPlan::Create);
                    Cursor::Vacant
                }
            };
        }

        // The entry currently at the final segment.
        let current: Option<TreeNode> = match &cursor {
            Cursor::Open(level) => match level.entries.get(last) {
                Some(Staged::Entry(node)) => Some(node.clone()),
                // An in-progress subtree has no identifier yet; persist its
                // current state on demand so the decision sees a concrete
                // entry. The builder itself is not touched.
                Some(Staged::Open(subtree)) => {
                    write_level(repo, subtree)?.map(|oid| TreeNode::Tree { oid })
                }
                None => None,
            },
            Cursor::Loaded(map) => map.get(last).cloned(),
            Cursor::Vacant => None,
        };

        match decide(current.as_ref()) {
            EntryUpdate::Missing => Ok(EntryUpdate::Missing),
            EntryUpdate::Unchanged(node) => Ok(EntryUpdate::Unchanged(node)),
            EntryUpdate::Removed => {
                if current.is_some() {
                    let level = self.materialize(&segments, plans);
                    level.entries.remove(last);
                }
                Ok(EntryUpdate::Removed)
            }
            EntryUpdate::Replaced(node) => {
                let level = self.materialize(&segments, plans);
                level
                    .entries
                    .insert(last.to_string(), Staged::Entry(node.clone()));
                Ok(EntryUpdate::Replaced(node))
            }
        }
    }

    /// Read the entry at `path`, if any. Never mutates the builder.
    pub fn get(&mut self, repo: &dyn Repository, path: &str) -> BuildResult<Option<TreeNode>> {
        let update = self.update_at(repo, path, false, |node| match node {
            Some(node) => EntryUpdate::Unchanged(node.clone()),
            None => EntryUpdate::Missing,
        })?;
        Ok(update.into_node())
    }

    /// Install `node` at `path`, creating intermediate subtrees as needed.
    /// Whatever was previously at the path is superseded.
    pub fn put(&mut self, repo: &dyn Repository, path: &str, node: TreeNode) -> BuildResult<()> {
        self.update_at(repo, path, true, move |_| EntryUpdate::Replaced(node))?;
        Ok(())
    }

    /// Install a blob entry at `path`.
    pub fn put_blob(
        &mut self,
        repo: &dyn Repository,
        path: &str,
        oid: BlobOid,
        mode: FileMode,
    ) -> BuildResult<()> {
        self.put(repo, path, TreeNode::Blob { oid, mode })
    }

    /// Install an already-persisted subtree at `path`.
    pub fn put_subtree(
        &mut self,
        repo: &dyn Repository,
        path: &str,
        oid: TreeOid,
    ) -> BuildResult<()> {
        self.put(repo, path, TreeNode::Tree { oid })
    }

    /// Install a commit link at `path`.
    pub fn put_commit_link(
        &mut self,
        repo: &dyn Repository,
        path: &str,
        oid: CommitOid,
    ) -> BuildResult<()> {
        self.put(repo, path, TreeNode::Commit { oid })
    }

    /// Remove the entry at `path`. Removing an absent path is a no-op, not
    /// an error.
    pub fn remove(&mut self, repo: &dyn Repository, path: &str) -> BuildResult<()> {
        self.update_at(repo, path, false, |node| match node {
            Some(_) => EntryUpdate::Removed,
            None => EntryUpdate::Missing,
        })?;
        Ok(())
    }

    /// Persist the staged state as an immutable tree and return its
    /// identifier.
    ///
    /// Dirty subtrees are written bottom-up; a staged subtree that ended up
    /// empty is pruned; untouched subtrees pass through by identifier.
    /// Content addressing makes the write idempotent: persisting the same
    /// builder state twice yields the same identifier. A failed write
    /// leaves no root behind and the builder must be discarded.
    pub fn write(&self, repo: &dyn Repository) -> BuildResult<TreeOid> {
        let entries = collect_entries(repo, &self.root)?;
        let tree = repo
            .create_tree(entries)
            .map_err(|source| BuildError::WriteFailed { source })?;
        debug!(oid = %tree.oid().short_hex(), "persisted staged tree");
        Ok(tree.oid())
    }

    /// Mutation phase: bring each planned level into the staged state and
    /// return the level holding the final segment.
    fn materialize(&mut self, segments: &[&str], plans: Vec<LevelPlan>) -> &mut StagedTree {
        let mut level = &mut self.root;
        for (segment, plan) in segments.iter().zip(plans) {
            match plan {
                LevelPlan::Open => {}
                LevelPlan::Load(map) => {
                    let staged = StagedTree {
                        entries: map
                            .into_iter()
                            .map(|(name, node)| (name, Staged::Entry(node)))
                            .collect(),
                    };
                    level
                        .entries
                        .insert((*segment).to_string(), Staged::Open(staged));
                }
                LevelPlan::Create => {
                    level
                        .entries
                        .insert((*segment).to_string(), Staged::Open(StagedTree::default()));
                }
            }
            level = match level.entries.get_mut(*segment) {
                Some(Staged::Open(child)) => child,
                _ => unreachable!("planned staging level missing during materialization"),
            };
        }
        level
    }
}

fn split_path(path: &str) -> BuildResult<Vec<&str>> {
    if path.is_empty() {
        return Err(BuildError::EmptyPath);
    }
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(BuildError::EmptySegment {
            path: path.to_string(),
        });
    }
    Ok(segments)
}

fn load_entries(
    repo: &dyn Repository,
    oid: &TreeOid,
) -> BuildResult<BTreeMap<String, TreeNode>> {
    let tree = repo.lookup_tree(oid)?;
    Ok(tree
        .entries()
        .iter()
        .map(|e| (e.name.clone(), e.node.clone()))
        .collect())
}

fn collect_entries(repo: &dyn Repository, level: &StagedTree) -> BuildResult<Vec<TreeEntry>> {
    let mut entries = Vec::with_capacity(level.entries.len());
    for (name, staged) in &level.entries {
        match staged {
            Staged::Entry(node) => entries.push(TreeEntry::new(name.clone(), node.clone())),
            Staged::Open(child) => {
                if let Some(oid) = write_level(repo, child)? {
                    entries.push(TreeEntry::new(name.clone(), TreeNode::Tree { oid }));
                }
            }
        }
    }
    Ok(entries)
}

/// Persist one staged level, bottom-up. Returns `None` for an empty level:
/// that is the pruning point for subtrees emptied by removals.
fn write_level(repo: &dyn Repository, level: &StagedTree) -> BuildResult<Option<TreeOid>> {
    let entries = collect_entries(repo, level)?;
    if entries.is_empty() {
        return Ok(None);
    }
    let tree = repo
        .create_tree(entries)
        .map_err(|source| BuildError::WriteFailed { source })?;
    Ok(Some(tree.oid()))
}
