//! Scoped tree mutation for Grove.
//!
//! A mutation scope wraps one [`TreeBuilder`]: enter it fresh or seeded from
//! an existing tree, issue a sequence of path-addressed edits, and exit by
//! persisting the staged state as a new immutable tree. The builder is
//! exclusively owned by its scope; independent scopes over the same base
//! tree never share mutable state.
//!
//! [`build_tree`] and [`amend_tree`] are the scope entry points; the
//! `_with` variants also hand back whatever the scope body computed.

pub mod builder;
pub mod error;

pub use builder::{EntryUpdate, TreeBuilder};
pub use error::{BuildError, BuildResult};

use grove_repo::Repository;
use grove_types::TreeOid;

/// Run a mutation scope over a fresh, empty tree and persist the result.
pub fn build_tree<F>(repo: &dyn Repository, body: F) -> BuildResult<TreeOid>
where
    F: FnOnce(&mut TreeBuilder) -> BuildResult<()>,
{
    let (oid, ()) = build_tree_with(repo, body)?;
    Ok(oid)
}

/// Like [`build_tree`], also returning the scope body's computed value.
pub fn build_tree_with<T, F>(repo: &dyn Repository, body: F) -> BuildResult<(TreeOid, T)>
where
    F: FnOnce(&mut TreeBuilder) -> BuildResult<T>,
{
    let mut builder = TreeBuilder::new();
    let value = body(&mut builder)?;
    let oid = builder.write(repo)?;
    Ok((oid, value))
}

/// Run a mutation scope seeded from `base` and persist the result.
pub fn amend_tree<F>(repo: &dyn Repository, base: &TreeOid, body: F) -> BuildResult<TreeOid>
where
    F: FnOnce(&mut TreeBuilder) -> BuildResult<()>,
{
    let (oid, ()) = amend_tree_with(repo, base, body)?;
    Ok(oid)
}

/// Like [`amend_tree`], also returning the scope body's computed value.
pub fn amend_tree_with<T, F>(
    repo: &dyn Repository,
    base: &TreeOid,
    body: F,
) -> BuildResult<(TreeOid, T)>
where
    F: FnOnce(&mut TreeBuilder) -> BuildResult<T>,
{
    let mut builder = TreeBuilder::seeded(repo, base)?;
    let value = body(&mut builder)?;
    let oid = builder.write(repo)?;
    Ok((oid, value))
}
