//! Foundation types for Grove.
//!
//! This crate provides the identifier model every other Grove crate builds
//! on. Identifiers are opaque, content-derived, totally ordered values with
//! a stable text rendering; at the type level each identifier is tagged with
//! the kind of object it names, so a blob identifier can never be handed to
//! an operation expecting a tree.
//!
//! # Key Types
//!
//! - [`Oid`] — opaque 32-byte content-addressed identifier
//! - [`ObjectKind`] — the four object kinds: blob, tree, commit, tag
//! - [`TypedOid`] — an identifier tagged with a kind marker
//! - [`BlobOid`], [`TreeOid`], [`CommitOid`], [`TagOid`] — the tagged aliases
//! - [`copy_oid`] — cross-backend identifier transplantation via the text
//!   round-trip

pub mod error;
pub mod kind;
pub mod oid;
pub mod tagged;

pub use error::OidError;
pub use kind::{BlobKind, CommitKind, Kind, ObjectKind, TagKind, TreeKind};
pub use oid::Oid;
pub use tagged::{copy_oid, BlobOid, CommitOid, TagOid, TreeOid, TypedOid};
