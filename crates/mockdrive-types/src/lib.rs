//! Foundation types for mockdrive.
//!
//! This crate provides the identity, temporal, and payload types shared by
//! the store engine and its callers. Every other mockdrive crate depends on
//! `mockdrive-types`.
//!
//! # Key Types
//!
//! - [`EntryId`]: Opaque identifier assigned to every file and folder
//! - [`EntryKind`]: Discriminates files from folders
//! - [`Timestamp`]: UTC instant rendered as ISO-8601
//! - [`Content`]: Text or binary file payload

pub mod content;
pub mod error;
pub mod identity;
pub mod temporal;

pub use content::Content;
pub use error::TypeError;
pub use identity::{EntryId, EntryKind};
pub use temporal::Timestamp;
