//! In-memory cloud-drive backend for tests.
//!
//! This crate emulates the semantics of a hierarchical drive service (files
//! and folders with opaque ids, timestamps, move/copy/delete) entirely in
//! process memory, for use as a test double. Nothing is persisted.
//!
//! # Components
//!
//! - [`IdAllocator`] -- per-store counter issuing entry ids
//! - [`Clock`] -- strictly monotonic timestamps
//! - [`Entry`] -- file/folder model with derived size
//! - `TreeRegistry` -- internal id→entry and id→parent maps, the only shape mutator
//! - [`InMemoryDrive`] -- the [`DriveBackend`] operation layer
//!
//! # Design Rules
//!
//! 1. Every operation validates fully before it mutates; errors leave the store untouched.
//! 2. Callers only ever receive detached [`EntryRecord`] snapshots.
//! 3. Folder views list children one level deep.
//! 4. One clock tick per mutating operation; every timestamp it writes uses that tick.
//! 5. No internal locking: callers serialize access (`&mut self`).

pub mod allocator;
pub mod clock;
pub mod config;
pub mod entry;
pub mod error;
pub mod memory;
pub mod record;
pub(crate) mod registry;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use allocator::IdAllocator;
pub use clock::Clock;
pub use config::StoreConfig;
pub use entry::{Entry, EntryPayload};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDrive;
pub use record::EntryRecord;
pub use traits::{CopyOptions, CreateFile, CreateFolder, DriveBackend, UpdateFile, UpdateFolder};

pub use mockdrive_types::{Content, EntryId, EntryKind, Timestamp};
