//! Authoritative id→entry and id→parent maps.
//!
//! [`TreeRegistry`] owns every [`Entry`] in a store and keeps the tree
//! invariants: one root without a parent, exactly one folder parent for
//! everything else, child lists in insertion order. [`TreeRegistry::register`]
//! and [`TreeRegistry::unregister`] are the only operations that change tree
//! shape; moves, copies and deletes are composed from them.

use std::collections::HashMap;

use mockdrive_types::{EntryId, EntryKind, Timestamp};
use tracing::trace;

use crate::entry::Entry;
use crate::error::{StoreError, StoreResult};
use crate::record::EntryRecord;

/// Id→entry and id→parent maps rooted at a single folder.
#[derive(Debug)]
pub struct TreeRegistry {
    entries: HashMap<EntryId, Entry>,
    parents: HashMap<EntryId, Option<EntryId>>,
    root: EntryId,
}

impl TreeRegistry {
    /// Create a registry holding only `root`, which has no parent.
    pub fn with_root(root: Entry) -> Self {
        let root_id = root.id().clone();
        let mut entries = HashMap::new();
        let mut parents = HashMap::new();
        parents.insert(root_id.clone(), None);
        entries.insert(root_id.clone(), root);
        Self {
            entries,
            parents,
            root: root_id,
        }
    }

    /// Id of the root folder.
    pub fn root_id(&self) -> &EntryId {
        &self.root
    }

    /// Number of registered entries, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the root is registered for the registry's lifetime.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` if `id` is registered.
    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.contains_key(id)
    }

    /// Entry registered under `id`.
    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Mutable entry registered under `id`. Callers must not change tree shape through it.
    pub fn get_mut(&mut self, id: &EntryId) -> Option<&mut Entry> {
        self.entries.get_mut(id)
    }

    /// Parent of `id`; `None` for the root and for unknown ids.
    pub fn parent_of(&self, id: &EntryId) -> Option<&EntryId> {
        self.parents.get(id).and_then(Option::as_ref)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Look up `id` and check its kind.
    pub fn expect_kind(&self, id: &EntryId, expected: EntryKind) -> StoreResult<&Entry> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;
        if entry.kind() != expected {
            return Err(StoreError::WrongKind {
                id: id.clone(),
                expected,
                found: entry.kind(),
            });
        }
        Ok(entry)
    }

    /// Check that `id` names a registered folder usable as a parent.
    pub fn expect_parent_folder(&self, id: &EntryId) -> StoreResult<&Entry> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| StoreError::ParentNotFound { id: id.clone() })?;
        if !entry.kind().is_folder() {
            return Err(StoreError::ParentNotFolder { id: id.clone() });
        }
        Ok(entry)
    }

    /// `true` if `ancestor` is `id` itself or lies on its parent chain.
    pub fn is_same_or_ancestor(&self, ancestor: &EntryId, id: &EntryId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent_of(current);
        }
        false
    }

    // -----------------------------------------------------------------------
    // Shape mutators
    // -----------------------------------------------------------------------

    /// Insert `entry` under `parent`.
    ///
    /// Postcondition: the entry is appended to the parent's child list, and
    /// both the parent's and the entry's `modified_at` equal `at`. Creation
    /// passes the entry's own `created_at` as `at`, so a fresh entry keeps
    /// `created_at == modified_at`. Validation happens before any change;
    /// an id that is already registered is refused.
    pub fn register(&mut self, mut entry: Entry, parent: &EntryId, at: Timestamp) -> StoreResult<()> {
        let id = entry.id().clone();
        if self.entries.contains_key(&id) {
            return Err(StoreError::AlreadyRegistered { id });
        }
        self.expect_parent_folder(parent)?;
        let folder = self
            .entries
            .get_mut(parent)
            .ok_or_else(|| StoreError::ParentNotFound { id: parent.clone() })?;
        folder.push_child(id.clone());
        folder.touch(at);
        entry.touch(at);

        trace!(id = %id, parent = %parent, "registered entry");
        self.parents.insert(id.clone(), Some(parent.clone()));
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Remove `id` from both maps and from its parent's child list.
    ///
    /// Postcondition: the parent's `modified_at == at`. A folder's children
    /// are left untouched; callers either re-register the folder under the
    /// same id (a move) or unregister the descendants first (a delete).
    pub fn unregister(&mut self, id: &EntryId, at: Timestamp) -> StoreResult<Entry> {
        if id == &self.root {
            return Err(StoreError::RootFolder { op: "detach" });
        }
        let entry = self
            .entries
            .remove(id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;
        if let Some(parent) = self.parents.remove(id).flatten() {
            if let Some(folder) = self.entries.get_mut(&parent) {
                folder.remove_child(id);
                folder.touch(at);
            }
            trace!(id = %id, parent = %parent, "unregistered entry");
        }
        Ok(entry)
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    /// `id` and every descendant, children before their folder.
    ///
    /// Uses an explicit work list, so deep trees do not grow the call stack.
    pub fn subtree_post_order(&self, id: &EntryId) -> Vec<EntryId> {
        let mut order = Vec::new();
        let mut stack = vec![(id.clone(), false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                order.push(current);
                continue;
            }
            let children = self.entries.get(&current).map(Entry::children).unwrap_or_default();
            stack.push((current.clone(), true));
            stack.extend(children.iter().rev().map(|child| (child.clone(), false)));
        }
        order
    }

    /// `id` and every descendant, each folder before its children, siblings
    /// in child-list order.
    pub fn subtree_pre_order(&self, id: &EntryId) -> Vec<EntryId> {
        let mut order = Vec::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if let Some(entry) = self.entries.get(&current) {
                stack.extend(entry.children().iter().rev().cloned());
            }
            order.push(current);
        }
        order
    }

    // -----------------------------------------------------------------------
    // Projection
    // -----------------------------------------------------------------------

    /// Record without a child listing.
    pub fn mini_record(&self, id: &EntryId) -> StoreResult<EntryRecord> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;
        Ok(entry.to_record(self.parent_of(id)))
    }

    /// Full view: folders list their direct children as mini-records.
    pub fn record(&self, id: &EntryId) -> StoreResult<EntryRecord> {
        let mut record = self.mini_record(id)?;
        if record.is_folder() {
            let children = self
                .entries
                .get(id)
                .map(Entry::children)
                .unwrap_or_default()
                .iter()
                .map(|child| self.mini_record(child))
                .collect::<StoreResult<Vec<_>>>()?;
            record.entries = Some(children);
        }
        Ok(record)
    }
}
