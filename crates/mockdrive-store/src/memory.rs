use std::collections::HashMap;

use mockdrive_types::{Content, EntryId, EntryKind, Timestamp};
use tracing::debug;

use crate::allocator::IdAllocator;
use crate::clock::Clock;
use crate::config::StoreConfig;
use crate::entry::{Entry, EntryPayload};
use crate::error::{StoreError, StoreResult};
use crate::record::EntryRecord;
use crate::registry::TreeRegistry;
use crate::traits::{
    CopyOptions, CreateFile, CreateFolder, DriveBackend, UpdateFile, UpdateFolder,
};

/// In-memory drive backend.
///
/// Owns its id counter, clock and registry; two instances never share state.
/// There is no internal locking: mutating operations take `&mut self`, so the
/// borrow checker serializes callers. State lives as long as the value.
pub struct InMemoryDrive {
    ids: IdAllocator,
    clock: Clock,
    registry: TreeRegistry,
}

impl InMemoryDrive {
    /// Create a drive whose root id comes from the counter (`"0"`).
    pub fn new() -> Self {
        Self::from_config(&StoreConfig::default())
    }

    /// Create a drive whose root folder has the given id.
    pub fn with_root_id(root_id: impl Into<String>) -> Self {
        Self::from_config(&StoreConfig {
            root_id: Some(root_id.into()),
            ..StoreConfig::default()
        })
    }

    /// Create a drive from configuration.
    ///
    /// A caller-supplied root id does not advance the counter. Later
    /// allocations skip it if the counter ever reaches the same value.
    pub fn from_config(config: &StoreConfig) -> Self {
        let mut ids = IdAllocator::new();
        let mut clock = Clock::new();
        let root_id = match &config.root_id {
            Some(raw) => EntryId::new(raw.clone()),
            None => ids.allocate(),
        };
        let root = Entry::folder(root_id, config.root_name.clone(), clock.tick());
        debug!(root = %root.id(), "drive created");
        Self {
            ids,
            clock,
            registry: TreeRegistry::with_root(root),
        }
    }

    /// Id of the root folder.
    pub fn root_id(&self) -> &EntryId {
        self.registry.root_id()
    }

    /// Number of live entries, root included.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Always `false`: the root folder cannot be deleted.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// `true` if an entry with this id is live.
    pub fn contains(&self, id: &EntryId) -> bool {
        self.registry.contains(id)
    }

    /// Full view of the root folder.
    pub fn root(&self) -> StoreResult<EntryRecord> {
        self.registry.record(self.registry.root_id())
    }

    fn next_id(&mut self) -> EntryId {
        let registry = &self.registry;
        self.ids.allocate_unused(|id| registry.contains(id))
    }

    fn entry_mut(&mut self, id: &EntryId) -> StoreResult<&mut Entry> {
        self.registry
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })
    }

    /// Validated parent for a create: the given folder, or the root.
    fn resolve_parent(&self, parent_id: Option<EntryId>) -> StoreResult<EntryId> {
        let parent = parent_id.unwrap_or_else(|| self.registry.root_id().clone());
        self.registry.expect_parent_folder(&parent)?;
        Ok(parent)
    }

    /// Validated target for a copy: the given folder, or the source's parent.
    fn resolve_copy_target(
        &self,
        source: &EntryId,
        parent_id: Option<EntryId>,
    ) -> StoreResult<EntryId> {
        let target = match parent_id {
            Some(parent) => parent,
            None => self
                .registry
                .parent_of(source)
                .cloned()
                .ok_or(StoreError::RootFolder { op: "copy" })?,
        };
        self.registry.expect_parent_folder(&target)?;
        Ok(target)
    }

    /// Detach `id` from its parent and attach it under `new_parent`.
    ///
    /// Callers validate `new_parent` (exists, is a folder, not inside the
    /// moved subtree) beforehand.
    fn move_entry(
        &mut self,
        id: &EntryId,
        new_parent: &EntryId,
        at: Timestamp,
    ) -> StoreResult<()> {
        let entry = self.registry.unregister(id, at)?;
        self.registry.register(entry, new_parent, at)?;
        debug!(id = %id, parent = %new_parent, "entry moved");
        Ok(())
    }
}

impl Default for InMemoryDrive {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveBackend for InMemoryDrive {
    fn create_file(&mut self, name: &str, options: CreateFile) -> StoreResult<EntryRecord> {
        let parent = self.resolve_parent(options.parent_id)?;
        let at = self.clock.tick();
        let id = self.next_id();
        self.registry
            .register(Entry::file(id.clone(), name, options.content, at), &parent, at)?;
        debug!(id = %id, parent = %parent, name, "file created");
        self.registry.record(&id)
    }

    fn create_folder(&mut self, name: &str, options: CreateFolder) -> StoreResult<EntryRecord> {
        let parent = self.resolve_parent(options.parent_id)?;
        let at = self.clock.tick();
        let id = self.next_id();
        self.registry
            .register(Entry::folder(id.clone(), name, at), &parent, at)?;
        debug!(id = %id, parent = %parent, name, "folder created");
        self.registry.record(&id)
    }

    fn get_file(&self, id: &EntryId) -> StoreResult<EntryRecord> {
        self.registry.expect_kind(id, EntryKind::File)?;
        self.registry.record(id)
    }

    fn get_folder(&self, id: &EntryId) -> StoreResult<EntryRecord> {
        self.registry.expect_kind(id, EntryKind::Folder)?;
        self.registry.record(id)
    }

    fn get_file_content(&self, id: &EntryId) -> StoreResult<Option<Content>> {
        let file = self.registry.expect_kind(id, EntryKind::File)?;
        Ok(file.content().cloned())
    }

    fn update_file(&mut self, id: &EntryId, changes: UpdateFile) -> StoreResult<EntryRecord> {
        self.registry.expect_kind(id, EntryKind::File)?;
        if let Some(parent) = &changes.parent_id {
            self.registry.expect_parent_folder(parent)?;
        }
        if changes.is_empty() {
            return self.registry.record(id);
        }

        let at = self.clock.tick();
        let UpdateFile {
            name,
            content,
            parent_id,
        } = changes;
        if let Some(name) = name {
            self.entry_mut(id)?.rename(name, at);
        }
        if let Some(content) = content {
            self.entry_mut(id)?.set_content(content, at)?;
            // Content changes show up as activity on the containing folder.
            if let Some(parent) = self.registry.parent_of(id).cloned() {
                self.entry_mut(&parent)?.touch(at);
            }
        }
        if let Some(parent) = parent_id {
            self.move_entry(id, &parent, at)?;
        }
        debug!(id = %id, "file updated");
        self.registry.record(id)
    }

    fn update_folder(&mut self, id: &EntryId, changes: UpdateFolder) -> StoreResult<EntryRecord> {
        self.registry.expect_kind(id, EntryKind::Folder)?;
        if let Some(parent) = &changes.parent_id {
            if id == self.registry.root_id() {
                return Err(StoreError::RootFolder { op: "move" });
            }
            self.registry.expect_parent_folder(parent)?;
            if self.registry.is_same_or_ancestor(id, parent) {
                return Err(StoreError::WouldCreateCycle {
                    id: id.clone(),
                    parent_id: parent.clone(),
                });
            }
        }
        if changes.is_empty() {
            return self.registry.record(id);
        }

        let at = self.clock.tick();
        if let Some(name) = changes.name {
            self.entry_mut(id)?.rename(name, at);
        }
        if let Some(parent) = changes.parent_id {
            self.move_entry(id, &parent, at)?;
        }
        debug!(id = %id, "folder updated");
        self.registry.record(id)
    }

    fn copy_file(&mut self, id: &EntryId, options: CopyOptions) -> StoreResult<EntryRecord> {
        let source = self.registry.expect_kind(id, EntryKind::File)?;
        let name = options.name.unwrap_or_else(|| source.name().to_string());
        let content = source.content().cloned();
        let target = self.resolve_copy_target(id, options.parent_id)?;

        let at = self.clock.tick();
        let copy_id = self.next_id();
        self.registry
            .register(Entry::file(copy_id.clone(), name, content, at), &target, at)?;
        debug!(source = %id, id = %copy_id, parent = %target, "file copied");
        self.registry.record(&copy_id)
    }

    fn copy_folder(&mut self, id: &EntryId, options: CopyOptions) -> StoreResult<EntryRecord> {
        let source = self.registry.expect_kind(id, EntryKind::Folder)?;
        let name = options.name.unwrap_or_else(|| source.name().to_string());
        let target = self.resolve_copy_target(id, options.parent_id)?;

        // Snapshot before registering anything, so copying a folder into its
        // own subtree never picks up the copy.
        let plan: Vec<(Entry, Option<EntryId>)> = self
            .registry
            .subtree_pre_order(id)
            .iter()
            .filter_map(|sid| {
                let entry = self.registry.get(sid)?.clone();
                Some((entry, self.registry.parent_of(sid).cloned()))
            })
            .collect();

        let at = self.clock.tick();
        let mut remap: HashMap<EntryId, EntryId> = HashMap::with_capacity(plan.len());
        for (source, source_parent) in plan {
            let copy_id = self.next_id();
            let (copy_name, parent) = if source.id() == id {
                (name.clone(), target.clone())
            } else {
                let parent = source_parent
                    .and_then(|p| remap.get(&p).cloned())
                    .ok_or_else(|| StoreError::NotFound { id: source.id().clone() })?;
                (source.name().to_string(), parent)
            };
            let copy = match source.payload() {
                EntryPayload::File { content } => {
                    Entry::file(copy_id.clone(), copy_name, content.clone(), at)
                }
                EntryPayload::Folder { .. } => Entry::folder(copy_id.clone(), copy_name, at),
            };
            self.registry.register(copy, &parent, at)?;
            remap.insert(source.id().clone(), copy_id);
        }

        let copy_id = remap
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;
        debug!(
            source = %id,
            id = %copy_id,
            parent = %target,
            entries = remap.len(),
            "folder copied"
        );
        self.registry.record(&copy_id)
    }

    fn delete_file(&mut self, id: &EntryId) -> StoreResult<()> {
        self.registry.expect_kind(id, EntryKind::File)?;
        let at = self.clock.tick();
        self.registry.unregister(id, at)?;
        debug!(id = %id, "file deleted");
        Ok(())
    }

    fn delete_folder(&mut self, id: &EntryId) -> StoreResult<()> {
        self.registry.expect_kind(id, EntryKind::Folder)?;
        if id == self.registry.root_id() {
            return Err(StoreError::RootFolder { op: "delete" });
        }
        let at = self.clock.tick();
        let doomed = self.registry.subtree_post_order(id);
        for victim in &doomed {
            self.registry.unregister(victim, at)?;
        }
        debug!(id = %id, removed = doomed.len(), "folder deleted");
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryDrive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDrive")
            .field("root_id", self.root_id())
            .field("entry_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive() -> InMemoryDrive {
        InMemoryDrive::new()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn new_drive_has_only_root() {
        let d = drive();
        assert_eq!(d.len(), 1);
        assert_eq!(d.root_id().as_str(), "0");
        let root = d.root().unwrap();
        assert!(root.parent_id.is_none());
        assert_eq!(root.name, "root");
        assert_eq!(root.children().len(), 0);
    }

    #[test]
    fn caller_supplied_root_id() {
        let mut d = InMemoryDrive::with_root_id("drive-root");
        assert_eq!(d.root_id().as_str(), "drive-root");
        let file = d.create_file("a", CreateFile::default()).unwrap();
        // The override does not consume a counter value.
        assert_eq!(file.id.as_str(), "0");
        assert_eq!(file.parent_id.as_ref(), Some(d.root_id()));
    }

    #[test]
    fn allocator_skips_supplied_root_id() {
        let mut d = InMemoryDrive::with_root_id("1");
        let a = d.create_file("a", CreateFile::default()).unwrap();
        let b = d.create_file("b", CreateFile::default()).unwrap();
        assert_eq!(a.id.as_str(), "0");
        assert_eq!(b.id.as_str(), "2");
    }

    #[test]
    fn from_config_uses_root_name() {
        let d = InMemoryDrive::from_config(&StoreConfig {
            root_id: None,
            root_name: "My Drive".into(),
        });
        assert_eq!(d.root().unwrap().name, "My Drive");
    }

    #[test]
    fn drives_do_not_share_ids() {
        let mut a = drive();
        let mut b = drive();
        a.create_file("x", CreateFile::default()).unwrap();
        a.create_file("y", CreateFile::default()).unwrap();
        let first_b = b.create_file("z", CreateFile::default()).unwrap();
        assert_eq!(first_b.id.as_str(), "1");
    }

    // -----------------------------------------------------------------------
    // Create / get
    // -----------------------------------------------------------------------

    #[test]
    fn create_file_defaults_to_root() {
        let mut d = drive();
        let file = d.create_file("foo.txt", CreateFile::default()).unwrap();
        assert_eq!(file.parent_id.as_ref(), Some(d.root_id()));
        assert_eq!(file.size, Some(0));
        assert_eq!(file.kind, EntryKind::File);
        assert_eq!(file.created_at, file.modified_at);
    }

    #[test]
    fn create_file_with_content_has_size() {
        let mut d = drive();
        let file = d
            .create_file("foo.txt", CreateFile::default().content("Hello, world!"))
            .unwrap();
        assert_eq!(file.size, Some(13));
    }

    #[test]
    fn create_touches_parent() {
        let mut d = drive();
        let folder = d.create_folder("docs", CreateFolder::default()).unwrap();
        let file = d
            .create_file("a", CreateFile::default().parent(folder.id.clone()))
            .unwrap();
        let folder_now = d.get_folder(&folder.id).unwrap();
        assert_eq!(folder_now.modified_at, file.created_at);
        assert!(folder_now.modified_at > folder.modified_at);
        assert_eq!(folder_now.children().len(), 1);
    }

    #[test]
    fn get_returns_what_create_returned() {
        let mut d = drive();
        let folder = d.create_folder("docs", CreateFolder::default()).unwrap();
        assert_eq!(d.get_folder(&folder.id).unwrap(), folder);
        let file = d
            .create_file("a", CreateFile::default().parent(folder.id.clone()).content("x"))
            .unwrap();
        assert_eq!(d.get_file(&file.id).unwrap(), file);
    }

    #[test]
    fn get_checks_kind() {
        let mut d = drive();
        let folder = d.create_folder("docs", CreateFolder::default()).unwrap();
        let file = d.create_file("a", CreateFile::default()).unwrap();
        assert!(d.get_file(&folder.id).unwrap_err().is_wrong_kind());
        assert!(d.get_folder(&file.id).unwrap_err().is_wrong_kind());
        assert!(d.get_file_content(&folder.id).unwrap_err().is_wrong_kind());
        assert!(d.get_file(&"missing".into()).unwrap_err().is_not_found());
    }

    #[test]
    fn get_file_content_returns_payload() {
        let mut d = drive();
        let text = d.create_file("t", CreateFile::default().content("hi")).unwrap();
        let bin = d
            .create_file("b", CreateFile::default().content(vec![0u8, 159, 146, 150]))
            .unwrap();
        let empty = d.create_file("e", CreateFile::default()).unwrap();
        assert_eq!(d.get_file_content(&text.id).unwrap(), Some(Content::from("hi")));
        assert_eq!(
            d.get_file_content(&bin.id).unwrap(),
            Some(Content::Binary(vec![0, 159, 146, 150]))
        );
        assert_eq!(bin.size, Some(4));
        assert_eq!(d.get_file_content(&empty.id).unwrap(), None);
    }

    #[test]
    fn create_under_missing_parent_fails() {
        let mut d = drive();
        let err = d
            .create_file("foo.txt", CreateFile::default().parent("nonexistent"))
            .unwrap_err();
        assert_eq!(err, StoreError::ParentNotFound { id: "nonexistent".into() });
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn create_under_file_fails() {
        let mut d = drive();
        let file = d.create_file("a", CreateFile::default()).unwrap();
        let err = d
            .create_folder("bar", CreateFolder::default().parent(file.id.clone()))
            .unwrap_err();
        assert_eq!(err, StoreError::ParentNotFolder { id: file.id.clone() });
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let mut d = drive();
        let a = d.create_file("same", CreateFile::default()).unwrap();
        let b = d.create_file("same", CreateFile::default()).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(d.root().unwrap().children().len(), 2);
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn rename_file_bumps_modified_at() {
        let mut d = drive();
        let file = d.create_file("a", CreateFile::default()).unwrap();
        let root_before = d.root().unwrap().modified_at;
        let updated = d.update_file(&file.id, UpdateFile::default().name("b")).unwrap();
        assert_eq!(updated.name, "b");
        assert!(updated.modified_at > file.modified_at);
        assert_eq!(updated.created_at, file.created_at);
        // A rename does not touch the parent.
        assert_eq!(d.root().unwrap().modified_at, root_before);
    }

    #[test]
    fn content_update_touches_parent() {
        let mut d = drive();
        let file = d.create_file("a", CreateFile::default().content("one")).unwrap();
        let updated = d
            .update_file(&file.id, UpdateFile::default().content("three"))
            .unwrap();
        assert_eq!(updated.size, Some(5));
        assert_eq!(d.root().unwrap().modified_at, updated.modified_at);
        assert_eq!(d.get_file_content(&file.id).unwrap(), Some(Content::from("three")));
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut d = drive();
        let file = d.create_file("a", CreateFile::default()).unwrap();
        let same = d.update_file(&file.id, UpdateFile::default()).unwrap();
        assert_eq!(same, file);
        let folder = d.create_folder("f", CreateFolder::default()).unwrap();
        let same = d.update_folder(&folder.id, UpdateFolder::default()).unwrap();
        assert_eq!(same, folder);
    }

    #[test]
    fn move_file_between_folders() {
        let mut d = drive();
        let src = d.create_folder("src", CreateFolder::default()).unwrap();
        let dst = d.create_folder("dst", CreateFolder::default()).unwrap();
        let file = d
            .create_file("a", CreateFile::default().parent(src.id.clone()))
            .unwrap();

        let moved = d
            .update_file(&file.id, UpdateFile::default().parent(dst.id.clone()))
            .unwrap();
        assert_eq!(moved.parent_id, Some(dst.id.clone()));

        let src_now = d.get_folder(&src.id).unwrap();
        let dst_now = d.get_folder(&dst.id).unwrap();
        assert!(src_now.children().is_empty());
        assert_eq!(dst_now.children().len(), 1);
        assert_eq!(src_now.modified_at, moved.modified_at);
        assert_eq!(dst_now.modified_at, moved.modified_at);
    }

    #[test]
    fn move_to_current_parent_reorders_to_end() {
        let mut d = drive();
        let a = d.create_file("a", CreateFile::default()).unwrap();
        d.create_file("b", CreateFile::default()).unwrap();
        let root_id = d.root_id().clone();
        d.update_file(&a.id, UpdateFile::default().parent(root_id)).unwrap();
        let names: Vec<_> = d.root().unwrap().children().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn failed_move_changes_nothing() {
        let mut d = drive();
        let file = d.create_file("a", CreateFile::default()).unwrap();
        let err = d
            .update_file(&file.id, UpdateFile::default().name("b").parent("nowhere"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(d.get_file(&file.id).unwrap(), file);
    }

    #[test]
    fn update_file_on_folder_fails() {
        let mut d = drive();
        let folder = d.create_folder("f", CreateFolder::default()).unwrap();
        let err = d
            .update_file(&folder.id, UpdateFile::default().name("x"))
            .unwrap_err();
        assert!(err.is_wrong_kind());
    }

    #[test]
    fn move_folder_with_subtree() {
        let mut d = drive();
        let a = d.create_folder("a", CreateFolder::default()).unwrap();
        let b = d.create_folder("b", CreateFolder::default()).unwrap();
        let inner = d
            .create_file("inner", CreateFile::default().parent(a.id.clone()))
            .unwrap();
        let moved = d
            .update_folder(&a.id, UpdateFolder::default().parent(b.id.clone()).name("a2"))
            .unwrap();
        assert_eq!(moved.name, "a2");
        assert_eq!(moved.parent_id, Some(b.id.clone()));
        assert_eq!(moved.children().len(), 1);
        assert_eq!(d.get_file(&inner.id).unwrap().parent_id, Some(a.id.clone()));
    }

    #[test]
    fn folder_cannot_move_into_itself_or_descendant() {
        let mut d = drive();
        let a = d.create_folder("a", CreateFolder::default()).unwrap();
        let b = d
            .create_folder("b", CreateFolder::default().parent(a.id.clone()))
            .unwrap();
        let err = d
            .update_folder(&a.id, UpdateFolder::default().parent(b.id.clone()))
            .unwrap_err();
        assert!(matches!(err, StoreError::WouldCreateCycle { .. }));
        let err = d
            .update_folder(&a.id, UpdateFolder::default().parent(a.id.clone()))
            .unwrap_err();
        assert!(matches!(err, StoreError::WouldCreateCycle { .. }));
        assert_eq!(d.get_folder(&a.id).unwrap().parent_id.as_ref(), Some(d.root_id()));
    }

    #[test]
    fn root_cannot_move_but_can_be_renamed() {
        let mut d = drive();
        let f = d.create_folder("f", CreateFolder::default()).unwrap();
        let root_id = d.root_id().clone();
        let err = d
            .update_folder(&root_id, UpdateFolder::default().parent(f.id.clone()))
            .unwrap_err();
        assert_eq!(err, StoreError::RootFolder { op: "move" });
        let renamed = d.update_folder(&root_id, UpdateFolder::default().name("My Drive")).unwrap();
        assert_eq!(renamed.name, "My Drive");
        assert!(renamed.parent_id.is_none());
    }

    // -----------------------------------------------------------------------
    // Copy
    // -----------------------------------------------------------------------

    #[test]
    fn copy_file_to_other_folder_with_new_name() {
        let mut d = drive();
        let other = d.create_folder("other", CreateFolder::default()).unwrap();
        let file = d.create_file("foo.txt", CreateFile::default().content("abc")).unwrap();
        let copy = d
            .copy_file(&file.id, CopyOptions::default().parent(other.id.clone()).name("baz.txt"))
            .unwrap();
        assert_ne!(copy.id, file.id);
        assert_eq!(copy.name, "baz.txt");
        assert_eq!(copy.size, file.size);
        assert_eq!(copy.kind, EntryKind::File);
        assert_eq!(copy.parent_id, Some(other.id.clone()));
        assert!(copy.created_at > file.created_at);
        assert_eq!(copy.created_at, copy.modified_at);
        assert_eq!(d.get_file(&file.id).unwrap(), file);
    }

    #[test]
    fn copy_file_defaults_to_same_parent_and_name() {
        let mut d = drive();
        let file = d.create_file("a", CreateFile::default().content("x")).unwrap();
        let copy = d.copy_file(&file.id, CopyOptions::default()).unwrap();
        assert_eq!(copy.name, "a");
        assert_eq!(copy.parent_id, file.parent_id);
        assert_eq!(d.get_file_content(&copy.id).unwrap(), Some(Content::from("x")));
    }

    #[test]
    fn copy_folder_deep() {
        let mut d = drive();
        let top = d.create_folder("top", CreateFolder::default()).unwrap();
        let sub = d
            .create_folder("sub", CreateFolder::default().parent(top.id.clone()))
            .unwrap();
        d.create_file("one", CreateFile::default().parent(top.id.clone()).content("1"))
            .unwrap();
        d.create_file("two", CreateFile::default().parent(sub.id.clone()).content("22"))
            .unwrap();

        let copy = d.copy_folder(&top.id, CopyOptions::default().name("top copy")).unwrap();
        assert_eq!(copy.name, "top copy");
        assert_ne!(copy.id, top.id);
        let names: Vec<_> = copy.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["sub", "one"]);

        let sub_copy = copy.child_named("sub").unwrap();
        assert_ne!(sub_copy.id, sub.id);
        let sub_view = d.get_folder(&sub_copy.id).unwrap();
        assert_eq!(sub_view.children().len(), 1);
        assert_eq!(sub_view.children()[0].name, "two");
        assert_eq!(sub_view.children()[0].size, Some(2));
        assert_eq!(d.len(), 1 + 4 + 4);

        // Every copied entry is stamped with the copy's creation time.
        assert!(copy.created_at > top.created_at);
        assert_eq!(copy.modified_at, copy.created_at);
        let one_copy = copy.child_named("one").unwrap();
        for entry in [one_copy, sub_copy, &sub_view.children()[0]] {
            assert_eq!(entry.created_at, copy.created_at, "{}", entry.name);
            assert_eq!(entry.modified_at, copy.created_at, "{}", entry.name);
        }
        assert!(sub_copy.created_at > sub.created_at);
    }

    #[test]
    fn copy_folder_into_itself_does_not_recurse() {
        let mut d = drive();
        let top = d.create_folder("top", CreateFolder::default()).unwrap();
        d.create_file("f", CreateFile::default().parent(top.id.clone())).unwrap();
        let copy = d
            .copy_folder(&top.id, CopyOptions::default().parent(top.id.clone()))
            .unwrap();
        assert_eq!(copy.parent_id, Some(top.id.clone()));
        assert_eq!(copy.children().len(), 1);
        assert_eq!(d.get_folder(&top.id).unwrap().children().len(), 2);
    }

    #[test]
    fn copy_root_needs_target() {
        let mut d = drive();
        let root_id = d.root_id().clone();
        let err = d.copy_folder(&root_id, CopyOptions::default()).unwrap_err();
        assert_eq!(err, StoreError::RootFolder { op: "copy" });
        let f = d.create_folder("f", CreateFolder::default()).unwrap();
        let copy = d
            .copy_folder(&root_id, CopyOptions::default().parent(f.id.clone()))
            .unwrap();
        assert_eq!(copy.children().len(), 1);
    }

    #[test]
    fn copy_checks_kinds() {
        let mut d = drive();
        let folder = d.create_folder("f", CreateFolder::default()).unwrap();
        let file = d.create_file("a", CreateFile::default()).unwrap();
        assert!(d.copy_file(&folder.id, CopyOptions::default()).unwrap_err().is_wrong_kind());
        assert!(d.copy_folder(&file.id, CopyOptions::default()).unwrap_err().is_wrong_kind());
        assert!(d
            .copy_file(&file.id, CopyOptions::default().parent(file.id.clone()))
            .unwrap_err()
            .is_wrong_kind());
        assert_eq!(d.len(), 3);
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_file_touches_parent() {
        let mut d = drive();
        let file = d.create_file("a", CreateFile::default()).unwrap();
        d.delete_file(&file.id).unwrap();
        assert!(d.get_file(&file.id).unwrap_err().is_not_found());
        let root = d.root().unwrap();
        assert!(root.children().is_empty());
        assert!(root.modified_at > file.modified_at);
    }

    #[test]
    fn delete_folder_removes_descendants() {
        let mut d = drive();
        let folder = d.create_folder("foo", CreateFolder::default()).unwrap();
        let sub = d
            .create_folder("sub", CreateFolder::default().parent(folder.id.clone()))
            .unwrap();
        let bar = d
            .create_file("bar.txt", CreateFile::default().parent(sub.id.clone()))
            .unwrap();
        d.delete_folder(&folder.id).unwrap();
        assert!(d.get_file(&bar.id).unwrap_err().is_not_found());
        assert!(d.get_folder(&sub.id).unwrap_err().is_not_found());
        assert!(d.get_folder(&folder.id).unwrap_err().is_not_found());
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let mut d = drive();
        let a = d.create_file("a", CreateFile::default()).unwrap();
        d.delete_file(&a.id).unwrap();
        let b = d.create_file("b", CreateFile::default()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn delete_checks_kind_and_root() {
        let mut d = drive();
        let folder = d.create_folder("f", CreateFolder::default()).unwrap();
        let file = d.create_file("a", CreateFile::default()).unwrap();
        assert!(d.delete_file(&folder.id).unwrap_err().is_wrong_kind());
        assert!(d.delete_folder(&file.id).unwrap_err().is_wrong_kind());
        assert!(d.delete_file(&"nope".into()).unwrap_err().is_not_found());
        let root_id = d.root_id().clone();
        assert_eq!(
            d.delete_folder(&root_id).unwrap_err(),
            StoreError::RootFolder { op: "delete" }
        );
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn debug_format() {
        let d = drive();
        let debug = format!("{d:?}");
        assert!(debug.contains("InMemoryDrive"));
        assert!(debug.contains("entry_count"));
    }
}
