use mockdrive_types::{Content, EntryId};

use crate::error::StoreResult;
use crate::record::EntryRecord;

/// Options for [`DriveBackend::create_file`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateFile {
    /// Parent folder; the root when `None`.
    pub parent_id: Option<EntryId>,
    pub content: Option<Content>,
}

impl CreateFile {
    /// Set the parent folder.
    pub fn parent(mut self, parent_id: impl Into<EntryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the file payload.
    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Options for [`DriveBackend::create_folder`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateFolder {
    /// Parent folder; the root when `None`.
    pub parent_id: Option<EntryId>,
}

impl CreateFolder {
    /// Set the parent folder.
    pub fn parent(mut self, parent_id: impl Into<EntryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// Changes for [`DriveBackend::update_file`]. Unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateFile {
    pub name: Option<String>,
    pub content: Option<Content>,
    /// Move the file under this folder.
    pub parent_id: Option<EntryId>,
}

impl UpdateFile {
    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the file payload.
    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the parent folder.
    pub fn parent(mut self, parent_id: impl Into<EntryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// `true` when no change is requested.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.parent_id.is_none()
    }
}

/// Changes for [`DriveBackend::update_folder`]. Unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateFolder {
    pub name: Option<String>,
    /// Move the folder (with its subtree) under this folder.
    pub parent_id: Option<EntryId>,
}

impl UpdateFolder {
    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the parent folder.
    pub fn parent(mut self, parent_id: impl Into<EntryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// `true` when no change is requested.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none()
    }
}

/// Options for [`DriveBackend::copy_file`] and [`DriveBackend::copy_folder`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Target folder; the source's current parent when `None`.
    pub parent_id: Option<EntryId>,
    /// Name of the copy; the source's name when `None`.
    pub name: Option<String>,
}

impl CopyOptions {
    /// Set the parent folder.
    pub fn parent(mut self, parent_id: impl Into<EntryId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A cloud-drive style file and folder backend.
///
/// All implementations must satisfy these invariants:
/// - Ids are unique and never reused for the lifetime of the backend.
/// - Every entry except the root has exactly one parent, which is a folder.
/// - `created_at <= modified_at` for every entry.
/// - A failed operation leaves the backend unchanged.
/// - Returned records are detached snapshots; mutating them does nothing.
pub trait DriveBackend {
    /// Create a file, under the root unless a parent is given.
    fn create_file(&mut self, name: &str, options: CreateFile) -> StoreResult<EntryRecord>;

    /// Create an empty folder, under the root unless a parent is given.
    /// Returns the full folder view.
    fn create_folder(&mut self, name: &str, options: CreateFolder) -> StoreResult<EntryRecord>;

    /// Record of an existing file.
    fn get_file(&self, id: &EntryId) -> StoreResult<EntryRecord>;

    /// Full view of an existing folder, children listed one level deep.
    fn get_folder(&self, id: &EntryId) -> StoreResult<EntryRecord>;

    /// Raw payload of an existing file, `None` when it has no content.
    fn get_file_content(&self, id: &EntryId) -> StoreResult<Option<Content>>;

    /// Rename, rewrite and/or move a file.
    ///
    /// Each applied change sets the file's `modified_at`. New content also
    /// touches the file's parent. A move touches the old and the new parent.
    fn update_file(&mut self, id: &EntryId, changes: UpdateFile) -> StoreResult<EntryRecord>;

    /// Rename and/or move a folder with its subtree. Returns the full view.
    fn update_folder(&mut self, id: &EntryId, changes: UpdateFolder) -> StoreResult<EntryRecord>;

    /// Copy a file under a new id with fresh timestamps.
    fn copy_file(&mut self, id: &EntryId, options: CopyOptions) -> StoreResult<EntryRecord>;

    /// Deep-copy a folder: every entry in the subtree gets a new id and fresh
    /// timestamps; structure and child order are preserved.
    fn copy_folder(&mut self, id: &EntryId, options: CopyOptions) -> StoreResult<EntryRecord>;

    /// Delete a file.
    fn delete_file(&mut self, id: &EntryId) -> StoreResult<()>;

    /// Delete a folder and, first, everything beneath it.
    fn delete_folder(&mut self, id: &EntryId) -> StoreResult<()>;
}
