use mockdrive_types::{Content, EntryId, EntryKind, Timestamp};

use crate::error::{StoreError, StoreResult};
use crate::record::EntryRecord;

/// Kind-specific data carried by an [`Entry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryPayload {
    /// A file with an optional payload. Size is derived from the payload.
    File { content: Option<Content> },
    /// A folder with its children in insertion order.
    Folder { children: Vec<EntryId> },
}

/// A file or folder owned by the store.
///
/// Common fields live on the struct; the variant-specific part is the
/// [`EntryPayload`]. `id`, `created_at` and the kind are fixed at
/// construction. `modified_at` starts equal to `created_at` and only moves
/// through the mutators below, each of which states whose timestamp it sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    name: String,
    created_at: Timestamp,
    modified_at: Timestamp,
    payload: EntryPayload,
}

impl Entry {
    /// New file created at `at`.
    pub fn file(id: EntryId, name: impl Into<String>, content: Option<Content>, at: Timestamp) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: at,
            modified_at: at,
            payload: EntryPayload::File { content },
        }
    }

    /// New, empty folder created at `at`.
    pub fn folder(id: EntryId, name: impl Into<String>, at: Timestamp) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: at,
            modified_at: at,
            payload: EntryPayload::Folder {
                children: Vec::new(),
            },
        }
    }

    /// Identifier fixed at construction.
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Current name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File or folder, from the payload variant.
    pub fn kind(&self) -> EntryKind {
        match self.payload {
            EntryPayload::File { .. } => EntryKind::File,
            EntryPayload::Folder { .. } => EntryKind::Folder,
        }
    }

    /// When the entry was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// When the entry last changed.
    pub fn modified_at(&self) -> Timestamp {
        self.modified_at
    }

    /// Kind-specific data.
    pub fn payload(&self) -> &EntryPayload {
        &self.payload
    }

    /// The file payload. Always `None` for folders.
    pub fn content(&self) -> Option<&Content> {
        match &self.payload {
            EntryPayload::File { content } => content.as_ref(),
            EntryPayload::Folder { .. } => None,
        }
    }

    /// Derived byte size: `Some` for files (0 without content), `None` for folders.
    pub fn size(&self) -> Option<u64> {
        match &self.payload {
            EntryPayload::File { content } => Some(content.as_ref().map_or(0, Content::byte_len)),
            EntryPayload::Folder { .. } => None,
        }
    }

    /// Child ids in insertion order. Empty for files.
    pub fn children(&self) -> &[EntryId] {
        match &self.payload {
            EntryPayload::Folder { children } => children.as_slice(),
            EntryPayload::File { .. } => &[],
        }
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Rename the entry.
    ///
    /// Postcondition: `name` is replaced and this entry's `modified_at == at`.
    /// No other entry is touched.
    pub(crate) fn rename(&mut self, name: impl Into<String>, at: Timestamp) -> &mut Self {
        self.name = name.into();
        self.touch(at)
    }

    /// Replace a file's payload.
    ///
    /// Postcondition: content is replaced and this file's `modified_at == at`.
    /// Touching the parent folder is the caller's job. Fails with
    /// [`StoreError::WrongKind`] on folders and leaves them unchanged.
    pub(crate) fn set_content(&mut self, content: Content, at: Timestamp) -> StoreResult<&mut Self> {
        match &mut self.payload {
            EntryPayload::File { content: slot } => {
                *slot = Some(content);
            }
            EntryPayload::Folder { .. } => {
                return Err(StoreError::WrongKind {
                    id: self.id.clone(),
                    expected: EntryKind::File,
                    found: EntryKind::Folder,
                });
            }
        }
        Ok(self.touch(at))
    }

    /// Set `modified_at` to `at`.
    pub(crate) fn touch(&mut self, at: Timestamp) -> &mut Self {
        self.modified_at = at;
        self
    }

    /// Append a child id. Returns `false` (and does nothing) on files.
    pub(crate) fn push_child(&mut self, child: EntryId) -> bool {
        match &mut self.payload {
            EntryPayload::Folder { children } => {
                children.push(child);
                true
            }
            EntryPayload::File { .. } => false,
        }
    }

    /// Remove a child id. Returns `true` if it was present.
    pub(crate) fn remove_child(&mut self, child: &EntryId) -> bool {
        match &mut self.payload {
            EntryPayload::Folder { children } => match children.iter().position(|c| c == child) {
                Some(pos) => {
                    children.remove(pos);
                    true
                }
                None => false,
            },
            EntryPayload::File { .. } => false,
        }
    }

    // -----------------------------------------------------------------------
    // Projection
    // -----------------------------------------------------------------------

    /// Project into a record without a child listing.
    ///
    /// Files carry `size`; folders carry no `entries` field. The full folder
    /// view is assembled by the registry, which can resolve child ids.
    pub fn to_record(&self, parent_id: Option<&EntryId>) -> EntryRecord {
        EntryRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind(),
            parent_id: parent_id.cloned(),
            created_at: self.created_at,
            modified_at: self.modified_at,
            size: self.size(),
            entries: None,
        }
    }
}
