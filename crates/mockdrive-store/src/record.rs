use mockdrive_types::{EntryId, EntryKind, Timestamp};
use serde::{Deserialize, Serialize};

/// Detached, externally visible snapshot of an entry.
///
/// Shapes when serialized:
///
/// - file: `{ id, name, type: "file", parent_id, created_at, modified_at, size }`
/// - folder: `{ id, name, type: "folder", parent_id, created_at, modified_at, entries }`
///
/// `entries` is present only on the top-level record of a folder view. The
/// children inside it are mini-records and never carry their own `entries`,
/// which bounds every listing to one level. `parent_id` is `null` for the root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: EntryId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub parent_id: Option<EntryId>,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<EntryRecord>>,
}

impl EntryRecord {
    /// `true` for file records.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// `true` for folder records.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Child mini-records of a folder view; empty for files and mini-records.
    pub fn children(&self) -> &[EntryRecord] {
        self.entries.as_deref().unwrap_or_default()
    }

    /// Find a direct child by name. Returns the first match; names need not
    /// be unique.
    pub fn child_named(&self, name: &str) -> Option<&EntryRecord> {
        self.children().iter().find(|child| child.name == name)
    }
}
