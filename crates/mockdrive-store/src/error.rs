use mockdrive_types::{EntryId, EntryKind};

/// Errors from drive operations.
///
/// Every operation validates before it mutates, so an error always means the
/// store is unchanged.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// The requested entry does not exist.
    #[error("entry not found: {id}")]
    NotFound { id: EntryId },

    /// The referenced parent does not exist.
    #[error("parent not found: {id}")]
    ParentNotFound { id: EntryId },

    /// The entry exists but is of the other kind.
    #[error("entry {id} is a {found}, expected a {expected}")]
    WrongKind {
        id: EntryId,
        expected: EntryKind,
        found: EntryKind,
    },

    /// The referenced parent resolves to a file.
    #[error("parent is not a folder: {id}")]
    ParentNotFolder { id: EntryId },

    /// Moving a folder under itself or one of its descendants.
    #[error("cannot move folder {id} into its own subtree ({parent_id})")]
    WouldCreateCycle { id: EntryId, parent_id: EntryId },

    /// An entry with this id is already in the tree.
    #[error("entry already registered: {id}")]
    AlreadyRegistered { id: EntryId },

    /// The root folder cannot be moved or deleted.
    #[error("cannot {op} the root folder")]
    RootFolder { op: &'static str },

    /// Configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),
}

impl StoreError {
    /// `true` for failures where an id (or parent id) is unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::ParentNotFound { .. })
    }

    /// `true` for failures where an id resolves to the wrong variant.
    pub fn is_wrong_kind(&self) -> bool {
        matches!(self, Self::WrongKind { .. } | Self::ParentNotFolder { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let nf = StoreError::NotFound { id: "1".into() };
        let pnf = StoreError::ParentNotFound { id: "2".into() };
        let wk = StoreError::WrongKind {
            id: "3".into(),
            expected: EntryKind::File,
            found: EntryKind::Folder,
        };
        let pnd = StoreError::ParentNotFolder { id: "4".into() };
        assert!(nf.is_not_found() && pnf.is_not_found());
        assert!(wk.is_wrong_kind() && pnd.is_wrong_kind());
        assert!(!nf.is_wrong_kind());
        assert!(!wk.is_not_found());
        assert!(!StoreError::RootFolder { op: "delete" }.is_not_found());
    }

    #[test]
    fn messages_name_the_id() {
        let wk = StoreError::WrongKind {
            id: "9".into(),
            expected: EntryKind::File,
            found: EntryKind::Folder,
        };
        assert_eq!(wk.to_string(), "entry 9 is a folder, expected a file");
        assert_eq!(
            StoreError::ParentNotFolder { id: "7".into() }.to_string(),
            "parent is not a folder: 7"
        );
        assert_eq!(
            StoreError::ParentNotFound { id: "nonexistent".into() }.to_string(),
            "parent not found: nonexistent"
        );
    }
}
