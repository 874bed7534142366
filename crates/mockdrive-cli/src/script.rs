//! TOML scripts of drive operations.
//!
//! A script is a list of `[[step]]` tables, each naming an operation in
//! `op`. Entries can be labelled with `as = "..."` and referred to by that
//! label afterwards; the label `root` always names the root folder. Anything
//! that is not a known label is used as a raw entry id. File `content` is
//! either a string or an array of byte values.

use std::collections::HashMap;

use anyhow::Context;
use mockdrive_store::{
    Content, CopyOptions, CreateFile, CreateFolder, DriveBackend, EntryId, EntryRecord,
    InMemoryDrive, UpdateFile, UpdateFolder,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from TOML text.
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("failed to parse script")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateFile {
        name: String,
        parent: Option<String>,
        content: Option<Content>,
        #[serde(rename = "as")]
        label: Option<String>,
    },
    CreateFolder {
        name: String,
        parent: Option<String>,
        #[serde(rename = "as")]
        label: Option<String>,
    },
    GetFile {
        target: String,
    },
    GetFolder {
        target: String,
    },
    GetFileContent {
        target: String,
    },
    UpdateFile {
        target: String,
        name: Option<String>,
        content: Option<Content>,
        parent: Option<String>,
    },
    UpdateFolder {
        target: String,
        name: Option<String>,
        parent: Option<String>,
    },
    CopyFile {
        target: String,
        parent: Option<String>,
        name: Option<String>,
        #[serde(rename = "as")]
        label: Option<String>,
    },
    CopyFolder {
        target: String,
        parent: Option<String>,
        name: Option<String>,
        #[serde(rename = "as")]
        label: Option<String>,
    },
    DeleteFile {
        target: String,
    },
    DeleteFolder {
        target: String,
    },
}

impl Step {
    /// The `op` name as written in scripts.
    pub fn op(&self) -> &'static str {
        match self {
            Self::CreateFile { .. } => "create_file",
            Self::CreateFolder { .. } => "create_folder",
            Self::GetFile { .. } => "get_file",
            Self::GetFolder { .. } => "get_folder",
            Self::GetFileContent { .. } => "get_file_content",
            Self::UpdateFile { .. } => "update_file",
            Self::UpdateFolder { .. } => "update_folder",
            Self::CopyFile { .. } => "copy_file",
            Self::CopyFolder { .. } => "copy_folder",
            Self::DeleteFile { .. } => "delete_file",
            Self::DeleteFolder { .. } => "delete_folder",
        }
    }
}

/// What a step produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Record(EntryRecord),
    Content {
        id: EntryId,
        content: Option<Content>,
    },
    Deleted {
        id: EntryId,
    },
}

/// Executes steps against one drive, tracking labels.
pub struct ScriptRunner {
    drive: InMemoryDrive,
    labels: HashMap<String, EntryId>,
}

impl ScriptRunner {
    /// Runner over `drive`, with `root` pre-labelled.
    pub fn new(drive: InMemoryDrive) -> Self {
        let mut labels = HashMap::new();
        labels.insert("root".to_string(), drive.root_id().clone());
        Self { drive, labels }
    }

    /// The drive the steps run against.
    pub fn drive(&self) -> &InMemoryDrive {
        &self.drive
    }

    fn resolve(&self, reference: &str) -> EntryId {
        self.labels
            .get(reference)
            .cloned()
            .unwrap_or_else(|| EntryId::from(reference))
    }

    fn resolve_opt(&self, reference: Option<&str>) -> Option<EntryId> {
        reference.map(|r| self.resolve(r))
    }

    fn remember(&mut self, label: Option<String>, record: &EntryRecord) {
        if let Some(label) = label {
            self.labels.insert(label, record.id.clone());
        }
    }

    /// Execute one step, recording any label it assigns.
    pub fn run_step(&mut self, step: Step) -> anyhow::Result<StepOutcome> {
        let outcome = match step {
            Step::CreateFile {
                name,
                parent,
                content,
                label,
            } => {
                let options = CreateFile {
                    parent_id: self.resolve_opt(parent.as_deref()),
                    content,
                };
                let record = self.drive.create_file(&name, options)?;
                self.remember(label, &record);
                StepOutcome::Record(record)
            }
            Step::CreateFolder {
                name,
                parent,
                label,
            } => {
                let options = CreateFolder {
                    parent_id: self.resolve_opt(parent.as_deref()),
                };
                let record = self.drive.create_folder(&name, options)?;
                self.remember(label, &record);
                StepOutcome::Record(record)
            }
            Step::GetFile { target } => {
                StepOutcome::Record(self.drive.get_file(&self.resolve(&target))?)
            }
            Step::GetFolder { target } => {
                StepOutcome::Record(self.drive.get_folder(&self.resolve(&target))?)
            }
            Step::GetFileContent { target } => {
                let id = self.resolve(&target);
                let content = self.drive.get_file_content(&id)?;
                StepOutcome::Content { id, content }
            }
            Step::UpdateFile {
                target,
                name,
                content,
                parent,
            } => {
                let changes = UpdateFile {
                    name,
                    content,
                    parent_id: self.resolve_opt(parent.as_deref()),
                };
                let id = self.resolve(&target);
                StepOutcome::Record(self.drive.update_file(&id, changes)?)
            }
            Step::UpdateFolder {
                target,
                name,
                parent,
            } => {
                let changes = UpdateFolder {
                    name,
                    parent_id: self.resolve_opt(parent.as_deref()),
                };
                let id = self.resolve(&target);
                StepOutcome::Record(self.drive.update_folder(&id, changes)?)
            }
            Step::CopyFile {
                target,
                parent,
                name,
                label,
            } => {
                let options = CopyOptions {
                    parent_id: self.resolve_opt(parent.as_deref()),
                    name,
                };
                let id = self.resolve(&target);
                let record = self.drive.copy_file(&id, options)?;
                self.remember(label, &record);
                StepOutcome::Record(record)
            }
            Step::CopyFolder {
                target,
                parent,
                name,
                label,
            } => {
                let options = CopyOptions {
                    parent_id: self.resolve_opt(parent.as_deref()),
                    name,
                };
                let id = self.resolve(&target);
                let record = self.drive.copy_folder(&id, options)?;
                self.remember(label, &record);
                StepOutcome::Record(record)
            }
            Step::DeleteFile { target } => {
                let id = self.resolve(&target);
                self.drive.delete_file(&id)?;
                StepOutcome::Deleted { id }
            }
            Step::DeleteFolder { target } => {
                let id = self.resolve(&target);
                self.drive.delete_folder(&id)?;
                StepOutcome::Deleted { id }
            }
        };
        Ok(outcome)
    }
}
