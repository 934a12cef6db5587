use serde::{Deserialize, Serialize};

use super::{Timestamp, UserRef};

/// A change to a file's version history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionEvent {
    pub id: String,
    pub version_number: u32,
    pub created_at: Timestamp,
    pub modified_by: UserRef,
    #[serde(default)]
    pub action: VersionAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trashed_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VersionAction {
    #[default]
    Upload,
    Delete,
    Restore,
}

impl VersionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Delete => "delete",
            Self::Restore => "restore",
        }
    }
}
