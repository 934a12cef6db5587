use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Timestamp, UserRef};

/// A comment on a file.
///
/// Comments created locally start as placeholders (`is_pending`) with a
/// client-generated id. The backend's response replaces them; the client never
/// assigns ids to confirmed comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub message: String,
    /// Message with `@[id:name]` mention markup, when it has mentions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_message: Option<String>,
    pub created_at: Timestamp,
    pub created_by: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<Timestamp>,
    #[serde(default)]
    pub is_reply_comment: bool,
    #[serde(default)]
    pub permissions: CommentPermissions,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_pending: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPermissions {
    #[serde(default)]
    pub can_delete: bool,
    #[serde(default)]
    pub can_edit: bool,
}

impl Comment {
    /// Local stand-in for a comment whose create request is in flight.
    pub fn placeholder(author: UserRef, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            tagged_message: None,
            created_at: Timestamp::now(),
            created_by: author,
            modified_at: None,
            is_reply_comment: false,
            permissions: CommentPermissions::default(),
            is_pending: true,
        }
    }
}
