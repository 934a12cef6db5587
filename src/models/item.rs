use serde::{Deserialize, Serialize};

use super::{AppActivityItem, Comment, Task, Timestamp, UserRef, VersionEvent};

/// Anything that can appear in the activity feed.
///
/// Tagged with the API's `type` field, so a mixed listing deserializes
/// straight into feed items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedItem {
    Comment(Comment),
    Task(Task),
    #[serde(rename = "file_version")]
    Version(VersionEvent),
    AppActivity(AppActivityItem),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Comment,
    Task,
    Version,
    AppActivity,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Task => "task",
            Self::Version => "file_version",
            Self::AppActivity => "app_activity",
        }
    }
}

impl FeedItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Comment(c) => &c.id,
            Self::Task(t) => &t.id,
            Self::Version(v) => &v.id,
            Self::AppActivity(a) => &a.id,
        }
    }

    pub fn created_at(&self) -> Timestamp {
        match self {
            Self::Comment(c) => c.created_at,
            Self::Task(t) => t.created_at,
            Self::Version(v) => v.created_at,
            Self::AppActivity(a) => a.created_at,
        }
    }

    /// Who caused the item. App activity may have no user attached.
    pub fn author(&self) -> Option<&UserRef> {
        match self {
            Self::Comment(c) => Some(&c.created_by),
            Self::Task(t) => Some(&t.created_by),
            Self::Version(v) => Some(&v.modified_by),
            Self::AppActivity(a) => a.created_by.as_ref(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Comment(_) => ItemKind::Comment,
            Self::Task(_) => ItemKind::Task,
            Self::Version(_) => ItemKind::Version,
            Self::AppActivity(_) => ItemKind::AppActivity,
        }
    }

    /// True for local placeholders of in-flight creates.
    pub fn is_pending(&self) -> bool {
        match self {
            Self::Comment(c) => c.is_pending,
            Self::Task(t) => t.is_pending,
            Self::Version(_) | Self::AppActivity(_) => false,
        }
    }
}

impl From<Comment> for FeedItem {
    fn from(c: Comment) -> Self {
        Self::Comment(c)
    }
}

impl From<Task> for FeedItem {
    fn from(t: Task) -> Self {
        Self::Task(t)
    }
}

impl From<VersionEvent> for FeedItem {
    fn from(v: VersionEvent) -> Self {
        Self::Version(v)
    }
}

impl From<AppActivityItem> for FeedItem {
    fn from(a: AppActivityItem) -> Self {
        Self::AppActivity(a)
    }
}
