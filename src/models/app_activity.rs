use serde::{Deserialize, Serialize};

use super::{Timestamp, UserRef};

/// An event an integrated app recorded against a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppActivityItem {
    pub id: String,
    pub created_at: Timestamp,
    /// Server-rendered HTML describing the event.
    #[serde(default)]
    pub rendered_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<AppRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_template: Option<ActivityTemplate>,
}

/// App activity entry as the API sends it, stamped with `occurred_at`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAppActivity {
    pub id: String,
    pub occurred_at: Timestamp,
    #[serde(default)]
    pub rendered_text: String,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub app: Option<AppRef>,
    #[serde(default)]
    pub activity_template: Option<ActivityTemplate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Map an API entry onto the feed's shape: `occurred_at` becomes `created_at`.
pub fn map_app_activity_item(raw: RawAppActivity) -> AppActivityItem {
    let RawAppActivity {
        id,
        occurred_at,
        rendered_text,
        created_by,
        app,
        activity_template,
    } = raw;
    AppActivityItem {
        id,
        created_at: occurred_at,
        rendered_text,
        created_by,
        app,
        activity_template,
    }
}

impl From<RawAppActivity> for AppActivityItem {
    fn from(raw: RawAppActivity) -> Self {
        map_app_activity_item(raw)
    }
}
