use crate::models::{FeedItem, Timestamp, UserRef, VersionAction, VersionEvent};

/// One display unit of the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEntry {
    Item(FeedItem),
    Versions(VersionGroup),
}

/// Consecutive version uploads shown as a single entry.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionGroup {
    /// Grouped versions in feed order (newest first).
    pub versions: Vec<VersionEvent>,
    /// Everyone who uploaded one of the versions, first-seen order, no repeats.
    pub collaborators: Vec<UserRef>,
    pub version_start: u32,
    pub version_end: u32,
}

impl VersionGroup {
    fn new(first: VersionEvent, second: VersionEvent) -> Self {
        let mut group = Self {
            version_start: first.version_number,
            version_end: first.version_number,
            collaborators: vec![first.modified_by.clone()],
            versions: vec![first],
        };
        group.push(second);
        group
    }

    fn push(&mut self, version: VersionEvent) {
        if !self.collaborators.iter().any(|u| u.id == version.modified_by.id) {
            self.collaborators.push(version.modified_by.clone());
        }
        self.version_start = self.version_start.min(version.version_number);
        self.version_end = self.version_end.max(version.version_number);
        self.versions.push(version);
    }

    /// Time of the newest version in the group.
    pub fn created_at(&self) -> Option<Timestamp> {
        self.versions.iter().map(|v| v.created_at).max()
    }
}

impl FeedEntry {
    pub fn created_at(&self) -> Option<Timestamp> {
        match self {
            Self::Item(item) => Some(item.created_at()),
            Self::Versions(group) => group.created_at(),
        }
    }

    /// Fold an upload into this entry if it continues a run of uploads.
    fn absorb(&mut self, version: &VersionEvent) -> bool {
        if version.action != VersionAction::Upload {
            return false;
        }
        match self {
            Self::Versions(group) => {
                group.push(version.clone());
                true
            }
            Self::Item(FeedItem::Version(prev)) if prev.action == VersionAction::Upload => {
                let group = VersionGroup::new(prev.clone(), version.clone());
                *self = Self::Versions(group);
                true
            }
            _ => false,
        }
    }
}

/// Collapse an already sorted feed into display entries.
///
/// Sorting must happen first: grouping only looks at neighbours.
pub fn collapse_feed(items: &[FeedItem]) -> Vec<FeedEntry> {
    let mut entries: Vec<FeedEntry> = Vec::with_capacity(items.len());
    for item in items {
        if let FeedItem::Version(version) = item {
            if let Some(last) = entries.last_mut() {
                if last.absorb(version) {
                    continue;
                }
            }
        }
        entries.push(FeedEntry::Item(item.clone()));
    }
    entries
}

/// Whether the feed has nothing worth showing: no items at all, or only the
/// file's initial upload.
pub fn should_show_empty_state(items: &[FeedItem]) -> bool {
    match items {
        [] => true,
        [FeedItem::Version(v)] => v.version_number == 1 && v.action == VersionAction::Upload,
        _ => false,
    }
}
