use crate::models::{AppActivityItem, Comment, FeedItem, ItemKind, Task, VersionEvent};

use super::{collapse_feed, merge_feed, should_show_empty_state, FeedEntry};

/// A collection feeding into the activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedSource {
    Comments,
    Tasks,
    Versions,
    AppActivity,
}

impl FeedSource {
    pub const ALL: [FeedSource; 4] = [
        FeedSource::Comments,
        FeedSource::Tasks,
        FeedSource::Versions,
        FeedSource::AppActivity,
    ];

    /// Sources the sidebar feed shows unless configured otherwise.
    pub const DEFAULT: [FeedSource; 3] =
        [FeedSource::Comments, FeedSource::Tasks, FeedSource::Versions];

    fn index(self) -> usize {
        match self {
            Self::Comments => 0,
            Self::Tasks => 1,
            Self::Versions => 2,
            Self::AppActivity => 3,
        }
    }

    pub fn for_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Comment => Self::Comments,
            ItemKind::Task => Self::Tasks,
            ItemKind::Version => Self::Versions,
            ItemKind::AppActivity => Self::AppActivity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comments => "comments",
            Self::Tasks => "tasks",
            Self::Versions => "versions",
            Self::AppActivity => "app_activity",
        }
    }
}

/// Issued when a fetch for a source starts; presented again with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    source: FeedSource,
    seq: u64,
}

impl FetchTicket {
    pub fn source(&self) -> FeedSource {
        self.source
    }
}

#[derive(Debug, Default, Clone)]
struct SourceSlot {
    /// `None` until the first response arrives, or while marked pending.
    entries: Option<Vec<FeedItem>>,
    issued: u64,
    applied: u64,
}

/// Source collections plus the feed derived from them.
///
/// The derived list is rebuilt in full whenever a source changes and every
/// enabled source has data. While any enabled source is pending the previous
/// list stays as it was.
#[derive(Debug, Clone)]
pub struct FeedState {
    enabled: Vec<FeedSource>,
    slots: [SourceSlot; 4],
    placeholders: Vec<FeedItem>,
    items: Vec<FeedItem>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(&FeedSource::DEFAULT)
    }
}

impl FeedState {
    pub fn new(sources: &[FeedSource]) -> Self {
        let mut enabled: Vec<FeedSource> = Vec::with_capacity(sources.len());
        for source in sources {
            if !enabled.contains(source) {
                enabled.push(*source);
            }
        }
        Self {
            enabled,
            slots: Default::default(),
            placeholders: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.enabled
    }

    /// Every enabled source has received a response.
    pub fn is_ready(&self) -> bool {
        self.enabled
            .iter()
            .all(|s| self.slots[s.index()].entries.is_some())
    }

    /// The merged feed, newest first.
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn collapsed(&self) -> Vec<FeedEntry> {
        collapse_feed(&self.items)
    }

    pub fn should_show_empty_state(&self) -> bool {
        should_show_empty_state(&self.items)
    }

    /// Current contents of one source, `None` while pending.
    pub fn source_items(&self, source: FeedSource) -> Option<&[FeedItem]> {
        self.slots[source.index()].entries.as_deref()
    }

    // ============================================================
    // Fetch results
    // ============================================================

    pub fn begin_fetch(&mut self, source: FeedSource) -> FetchTicket {
        let slot = &mut self.slots[source.index()];
        slot.issued += 1;
        FetchTicket {
            source,
            seq: slot.issued,
        }
    }

    /// Store a fetch result. Returns false, leaving state untouched, when a
    /// newer fetch for the same source has already been applied.
    pub fn apply(&mut self, ticket: FetchTicket, items: Vec<FeedItem>) -> bool {
        let slot = &mut self.slots[ticket.source.index()];
        if ticket.seq <= slot.applied {
            tracing::debug!(
                source = ticket.source.as_str(),
                seq = ticket.seq,
                applied = slot.applied,
                "Discarding stale feed response"
            );
            return false;
        }
        slot.applied = ticket.seq;
        slot.entries = Some(items);
        self.recompute();
        true
    }

    /// Forget a source's contents until its next response. The derived feed
    /// is kept as is in the meantime.
    pub fn mark_pending(&mut self, source: FeedSource) {
        self.slots[source.index()].entries = None;
    }

    fn replace(&mut self, source: FeedSource, items: Vec<FeedItem>) {
        let ticket = self.begin_fetch(source);
        self.apply(ticket, items);
    }

    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.replace(FeedSource::Comments, comments.into_iter().map(Into::into).collect());
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.replace(FeedSource::Tasks, tasks.into_iter().map(Into::into).collect());
    }

    pub fn set_versions(&mut self, versions: Vec<VersionEvent>) {
        self.replace(FeedSource::Versions, versions.into_iter().map(Into::into).collect());
    }

    pub fn set_app_activity(&mut self, activity: Vec<AppActivityItem>) {
        self.replace(
            FeedSource::AppActivity,
            activity.into_iter().map(Into::into).collect(),
        );
    }

    // ============================================================
    // Local mutations
    // ============================================================

    /// Show an in-flight create until the backend answers.
    pub fn insert_placeholder(&mut self, item: FeedItem) {
        self.placeholders.push(item);
        self.recompute();
    }

    /// Swap a placeholder for the item the backend created.
    ///
    /// A refetch may already have delivered the confirmed item, in which case
    /// the fetched copy is replaced rather than duplicated.
    pub fn resolve_placeholder(&mut self, local_id: &str, confirmed: FeedItem) -> bool {
        if !self.take_placeholder(local_id) {
            return false;
        }
        let source = FeedSource::for_kind(confirmed.kind());
        if let Some(entries) = self.slots[source.index()].entries.as_mut() {
            match entries.iter_mut().find(|item| item.id() == confirmed.id()) {
                Some(existing) => *existing = confirmed,
                None => entries.push(confirmed),
            }
        }
        self.recompute();
        true
    }

    /// Drop a placeholder whose create failed.
    pub fn discard_placeholder(&mut self, local_id: &str) -> bool {
        let removed = self.take_placeholder(local_id);
        if removed {
            self.recompute();
        }
        removed
    }

    fn take_placeholder(&mut self, local_id: &str) -> bool {
        let before = self.placeholders.len();
        self.placeholders.retain(|p| p.id() != local_id);
        self.placeholders.len() != before
    }

    /// Remove an item the backend confirmed deleted.
    pub fn remove_item(&mut self, kind: ItemKind, id: &str) -> bool {
        let source = FeedSource::for_kind(kind);
        let Some(entries) = self.slots[source.index()].entries.as_mut() else {
            return false;
        };
        let before = entries.len();
        entries.retain(|item| item.id() != id);
        let removed = entries.len() != before;
        if removed {
            self.recompute();
        }
        removed
    }

    fn recompute(&mut self) {
        let merged = {
            let mut sources: Vec<Option<&[FeedItem]>> = self
                .enabled
                .iter()
                .map(|s| self.slots[s.index()].entries.as_deref())
                .collect();
            sources.push(Some(self.placeholders.as_slice()));
            merge_feed(&sources)
        };

        if let Some(items) = merged {
            self.items = items;
        }
    }
}
