use crate::models::FeedItem;

/// Merge feed sources into one list, newest first.
///
/// Returns `None` while any source is still pending (`None`), so a caller
/// never shows a half-loaded, misordered feed. Items with equal timestamps keep
/// their input order: earlier sources first, then position within a source.
pub fn merge_feed(sources: &[Option<&[FeedItem]>]) -> Option<Vec<FeedItem>> {
    if sources.iter().any(Option::is_none) {
        return None;
    }

    let mut items: Vec<FeedItem> = sources
        .iter()
        .flatten()
        .flat_map(|source| source.iter().cloned())
        .collect();

    // sort_by is stable
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    Some(items)
}
