//! Plain-text rendering of a collapsed feed.

use crate::models::{FeedItem, ResolutionState};

use super::{FeedEntry, VersionGroup};

const COMMENT: char = '✎';
const TASK: char = '☐';
const VERSION: char = '⬆';
const APP: char = '◆';
const PENDING_SUFFIX: &str = " (sending…)";

/// Render feed entries one per line, newest first.
///
/// Example output:
/// ```text
/// ✎ 2024-03-01T10:00:00Z Ada: Looks good
/// ☐ 2024-02-28T09:00:00Z Grace: Review the draft [1/2 done]
/// ⬆ 2024-02-27T08:00:00Z v1-v3 by Ada, Grace
/// ```
pub fn render_feed(entries: &[FeedEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        match entry {
            FeedEntry::Item(item) => render_item(&mut output, item),
            FeedEntry::Versions(group) => render_group(&mut output, group),
        }
        output.push('\n');
    }
    output
}

fn render_item(output: &mut String, item: &FeedItem) {
    let author = item.author().map(|u| u.name.as_str()).unwrap_or("Unknown");
    let line = match item {
        FeedItem::Comment(c) => format!("{} {} {}: {}", COMMENT, c.created_at, author, c.message),
        FeedItem::Task(t) => {
            let done = t
                .assignments
                .entries
                .iter()
                .filter(|a| a.resolution_state != ResolutionState::Incomplete)
                .count();
            format!(
                "{} {} {}: {} [{}/{} done]",
                TASK,
                t.created_at,
                author,
                t.message,
                done,
                t.assignments.entries.len()
            )
        }
        FeedItem::Version(v) => format!(
            "{} {} v{} {} by {}",
            VERSION,
            v.created_at,
            v.version_number,
            v.action.as_str(),
            author
        ),
        FeedItem::AppActivity(a) => {
            let app = a.app.as_ref().map(|app| app.name.as_str()).unwrap_or("App");
            format!("{} {} {}: {}", APP, a.created_at, app, strip_tags(&a.rendered_text))
        }
    };
    output.push_str(&line);
    if item.is_pending() {
        output.push_str(PENDING_SUFFIX);
    }
}

fn render_group(output: &mut String, group: &VersionGroup) {
    let names: Vec<&str> = group.collaborators.iter().map(|u| u.name.as_str()).collect();
    let when = group
        .created_at()
        .map(|t| t.to_string())
        .unwrap_or_default();
    output.push_str(&format!(
        "{} {} v{}-v{} by {}",
        VERSION,
        when,
        group.version_start,
        group.version_end,
        names.join(", ")
    ));
}

/// Drop markup from server-rendered text.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.trim().to_string()
}
