//! The activity feed.
//!
//! Sources are fetched independently; [`FeedState`] holds them and rebuilds
//! the merged list from scratch whenever one changes:
//!
//! 1. [`merge_feed`]: wait for every source, concatenate, sort newest first
//! 2. [`collapse_feed`]: fold runs of version uploads into one entry
//!
//! [`ActivityFeed`] sits on top and forwards user actions to the handlers
//! supplied by the embedding application.

mod collapse;
mod handlers;
mod merge;
mod render;
mod state;

pub use collapse::*;
pub use handlers::*;
pub use merge::*;
pub use render::*;
pub use state::*;
