//! Domain models for the activity feed.
//!
//! # Feed items
//!
//! - [`Comment`]: A message left on a file, optionally a local placeholder
//!   while its create request is in flight.
//! - [`Task`]: An approval or review request with per-user assignments.
//! - [`VersionEvent`]: An upload, delete or restore of a file version.
//! - [`AppActivityItem`]: An event reported by a third-party app integration.
//!
//! [`FeedItem`] wraps all four so the feed can order them uniformly.
//!
//! # Listings
//!
//! - [`Page`]: One marker-paginated response, with an opaque [`Marker`].
//! - [`Collection`]: An offset-style listing returned in a single response.

mod app_activity;
mod comment;
mod item;
mod page;
mod task;
mod timestamp;
mod user;
mod version;

pub use app_activity::*;
pub use comment::*;
pub use item::*;
pub use page::*;
pub use task::*;
pub use timestamp::*;
pub use user::*;
pub use version::*;
