//! Activity feed core for cloud content files.
//!
//! - [`api`]: REST clients, including the marker-paginated App Activity client.
//! - [`feed`]: merges comments, tasks, versions and app activity into one
//!   ordered, collapsed feed, and routes feed mutations to caller handlers.
//! - [`models`]: wire and domain types shared by both.

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;

pub use config::ClientConfig;
pub use error::{ClientError, ErrorCode, FeedError};
