//! # roster-remote
//!
//! Adapters for the community platform the roster is synchronized from.
//!
//! - [`SnapshotExtractor`] implements `MemberSource` by scraping the group page
//!   payloads, falling back through several strategies before giving up
//! - [`HttpArticleFeed`] implements `ArticleFeed` over the paginated articles endpoint
//! - [`payload`] holds the tolerant parsers for the embedded page payloads

pub mod client;
pub mod error;
pub mod feed;
pub mod payload;
pub mod snapshot;

pub use client::{ClientConfig, PlatformClient};
pub use error::RemoteError;
pub use feed::HttpArticleFeed;
pub use snapshot::SnapshotExtractor;
