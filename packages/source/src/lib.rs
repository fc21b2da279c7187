#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Water service feed client and normalization logic.
//!
//! Fetches the municipal water-service-line `GeoJSON` feed and normalizes
//! each feature into the canonical [`ServiceRecord`] format. The fetch is
//! a single best-effort GET with no retries and no backoff. Any transport
//! or schema problem fails the whole operation so the map degrades to
//! "no data available" rather than rendering incomplete data.
//!
//! [`ServiceRecord`]: water_map_source_models::ServiceRecord

pub mod feed;
pub mod normalize;

pub use feed::{DEFAULT_FEED_URL, FeedClient};

/// Errors that can occur while fetching or normalizing the feed.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network/transport failure, including an unparseable response body.
    #[error("feed request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The feed decoded but a required field is missing or malformed.
    #[error("feed schema error: {message}")]
    Schema {
        /// Description of which feature and field broke the schema.
        message: String,
    },
}
