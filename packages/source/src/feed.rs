//! Upstream `GeoJSON` feed client.
//!
//! The dataset is published on an `ArcGIS` open-data portal as a single
//! feature collection; one GET returns the whole thing, so there is no
//! pagination to drive.

use std::time::Duration;

use serde::Deserialize;
use water_map_source_models::ServiceRecord;

use crate::{SourceError, normalize};

/// Syracuse water-service-line dataset on the `ArcGIS` open-data portal.
pub const DEFAULT_FEED_URL: &str =
    "https://opendata.arcgis.com/datasets/e1deb6e9e4b74071af272982d8f9994e_0.geojson";

/// Raw feature collection as published by the feed.
///
/// Only the fields the normalizer consumes are declared; the display name
/// (`BNAME`) and the `geometry.type` tag are always present upstream but
/// unused, so they are simply not carried forward.
#[derive(Debug, Deserialize)]
pub struct RawFeatureCollection {
    /// Features in feed order.
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

/// One raw feature from the feed.
#[derive(Debug, Deserialize)]
pub struct RawFeature {
    /// Descriptive properties of the service line.
    #[serde(default)]
    pub properties: Option<RawProperties>,
    /// Point geometry of the service tap.
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
}

/// Raw feature properties.
#[derive(Debug, Deserialize)]
pub struct RawProperties {
    /// Street address of the tap.
    #[serde(default, alias = "TAP_ADDRESS")]
    pub tap_address: Option<String>,
    /// Pipe material label.
    #[serde(default, alias = "PTYPE")]
    pub ptype: Option<String>,
    /// Install date of the service.
    #[serde(default, alias = "SERV_INSTALL")]
    pub serv_install: Option<String>,
}

/// Raw feature geometry.
#[derive(Debug, Deserialize)]
pub struct RawGeometry {
    /// Coordinate pair in source-defined order.
    #[serde(default)]
    pub coordinates: Option<Vec<f64>>,
}

/// Client for the water-service feed.
pub struct FeedClient {
    client: reqwest::Client,
    feed_url: String,
}

impl FeedClient {
    /// Creates a feed client with the given endpoint and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Fetch`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(feed_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            feed_url: feed_url.into(),
        })
    }

    /// Returns the configured feed URL.
    #[must_use]
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetches the feed and normalizes it into service records.
    ///
    /// One best-effort GET. Feed row order is preserved in the result.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Fetch`] on transport failure or an
    /// unparseable body, [`SourceError::Schema`] if any feature is
    /// missing a required field.
    pub async fn fetch_service_records(&self) -> Result<Vec<ServiceRecord>, SourceError> {
        log::info!("Fetching water service feed from {}", self.feed_url);
        let response = self.client.get(&self.feed_url).send().await?;
        let collection: RawFeatureCollection = response.error_for_status()?.json().await?;

        let records = normalize::normalize(&collection)?;
        log::info!(
            "Normalized {} service records from {} features",
            records.len(),
            collection.features.len(),
        );
        Ok(records)
    }
}
