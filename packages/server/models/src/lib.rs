#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the water map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the normalized record types to allow independent evolution of the
//! API contract.

use serde::{Deserialize, Serialize};
use water_map_source_models::{MaterialCategory, ServiceRecord};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Default map view parameters for the rendering frontend.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMapDefaults {
    /// Default map center latitude.
    pub latitude: f64,
    /// Default map center longitude.
    pub longitude: f64,
    /// Zoom level for the full-city default view.
    pub default_zoom: u8,
    /// Zoom level when centering on a search result.
    pub search_zoom: u8,
    /// Maximum zoom the frontend should allow.
    pub max_zoom: u8,
}

impl ApiMapDefaults {
    /// Central New York defaults used by the original map view.
    #[must_use]
    pub const fn central_new_york() -> Self {
        Self {
            latitude: 43.048_122_1,
            longitude: -76.147_424_4,
            default_zoom: 10,
            search_zoom: 19,
            max_zoom: 19,
        }
    }
}

/// A service record as returned by the API, one marker per row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiServiceRecord {
    /// Normalized tap address.
    pub address: String,
    /// Material label exactly as published by the feed (may carry
    /// incidental whitespace).
    pub material: String,
    /// Install date display value.
    pub service_date: String,
    /// First element of the feed coordinate pair.
    pub x: f64,
    /// Second element of the feed coordinate pair.
    pub y: f64,
}

impl From<ServiceRecord> for ApiServiceRecord {
    fn from(record: ServiceRecord) -> Self {
        Self {
            address: record.address,
            material: record.material,
            service_date: record.service_date,
            x: record.coordinates.x,
            y: record.coordinates.y,
        }
    }
}

/// Search form submitted from the map page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchForm {
    /// Free-text address query. The empty string means "no search" and
    /// is rejected before any lookup runs.
    pub address: String,
}

/// Response for a successful address search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchResult {
    /// Matched normalized address.
    pub address: String,
    /// Material category of the matched row.
    pub material: MaterialCategory,
    /// Legend color for the material.
    pub color: String,
    /// Install date display value.
    pub service_date: String,
    /// First element of the matched row's coordinate pair.
    pub x: f64,
    /// Second element of the matched row's coordinate pair.
    pub y: f64,
    /// Similarity score of the match, 0–100.
    pub score: f64,
}

impl ApiSearchResult {
    /// Builds a search result from the matched row.
    #[must_use]
    pub fn new(record: &ServiceRecord, material: MaterialCategory, score: f64) -> Self {
        Self {
            address: record.address.clone(),
            material,
            color: material.marker_color().to_string(),
            service_date: record.service_date.clone(),
            x: record.coordinates.x,
            y: record.coordinates.y,
            score,
        }
    }
}
