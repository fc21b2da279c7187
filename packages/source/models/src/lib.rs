#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical types for normalized water-service-line records.
//!
//! The upstream feed publishes one feature per service line. After
//! normalization every feature becomes a [`ServiceRecord`]. The fixed
//! material legend lives here as [`MaterialCategory`] so the normalizer
//! and the search path share a single category table.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// A point location taken positionally from the feed's coordinate pair.
///
/// The feed's element order is preserved exactly: the first array element
/// maps to `x`, the second to `y`. Raw two-element arrays never travel
/// past the normalizer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// First element of the source coordinate pair.
    pub x: f64,
    /// Second element of the source coordinate pair.
    pub y: f64,
}

/// One normalized row of the water-service dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    /// Tap address, lower-cased with whitespace runs collapsed.
    pub address: String,
    /// Pipe material label exactly as published. The feed pads some
    /// values with whitespace; trimming happens at lookup time in
    /// [`MaterialCategory::from_label`], not here.
    pub material: String,
    /// Install date of the service line, opaque display value.
    pub service_date: String,
    /// Location of the service tap.
    pub coordinates: Coordinates,
}

/// A material value that is not in the legend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown material category: {label:?}")]
pub struct UnknownMaterialError {
    /// The offending label, trimmed.
    pub label: String,
}

/// Pipe material category.
///
/// The variant set is the fixed legend: any feed value outside it is a
/// lookup error, never a silent default.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum MaterialCategory {
    /// Lead service line.
    #[serde(rename = "LEAD")]
    #[strum(serialize = "LEAD")]
    Lead,
    /// Cast iron.
    #[serde(rename = "CAST IRON")]
    #[strum(serialize = "CAST IRON")]
    CastIron,
    /// Copper.
    #[serde(rename = "COPPER")]
    #[strum(serialize = "COPPER")]
    Copper,
    /// Galvanized iron.
    #[serde(rename = "GAL.IRON")]
    #[strum(serialize = "GAL.IRON")]
    GalIron,
    /// Ductile iron.
    #[serde(rename = "DUCTILE")]
    #[strum(serialize = "DUCTILE")]
    Ductile,
    /// Anything the utility classifies as other.
    #[serde(rename = "OTHER")]
    #[strum(serialize = "OTHER")]
    Other,
}

impl MaterialCategory {
    /// Looks up a feed material label.
    ///
    /// Incidental surrounding whitespace from the feed is trimmed here;
    /// the label must otherwise match a legend key exactly.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownMaterialError`] for any value outside the legend.
    pub fn from_label(label: &str) -> Result<Self, UnknownMaterialError> {
        let trimmed = label.trim();
        trimmed.parse().map_err(|_| UnknownMaterialError {
            label: trimmed.to_string(),
        })
    }

    /// Marker color for this category from the legend.
    #[must_use]
    pub const fn marker_color(self) -> &'static str {
        match self {
            Self::Lead => "green",
            Self::CastIron => "blue",
            Self::Copper => "red",
            Self::GalIron => "orange",
            Self::Ductile | Self::Other => "black",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_colors_match_exactly() {
        assert_eq!(MaterialCategory::Lead.marker_color(), "green");
        assert_eq!(MaterialCategory::CastIron.marker_color(), "blue");
        assert_eq!(MaterialCategory::Copper.marker_color(), "red");
        assert_eq!(MaterialCategory::GalIron.marker_color(), "orange");
        assert_eq!(MaterialCategory::Ductile.marker_color(), "black");
        assert_eq!(MaterialCategory::Other.marker_color(), "black");
    }

    #[test]
    fn looks_up_every_legend_label() {
        assert_eq!(
            MaterialCategory::from_label("LEAD"),
            Ok(MaterialCategory::Lead)
        );
        assert_eq!(
            MaterialCategory::from_label("CAST IRON"),
            Ok(MaterialCategory::CastIron)
        );
        assert_eq!(
            MaterialCategory::from_label("COPPER"),
            Ok(MaterialCategory::Copper)
        );
        assert_eq!(
            MaterialCategory::from_label("GAL.IRON"),
            Ok(MaterialCategory::GalIron)
        );
        assert_eq!(
            MaterialCategory::from_label("DUCTILE"),
            Ok(MaterialCategory::Ductile)
        );
        assert_eq!(
            MaterialCategory::from_label("OTHER"),
            Ok(MaterialCategory::Other)
        );
    }

    #[test]
    fn trims_feed_whitespace_before_lookup() {
        assert_eq!(
            MaterialCategory::from_label(" LEAD"),
            Ok(MaterialCategory::Lead)
        );
        assert_eq!(
            MaterialCategory::from_label("  CAST IRON  "),
            Ok(MaterialCategory::CastIron)
        );
    }

    #[test]
    fn unknown_label_fails_instead_of_defaulting() {
        let err = MaterialCategory::from_label("PVC").unwrap_err();
        assert_eq!(err.label, "PVC");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(MaterialCategory::from_label("lead").is_err());
    }

    #[test]
    fn displays_feed_labels() {
        assert_eq!(MaterialCategory::GalIron.to_string(), "GAL.IRON");
        assert_eq!(MaterialCategory::CastIron.to_string(), "CAST IRON");
    }
}
