//! Feature-collection normalization.
//!
//! Transforms raw feed features into canonical [`ServiceRecord`] rows:
//! addresses are lower-cased with whitespace runs collapsed, the
//! coordinate pair is typed positionally at this boundary, and the
//! material and install-date fields pass through unchanged. The material
//! label keeps its incidental whitespace here; trimming is deferred to
//! legend lookup time, matching how the feed has always been consumed.

use water_map_source_models::{Coordinates, ServiceRecord};

use crate::SourceError;
use crate::feed::RawFeatureCollection;

/// Normalizes an address string: lower-case, collapse interior
/// whitespace runs to single spaces, trim. Idempotent.
#[must_use]
pub fn normalize_address(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a raw feature collection into service records.
///
/// Feed row order is preserved; N well-formed features yield exactly N
/// records. Strict by design: a single malformed feature fails the whole
/// collection so no partial table is ever produced.
///
/// # Errors
///
/// Returns [`SourceError::Schema`] when any feature is missing its
/// properties, address, material, install date, or geometry, when the
/// address is empty after normalization, or when the coordinate array is
/// not exactly two elements.
pub fn normalize(collection: &RawFeatureCollection) -> Result<Vec<ServiceRecord>, SourceError> {
    let mut records = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.iter().enumerate() {
        let properties = feature
            .properties
            .as_ref()
            .ok_or_else(|| schema_error(index, "missing properties"))?;

        let address = properties
            .tap_address
            .as_deref()
            .map(normalize_address)
            .ok_or_else(|| schema_error(index, "missing TAP_ADDRESS"))?;
        if address.is_empty() {
            return Err(schema_error(index, "empty TAP_ADDRESS"));
        }

        let material = properties
            .ptype
            .clone()
            .ok_or_else(|| schema_error(index, "missing PTYPE"))?;

        let service_date = properties
            .serv_install
            .clone()
            .ok_or_else(|| schema_error(index, "missing SERV_INSTALL"))?;

        let pair = feature
            .geometry
            .as_ref()
            .and_then(|geometry| geometry.coordinates.as_deref())
            .ok_or_else(|| schema_error(index, "missing geometry coordinates"))?;
        let [x, y] = pair else {
            return Err(schema_error(
                index,
                "geometry coordinates are not a 2-element pair",
            ));
        };

        records.push(ServiceRecord {
            address,
            material,
            service_date,
            coordinates: Coordinates { x: *x, y: *y },
        });
    }

    Ok(records)
}

fn schema_error(index: usize, detail: &str) -> SourceError {
    SourceError::Schema {
        message: format!("feature {index}: {detail}"),
    }
}
