//! HTTP handler functions for the water map API.
//!
//! Every failure is answered with a JSON error body and logged; nothing
//! on a request path panics the long-lived process. A feed failure
//! degrades the map to "no data available"; no partial table is ever
//! returned.

use actix_web::{HttpResponse, web};
use water_map_matcher::MatchError;
use water_map_server_models::{
    ApiHealth, ApiMapDefaults, ApiSearchResult, ApiServiceRecord, SearchForm,
};
use water_map_source_models::MaterialCategory;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/map`
///
/// Default view parameters for the rendering frontend.
pub async fn map_defaults() -> HttpResponse {
    HttpResponse::Ok().json(ApiMapDefaults::central_new_york())
}

/// `GET /api/services`
///
/// Returns the full normalized table, one marker per row, in feed order.
pub async fn services(state: web::Data<AppState>) -> HttpResponse {
    match state.service_records().await {
        Ok(records) => {
            let rows: Vec<ApiServiceRecord> = records
                .iter()
                .cloned()
                .map(ApiServiceRecord::from)
                .collect();
            HttpResponse::Ok().json(rows)
        }
        Err(e) => {
            log::error!("Failed to load water service data: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Water service data unavailable"
            }))
        }
    }
}

/// `POST /api/search`
///
/// Fuzzy address lookup against the normalized table. The submitted
/// `address` form field is lower-cased before matching; the empty string
/// means "no search" and is rejected before any lookup runs. The matched
/// row's material is trimmed and resolved through the legend. A value
/// outside the legend is a hard failure of this request, not a fallback
/// color.
pub async fn search(state: web::Data<AppState>, form: web::Form<SearchForm>) -> HttpResponse {
    if form.address.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Address is required"
        }));
    }
    let query = form.address.to_lowercase();

    let records = match state.service_records().await {
        Ok(records) => records,
        Err(e) => {
            log::error!("Failed to load water service data: {e}");
            return HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Water service data unavailable"
            }));
        }
    };

    let candidates: Vec<&str> = records.iter().map(|r| r.address.as_str()).collect();
    let matched = match water_map_matcher::best_match(&query, &candidates) {
        Ok(matched) => matched,
        Err(MatchError::NoCandidates) => {
            log::error!("No addresses available to search");
            return HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Water service data unavailable"
            }));
        }
    };

    let record = &records[matched.index];
    match MaterialCategory::from_label(&record.material) {
        Ok(material) => {
            HttpResponse::Ok().json(ApiSearchResult::new(record, material, matched.score))
        }
        Err(e) => {
            log::error!("Matched record {:?} has {e}", record.address);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Matched record has an unrecognized material"
            }))
        }
    }
}
