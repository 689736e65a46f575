//! JSON API for the facility search panel
//!
//! String in, string out, so a UI host can drive searches without linking
//! against the Rust types.

use crate::catalog::{get_catalog, FacilityCatalog};
use crate::config::SearchConfig;
use crate::geo::LatLng;
use crate::listing::FacilityCard;
use crate::map_view::{map_view, MapView};
use crate::search::{GeolocationError, SearchController, SportFilter};
use crate::sport::{sport_options, SportOption};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const API_SCHEMA_VERSION: u8 = 1;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "E_INVALID_REQUEST";
    pub const UNSUPPORTED_SCHEMA: &str = "E_UNSUPPORTED_SCHEMA";
    pub const CATALOG_UNAVAILABLE: &str = "E_CATALOG_UNAVAILABLE";
    pub const CONFIG_INVALID: &str = "E_CONFIG_INVALID";
    pub const SERIALIZATION: &str = "E_SERIALIZATION";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub query: String,
    /// Canonical sport key; missing or "all" means no sport filter
    #[serde(default)]
    pub sport: Option<String>,
    /// Result of the host's device location request, if one was made
    #[serde(default)]
    pub device_location: Option<LatLng>,
    #[serde(default)]
    pub device_location_error: Option<GeolocationError>,
    /// Number of "load more" clicks since the search ran
    #[serde(default)]
    pub load_more: usize,
    #[serde(default)]
    pub selected_id: Option<String>,
    #[serde(default)]
    pub include_map: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub schema_version: u8,
    pub query: String,
    pub sport: String,
    pub origin: LatLng,
    pub total: usize,
    pub has_more: bool,
    pub results: Vec<FacilityCard>,
    /// User-facing alert, e.g. when the device location could not be used
    pub alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapView>,
    pub generated_at: DateTime<Utc>,
}

/// Run a search against the process-wide catalog.
pub fn search_facilities_json(request_json: &str) -> Result<String, String> {
    let catalog = get_catalog().map_err(|e| err_code(error_codes::CATALOG_UNAVAILABLE, e))?;
    let config = SearchConfig::from_env().map_err(|e| err_code(error_codes::CONFIG_INVALID, e))?;
    search_facilities_json_with(catalog, config, request_json)
}

pub fn search_facilities_json_with(
    catalog: &FacilityCatalog,
    config: SearchConfig,
    request_json: &str,
) -> Result<String, String> {
    let request: SearchRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    let response = search_facilities(catalog, config, &request)?;
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::SERIALIZATION, e))
}

pub fn search_facilities(
    catalog: &FacilityCatalog,
    config: SearchConfig,
    request: &SearchRequest,
) -> Result<SearchResponse, String> {
    if request.schema_version != API_SCHEMA_VERSION {
        return Err(err_code(
            error_codes::UNSUPPORTED_SCHEMA,
            format!("expected schema_version {API_SCHEMA_VERSION}, got {}", request.schema_version),
        ));
    }

    let mut controller = SearchController::new(catalog, config)
        .map_err(|e| err_code(error_codes::CONFIG_INVALID, e))?;
    controller.set_query(&request.query);
    controller.set_sport(SportFilter::from_key(request.sport.as_deref().unwrap_or_default()));
    controller.search();

    let mut alert = None;
    let position = match (&request.device_location_error, request.device_location) {
        (Some(err), _) => Some(Err(err.clone())),
        (None, Some(pos)) => Some(Ok(pos)),
        (None, None) => None,
    };
    if let Some(position) = position {
        if let Err(e) = controller.apply_device_location(position) {
            alert = Some(e.user_message().to_string());
        }
    }

    controller.reveal_pages(request.load_more);

    if let Some(raw_id) = request.selected_id.as_deref() {
        let found = catalog.find_by_str(raw_id).map(|f| f.id.clone());
        match found {
            Some(id) if controller.select(&id) => {}
            _ => warn!(selected_id = raw_id, "selected facility not in results"),
        }
    }

    debug!(total = controller.total(), "search request handled");

    Ok(SearchResponse {
        schema_version: API_SCHEMA_VERSION,
        query: controller.state().query.clone(),
        sport: controller.state().sport.key().to_string(),
        origin: controller.origin(),
        total: controller.total(),
        has_more: controller.has_more(),
        results: controller.visible_cards(),
        alert,
        map: request.include_map.then(|| map_view(&controller)),
        generated_at: Utc::now(),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct SportOptionsResponse {
    pub schema_version: u8,
    pub options: Vec<SportOption>,
}

/// Sport dropdown for the process-wide catalog.
pub fn sport_options_json() -> Result<String, String> {
    let catalog = get_catalog().map_err(|e| err_code(error_codes::CATALOG_UNAVAILABLE, e))?;
    sport_options_json_with(catalog)
}

pub fn sport_options_json_with(catalog: &FacilityCatalog) -> Result<String, String> {
    let response = SportOptionsResponse {
        schema_version: API_SCHEMA_VERSION,
        options: sport_options(catalog.as_slice()),
    };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::SERIALIZATION, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::embedded_catalog;
    use serde_json::{json, Value};

    fn run(request: Value) -> Result<Value, String> {
        let catalog = embedded_catalog().unwrap();
        let out = search_facilities_json_with(&catalog, SearchConfig::default(), &request.to_string())?;
        Ok(serde_json::from_str(&out).unwrap())
    }

    #[test]
    fn basic_search_returns_first_page() {
        let res = run(json!({ "schema_version": 1 })).unwrap();
        assert_eq!(res["total"], 24);
        assert_eq!(res["has_more"], true);
        assert_eq!(res["results"].as_array().unwrap().len(), 10);
        assert_eq!(res["sport"], "all");
        assert!(res.get("map").is_none());
        assert_eq!(res["results"][0]["booking_price"], 50);
    }

    #[test]
    fn sport_and_query_filter() {
        let res = run(json!({ "schema_version": 1, "sport": "tennis", "query": "amsterdam" })).unwrap();
        let names: Vec<&str> = res["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Padel Club Amsterdam"));
        assert!(names.contains(&"Tennispark Joy"));
    }

    #[test]
    fn denied_location_surfaces_alert_and_keeps_origin() {
        let res = run(json!({
            "schema_version": 1,
            "device_location_error": "permission_denied"
        }))
        .unwrap();
        assert!(res["alert"].as_str().unwrap().starts_with("Kon je locatie"));
        assert_eq!(res["origin"]["lat"], 52.3676);
    }

    #[test]
    fn device_location_sets_label_and_origin() {
        let res = run(json!({
            "schema_version": 1,
            "query": "Haarlem",
            "device_location": { "lat": 51.92, "lng": 4.48 },
            "include_map": true
        }))
        .unwrap();
        assert_eq!(res["query"], "Mijn locatie");
        assert_eq!(res["total"], 24);
        assert_eq!(res["results"][0]["address_line"], "Weena 700, Rotterdam");
        assert_eq!(res["map"]["viewport"]["zoom"], 12);
    }

    #[test]
    fn selection_and_load_more() {
        let res = run(json!({
            "schema_version": 1,
            "load_more": 1,
            "selected_id": "way/120034",
            "include_map": true
        }))
        .unwrap();
        assert_eq!(res["results"].as_array().unwrap().len(), 20);
        assert_eq!(res["map"]["viewport"]["zoom"], 13);
        assert_eq!(res["map"]["viewport"]["center"]["lat"], 52.1077);
    }

    #[test]
    fn huge_load_more_is_capped_at_last_page() {
        let res = run(json!({ "schema_version": 1, "load_more": u64::MAX })).unwrap();
        assert_eq!(res["results"].as_array().unwrap().len(), 24);
        assert_eq!(res["has_more"], false);
    }

    #[test]
    fn invalid_config_is_a_coded_error() {
        let catalog = embedded_catalog().unwrap();
        let request = json!({ "schema_version": 1 }).to_string();

        let zero_page = SearchConfig { page_size: 0, ..SearchConfig::default() };
        let err = search_facilities_json_with(&catalog, zero_page, &request).unwrap_err();
        assert!(err.starts_with(error_codes::CONFIG_INVALID), "{err}");

        let nan_origin = SearchConfig {
            default_origin: LatLng::new(f64::NAN, 0.0),
            ..SearchConfig::default()
        };
        let err = search_facilities_json_with(&catalog, nan_origin, &request).unwrap_err();
        assert!(err.starts_with(error_codes::CONFIG_INVALID), "{err}");
    }

    #[test]
    fn sport_synonym_selects_canonical_key() {
        let res = run(json!({ "schema_version": 1, "sport": "Soccer" })).unwrap();
        assert_eq!(res["sport"], "football");
        assert!(res["total"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn wrong_schema_and_bad_json_are_coded_errors() {
        let err = run(json!({ "schema_version": 9 })).unwrap_err();
        assert!(err.starts_with(error_codes::UNSUPPORTED_SCHEMA));

        let catalog = embedded_catalog().unwrap();
        let err = search_facilities_json_with(&catalog, SearchConfig::default(), "{").unwrap_err();
        assert!(err.starts_with(error_codes::INVALID_REQUEST));
    }

    #[test]
    fn sport_options_start_with_all() {
        let catalog = embedded_catalog().unwrap();
        let out: Value = serde_json::from_str(&sport_options_json_with(&catalog).unwrap()).unwrap();
        assert_eq!(out["options"][0]["key"], "all");
        assert!(out["options"].as_array().unwrap().len() > 20);
    }
}
