pub mod search_json;

pub use search_json::{
    error_codes, search_facilities, search_facilities_json, search_facilities_json_with,
    sport_options_json, sport_options_json_with, SearchRequest, SearchResponse,
    SportOptionsResponse, API_SCHEMA_VERSION,
};
