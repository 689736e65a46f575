//! Listing card data for a facility: address line, badges, website and the
//! mock decorations (rating, price range, open now) the demo shows.

use crate::models::{FacilityId, FacilityLocation};
use crate::sport::sport_badges;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ADDRESS: &str = "Adres onbekend";
pub const DEFAULT_PRICE_RANGE: &str = "40-60";
/// Hourly price used when a price range cannot be parsed
pub const DEFAULT_BOOKING_PRICE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityCard {
    pub id: FacilityId,
    pub name: String,
    pub address_line: String,
    pub distance_km: Option<f64>,
    pub sports: Vec<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: f64,
    pub price_range: String,
    /// Hourly price a booking is quoted at, from `price_range`
    pub booking_price: u32,
    pub open_now: bool,
}

impl FacilityCard {
    /// `catalog_index` drives the mock rating so it stays stable per facility.
    pub fn new(facility: &FacilityLocation, catalog_index: usize, distance_km: Option<f64>) -> Self {
        Self {
            id: facility.id.clone(),
            name: facility.name.clone(),
            address_line: address_line(facility),
            distance_km,
            sports: sport_badges(&facility.sports),
            phone: facility.phone.clone().filter(|p| !p.trim().is_empty()),
            website: normalize_website(facility.website.as_deref()),
            rating: mock_rating(catalog_index),
            price_range: DEFAULT_PRICE_RANGE.to_string(),
            booking_price: booking_price(Some(DEFAULT_PRICE_RANGE)),
            open_now: true,
        }
    }
}

/// "address, city", either part alone, or "Adres onbekend".
pub fn address_line(facility: &FacilityLocation) -> String {
    let address = facility.address.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let city = facility.city.as_deref().map(str::trim).filter(|s| !s.is_empty());
    match (address, city) {
        (Some(a), Some(c)) => format!("{a}, {c}"),
        (Some(a), None) => a.to_string(),
        (None, Some(c)) => c.to_string(),
        (None, None) => UNKNOWN_ADDRESS.to_string(),
    }
}

/// Prefixes `https://` when the url has no http(s) scheme.
pub fn normalize_website(url: Option<&str>) -> Option<String> {
    let trimmed = url?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

pub fn mock_rating(catalog_index: usize) -> f64 {
    // one decimal, 4.0..=4.9
    (40 + (catalog_index % 10) as u32) as f64 / 10.0
}

/// Midpoint of a "€40-60" style range, rounded; 50 when unparseable.
pub fn booking_price(price_range: Option<&str>) -> u32 {
    let Some(range) = price_range else {
        return DEFAULT_BOOKING_PRICE;
    };

    let Some((low, high)) = range.split_once('-') else {
        return DEFAULT_BOOKING_PRICE;
    };

    // digits directly left and right of the dash, whitespace allowed
    let low_digits: String = {
        let rev: String = low.trim_end().chars().rev().take_while(|c| c.is_ascii_digit()).collect();
        rev.chars().rev().collect()
    };
    let high_digits: String =
        high.trim_start().chars().take_while(|c| c.is_ascii_digit()).collect();

    match (low_digits.parse::<u32>(), high_digits.parse::<u32>()) {
        (Ok(l), Ok(h)) => ((l as f64 + h as f64) / 2.0).round() as u32,
        _ => DEFAULT_BOOKING_PRICE,
    }
}
