use crate::geo::LatLng;
use crate::models::FacilityLocation;
use crate::sport::{canonical_sport_key, offers_sport, ALL_SPORTS_KEY};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sport dropdown selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportFilter {
    #[default]
    All,
    Key(String),
}

impl SportFilter {
    /// Empty, `all` or the UI's `Alle` select no filter. Synonyms map onto
    /// their canonical key.
    pub fn from_key(key: &str) -> Self {
        let k = key.trim();
        if k.is_empty() || k.eq_ignore_ascii_case(ALL_SPORTS_KEY) || k.eq_ignore_ascii_case("alle") {
            SportFilter::All
        } else {
            SportFilter::Key(canonical_sport_key(k))
        }
    }

    pub fn key(&self) -> &str {
        match self {
            SportFilter::All => ALL_SPORTS_KEY,
            SportFilter::Key(k) => k,
        }
    }

    pub fn matches(&self, facility: &FacilityLocation) -> bool {
        match self {
            SportFilter::All => true,
            SportFilter::Key(key) => offers_sport(&facility.sports, key),
        }
    }
}

/// One ranked result: position in the catalog plus distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub index: usize,
    /// `None` when the facility has no usable coordinates
    pub distance_km: Option<f64>,
}

/// Lowercased, trimmed text needle, or `None` when text filtering is off.
pub fn text_needle(query: &str, device_location_label: &str) -> Option<String> {
    let q = query.trim().to_lowercase();
    if q.is_empty() || q == device_location_label.trim().to_lowercase() {
        None
    } else {
        Some(q)
    }
}

/// Sport filter, then text filter, then ascending distance from `origin`.
///
/// Ties keep catalog order; facilities without valid coordinates go last.
pub fn rank_facilities(
    facilities: &[FacilityLocation],
    sport: &SportFilter,
    needle: Option<&str>,
    origin: LatLng,
) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = facilities
        .iter()
        .enumerate()
        .filter(|(_, f)| sport.matches(f))
        .filter(|(_, f)| needle.map(|n| f.matches_text(n)).unwrap_or(true))
        .map(|(index, f)| SearchHit {
            index,
            distance_km: f
                .has_valid_coordinates()
                .then(|| origin.distance_km(&f.coordinates())),
        })
        .collect();

    hits.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    hits
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::embedded_catalog;
    use crate::geo::DEFAULT_ORIGIN;
    use crate::sport::canonical_keys;

    #[test]
    fn sport_filter_keys() {
        assert_eq!(SportFilter::from_key(""), SportFilter::All);
        assert_eq!(SportFilter::from_key("Alle"), SportFilter::All);
        assert_eq!(SportFilter::from_key("all"), SportFilter::All);
        assert_eq!(SportFilter::from_key(" Padel "), SportFilter::Key("padel".to_string()));
        assert_eq!(SportFilter::from_key("Soccer"), SportFilter::Key("football".to_string()));
        assert_eq!(SportFilter::from_key("field hockey"), SportFilter::Key("hockey".to_string()));
    }

    #[test]
    fn device_label_disables_text_filter() {
        assert_eq!(text_needle("  Mijn Locatie ", "Mijn locatie"), None);
        assert_eq!(text_needle("", "Mijn locatie"), None);
        assert_eq!(text_needle(" Utrecht", "Mijn locatie").as_deref(), Some("utrecht"));
    }

    #[test]
    fn sport_filter_only_returns_matching_facilities() {
        let catalog = embedded_catalog().unwrap();
        let hits = rank_facilities(
            catalog.as_slice(),
            &SportFilter::Key("hockey".to_string()),
            None,
            DEFAULT_ORIGIN,
        );
        assert!(!hits.is_empty());
        for hit in &hits {
            let keys = canonical_keys(&catalog.as_slice()[hit.index].sports);
            assert!(keys.contains("hockey"));
        }
    }

    #[test]
    fn synonym_key_matches_same_facilities_as_canonical() {
        let catalog = embedded_catalog().unwrap();
        let rank = |key: &str| {
            rank_facilities(catalog.as_slice(), &SportFilter::from_key(key), None, DEFAULT_ORIGIN)
        };
        let football = rank("football");
        assert!(!football.is_empty());
        assert_eq!(rank("soccer"), football);
    }

    #[test]
    fn text_filter_matches_city() {
        let catalog = embedded_catalog().unwrap();
        let hits = rank_facilities(catalog.as_slice(), &SportFilter::All, Some("utrecht"), DEFAULT_ORIGIN);
        assert!(!hits.is_empty());
        assert!(hits
            .iter()
            .all(|h| catalog.as_slice()[h.index].matches_text("utrecht")));
    }

    #[test]
    fn results_are_sorted_with_missing_coordinates_last() {
        let mut facilities = embedded_catalog().unwrap().facilities;
        facilities[0].lat = f64::NAN;
        let hits = rank_facilities(&facilities, &SportFilter::All, None, DEFAULT_ORIGIN);
        assert_eq!(hits.len(), facilities.len());
        assert_eq!(hits.last().map(|h| (h.index, h.distance_km)), Some((0, None)));
        let distances: Vec<f64> = hits.iter().filter_map(|h| h.distance_km).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Results from any origin come back in non-decreasing distance order
            #[test]
            fn prop_sorted_by_distance(lat in 50.0f64..54.0, lng in 3.0f64..7.5) {
                let catalog = embedded_catalog().unwrap();
                let hits = rank_facilities(catalog.as_slice(), &SportFilter::All, None, LatLng::new(lat, lng));
                let distances: Vec<f64> = hits.iter().filter_map(|h| h.distance_km).collect();
                prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
                prop_assert_eq!(hits.len(), catalog.len());
            }
        }
    }
}
