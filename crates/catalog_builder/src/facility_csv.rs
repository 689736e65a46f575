//! Facility CSV import - OpenStreetMap export → FacilityCatalog
//!
//! Expected columns (any order, all optional except `lat`/`lon`):
//! `id, name, lat, lon, sport, leisure, addr:street, addr:housenumber,
//! addr:city, phone, contact:phone, website, url, contact:website,
//! contact:url, brand`
//!
//! Rows without usable coordinates are skipped and counted. Missing names
//! fall back to the sport, then the leisure tag, then "Onbekende locatie".

use anyhow::{Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use sf_core::models::{FacilityId, FacilityLocation};
use sf_core::LatLng;
use std::path::Path;
use tracing::warn;

pub const UNKNOWN_TITLE: &str = "Onbekende locatie";

/// Columns searched for a website, in priority order
const LINK_COLUMNS: &[&str] = &["website", "url", "contact:website", "contact:url"];

/// Fitness chains recognised by name or brand keywords
const CHAIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("Basic-Fit", &["basic fit", "basic-fit"]),
    ("SportCity", &["sportcity", "sport city"]),
    ("Anytime Fitness", &["anytime fitness"]),
    ("Fit For Free", &["fit for free"]),
    ("TrainMore", &["trainmore", "train more"]),
    ("Snap Fitness", &["snap fitness"]),
    ("Jetts Fitness", &["jetts"]),
    ("Curves", &["curves"]),
    ("Fit20", &["fit20", "fit 20"]),
];

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
    pub skipped_no_coordinates: u32,
    pub duplicates: u32,
}

/// Header name → column index, so columns may appear in any order.
struct Columns(FxHashMap<String, usize>);

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.trim().to_lowercase(), i))
                .collect(),
        )
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, name: &str) -> &'r str {
        self.0
            .get(name)
            .and_then(|&i| record.get(i))
            .map(clean_str)
            .unwrap_or("")
    }
}

/// Trim; treat pandas' `nan` as empty.
pub fn clean_str(raw: &str) -> &str {
    let s = raw.trim();
    if s.eq_ignore_ascii_case("nan") {
        ""
    } else {
        s
    }
}

fn title_case_tag(tag: &str) -> String {
    tag.replace('_', " ")
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name, else the sport, else the leisure tag, title-cased.
pub fn title_from_row(name: &str, sport: &str, leisure: &str) -> String {
    if !name.is_empty() {
        name.to_string()
    } else if !sport.is_empty() {
        title_case_tag(sport)
    } else if !leisure.is_empty() {
        title_case_tag(leisure)
    } else {
        UNKNOWN_TITLE.to_string()
    }
}

/// Normalise a link: keep http(s), prefix `https://` for `www.` or dotted hosts.
pub fn ensure_http(url: &str) -> Option<String> {
    let u = clean_str(url);
    if u.is_empty() {
        return None;
    }
    let lower = u.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(u.to_string())
    } else if lower.starts_with("www.") || u.contains('.') {
        Some(format!("https://{u}"))
    } else {
        None
    }
}

/// Unique links from one row; cells may hold several comma/space separated urls.
pub fn collect_links<'a>(cells: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    cells
        .into_iter()
        .flat_map(|cell| cell.split(|c: char| c == ',' || c.is_whitespace()))
        .filter_map(ensure_http)
        .filter(|link| seen.insert(link.to_lowercase()))
        .collect()
}

pub fn guess_chain(name: &str, brand: &str) -> Option<&'static str> {
    let name_l = name.to_lowercase();
    let brand_l = brand.to_lowercase();
    CHAIN_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|kw| name_l.contains(kw) || brand_l.contains(kw))
        })
        .map(|(chain, _)| *chain)
}

fn parse_id(raw: &str, row: u32) -> FacilityId {
    if raw.is_empty() {
        return FacilityId::Text(format!("row-{row}"));
    }
    raw.parse::<u64>()
        .map(FacilityId::Number)
        .unwrap_or_else(|_| FacilityId::Text(raw.to_string()))
}

fn parse_coordinates(lat: &str, lon: &str) -> Option<LatLng> {
    let position = LatLng::new(lat.parse().ok()?, lon.parse().ok()?);
    position.is_valid().then_some(position)
}

/// Parse a facility CSV into facilities plus statistics.
pub fn parse_csv(csv_path: &Path) -> Result<(Vec<FacilityLocation>, ParseStats)> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;
    parse_reader(reader)
}

pub fn parse_reader<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<(Vec<FacilityLocation>, ParseStats)> {
    let columns = Columns::new(reader.headers().context("Failed to read CSV header")?);

    let mut facilities = Vec::new();
    let mut ids = FxHashSet::default();
    let mut stats = ParseStats::default();

    for (i, record) in reader.records().enumerate() {
        stats.total_rows += 1;
        // header is line 1
        let line = i as u32 + 2;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                stats.failed += 1;
                warn!(line, error = %e, "unreadable CSV row");
                continue;
            }
        };

        let Some(position) = parse_coordinates(columns.get(&record, "lat"), columns.get(&record, "lon"))
        else {
            stats.skipped_no_coordinates += 1;
            warn!(line, "row without usable coordinates");
            continue;
        };

        let id = parse_id(columns.get(&record, "id"), line);
        if !ids.insert(id.clone()) {
            stats.duplicates += 1;
            warn!(line, id = %id, "duplicate facility id");
            continue;
        }

        let name = columns.get(&record, "name");
        let sport = columns.get(&record, "sport");
        let leisure = columns.get(&record, "leisure");

        let mut sports = Vec::new();
        if !sport.is_empty() {
            sports.push(sport.to_string());
        }
        if !leisure.is_empty() {
            sports.push(leisure.replace('_', " "));
        }

        let street = columns.get(&record, "addr:street");
        let housenumber = columns.get(&record, "addr:housenumber");
        let address = match (street.is_empty(), housenumber.is_empty()) {
            (true, _) => None,
            (false, true) => Some(street.to_string()),
            (false, false) => Some(format!("{street} {housenumber}")),
        };

        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let phone = non_empty(columns.get(&record, "phone"))
            .or_else(|| non_empty(columns.get(&record, "contact:phone")));
        let website = collect_links(LINK_COLUMNS.iter().map(|c| columns.get(&record, c)))
            .into_iter()
            .next();

        facilities.push(FacilityLocation {
            id,
            name: title_from_row(name, sport, leisure),
            lat: position.lat,
            lng: position.lng,
            sports,
            address,
            city: non_empty(columns.get(&record, "addr:city")),
            phone,
            website,
            chain: guess_chain(name, columns.get(&record, "brand")).map(str::to_string),
        });
        stats.parsed += 1;
    }

    Ok((facilities, stats))
}
