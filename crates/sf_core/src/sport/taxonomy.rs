//! Raw sport label normalization.
//!
//! Source data stores sports as free text such as `"soccer;<na>/Futsal"`.
//! Tokens are split on `; , . /`, placeholders are removed, and synonyms
//! collapse onto one canonical key so filters and badges deduplicate.

use super::labels::label_for;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Missing-data marker written by the CSV export.
pub const PLACEHOLDER: &str = "<na>";

const DELIMITERS: &[char] = &[';', ',', '.', '/'];

/// Canonical key with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedSport {
    pub key: String,
    pub label: String,
}

/// Removes every `<na>` occurrence, case-insensitively, and trims.
pub fn strip_placeholders(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    let mut out = String::with_capacity(raw.len());
    let mut rest = 0;
    // ASCII lowercasing keeps byte offsets aligned with `raw`.
    for (start, _) in lower.match_indices(PLACEHOLDER) {
        out.push_str(&raw[rest..start]);
        rest = start + PLACEHOLDER.len();
    }
    out.push_str(&raw[rest..]);
    out.trim().to_string()
}

fn is_placeholder_token(token: &str) -> bool {
    token.is_empty() || token == "na"
}

/// Splits a raw entry into lowercased tokens, dropping placeholders.
pub fn split_sports(raw: &str) -> Vec<String> {
    let cleaned = strip_placeholders(raw);
    if cleaned.is_empty() {
        return Vec::new();
    }

    cleaned
        .split(DELIMITERS)
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !is_placeholder_token(s))
        .collect()
}

/// Maps a token onto its canonical key.
pub fn canonical_sport_key(raw: &str) -> String {
    let k = raw.trim().to_lowercase();
    match k.as_str() {
        "boules" | "petanque" => "petanque".to_string(),
        "soccer" | "football" => "football".to_string(),
        "10pin" | "9pin" | "bowling alley" => "bowling".to_string(),
        "exercise" | "fitness station" => "fitness".to_string(),
        "sports centre" | "sports center" => "sports centre".to_string(),
        "scuba" => "scuba diving".to_string(),
        "field hockey" => "hockey".to_string(),
        _ if k.contains("yoga") || k.contains("pilates") => "yoga".to_string(),
        _ => k,
    }
}

/// Dutch label for a token, or the token title-cased when untranslated.
pub fn translate_sport(raw: &str) -> Option<String> {
    let cleaned = strip_placeholders(raw);
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("na") {
        return None;
    }

    let key = cleaned.to_lowercase();
    if let Some(label) = label_for(&key) {
        return Some(label.to_string());
    }

    Some(
        cleaned
            .split(' ')
            .map(title_case_word)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

pub fn has_translation(raw: &str) -> bool {
    label_for(&raw.trim().to_lowercase()).is_some()
}

/// Canonical keys for a facility's raw sport entries.
pub fn canonical_keys<S: AsRef<str>>(entries: &[S]) -> BTreeSet<String> {
    entries
        .iter()
        .flat_map(|entry| split_sports(entry.as_ref()))
        .map(|token| canonical_sport_key(&token))
        .filter(|key| !key.is_empty())
        .collect()
}

/// Whether any raw entry normalizes to `key`.
pub fn offers_sport<S: AsRef<str>>(entries: &[S], key: &str) -> bool {
    entries.iter().any(|entry| {
        split_sports(entry.as_ref())
            .iter()
            .any(|token| canonical_sport_key(token) == key)
    })
}

/// Canonical sports with labels, first-seen order, one entry per key.
pub fn normalize_sports<S: AsRef<str>>(entries: &[S]) -> Vec<NormalizedSport> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for entry in entries {
        for token in split_sports(entry.as_ref()) {
            let key = canonical_sport_key(&token);
            if !seen.insert(key.clone()) {
                continue;
            }
            if let Some(label) = translate_sport(&key) {
                out.push(NormalizedSport { key, label });
            }
        }
    }
    out
}

/// Display labels for listing badges, deduplicated by label.
pub fn sport_badges<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    let mut badges: Vec<String> = Vec::new();
    for sport in normalize_sports(entries) {
        if !badges.contains(&sport.label) {
            badges.push(sport.label);
        }
    }
    badges
}
