use super::labels::label_for;
use super::taxonomy::canonical_keys;
use crate::models::FacilityLocation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filter key meaning "no sport filter".
pub const ALL_SPORTS_KEY: &str = "all";
pub const ALL_SPORTS_LABEL: &str = "Alle sporten";

/// One entry of the sport dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportOption {
    pub key: String,
    pub label: String,
}

/// Dropdown options: "all sports" first, then every translated canonical
/// key present in `facilities`, ordered by label.
pub fn sport_options(facilities: &[FacilityLocation]) -> Vec<SportOption> {
    let keys: BTreeSet<String> = facilities
        .iter()
        .flat_map(|f| canonical_keys(&f.sports))
        .collect();

    let mut opts: Vec<SportOption> = keys
        .into_iter()
        .filter_map(|key| {
            label_for(&key).map(|label| SportOption { key, label: label.to_string() })
        })
        .collect();
    opts.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.key.cmp(&b.key))
    });

    let mut out = Vec::with_capacity(opts.len() + 1);
    out.push(SportOption {
        key: ALL_SPORTS_KEY.to_string(),
        label: ALL_SPORTS_LABEL.to_string(),
    });
    out.extend(opts);
    out
}
