//! Sport taxonomy: raw labels to canonical keys and Dutch display labels.

pub mod labels;
pub mod options;
pub mod taxonomy;

pub use labels::label_for;
pub use options::{sport_options, SportOption, ALL_SPORTS_KEY, ALL_SPORTS_LABEL};
pub use taxonomy::{
    canonical_keys, canonical_sport_key, has_translation, normalize_sports, offers_sport,
    split_sports, sport_badges, strip_placeholders, translate_sport, NormalizedSport,
};
