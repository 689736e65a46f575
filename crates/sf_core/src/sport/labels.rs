//! Dutch display labels keyed by canonical sport key.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const SPORT_LABELS: &[(&str, &str)] = &[
    // Team sports
    ("football", "Voetbal"),
    ("futsal", "Zaalvoetbal"),
    ("basketball", "Basketbal"),
    ("volleyball", "Volleybal"),
    ("badminton", "Badminton"),
    ("korfball", "Korfbal"),
    ("handball", "Handbal"),
    ("hockey", "Hockey"),
    ("rugby", "Rugby"),
    // Racket
    ("tennis", "Tennis"),
    ("padel", "Padel"),
    ("squash", "Squash"),
    ("table tennis", "Tafeltennis"),
    // Water
    ("swimming", "Zwemmen"),
    ("swimming pool", "Zwembad"),
    ("scuba diving", "Duiken"),
    ("water ski", "Waterskiën"),
    ("canoe", "Kano"),
    // Fitness and indoor
    ("fitness", "Fitness"),
    ("fitness centre", "Fitnesscentrum"),
    ("sports centre", "Sportcentrum"),
    ("sports hall", "Sporthal"),
    ("multi", "Multi-sport"),
    ("pilates", "Pilates"),
    ("yoga", "Yoga / Pilates"),
    ("spinning", "Spinning"),
    ("crossfit", "CrossFit"),
    ("gymnastics", "Gymnastiek"),
    ("trampoline", "Trampoline"),
    ("climbing", "Klimmen"),
    ("climbing adventure", "Klimpark"),
    // Martial arts
    ("martial arts", "Vechtsport"),
    ("boxing", "Boksen"),
    ("kickboxing", "Kickboksen"),
    ("krav maga", "Krav Maga"),
    // Outdoor and recreation
    ("running", "Hardlopen"),
    ("cycling", "Fietsen"),
    ("mtb", "Mountainbiken"),
    ("bmx", "BMX"),
    ("skating", "Skaten"),
    ("roller skating", "Rolschaatsen"),
    ("golf", "Golf"),
    ("petanque", "Jeu de boules"),
    ("equestrian", "Paardrijden"),
    ("archery", "Boogschieten"),
    ("shooting", "Schietsport"),
    ("klootschieten", "Klootschieten"),
    ("motocross", "Motocross"),
    ("karting", "Karten"),
    ("track", "Circuit"),
    // Games and other
    ("billiards", "Biljart"),
    ("snooker", "Snooker"),
    ("pool", "Pool"),
    ("bowling", "Bowlen"),
    ("bowling alley", "Bowlingbaan"),
    ("escape game", "Escape room"),
    ("rc car", "RC-auto"),
    ("miniature", "Midgetgolf"),
];

static LABELS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SPORT_LABELS.iter().copied().collect());

/// Dutch label for an already lowercased key.
pub fn label_for(key: &str) -> Option<&'static str> {
    LABELS.get(key).copied()
}
