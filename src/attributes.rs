//! Best-effort attribute derivation from product text.
//!
//! Air-conditioner listings on the target storefronts bury capacity, cooling
//! type, and model numbers inside free-form names and descriptions (mixed
//! Arabic/English). These helpers pull them out with small pattern tables;
//! a miss is always `None`, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::models::ProductAttributes;
use crate::text::{normalize_whitespace, strip_tags};

static CAPACITY_ARABIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*حصان").expect("capacity pattern is valid"));
static CAPACITY_HP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*hp").expect("capacity pattern is valid"));
static MODEL_HYPHENATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([A-Z]{2,4}-[A-Z0-9]+)").expect("model pattern is valid"));
static MODEL_COMPACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([A-Z]{2,4}[0-9]{2,4}[A-Z0-9]*)").expect("model pattern is valid"));
static BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("br pattern is valid"));
static LI_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<li[^>]*>.*?</li>").expect("li pattern is valid"));

const COOL_HEAT_MARKERS: &[&str] = &[
    "بارد ساخن",
    "بارد – ساخن",
    "بارد - ساخن",
    "cool hot",
    "cool heat",
];
const COOL_ONLY_MARKERS: &[&str] = &["بارد فقط", "بارد", "cool only", "cooling only"];

const MAX_FEATURES: usize = 6;

impl ProductAttributes {
    /// Derive all attributes from a product name and its raw (un-stripped)
    /// description markup.
    pub fn derive(name: &str, raw_description: &str) -> Self {
        let full_text = format!("{} {}", name, strip_tags(raw_description));
        Self {
            capacity: extract_capacity(&full_text),
            cooling_type: extract_cooling_type(&full_text),
            model: extract_model(name),
            features: parse_features(raw_description),
        }
    }
}

/// Cooling capacity in horsepower, normalized to the Arabic form `N حصان`.
pub fn extract_capacity(text: &str) -> Option<String> {
    CAPACITY_ARABIC
        .captures(text)
        .or_else(|| CAPACITY_HP.captures(text))
        .map(|captures| format!("{} حصان", &captures[1]))
}

/// Cool/heat vs cool-only, from Arabic and English marker phrases. The
/// cool/heat markers are checked first because "بارد" alone also appears in
/// cool/heat listings.
pub fn extract_cooling_type(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if COOL_HEAT_MARKERS.iter().any(|m| lower.contains(m)) {
        Some("بارد ساخن".to_string())
    } else if COOL_ONLY_MARKERS.iter().any(|m| lower.contains(m)) {
        Some("بارد فقط".to_string())
    } else {
        None
    }
}

/// Manufacturer model number from a product name, e.g. `AH-X12` or `GVFG18`.
pub fn extract_model(name: &str) -> Option<String> {
    MODEL_HYPHENATED
        .captures(name)
        .or_else(|| MODEL_COMPACT.captures(name))
        .map(|captures| captures[1].to_uppercase())
}

/// Feature bullets from raw description markup: lines split on `<br>` plus
/// `<li>` items, cleaned and length-filtered, capped at six.
pub fn parse_features(raw_description: &str) -> Vec<String> {
    let mut features = Vec::new();

    // List items are handled separately below; drop them from the line pass
    // so they don't show up as one concatenated pseudo-line.
    let without_lists = LI_BLOCK.replace_all(raw_description, "");
    for line in BR.split(&without_lists) {
        let clean = strip_tags(line);
        let len = clean.chars().count();
        if len > 5 && len < 100 {
            features.push(clean);
        }
    }

    let fragment = Html::parse_fragment(raw_description);
    let items = Selector::parse("li").expect("li selector is valid");
    for item in fragment.select(&items) {
        let text: String = item.text().collect();
        let clean = normalize_whitespace(&text);
        if clean.chars().count() > 5 && !features.contains(&clean) {
            features.push(clean);
        }
    }

    features.truncate(MAX_FEATURES);
    features
}
