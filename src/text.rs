//! Small text-cleanup helpers shared by the extractor and attribute parsing.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Collapse runs of whitespace (including non-breaking spaces) to a single
/// space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove HTML tags from a raw markup snippet, replacing each with a space so
/// adjacent text nodes don't run together. Entities like `&nbsp;` are mapped
/// to plain spaces.
pub fn strip_tags(raw: &str) -> String {
    let without_tags = TAG.replace_all(raw, " ");
    normalize_whitespace(&without_tags.replace("&nbsp;", " "))
}
