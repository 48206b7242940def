//! Canonical form of location paths.
//!
//! Both the reload parser and search go through [`normalize_location`], so
//! stored and queried locations agree on one spelling.

use crate::data_structures::fold;

/// Canonical location of the root node.
pub const ROOT_LOCATION: &str = "/";

/// Normalizes a location path.
///
/// Outer whitespace is trimmed, backslashes become slashes, empty segments
/// vanish, whitespace inside a segment is deleted (`"svrd  revda"` becomes
/// `"svrdrevda"`), and the result is lower-cased with a single leading slash
/// and no trailing slash.
///
/// # Returns
///
/// `None` for empty or all-whitespace input, `"/"` when no segment survives,
/// otherwise `/seg1/seg2/...`.
pub fn normalize_location(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unified = trimmed.replace('\\', "/");
    if unified == ROOT_LOCATION {
        return Some(ROOT_LOCATION.to_string());
    }

    let segments: Vec<String> = unified
        .split('/')
        .map(|segment| {
            segment
                .trim()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return Some(ROOT_LOCATION.to_string());
    }

    Some(fold(&format!("/{}", segments.join("/"))))
}

/// Splits a normalized location into its segments. The root has none.
pub fn segments(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split('/').filter(|segment| !segment.is_empty())
}

/// Whether a normalized location names the root.
pub fn is_root(normalized: &str) -> bool {
    normalized == ROOT_LOCATION
}
