//! Parser for the advertiser declaration format.
//!
//! One declaration per line:
//!
//! ```text
//! Yandex.Direct: /ru
//! Revdinsky rabochy: /ru/svrd/revda, /ru/svrd/pervik
//! ```
//!
//! Malformed lines and locations are skipped, never reported as errors.

use serde::Serialize;

use super::normalize::{normalize_location, segments};
use crate::data_structures::LocationTrie;

/// A single well-formed line: an advertiser and its raw location pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Trimmed advertiser name
    pub name: &'a str,
    /// Trimmed, non-empty location pieces in declaration order
    pub locations: Vec<&'a str>,
}

/// Parses one line.
///
/// # Returns
///
/// `None` if the line has no colon, an empty name, or an empty location list.
pub fn parse_declaration(line: &str) -> Option<Declaration<'_>> {
    let line = line.trim();
    let (name, locations) = line.split_once(':')?;

    let name = name.trim();
    let locations = locations.trim();
    if name.is_empty() || locations.is_empty() {
        return None;
    }

    let locations = locations
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();

    Some(Declaration { name, locations })
}

/// Counters describing one reload pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReloadStats {
    /// Non-blank lines seen
    pub lines: usize,
    /// Lines accepted as declarations
    pub declarations: usize,
    /// Lines rejected as malformed
    pub skipped_lines: usize,
    /// Advertiser placements added to the trie
    pub placements: usize,
    /// Nodes in the resulting trie, root included
    pub nodes: usize,
}

/// Builds a fresh trie from declaration text.
///
/// The returned trie is not shared with anything; the caller decides when
/// to publish it.
pub fn build_trie(text: &str) -> (LocationTrie, ReloadStats) {
    let mut trie = LocationTrie::new();
    let mut stats = ReloadStats::default();

    let lines = text
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty());

    for line in lines {
        stats.lines += 1;

        let Some(declaration) = parse_declaration(line) else {
            tracing::debug!(line, "Skipping malformed declaration");
            stats.skipped_lines += 1;
            continue;
        };
        stats.declarations += 1;

        for piece in declaration.locations {
            let Some(location) = normalize_location(piece) else {
                continue;
            };
            if trie.insert(segments(&location), declaration.name) {
                stats.placements += 1;
            }
        }
    }

    stats.nodes = trie.node_count();
    (trie, stats)
}
