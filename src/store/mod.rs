//! Location store.
//!
//! [`LocationStore`] holds the active [`LocationTrie`] and answers which
//! advertisers are visible at a location. A reload parses the whole input
//! into a detached trie and then swaps it in, so readers only ever see a
//! complete tree.
//!
//! # Concurrency
//!
//! The active tree sits behind an `RwLock<Arc<LocationTrie>>`. Both locks
//! are held only long enough to clone or replace the `Arc`: a search walks
//! the snapshot it captured with no lock held, and a reload builds its tree
//! before taking the write lock.

mod normalize;
mod parser;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::data_structures::{AdvertiserSet, LocationTrie};
use crate::error::store::StoreError;
use crate::error::AdLocatorResult;

pub use normalize::{is_root, normalize_location, segments, ROOT_LOCATION};
pub use parser::{build_trie, parse_declaration, Declaration, ReloadStats};

/// In-memory store of advertisers keyed by hierarchical location.
#[derive(Debug)]
pub struct LocationStore {
    /// Currently published tree
    active: RwLock<Arc<LocationTrie>>,
}

impl LocationStore {
    /// Creates a store with an empty tree.
    pub fn new() -> Self {
        Self {
            active: RwLock::new(Arc::new(LocationTrie::new())),
        }
    }

    /// Normalizes a location the same way reload and search do.
    ///
    /// See [`normalize_location`].
    pub fn normalize(raw: &str) -> Option<String> {
        normalize_location(raw)
    }

    /// Replaces the whole tree with the declarations in `text`.
    ///
    /// Malformed lines are skipped. Blank input clears the store.
    ///
    /// # Returns
    ///
    /// Counters describing the parsed input.
    pub fn reload(&self, text: &str) -> ReloadStats {
        let (trie, stats) = build_trie(text);
        let trie = Arc::new(trie);

        let previous = std::mem::replace(&mut *self.active.write(), trie);
        // The old tree is freed here, outside the lock, once no reader holds it.
        drop(previous);

        tracing::info!(
            lines = stats.lines,
            declarations = stats.declarations,
            skipped_lines = stats.skipped_lines,
            placements = stats.placements,
            nodes = stats.nodes,
            "Published new location tree"
        );
        stats
    }

    /// Reads a UTF-8 declaration file and reloads from its contents.
    ///
    /// # Arguments
    ///
    /// * `path` - File to read.
    /// * `max_bytes` - Largest accepted file size.
    ///
    /// # Returns
    ///
    /// * `Ok(ReloadStats)` - The tree was replaced.
    /// * `Err(AdLocatorError)` - The file was unreadable or too large; the
    ///   active tree is left untouched.
    pub fn reload_from_path<P: AsRef<Path>>(
        &self,
        path: P,
        max_bytes: usize,
    ) -> AdLocatorResult<ReloadStats> {
        let path = path.as_ref();
        let read_error = |source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        };

        let size = fs::metadata(path).map_err(read_error)?.len();
        if size > max_bytes as u64 {
            return Err(StoreError::InputTooLarge {
                path: path.to_path_buf(),
                size,
                limit: max_bytes,
            }
            .into());
        }

        let text = fs::read_to_string(path).map_err(read_error)?;
        tracing::debug!(path = %path.display(), size, "Loaded declaration file");
        Ok(self.reload(&text))
    }

    /// Returns the advertisers visible at `location`: those registered at the
    /// location itself and at each of its ancestors.
    ///
    /// The root location returns only root advertisers. Blank input or a
    /// location missing from the tree returns an empty set.
    pub fn search(&self, location: &str) -> AdvertiserSet {
        let Some(normalized) = normalize_location(location) else {
            return AdvertiserSet::new();
        };

        let trie = self.snapshot();
        if is_root(&normalized) {
            return trie.root().advertisers().clone();
        }

        match trie.find(segments(&normalized)) {
            Some(node) => trie.collect_advertisers(node),
            None => {
                tracing::debug!(location = %normalized, "Location not present in tree");
                AdvertiserSet::new()
            }
        }
    }

    /// Returns the tree that is active right now.
    pub fn snapshot(&self) -> Arc<LocationTrie> {
        Arc::clone(&self.active.read())
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}
