//! Data structures for the Ad Locator.
//!
//! This module contains the path trie that backs the location store.
//! Tries are built on a single thread and then shared read-only, so no
//! structure here carries its own locking.

pub mod location_trie;

// Re-export common data structures
pub use location_trie::{AdvertiserSet, LocationTrie, NodeId, TrieNode};
pub(crate) use location_trie::fold;
