//! Node implementation for the location trie.
//!
//! Nodes live in the trie's arena and refer to each other by [`NodeId`].
//! The parent link is an index, so the arena owns every node exactly once.

use hashbrown::HashMap;

use super::advertisers::AdvertiserSet;

/// Index of a node inside a [`LocationTrie`](super::LocationTrie) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node, representing location `/`.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the location trie.
///
/// Each node represents one path prefix, e.g. `/ru/svrd`.
#[derive(Debug, Default)]
pub struct TrieNode {
    /// Folded segment to child node
    pub(crate) children: HashMap<String, NodeId>,

    /// Advertisers registered exactly at this prefix
    pub(crate) advertisers: AdvertiserSet,

    /// Node one level up; `None` only for the root
    pub(crate) parent: Option<NodeId>,
}

impl TrieNode {
    /// Creates an empty node hanging under `parent`.
    pub(crate) fn with_parent(parent: NodeId) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Advertisers registered at this node (ancestors not included).
    pub fn advertisers(&self) -> &AdvertiserSet {
        &self.advertisers
    }

    /// The parent node, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether this node is the root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
