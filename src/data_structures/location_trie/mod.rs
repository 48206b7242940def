//! Location Trie Implementation
//!
//! This module provides the path trie behind the location store. Each node
//! stands for one location prefix (`/`, `/ru`, `/ru/svrd`, ...) and holds the
//! advertisers registered exactly there. Searching a location unions the
//! advertisers of the target node with those of all of its ancestors.
//!
//! Nodes are kept in an arena (`Vec<TrieNode>`) and link upwards by index,
//! so a trie is a plain owned value that can be built on one thread and then
//! shared read-only behind an `Arc`.

mod advertisers;
mod node;

pub use advertisers::AdvertiserSet;
pub use node::{NodeId, TrieNode};

pub(crate) use advertisers::fold;

/// Hierarchical trie mapping location segments to advertiser sets.
///
/// Key features:
/// * Case-insensitive segment lookup
/// * Parent links for ancestor walks without reference cycles
/// * Built once, then immutable while shared between readers
#[derive(Debug)]
pub struct LocationTrie {
    /// Node arena; index 0 is the root
    nodes: Vec<TrieNode>,
}

impl LocationTrie {
    /// Creates a trie holding only an empty root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Returns the root node.
    pub fn root(&self) -> &TrieNode {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Returns the node with the given id, if it belongs to this trie.
    pub fn node(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id.0)
    }

    /// Looks up a direct child of `parent` by segment, ignoring case.
    pub fn child(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        self.node(parent)?.children.get(&fold(segment)).copied()
    }

    /// Inserts an advertiser at the node reached by `segments`, creating
    /// missing nodes on the way. An empty segment sequence targets the root.
    ///
    /// # Arguments
    ///
    /// * `segments` - Path segments from the root downwards.
    /// * `advertiser` - Name to register at the terminal node.
    ///
    /// # Returns
    ///
    /// `true` if the advertiser was not yet registered at that node.
    pub fn insert<'a, I>(&mut self, segments: I, advertiser: &str) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = NodeId::ROOT;
        for segment in segments {
            node = self.ensure_child(node, segment);
        }
        self.nodes[node.0].advertisers.insert(advertiser)
    }

    /// Walks from the root along `segments`.
    ///
    /// # Returns
    ///
    /// The id of the terminal node, or `None` as soon as a segment has no
    /// matching child.
    pub fn find<'a, I>(&self, segments: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments
            .into_iter()
            .try_fold(NodeId::ROOT, |node, segment| self.child(node, segment))
    }

    /// Iterates from `id` up to and including the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            trie: self,
            next: Some(id),
        }
    }

    /// Unions the advertisers of `id` and every ancestor up to the root.
    pub fn collect_advertisers(&self, id: NodeId) -> AdvertiserSet {
        let mut collected = AdvertiserSet::new();
        for node in self.ancestors(id) {
            collected.extend_from(&node.advertisers);
        }
        collected
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the trie holds no advertisers at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.root().advertisers.is_empty()
    }

    fn ensure_child(&mut self, parent: NodeId, segment: &str) -> NodeId {
        let key = fold(segment);
        if let Some(&child) = self.nodes[parent.0].children.get(&key) {
            return child;
        }

        let child = NodeId(self.nodes.len());
        self.nodes.push(TrieNode::with_parent(parent));
        self.nodes[parent.0].children.insert(key, child);
        child
    }
}

impl Default for LocationTrie {
    fn default() -> Self {
        Self::new()
    }
}

/// Upward iterator over a node and its ancestors.
#[derive(Debug)]
pub struct Ancestors<'a> {
    trie: &'a LocationTrie,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TrieNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.trie.node(self.next?)?;
        self.next = node.parent;
        Some(node)
    }
}
