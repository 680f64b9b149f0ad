//! Prefix index used for autocomplete.
//!
//! Every node keeps the list of references whose indexed word passes through
//! it, so a prefix query is a walk of `prefix.len()` steps followed by a copy
//! of that list. Nothing below the prefix node is visited.
//!
//! Words are folded with ASCII lowercase; any other character, spaces and
//! punctuation included, is indexed as-is.

use std::collections::HashMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// References reachable through this node, in insertion order.
    references: Vec<String>,
}

/// Trie mapping lowercased words to song references.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
}

impl PrefixIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `reference` under `word`. The reference is recorded at every
    /// node of the path, at most once per node. Empty words are ignored.
    pub fn insert(&mut self, word: &str, reference: &str) {
        if word.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for c in word.chars().map(|c| c.to_ascii_lowercase()) {
            node = node.children.entry(c).or_default();
            if !node.references.iter().any(|r| r == reference) {
                node.references.push(reference.to_string());
            }
        }
    }

    /// All references indexed under a word starting with `prefix`.
    ///
    /// The empty prefix matches nothing.
    #[must_use]
    pub fn search_by_prefix(&self, prefix: &str) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }

        let mut node = &self.root;
        for c in prefix.chars().map(|c| c.to_ascii_lowercase()) {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        node.references.clone()
    }

    /// Drop `reference` from every node along `word`'s path. Nodes left
    /// without references are pruned together with their subtree.
    pub fn remove(&mut self, word: &str, reference: &str) {
        if word.is_empty() {
            return;
        }

        let path: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
        remove_along(&mut self.root, &path, reference);
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

// A child's references are always a superset of its descendants', so an
// emptied child can go with everything under it.
fn remove_along(node: &mut TrieNode, path: &[char], reference: &str) {
    let Some((&c, rest)) = path.split_first() else {
        return;
    };

    let emptied = match node.children.get_mut(&c) {
        Some(child) => {
            child.references.retain(|r| r != reference);
            remove_along(child, rest, reference);
            child.references.is_empty()
        }
        None => return,
    };

    if emptied {
        node.children.remove(&c);
    }
}
