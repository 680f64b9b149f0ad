//! Burkhard-Keller tree over Levenshtein distance.
//!
//! Keys are lowercased composite strings (see [`Song::index_key`]); each node
//! carries the references inserted under exactly that key. Children hang off
//! their parent by integer distance, which lets a bounded query skip whole
//! subtrees through the triangle inequality.
//!
//! [`Song::index_key`]: crate::song::Song::index_key

use log::trace;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

#[derive(Debug)]
struct BkNode {
    key: String,
    references: Vec<String>,
    /// Edge label is the distance between this node's key and the child's.
    children: BTreeMap<usize, BkNode>,
}

impl BkNode {
    fn new(key: String, reference: &str) -> Self {
        Self {
            key,
            references: vec![reference.to_string()],
            children: BTreeMap::new(),
        }
    }
}

/// Fuzzy index answering "references within edit distance `d`".
#[derive(Debug, Default)]
pub struct BkTree {
    root: Option<BkNode>,
    len: usize,
}

impl BkTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `reference` under `key`. A key already present gains the
    /// reference (once); a new key becomes a leaf.
    pub fn insert(&mut self, key: &str, reference: &str) {
        if key.is_empty() {
            return;
        }
        let key = key.to_ascii_lowercase();

        if self.root.is_none() {
            self.root = Some(BkNode::new(key, reference));
            self.len = 1;
            return;
        }
        let Some(mut node) = self.root.as_mut() else {
            return;
        };

        loop {
            let dist = levenshtein(&key, &node.key);
            if dist == 0 {
                if !node.references.iter().any(|r| r == reference) {
                    node.references.push(reference.to_string());
                }
                return;
            }

            match node.children.entry(dist) {
                Entry::Occupied(child) => node = child.into_mut(),
                Entry::Vacant(slot) => {
                    slot.insert(BkNode::new(key, reference));
                    self.len += 1;
                    return;
                }
            }
        }
    }

    /// References stored under any key within `max_distance` of `query`,
    /// in depth-first visiting order. An empty query or a negative distance
    /// yields nothing.
    #[must_use]
    pub fn search_similar(&self, query: &str, max_distance: i64) -> Vec<String> {
        let mut results = Vec::new();
        let (Some(root), Ok(max_distance)) = (self.root.as_ref(), usize::try_from(max_distance)) else {
            return results;
        };
        if query.is_empty() {
            return results;
        }

        let query = query.to_ascii_lowercase();
        collect_within(root, &query, max_distance, &mut results);
        trace!("BK query {query:?} (d={max_distance}) matched {} references", results.len());
        results
    }

    /// Forget `reference` on the node whose key is exactly `key`.
    ///
    /// The node stays in place because its descendants are positioned
    /// relative to its key; with no references left it simply stops
    /// contributing to results.
    pub fn remove_reference(&mut self, key: &str, reference: &str) {
        if key.is_empty() {
            return;
        }
        let key = key.to_ascii_lowercase();

        let mut current = self.root.as_mut();
        while let Some(node) = current {
            let dist = levenshtein(&key, &node.key);
            if dist == 0 {
                node.references.retain(|r| r != reference);
                return;
            }
            current = node.children.get_mut(&dist);
        }
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Number of distinct keys in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

fn collect_within(node: &BkNode, query: &str, max_distance: usize, results: &mut Vec<String>) {
    let dist = levenshtein(query, &node.key);
    if dist <= max_distance {
        results.extend(node.references.iter().cloned());
    }

    let low = dist.saturating_sub(max_distance);
    let high = dist.saturating_add(max_distance);
    for child in node.children.range(low..=high).map(|(_, child)| child) {
        collect_within(child, query, max_distance, results);
    }
}

/// Levenshtein distance with unit insert, delete and substitute costs,
/// compared after ASCII lowercasing both sides.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(&a.to_ascii_lowercase(), &b.to_ascii_lowercase())
}
