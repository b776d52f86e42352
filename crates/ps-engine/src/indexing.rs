//! String-keyed lookups into the petgraph multigraph.
//!
//! The engine's public surface names nodes and edges by string (global node
//! ids, `"<component>.<edge>"` edge keys); `petgraph` itself only knows
//! about opaque `NodeIndex`/`EdgeIndex` values. These two maps are the
//! seam between the two: insertion-ordered so `nodes()`/`edges()` iterate
//! reproducibly (spec Design Notes: "store … in an insertion-ordered
//! collection to keep diagnostics reproducible").

use indexmap::IndexMap;
use petgraph::graph::{EdgeIndex, NodeIndex};

#[derive(Debug, Clone, Default)]
pub struct NodeIndexMap {
    by_name: IndexMap<String, NodeIndex>,
}

impl NodeIndexMap {
    pub fn get(&self, name: &str) -> Option<NodeIndex> {
        self.by_name.get(name).copied()
    }

    pub fn insert(&mut self, name: String, idx: NodeIndex) {
        self.by_name.insert(name, idx);
    }

    pub fn remove(&mut self, name: &str) -> Option<NodeIndex> {
        self.by_name.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EdgeIndexMap {
    by_key: IndexMap<String, EdgeIndex>,
}

impl EdgeIndexMap {
    pub fn get(&self, key: &str) -> Option<EdgeIndex> {
        self.by_key.get(key).copied()
    }

    pub fn insert(&mut self, key: String, idx: EdgeIndex) {
        self.by_key.insert(key, idx);
    }

    pub fn remove(&mut self, key: &str) -> Option<EdgeIndex> {
        self.by_key.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.by_key
            .keys()
            .map(String::as_str)
            .filter(move |k| k.starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }
}
