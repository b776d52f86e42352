//! The mutable multigraph a `PlumbingEngine` drives.
//!
//! Backed by `petgraph::stable_graph::StableGraph`, chosen over the plain
//! `Graph` for index stability: the engine adds and removes components
//! constantly (`add_component`/`remove_component`/`reverse_orientation`),
//! and a `StableGraph` leaves holes rather than shifting every later index
//! on removal, so `NodeIndexMap`/`EdgeIndexMap` never go stale out from
//! under a live engine. Parallel edges between the same pair of nodes
//! (spec Design Notes: "the two-directed-edges-per-physical-edge pattern
//! is load-bearing") are native to both graph kinds.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;

use crate::indexing::{EdgeIndexMap, NodeIndexMap};

/// Edge payload: the flow coefficient, keyed externally by a full
/// `"<component>.<edge>"` string via `EdgeIndexMap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeWeight {
    pub fc: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PlumbingGraph {
    inner: StableGraph<String, EdgeWeight, Directed>,
    nodes: NodeIndexMap,
    edges: EdgeIndexMap,
}

impl PlumbingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.names()
    }

    pub fn edge_keys(&self) -> impl Iterator<Item = &str> {
        self.edges.keys()
    }

    /// Returns the node's index, creating it (with no edges) if absent.
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.nodes.get(name) {
            return idx;
        }
        let idx = self.inner.add_node(name.to_string());
        self.nodes.insert(name.to_string(), idx);
        idx
    }

    /// Inserts a directed edge under `key`, creating endpoint nodes as
    /// needed. Replaces any edge already registered under `key`.
    pub fn add_edge(&mut self, key: &str, src: &str, dst: &str, fc: f64) {
        self.remove_edge(key);
        let src_idx = self.ensure_node(src);
        let dst_idx = self.ensure_node(dst);
        let edge_idx = self.inner.add_edge(src_idx, dst_idx, EdgeWeight { fc });
        self.edges.insert(key.to_string(), edge_idx);
    }

    pub fn remove_edge(&mut self, key: &str) -> bool {
        match self.edges.remove(key) {
            Some(idx) => {
                self.inner.remove_edge(idx);
                true
            }
            None => false,
        }
    }

    pub fn remove_edges_with_prefix(&mut self, prefix: &str) {
        let keys: Vec<String> = self
            .edges
            .keys_with_prefix(prefix)
            .map(str::to_string)
            .collect();
        for key in keys {
            self.remove_edge(&key);
        }
    }

    /// Removes `name` if it currently has no incident edges. Returns
    /// whether it was removed.
    pub fn remove_node_if_isolated(&mut self, name: &str) -> bool {
        let Some(idx) = self.nodes.get(name) else {
            return false;
        };
        if self.inner.neighbors_undirected(idx).next().is_some() {
            return false;
        }
        self.inner.remove_node(idx);
        self.nodes.remove(name);
        true
    }

    pub fn fc(&self, key: &str) -> Option<f64> {
        let idx = self.edges.get(key)?;
        self.inner.edge_weight(idx).map(|w| w.fc)
    }

    pub fn set_fc(&mut self, key: &str, fc: f64) -> bool {
        let Some(idx) = self.edges.get(key) else {
            return false;
        };
        if let Some(weight) = self.inner.edge_weight_mut(idx) {
            weight.fc = fc;
            true
        } else {
            false
        }
    }

    /// `(target_node, fc)` for every edge leaving `name`.
    pub fn out_edges(&self, name: &str) -> Vec<(String, f64)> {
        let Some(idx) = self.nodes.get(name) else {
            return Vec::new();
        };
        self.inner
            .edges(idx)
            .map(|e| (self.inner[e.target()].clone(), e.weight().fc))
            .collect()
    }

    /// `(source_node, fc)` for every edge entering `name`.
    pub fn in_edges(&self, name: &str) -> Vec<(String, f64)> {
        let Some(idx) = self.nodes.get(name) else {
            return Vec::new();
        };
        self.inner
            .edges_directed(idx, petgraph::Direction::Incoming)
            .map(|e| (self.inner[e.source()].clone(), e.weight().fc))
            .collect()
    }
}
