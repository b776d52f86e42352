//! Immutable (per-state) plumbing component description.
//!
//! A component is a small multigraph in its own right: a handful of
//! internal nodes, directed edges with unique keys, and a map from state
//! name to the flow coefficient each edge carries while that state is
//! active. Components are built once (by `ps-pdl`, or by hand in tests) and
//! deep-copied into the engine; the copy living inside the engine is the
//! only one that ever mutates.

use indexmap::{IndexMap, IndexSet};

use ps_core::units::FC_MAX;

use crate::error::{ComponentError, ComponentIssue, ComponentResult};
use crate::ids::ComponentNodeId;

/// One directed edge in a component's internal graph, as supplied at
/// construction time. Kept as a flat list (rather than folded straight
/// into a map) so duplicate keys can be detected instead of silently
/// overwriting each other.
#[derive(Clone, Debug)]
pub struct EdgeDef {
    pub key: String,
    pub src: ComponentNodeId,
    pub dst: ComponentNodeId,
}

impl EdgeDef {
    pub fn new(key: impl Into<String>, src: ComponentNodeId, dst: ComponentNodeId) -> Self {
        Self {
            key: key.into(),
            src,
            dst,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlumbingComponent {
    name: String,
    edges: IndexMap<String, (ComponentNodeId, ComponentNodeId)>,
    states: IndexMap<String, IndexMap<String, f64>>,
    current_state: String,
    had_duplicate_edge_keys: bool,
}

impl PlumbingComponent {
    pub fn new(
        name: impl Into<String>,
        edges: Vec<EdgeDef>,
        states: IndexMap<String, IndexMap<String, f64>>,
        current_state: impl Into<String>,
    ) -> Self {
        let supplied = edges.len();
        let mut map = IndexMap::with_capacity(supplied);
        for edge in edges {
            map.insert(edge.key, (edge.src, edge.dst));
        }
        Self {
            name: name.into(),
            had_duplicate_edge_keys: map.len() != supplied,
            edges: map,
            states,
            current_state: current_state.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edge_keys(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn edge_endpoints(&self, key: &str) -> Option<(&ComponentNodeId, &ComponentNodeId)> {
        self.edges.get(key).map(|(s, d)| (s, d))
    }

    pub fn node_ids(&self) -> IndexSet<ComponentNodeId> {
        let mut set = IndexSet::new();
        for (src, dst) in self.edges.values() {
            set.insert(src.clone());
            set.insert(dst.clone());
        }
        set
    }

    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    pub fn set_current_state(&mut self, state: &str) -> ComponentResult<()> {
        if !self.states.contains_key(state) {
            return Err(ComponentError::UnknownState {
                component: self.name.clone(),
                state: state.to_string(),
            });
        }
        self.current_state = state.to_string();
        Ok(())
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    pub fn fc_map(&self, state: &str) -> Option<&IndexMap<String, f64>> {
        self.states.get(state)
    }

    pub fn current_fc_map(&self) -> &IndexMap<String, f64> {
        self.states
            .get(&self.current_state)
            .expect("current_state always names an existing state once set via set_current_state or construction")
    }

    pub fn fc_of(&self, state: &str, edge: &str) -> ComponentResult<f64> {
        self.fc_map(state)
            .and_then(|m| m.get(edge))
            .copied()
            .ok_or_else(|| ComponentError::UnknownEdge {
                component: self.name.clone(),
                edge: edge.to_string(),
            })
    }

    /// Overwrites a single edge's FC within a single state, used by
    /// `set_teq` to rebind a component's equilibration time in place.
    pub fn set_fc(&mut self, state: &str, edge: &str, fc: f64) -> ComponentResult<()> {
        let component = self.name.clone();
        let fc_map = self
            .states
            .get_mut(state)
            .ok_or_else(|| ComponentError::UnknownState {
                component: component.clone(),
                state: state.to_string(),
            })?;
        let slot = fc_map
            .get_mut(edge)
            .ok_or_else(|| ComponentError::UnknownEdge {
                component,
                edge: edge.to_string(),
            })?;
        *slot = fc;
        Ok(())
    }

    /// A component "toggles" if it has more than one state to choose from
    /// (`list_toggles` on the engine surfaces these).
    pub fn has_multiple_states(&self) -> bool {
        self.states.len() > 1
    }

    /// Validation per spec §4.1: non-empty state set, every state covers
    /// exactly the component's edges, every FC is finite and within
    /// `[0, FC_MAX]`, and no edge key was duplicated at construction.
    pub fn validate(&self) -> Vec<ComponentIssue> {
        let mut issues = Vec::new();

        if self.had_duplicate_edge_keys {
            issues.push(ComponentIssue::DuplicateEdgeKey);
        }
        if self.states.is_empty() {
            issues.push(ComponentIssue::EmptyStates);
        }

        let edge_keys: IndexSet<&str> = self.edges.keys().map(String::as_str).collect();
        for (state_name, fc_map) in &self.states {
            let state_keys: IndexSet<&str> = fc_map.keys().map(String::as_str).collect();
            if state_keys != edge_keys {
                issues.push(ComponentIssue::StateEdgeMismatch {
                    state: state_name.clone(),
                });
            }
            for (edge, fc) in fc_map {
                if !fc.is_finite() || *fc < 0.0 || *fc > FC_MAX {
                    issues.push(ComponentIssue::InvalidFc {
                        state: state_name.clone(),
                        edge: edge.clone(),
                        value: *fc,
                    });
                }
            }
        }

        issues
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_edge_component(open_fwd: f64, open_back: f64, closed_fwd: f64, closed_back: f64) -> PlumbingComponent {
        let edges = vec![
            EdgeDef::new("fwd", ComponentNodeId::from(1i64), ComponentNodeId::from(2i64)),
            EdgeDef::new("back", ComponentNodeId::from(2i64), ComponentNodeId::from(1i64)),
        ];
        let mut states = IndexMap::new();
        states.insert(
            "open".to_string(),
            IndexMap::from_iter([("fwd".to_string(), open_fwd), ("back".to_string(), open_back)]),
        );
        states.insert(
            "closed".to_string(),
            IndexMap::from_iter([
                ("fwd".to_string(), closed_fwd),
                ("back".to_string(), closed_back),
            ]),
        );
        PlumbingComponent::new("valve1", edges, states, "closed")
    }

    #[test]
    fn well_formed_component_is_valid() {
        let valve = two_edge_component(FC_MAX, 0.0, 0.0, 0.0);
        assert!(valve.is_valid());
        assert!(valve.validate().is_empty());
    }

    #[test]
    fn missing_edge_in_state_is_invalid() {
        let edges = vec![
            EdgeDef::new("fwd", ComponentNodeId::from(1i64), ComponentNodeId::from(2i64)),
            EdgeDef::new("back", ComponentNodeId::from(2i64), ComponentNodeId::from(1i64)),
        ];
        let mut states = IndexMap::new();
        states.insert(
            "open".to_string(),
            IndexMap::from_iter([("fwd".to_string(), 1.0)]),
        );
        let comp = PlumbingComponent::new("valve1", edges, states, "open");
        assert!(matches!(
            comp.validate().as_slice(),
            [ComponentIssue::StateEdgeMismatch { .. }]
        ));
    }

    #[test]
    fn fc_above_max_is_invalid() {
        let valve = two_edge_component(FC_MAX * 2.0, 0.0, 0.0, 0.0);
        assert!(!valve.is_valid());
    }

    #[test]
    fn duplicate_edge_key_is_invalid() {
        let edges = vec![
            EdgeDef::new("fwd", ComponentNodeId::from(1i64), ComponentNodeId::from(2i64)),
            EdgeDef::new("fwd", ComponentNodeId::from(2i64), ComponentNodeId::from(1i64)),
        ];
        let mut states = IndexMap::new();
        states.insert(
            "open".to_string(),
            IndexMap::from_iter([("fwd".to_string(), 1.0)]),
        );
        let comp = PlumbingComponent::new("valve1", edges, states, "open");
        assert!(comp.validate().contains(&ComponentIssue::DuplicateEdgeKey));
    }

    #[test]
    fn set_current_state_rejects_unknown_state() {
        let mut valve = two_edge_component(FC_MAX, 0.0, 0.0, 0.0);
        assert!(valve.set_current_state("half").is_err());
        assert!(valve.set_current_state("open").is_ok());
        assert_eq!(valve.current_state(), "open");
    }
}
