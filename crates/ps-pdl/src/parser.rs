//! Turns a closed-over set of PDL documents into engine-ready inputs.
//!
//! Grounded line-by-line on
//! `original_source/topside/pdl/tests/test_parser.py`: `extract_edges`'s
//! disambiguation behavior (`test_standard_extract_edges`,
//! `test_extract_repeated_edges`, `test_invalid_extract_edges`), the
//! mapping/initial-condition shape (`test_valid_file`), and the
//! "an invalid component is legal PDL" rule (`test_invalid_component`).

use indexmap::IndexMap;

use ps_components::{ComponentNodeId, EdgeDef, PlumbingComponent};
use ps_core::units::{s_to_micros, teq_to_fc, FC_MAX};
use ps_engine::{Mapping, PlumbingEngine};

use crate::error::{PdlError, PdlResult};
use crate::loader::Source;
use crate::schema::{ComponentEntry, Entry, GraphEntry, PdlDocument, TeqValue};
use crate::validate::find_main_graph;

/// One physical edge's two canonical directed edges, each tagged with the
/// internal key it will carry in the built component: `(src, dst, key)`.
type DirectedPair = (
    (ComponentNodeId, ComponentNodeId, String),
    (ComponentNodeId, ComponentNodeId, String),
);

/// Canonicalizes a component entry's `edges` map into directed edge pairs,
/// keyed by the PDL-authored edge name. A repeated unordered node pair
/// (across different edge names in the same component) gets a numbered
/// suffix: `fwd`/`back`, then `fwd2`/`back2`, and so on.
pub fn extract_edges(entry: &ComponentEntry) -> PdlResult<IndexMap<String, DirectedPair>> {
    let mut seen_pairs: IndexMap<(ComponentNodeId, ComponentNodeId), usize> = IndexMap::new();
    let mut out = IndexMap::new();

    for (edge_name, spec) in &entry.edges {
        if spec.nodes.len() != 2 {
            return Err(PdlError::WrongNodeCount {
                edge: edge_name.clone(),
                count: spec.nodes.len(),
            });
        }
        let a: ComponentNodeId = spec.nodes[0].clone().into();
        let b: ComponentNodeId = spec.nodes[1].clone().into();

        let norm = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        let count = seen_pairs.entry(norm).or_insert(0);
        *count += 1;

        let (fwd_key, back_key) = if *count == 1 {
            ("fwd".to_string(), "back".to_string())
        } else {
            (format!("fwd{count}"), format!("back{count}"))
        };

        out.insert(
            edge_name.clone(),
            ((a.clone(), b.clone(), fwd_key), (b, a, back_key)),
        );
    }

    Ok(out)
}

fn teq_value_to_fc(state: &str, value: &TeqValue) -> PdlResult<f64> {
    match value {
        TeqValue::Keyword(word) if word.eq_ignore_ascii_case("open") => Ok(FC_MAX),
        TeqValue::Keyword(word) if word.eq_ignore_ascii_case("closed") => Ok(0.0),
        TeqValue::Keyword(word) => Err(PdlError::UnknownTeqKeyword {
            state: state.to_string(),
            keyword: word.clone(),
        }),
        TeqValue::Seconds(seconds) => Ok(teq_to_fc(s_to_micros(*seconds))),
    }
}

fn build_component(entry: &ComponentEntry) -> PdlResult<PlumbingComponent> {
    let extracted = extract_edges(entry)?;

    let mut edge_defs = Vec::with_capacity(extracted.len() * 2);
    for (fwd, back) in extracted.values() {
        edge_defs.push(EdgeDef::new(fwd.2.clone(), fwd.0.clone(), fwd.1.clone()));
        edge_defs.push(EdgeDef::new(back.2.clone(), back.0.clone(), back.1.clone()));
    }

    let mut states = IndexMap::new();
    for (state_name, per_edge) in &entry.states {
        let mut fc_map = IndexMap::new();
        for (edge_name, value) in per_edge {
            let (fwd, back) = extracted
                .get(edge_name)
                .expect("state references only names declared in this component's edges");
            let fc = teq_value_to_fc(state_name, value)?;
            fc_map.insert(fwd.2.clone(), fc);
            fc_map.insert(back.2.clone(), fc);
        }
        states.insert(state_name.clone(), fc_map);
    }

    let current_state = entry
        .states
        .keys()
        .next()
        .cloned()
        .unwrap_or_else(|| "closed".to_string());

    Ok(PlumbingComponent::new(
        entry.name.clone(),
        edge_defs,
        states,
        current_state,
    ))
}

fn build_mapping_and_pressures(
    graph: &GraphEntry,
    components: &IndexMap<String, PlumbingComponent>,
) -> PdlResult<(IndexMap<String, Mapping>, IndexMap<String, (f64, bool)>)> {
    let mut mapping: IndexMap<String, Mapping> = IndexMap::new();
    let mut pressures = IndexMap::new();

    for (node_name, spec) in &graph.nodes {
        if let Some(p) = spec.fixed_pressure {
            pressures.insert(node_name.clone(), (p, true));
        } else if let Some(p) = spec.pressure {
            pressures.insert(node_name.clone(), (p, false));
        }

        for (component_name, node_spec) in &spec.components {
            if !components.contains_key(component_name) {
                return Err(PdlError::UnknownComponent {
                    node: node_name.clone(),
                    component: component_name.clone(),
                });
            }
            mapping
                .entry(component_name.clone())
                .or_default()
                .insert(node_spec.clone().into(), node_name.clone());
        }
    }

    Ok((mapping, pressures))
}

fn resolve_closure(sources: &[Source]) -> PdlResult<Vec<PdlDocument>> {
    let mut by_name: IndexMap<String, PdlDocument> = IndexMap::new();
    let mut roots = Vec::new();

    for source in sources {
        let text = source.load()?;
        let doc: PdlDocument = serde_yaml::from_str(&text)?;
        roots.push(doc.name.clone());
        by_name.insert(doc.name.clone(), doc);
    }

    let mut closure: IndexMap<String, PdlDocument> = IndexMap::new();
    let mut stack = roots;
    while let Some(name) = stack.pop() {
        if closure.contains_key(&name) {
            continue;
        }
        let doc = by_name
            .get(&name)
            .ok_or_else(|| PdlError::UnknownImport(name.clone()))?
            .clone();
        for import in &doc.import {
            stack.push(import.clone());
        }
        closure.insert(name, doc);
    }

    Ok(closure.into_values().collect())
}

/// Parses a set of PDL sources (and whatever they transitively import)
/// into the four engine-construction inputs (spec.md §6 "PDL surface").
pub struct Parser {
    pub components: IndexMap<String, PlumbingComponent>,
    pub mapping: IndexMap<String, Mapping>,
    pub initial_pressures: IndexMap<String, (f64, bool)>,
    pub initial_states: IndexMap<String, String>,
}

impl Parser {
    pub fn new(sources: Vec<Source>) -> PdlResult<Self> {
        let documents = resolve_closure(&sources)?;

        let mut components = IndexMap::new();
        for doc in &documents {
            for entry in &doc.body {
                if let Entry::Component(component_entry) = entry {
                    let component = build_component(component_entry)?;
                    components.insert(component_entry.name.clone(), component);
                }
            }
        }

        let main_graph = find_main_graph(&documents)?;
        let (mapping, initial_pressures) = build_mapping_and_pressures(main_graph, &components)?;
        let initial_states = main_graph.states.clone();

        Ok(Self {
            components,
            mapping,
            initial_pressures,
            initial_states,
        })
    }

    /// Feeds the parsed inputs to a fresh [`PlumbingEngine`]. An invalid
    /// component is not a parse-time failure; it surfaces later via
    /// `engine.is_valid()`.
    pub fn make_engine(&self) -> PdlResult<PlumbingEngine> {
        Ok(PlumbingEngine::new(
            self.components.clone(),
            self.mapping.clone(),
            self.initial_pressures.clone(),
            self.initial_states.clone(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EdgeSpec, NodeIdSpec};

    fn entry_with_edges(pairs: &[(&str, i64, i64)]) -> ComponentEntry {
        let mut edges = IndexMap::new();
        for (name, a, b) in pairs {
            edges.insert(
                name.to_string(),
                EdgeSpec {
                    nodes: vec![NodeIdSpec::Int(*a), NodeIdSpec::Int(*b)],
                },
            );
        }
        ComponentEntry {
            name: "example".to_string(),
            edges,
            states: IndexMap::new(),
        }
    }

    #[test]
    fn standard_extract_edges() {
        let entry = entry_with_edges(&[("edge1", 0, 1), ("edge2", 1, 2)]);
        let extracted = extract_edges(&entry).unwrap();

        let (fwd, back) = &extracted["edge1"];
        assert_eq!(fwd.2, "fwd");
        assert_eq!(back.2, "back");
        let (fwd2, back2) = &extracted["edge2"];
        assert_eq!(fwd2.2, "fwd");
        assert_eq!(back2.2, "back");
    }

    #[test]
    fn repeated_node_pair_gets_numbered_suffix() {
        let entry = entry_with_edges(&[("edge1", 0, 1), ("edge2", 1, 0)]);
        let extracted = extract_edges(&entry).unwrap();

        let (fwd1, back1) = &extracted["edge1"];
        assert_eq!(fwd1.2, "fwd");
        assert_eq!(back1.2, "back");

        let (fwd2, back2) = &extracted["edge2"];
        assert_eq!(fwd2.2, "fwd2");
        assert_eq!(back2.2, "back2");
        assert_eq!(fwd2.0, ComponentNodeId::from(1i64));
        assert_eq!(fwd2.1, ComponentNodeId::from(0i64));
    }

    #[test]
    fn too_many_nodes_is_rejected() {
        let mut edges = IndexMap::new();
        edges.insert(
            "edge1".to_string(),
            EdgeSpec {
                nodes: vec![NodeIdSpec::Int(0), NodeIdSpec::Int(1), NodeIdSpec::Int(2)],
            },
        );
        let entry = ComponentEntry {
            name: "example".to_string(),
            edges,
            states: IndexMap::new(),
        };
        assert!(matches!(
            extract_edges(&entry),
            Err(PdlError::WrongNodeCount { .. })
        ));
    }

    fn fill_valve_yaml() -> String {
        r#"
name: example
body:
- component:
    name: fill_valve
    edges:
      edge1:
        nodes: [0, 1]
    states:
      open:
        edge1: 6
      closed:
        edge1: closed
- graph:
    name: main
    nodes:
      A:
        fixed_pressure: 500
        components:
          - [fill_valve, 0]
      B:
        components:
          - [fill_valve, 1]
    states:
      fill_valve: open
"#
        .to_string()
    }

    #[test]
    fn valid_single_document_parses() {
        let parser = Parser::new(vec![Source::text(fill_valve_yaml())]).unwrap();
        assert_eq!(parser.components.len(), 1);
        assert!(parser.components["fill_valve"].is_valid());
        assert_eq!(parser.initial_pressures["A"], (500.0, true));
        assert!(!parser.initial_pressures.contains_key("B"));
        assert_eq!(parser.initial_states["fill_valve"], "open");

        let engine = parser.make_engine().unwrap();
        assert!(engine.is_valid());
    }

    #[test]
    fn missing_main_graph_is_rejected() {
        let yaml = fill_valve_yaml().replace("name: main", "name: NOT_MAIN");
        let result = Parser::new(vec![Source::text(yaml)]);
        assert!(matches!(result, Err(PdlError::NoMainGraph)));
    }

    #[test]
    fn low_teq_component_is_legal_pdl_but_invalid_engine() {
        let yaml = fill_valve_yaml().replace("edge1: 6", "edge1: 0.000000001");
        let parser = Parser::new(vec![Source::text(yaml)]).unwrap();
        let engine = parser.make_engine().unwrap();
        assert!(!engine.is_valid());
    }

    #[test]
    fn unknown_component_reference_is_rejected() {
        let yaml = fill_valve_yaml().replace("fill_valve, 0", "potato, 0");
        let result = Parser::new(vec![Source::text(yaml)]);
        assert!(matches!(result, Err(PdlError::UnknownComponent { .. })));
    }
}
