//! PDL document shape, as deserialized directly from YAML.
//!
//! Grounded on the YAML fixtures embedded in
//! `original_source/topside/pdl/tests/test_parser.py` (`test_valid_file`,
//! `test_invalid_main`, `test_invalid_component`): a document names itself,
//! may import other named documents, and holds a `body` list of component
//! and graph entries.

use indexmap::IndexMap;
use serde::Deserialize;

use ps_components::ComponentNodeId;

/// A component-internal node id as written in PDL: either bare (`0`) or a
/// name (`inlet`). Converts into [`ComponentNodeId`] once parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum NodeIdSpec {
    Int(i64),
    Name(String),
}

impl From<NodeIdSpec> for ComponentNodeId {
    fn from(spec: NodeIdSpec) -> Self {
        match spec {
            NodeIdSpec::Int(i) => ComponentNodeId::Int(i),
            NodeIdSpec::Name(s) => ComponentNodeId::Name(s),
        }
    }
}

/// A per-edge, per-state value: the `"open"`/`"closed"` sentinels or a
/// numeric `teq` in seconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TeqValue {
    Keyword(String),
    Seconds(f64),
}

#[derive(Clone, Debug, Deserialize)]
pub struct PdlDocument {
    pub name: String,
    #[serde(default)]
    pub import: Vec<String>,
    #[serde(default)]
    pub body: Vec<Entry>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    Component(ComponentEntry),
    Graph(GraphEntry),
}

#[derive(Clone, Debug, Deserialize)]
pub struct ComponentEntry {
    pub name: String,
    pub edges: IndexMap<String, EdgeSpec>,
    pub states: IndexMap<String, IndexMap<String, TeqValue>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EdgeSpec {
    pub nodes: Vec<NodeIdSpec>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphEntry {
    pub name: String,
    pub nodes: IndexMap<String, GraphNodeSpec>,
    pub states: IndexMap<String, String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphNodeSpec {
    pub fixed_pressure: Option<f64>,
    pub pressure: Option<f64>,
    #[serde(default)]
    pub components: Vec<(String, NodeIdSpec)>,
}
