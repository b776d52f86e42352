//! Component-internal node identifiers.
//!
//! A component's own graph is authored with either integer or string node
//! ids (PDL lets a component author write `nodes: [0, 1]` or
//! `nodes: [inlet, outlet]` interchangeably), while the engine's global
//! graph is always string-keyed. `ComponentNodeId` captures that duality at
//! the component boundary; `ps-pdl`'s mapping step is where a
//! `ComponentNodeId` is ultimately turned into a global node string.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentNodeId {
    Int(i64),
    Name(String),
}

impl ComponentNodeId {
    pub fn name(s: impl Into<String>) -> Self {
        ComponentNodeId::Name(s.into())
    }
}

impl From<i64> for ComponentNodeId {
    fn from(v: i64) -> Self {
        ComponentNodeId::Int(v)
    }
}

impl From<String> for ComponentNodeId {
    fn from(v: String) -> Self {
        ComponentNodeId::Name(v)
    }
}

impl From<&str> for ComponentNodeId {
    fn from(v: &str) -> Self {
        ComponentNodeId::Name(v.to_string())
    }
}

impl fmt::Display for ComponentNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentNodeId::Int(i) => write!(f, "{i}"),
            ComponentNodeId::Name(s) => write!(f, "{s}"),
        }
    }
}
