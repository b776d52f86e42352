//! Error types for component operations.

use thiserror::Error;

/// A non-fatal reason a component fails validation (spec §4.1). Recorded by
/// the engine as `InvalidComponent(name)`, never raised directly.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ComponentIssue {
    #[error("component has no states")]
    EmptyStates,
    #[error("component has a duplicated edge key")]
    DuplicateEdgeKey,
    #[error("state {state:?} does not cover exactly the component's edges")]
    StateEdgeMismatch { state: String },
    #[error("state {state:?} edge {edge:?} has an invalid FC value {value}")]
    InvalidFc {
        state: String,
        edge: String,
        value: f64,
    },
}

/// A hard, synchronously-raised component error (spec §7 plane 2).
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("unknown state {state:?} on component {component:?}")]
    UnknownState { component: String, state: String },
    #[error("unknown edge {edge:?} on component {component:?}")]
    UnknownEdge { component: String, edge: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;
