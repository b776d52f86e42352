//! The engine's three error planes (spec §7).
//!
//! 1. Recoverable validation errors accumulate in `error_set` and render
//!    the engine non-solvable without aborting construction.
//! 2. Hard input errors (`BadInputError`) are raised synchronously from
//!    mutation calls.
//! 3. Engine-state errors (`InvalidEngineError`) guard `step`/`solve`.
//!
//! The original kept a `fail_silently: bool` switch between planes 1 and 2
//! for the same call; `FailurePolicy` makes that an explicit enum (spec
//! Design Notes: "a tagged enum `FailurePolicy{Accumulate, Raise}` cleanly
//! replaces the boolean").

use thiserror::Error;

/// Whether a fallible internal step records a [`ValidationError`] and
/// continues, or raises a [`BadInputError`] immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    Accumulate,
    Raise,
}

/// The discriminator of a recorded, non-fatal validation error.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    #[error("component {0:?} failed its own validation")]
    InvalidComponent(String),
    #[error("component {0:?} has no entry in the supplied mapping or initial states")]
    InvalidComponentName(String),
    #[error("component {component:?} has no mapping for internal node {node:?}")]
    InvalidComponentNode { component: String, node: String },
    #[error("component {component:?} has no state named {state:?}")]
    InvalidComponentState { component: String, state: String },
    #[error("node {0:?} was given an invalid pressure")]
    InvalidNodePressure(String),
}

/// A recorded validation error, scoped to the component and/or node it
/// names. Stored in an `indexmap::IndexSet` for reproducible iteration
/// (spec Design Notes). The original's explicit duplicate-error wrapper
/// isn't needed here: `IndexSet` already deduplicates by value, and
/// cascading removal on `remove_component` is just a filter over
/// `component_name`/`node_name` rather than chasing a proxy object.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("{reason}")]
pub struct ValidationError {
    pub reason: InvalidReason,
    pub component_name: Option<String>,
    pub node_name: Option<String>,
}

impl ValidationError {
    pub fn invalid_component(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            reason: InvalidReason::InvalidComponent(name.clone()),
            component_name: Some(name),
            node_name: None,
        }
    }

    pub fn invalid_component_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            reason: InvalidReason::InvalidComponentName(name.clone()),
            component_name: Some(name),
            node_name: None,
        }
    }

    pub fn invalid_component_node(component: impl Into<String>, node: impl Into<String>) -> Self {
        let component = component.into();
        let node = node.into();
        Self {
            reason: InvalidReason::InvalidComponentNode {
                component: component.clone(),
                node: node.clone(),
            },
            component_name: Some(component),
            node_name: Some(node),
        }
    }

    pub fn invalid_component_state(component: impl Into<String>, state: impl Into<String>) -> Self {
        let component = component.into();
        let state = state.into();
        Self {
            reason: InvalidReason::InvalidComponentState {
                component: component.clone(),
                state,
            },
            component_name: Some(component),
            node_name: None,
        }
    }

    pub fn invalid_node_pressure(node: impl Into<String>) -> Self {
        let node = node.into();
        Self {
            reason: InvalidReason::InvalidNodePressure(node.clone()),
            component_name: None,
            node_name: Some(node),
        }
    }

    /// Whether `remove_component(name)` should drop this error.
    pub fn mentions_component(&self, name: &str) -> bool {
        self.component_name.as_deref() == Some(name)
    }

    /// Whether an error naming `node` should be dropped once that node no
    /// longer exists in the graph.
    pub fn mentions_node(&self, node: &str) -> bool {
        self.node_name.as_deref() == Some(node)
    }
}

/// A hard, synchronously-raised error (spec §7 plane 2).
#[derive(Error, Debug)]
pub enum BadInputError {
    #[error("unknown component {0:?}")]
    UnknownComponent(String),
    #[error("unknown node {0:?}")]
    UnknownNode(String),
    #[error("component {component:?} has no state named {state:?}")]
    UnknownState { component: String, state: String },
    #[error("component {component:?} has no edge named {edge:?}")]
    UnknownEdge { component: String, edge: String },
    #[error("a pressure must be finite and non-negative, got {value}")]
    InvalidPressure { value: f64 },
    #[error("ATM's pressure is fixed at zero, got {value}")]
    NonZeroAtmPressure { value: f64 },
    #[error("timestep must be at least {min} microseconds, got {got}")]
    TimestepTooSmall { min: u64, got: u64 },
    #[error("teq must be at least {min} microseconds, got {got}")]
    TeqTooSmall { min: u64, got: u64 },
    #[error("reverse_orientation is only defined for 2-edge components, {name:?} has {count}")]
    NotTwoEdges { name: String, count: usize },
    #[error("an initial pressure was given for node {0:?}, which no component ever introduces")]
    UnintroducedPressureNode(String),
}

/// Raised by `step`/`solve` on an empty or invalid engine (spec §7 plane 3).
#[derive(Error, Debug)]
pub enum InvalidEngineError {
    #[error("cannot step an empty engine")]
    EmptyGraph,
    #[error("cannot step an engine with {0} outstanding validation error(s)")]
    HasValidationErrors(usize),
}

/// The union `step`/`solve` actually raise: a malformed call (plane 2) or
/// an engine that isn't ready to simulate (plane 3).
#[derive(Error, Debug)]
pub enum EngineStepError {
    #[error(transparent)]
    BadInput(#[from] BadInputError),
    #[error(transparent)]
    Invalid(#[from] InvalidEngineError),
}
