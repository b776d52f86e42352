//! ps-engine: the live plumbing network.
//!
//! Composes `ps-components` parts into a `PlumbingGraph`, drives Euler
//! integration one sub-step at a time, and exposes the accumulating
//! validation-error surface a caller checks before stepping.

pub mod engine;
pub mod error;
pub mod graph;
pub mod indexing;

pub use engine::{Mapping, PlumbingEngine, ScalarOrMap, SolveOutcome};
pub use error::{
    BadInputError, EngineStepError, FailurePolicy, InvalidEngineError, InvalidReason,
    ValidationError,
};
pub use graph::{EdgeWeight, PlumbingGraph};
