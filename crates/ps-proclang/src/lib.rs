//! ps-proclang: the procedural DSL and its procedure model.
//!
//! Parses ProcLang text into a [`model::ProcedureSuite`] and evaluates its
//! predicate tree against simulated engine state.

pub mod error;
pub mod eval;
pub mod model;
pub mod parser;

pub use error::{ProcLangError, ProcLangResult};
pub use eval::evaluate;
pub use model::{
    Action, Comparison, Predicate, Procedure, ProcedureStep, ProcedureSuite, Transition,
};
pub use parser::{parse, parse_from_file};
