//! ps-core: stable foundation for the plumbing simulator.
//!
//! Contains:
//! - units (time/flow-coefficient conversions + reserved constants)
//! - numeric (Real + tolerances + float helpers)
//! - convergence (trailing-window steady-state predicate)
//! - flatten (variadic-argument normalization helper)
//! - error (shared error type)

pub mod convergence;
pub mod error;
pub mod flatten;
pub mod numeric;
pub mod units;

pub use convergence::{all_converged, CONVERGENCE_WINDOW};
pub use error::{CoreError, CoreResult};
pub use flatten::{flatten, Arg};
pub use numeric::*;
pub use units::*;
