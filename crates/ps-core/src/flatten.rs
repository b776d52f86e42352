//! Variadic-argument normalization.
//!
//! The original engine's `current_state`/`current_pressures`/`current_FC`
//! took `*args`: zero arguments meant "give me everything", one argument
//! meant "give me that one value directly", and more than one meant "give me
//! a map keyed by name". Rust's engine (`ps-engine`) replaces that with
//! separate scalar and batch methods, but the call-shape itself is useful
//! wherever a caller still wants to express "optionally narrow a query to a
//! name or a handful of names" — so it lives here rather than being
//! reimplemented per call site.

/// A normalized variadic name selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    /// No names given: select everything.
    All,
    /// Exactly one name given: select it alone.
    One(String),
    /// More than one name given: select all of them.
    Many(Vec<String>),
}

/// Normalizes a slice of names into an [`Arg`].
pub fn flatten(names: &[String]) -> Arg {
    match names {
        [] => Arg::All,
        [single] => Arg::One(single.clone()),
        many => Arg::Many(many.to_vec()),
    }
}
