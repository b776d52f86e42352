//! ps-pdl: the declarative Plumbing Description Language.
//!
//! Parses YAML documents describing reusable components and one `main`
//! graph wiring them together, then hands the result to `ps-engine` to
//! build a `PlumbingEngine`.

pub mod error;
pub mod loader;
pub mod parser;
pub mod schema;
pub mod validate;

pub use error::{PdlError, PdlResult};
pub use loader::Source;
pub use parser::{extract_edges, Parser};
pub use schema::{
    ComponentEntry, Entry, GraphEntry, GraphNodeSpec, NodeIdSpec, PdlDocument, TeqValue,
};
pub use validate::find_main_graph;
