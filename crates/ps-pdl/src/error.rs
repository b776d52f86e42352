//! PDL's error surface: everything here is a hard, synchronous failure.
//! `ps-engine`'s own recoverable validation errors are a separate plane
//! (spec.md §7) that only shows up once `make_engine()` has run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdlError {
    #[error("failed to read PDL source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse PDL document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("document imports unknown document {0:?}")]
    UnknownImport(String),

    #[error("edge {edge:?} names {count} nodes, expected exactly 2")]
    WrongNodeCount { edge: String, count: usize },

    #[error("state {state:?} uses unknown keyword {keyword:?} (expected \"open\" or \"closed\")")]
    UnknownTeqKeyword { state: String, keyword: String },

    #[error("no graph named \"main\" in the import closure")]
    NoMainGraph,

    #[error("more than one graph named \"main\" in the import closure")]
    DuplicateMainGraph,

    #[error("graph node {node:?} references unknown component {component:?}")]
    UnknownComponent { node: String, component: String },

    #[error(transparent)]
    Engine(#[from] ps_engine::BadInputError),
}

pub type PdlResult<T> = Result<T, PdlError>;
