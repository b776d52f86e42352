//! Where PDL text comes from.
//!
//! Grounded on `top.File(path_or_text, kind)` in
//! `original_source/topside/pdl/tests/test_parser.py`, which the tests
//! invoke as either `top.File(utils.example_path)` (a path) or
//! `top.File(yaml_text, 's')` (inline text).

use std::path::PathBuf;

use crate::error::PdlResult;

/// A single PDL document's origin: a file on disk, or text already in
/// memory (as the original's `'s'`-kind `File` constructor allows).
#[derive(Clone, Debug)]
pub enum Source {
    Path(PathBuf),
    Text(String),
}

impl Source {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Source::Text(text.into())
    }

    pub fn load(&self) -> PdlResult<String> {
        match self {
            Source::Path(path) => Ok(std::fs::read_to_string(path)?),
            Source::Text(text) => Ok(text.clone()),
        }
    }
}
