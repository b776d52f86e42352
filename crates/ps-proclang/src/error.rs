//! ProcLang's error surface.

use thiserror::Error;

use crate::parser::Rule;

#[derive(Error, Debug)]
pub enum ProcLangError {
    #[error("failed to read ProcLang source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse ProcLang document: {0}")]
    Grammar(#[from] Box<pest::error::Error<Rule>>),

    #[error("malformed numeric literal {literal:?}: {source}")]
    Number {
        literal: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("malformed comparison operator {0:?}")]
    UnknownOperator(String),
}

pub type ProcLangResult<T> = Result<T, ProcLangError>;
