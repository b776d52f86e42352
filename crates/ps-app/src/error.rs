//! Error type for the application/service layer.
//!
//! Grounded on `tf-app/src/error.rs`'s shape: one enum that wraps each
//! backend crate's own error type and gives a host (CLI, test harness, or
//! some future GUI) a single type to match on.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to read {0:?}: {1}")]
    Io(std::path::PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Pdl(#[from] ps_pdl::PdlError),

    #[error(transparent)]
    ProcLang(#[from] ps_proclang::ProcLangError),

    #[error(transparent)]
    BadInput(#[from] ps_engine::BadInputError),

    #[error(transparent)]
    Step(#[from] ps_engine::EngineStepError),

    #[error(transparent)]
    InvalidEngine(#[from] ps_engine::InvalidEngineError),

    #[error("procedure {0:?} not found in the loaded procedure suite")]
    UnknownProcedure(String),

    #[error("step {step:?} not found in procedure {procedure:?}")]
    UnknownStep { procedure: String, step: String },

    #[error("procedure suite has no entry procedure")]
    EmptySuite,
}

pub type AppResult<T> = Result<T, AppError>;
