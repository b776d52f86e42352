//! ps-app: ambient service layer tying the PDL parser, ProcLang parser, and
//! plumbing engine together for a host driver (a CLI today; nothing stops a
//! future GUI from depending on this crate the same way).

pub mod driver;
pub mod error;
pub mod progress;

pub use driver::Driver;
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};

use tracing::info;

use ps_engine::PlumbingEngine;
use ps_pdl::Source;
use ps_proclang::ProcedureSuite;

/// Type of the caller-supplied progress sink, grounded on
/// `tf-app::run_service`'s `Option<&mut dyn FnMut(RunProgressEvent)>`.
type ProgressCallback<'a> = Option<&'a mut dyn FnMut(RunProgressEvent)>;

fn emit_progress(progress_cb: &mut ProgressCallback<'_>, stage: RunStage, sim_time_us: u64, message: Option<String>) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::new(stage, sim_time_us, message));
    }
}

/// Parses a PDL document set and builds the engine it describes.
pub fn load_engine(sources: Vec<Source>) -> AppResult<PlumbingEngine> {
    load_engine_with_progress(sources, None)
}

/// Like [`load_engine`], but reports [`RunStage::LoadingPdl`],
/// [`RunStage::BuildingEngine`], and [`RunStage::Completed`] to `progress_cb`
/// as they happen.
pub fn load_engine_with_progress(
    sources: Vec<Source>,
    mut progress_cb: ProgressCallback<'_>,
) -> AppResult<PlumbingEngine> {
    emit_progress(
        &mut progress_cb,
        RunStage::LoadingPdl,
        0,
        Some(format!("parsing {} PDL source(s)", sources.len())),
    );
    info!(documents = sources.len(), "parsing PDL sources");
    let parser = ps_pdl::Parser::new(sources)?;

    emit_progress(&mut progress_cb, RunStage::BuildingEngine, 0, None);
    let engine = parser.make_engine()?;
    if !engine.is_valid() {
        info!(errors = engine.errors().len(), "engine built with validation errors");
    }

    emit_progress(&mut progress_cb, RunStage::Completed, engine.time(), None);
    Ok(engine)
}

/// Parses a ProcLang document's text into a procedure suite.
pub fn load_procedures(text: &str) -> AppResult<ProcedureSuite> {
    load_procedures_with_progress(text, None)
}

/// Like [`load_procedures`], but reports [`RunStage::LoadingProcedures`] and
/// [`RunStage::Completed`] to `progress_cb`.
pub fn load_procedures_with_progress(
    text: &str,
    mut progress_cb: ProgressCallback<'_>,
) -> AppResult<ProcedureSuite> {
    emit_progress(&mut progress_cb, RunStage::LoadingProcedures, 0, None);
    let suite = ps_proclang::parse(text)?;
    emit_progress(&mut progress_cb, RunStage::Completed, 0, None);
    Ok(suite)
}

/// Reads a ProcLang document from disk and parses it.
pub fn load_procedures_from_path(path: &std::path::Path) -> AppResult<ProcedureSuite> {
    load_procedures_from_path_with_progress(path, None)
}

/// Like [`load_procedures_from_path`], but reports progress to `progress_cb`.
pub fn load_procedures_from_path_with_progress(
    path: &std::path::Path,
    progress_cb: ProgressCallback<'_>,
) -> AppResult<ProcedureSuite> {
    let text = std::fs::read_to_string(path).map_err(|e| AppError::Io(path.to_path_buf(), e))?;
    load_procedures_with_progress(&text, progress_cb)
}
