//! Progress reporting for a driven run, grounded on `tf-app`'s
//! `RunProgressEvent`/`RunStage` shape but trimmed to this domain's stages
//! (no steady/transient solver phases, since `ps-engine` has only one
//! integration mode).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingPdl,
    BuildingEngine,
    LoadingProcedures,
    Stepping,
    Transitioned,
    Completed,
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub sim_time_us: u64,
    pub message: Option<String>,
}

impl RunProgressEvent {
    pub fn new(stage: RunStage, sim_time_us: u64, message: Option<String>) -> Self {
        Self {
            stage,
            sim_time_us,
            message,
        }
    }
}
