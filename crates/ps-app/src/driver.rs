//! Drives a [`PlumbingEngine`] through a [`ProcedureSuite`].
//!
//! Not part of spec.md's core (the spec explicitly treats "the CLI
//! wrappers" as an external collaborator), but the external driver spec.md
//! §2 describes ("advances the engine and evaluates procedure predicates
//! against current engine state to determine transitions") has to live
//! somewhere; `tf-app`'s run-orchestration layer is the model for where.

use indexmap::IndexMap;
use tracing::{debug, info, instrument};

use ps_engine::PlumbingEngine;
use ps_proclang::{evaluate, Action, ProcedureSuite};

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};

/// Owns the live engine and procedure suite, and tracks which step of which
/// procedure is currently active.
pub struct Driver {
    engine: PlumbingEngine,
    suite: ProcedureSuite,
    procedure: String,
    step: String,
    elapsed_in_step_us: u64,
}

impl Driver {
    /// Starts at the entry procedure's first step.
    pub fn new(engine: PlumbingEngine, suite: ProcedureSuite) -> AppResult<Self> {
        let entry = suite.entry().ok_or(AppError::EmptySuite)?;
        let first_step = entry
            .steps
            .first()
            .ok_or_else(|| AppError::UnknownStep {
                procedure: entry.name.clone(),
                step: String::new(),
            })?;

        let mut driver = Self {
            engine,
            suite,
            procedure: entry.name.clone(),
            step: first_step.id.clone(),
            elapsed_in_step_us: 0,
        };
        driver.apply_current_step_action()?;
        Ok(driver)
    }

    pub fn engine(&self) -> &PlumbingEngine {
        &self.engine
    }

    pub fn current_procedure(&self) -> &str {
        &self.procedure
    }

    pub fn current_step(&self) -> &str {
        &self.step
    }

    fn apply_current_step_action(&mut self) -> AppResult<()> {
        let step = self.current_step_ref()?;
        if let Action::StateChange { component, state } = &step.action {
            let (component, state) = (component.clone(), state.clone());
            debug!(component = %component, state = %state, "applying step action");
            self.engine.set_component_state(&component, &state)?;
        }
        Ok(())
    }

    fn current_step_ref(&self) -> AppResult<&ps_proclang::ProcedureStep> {
        let procedure =
            self.suite
                .get(&self.procedure)
                .ok_or_else(|| AppError::UnknownProcedure(self.procedure.clone()))?;
        procedure
            .step(&self.step)
            .ok_or_else(|| AppError::UnknownStep {
                procedure: self.procedure.clone(),
                step: self.step.clone(),
            })
    }

    /// Advances the engine by one `step` call, then checks the current
    /// step's outbound transitions (in declared order) against the new
    /// pressure snapshot; the first predicate that fires wins.
    #[instrument(skip(self))]
    pub fn tick(&mut self, timestep_us: Option<u64>) -> AppResult<RunProgressEvent> {
        let before = self.engine.time();
        let pressures = self.engine.step(timestep_us)?;
        self.elapsed_in_step_us += self.engine.time() - before;

        if let Some(transition) = self.find_firing_transition(&pressures) {
            info!(
                from_procedure = %self.procedure,
                from_step = %self.step,
                to_procedure = %transition.procedure,
                to_step = %transition.step_id,
                "procedure transition"
            );
            self.procedure = transition.procedure;
            self.step = transition.step_id;
            self.elapsed_in_step_us = 0;
            self.apply_current_step_action()?;
            return Ok(RunProgressEvent::new(
                RunStage::Transitioned,
                self.engine.time(),
                Some(format!("{}.{}", self.procedure, self.step)),
            ));
        }

        Ok(RunProgressEvent::new(
            RunStage::Stepping,
            self.engine.time(),
            None,
        ))
    }

    fn find_firing_transition(
        &self,
        pressures: &IndexMap<String, f64>,
    ) -> Option<ps_proclang::Transition> {
        let step = self.current_step_ref().ok()?;
        step.out_conditions
            .iter()
            .find(|(predicate, _)| evaluate(predicate, pressures, self.elapsed_in_step_us))
            .map(|(_, transition)| transition.clone())
    }
}
