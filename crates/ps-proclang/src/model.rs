//! The parsed, immutable shape of a ProcLang document.
//!
//! Grounded on the `top.*` types `proclang.py`'s `ProcedureTransformer`
//! builds (`top.Procedure`, `top.ProcedureStep`, `top.WaitFor`, `top.And`,
//! `top.Or`, `top.StateChangeAction`, `top.MiscAction`, `top.Transition`,
//! `top.Immediate`).

use indexmap::IndexMap;

/// A single `node op value` comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
}

impl Comparison {
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Less => lhs < rhs,
            Comparison::Greater => lhs > rhs,
            Comparison::LessEqual => lhs <= rhs,
            Comparison::GreaterEqual => lhs >= rhs,
            Comparison::Equal => lhs == rhs,
        }
    }
}

/// A transition guard: a leaf comparison or timer, or a boolean combination
/// of other predicates. `Immediate` is the guard synthesized for a step with
/// no attached entry condition.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Immediate,
    WaitFor(u64),
    Comparison {
        node: String,
        op: Comparison,
        value: f64,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

/// An action a step performs on entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    StateChange { component: String, state: String },
    Misc(String),
}

/// A named destination step, either in the same procedure or another one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub procedure: String,
    pub step_id: String,
}

/// One step of a procedure: an action, and every guarded transition out of
/// it (deviations in source order, then the natural successor last).
#[derive(Clone, Debug, PartialEq)]
pub struct ProcedureStep {
    pub id: String,
    pub personnel: String,
    pub action: Action,
    pub out_conditions: Vec<(Predicate, Transition)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Procedure {
    pub name: String,
    pub steps: Vec<ProcedureStep>,
}

/// Every procedure parsed from a ProcLang document, indexed by name and
/// preserving source order. The first procedure in the source is the entry
/// point.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ProcedureSuite {
    pub procedures: IndexMap<String, Procedure>,
}

impl ProcedureSuite {
    pub fn entry(&self) -> Option<&Procedure> {
        self.procedures.values().next()
    }

    pub fn get(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }
}

impl Procedure {
    pub fn step(&self, step_id: &str) -> Option<&ProcedureStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }
}
