//! Parse tree to procedure-suite lowering.
//!
//! Grounded on `proclang.py`'s `ProcedureTransformer`: the trickiest part of
//! that class is `procedure`'s reverse-order walk, which attaches each
//! step's own entry condition as the transition guard on its *predecessor's*
//! natural-successor transition. We reproduce that walk directly rather than
//! trying to express it as a forward fold.

use pest::iterators::Pair;
use pest::Parser as _;
use pest_derive::Parser;

use ps_core::units::s_to_micros;

use crate::error::{ProcLangError, ProcLangResult};
use crate::model::{Action, Comparison, Procedure, ProcedureStep, ProcedureSuite, Predicate, Transition};

#[derive(Parser)]
#[grammar = "proclang.pest"]
pub struct ProcLangParser;

/// A step before its transitions are resolved; the entry condition
/// (`condition_in`) is needed by the *previous* step, not this one, so it
/// can't be folded into `ProcedureStep` until the whole procedure is known.
struct StepInfo {
    id: String,
    personnel: String,
    condition_in: Option<Predicate>,
    action: Action,
    out_deviations: Vec<(Predicate, Transition)>,
}

pub fn parse(text: &str) -> ProcLangResult<ProcedureSuite> {
    let mut pairs = ProcLangParser::parse(Rule::document, text)
        .map_err(|e| ProcLangError::Grammar(Box::new(e)))?;
    let document = pairs.next().expect("document rule always produces one pair");

    let mut procedures = indexmap::IndexMap::new();
    for pair in document.into_inner() {
        if pair.as_rule() == Rule::procedure {
            let procedure = parse_procedure(pair)?;
            procedures.insert(procedure.name.clone(), procedure);
        }
    }

    Ok(ProcedureSuite { procedures })
}

pub fn parse_from_file(path: &std::path::Path) -> ProcLangResult<ProcedureSuite> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

fn parse_procedure(pair: Pair<Rule>) -> ProcLangResult<Procedure> {
    let mut inner = pair.into_inner();
    let name = inner.next().expect("procedure always has a name").as_str().to_string();

    let infos = inner
        .map(parse_step)
        .collect::<ProcLangResult<Vec<_>>>()?;

    let mut steps = Vec::with_capacity(infos.len());
    let mut successor: Option<&StepInfo> = None;
    for info in infos.iter().rev() {
        let mut conditions = info.out_deviations.clone();
        if let Some(succ) = successor {
            let guard = succ.condition_in.clone().unwrap_or(Predicate::Immediate);
            conditions.push((
                guard,
                Transition {
                    procedure: name.clone(),
                    step_id: succ.id.clone(),
                },
            ));
        }
        steps.push(ProcedureStep {
            id: info.id.clone(),
            personnel: info.personnel.clone(),
            action: info.action.clone(),
            out_conditions: conditions,
        });
        successor = Some(info);
    }
    steps.reverse();

    Ok(Procedure { name, steps })
}

fn parse_step(pair: Pair<Rule>) -> ProcLangResult<StepInfo> {
    let mut inner = pair.into_inner();
    let id = inner.next().expect("step always has a step_id").as_str().to_string();
    let personnel = inner.next().expect("step always has personnel").as_str().to_string();

    let mut condition_in = None;
    let mut action = None;
    let mut out_deviations = Vec::new();

    for item in inner {
        match item.as_rule() {
            Rule::condition => condition_in = Some(parse_condition(item)?),
            Rule::action => action = Some(parse_action(item)?),
            Rule::deviation => out_deviations.push(parse_deviation(item)?),
            other => unreachable!("unexpected step child {other:?}"),
        }
    }

    Ok(StepInfo {
        id,
        personnel,
        condition_in,
        action: action.expect("grammar guarantees exactly one action per step"),
        out_deviations,
    })
}

fn parse_condition(pair: Pair<Rule>) -> ProcLangResult<Predicate> {
    let boolean_expr = pair
        .into_inner()
        .next()
        .expect("condition always wraps a boolean_expr");
    parse_boolean_expr(boolean_expr)
}

fn parse_boolean_expr(pair: Pair<Rule>) -> ProcLangResult<Predicate> {
    let mut children = Vec::new();
    for item in pair.into_inner() {
        if item.as_rule() == Rule::boolean_and {
            children.push(parse_boolean_and(item)?);
        }
    }
    Ok(if children.len() == 1 {
        children.pop().unwrap()
    } else {
        Predicate::Or(children)
    })
}

fn parse_boolean_and(pair: Pair<Rule>) -> ProcLangResult<Predicate> {
    let mut children = Vec::new();
    for item in pair.into_inner() {
        if item.as_rule() == Rule::boolean {
            children.push(parse_boolean(item)?);
        }
    }
    Ok(if children.len() == 1 {
        children.pop().unwrap()
    } else {
        Predicate::And(children)
    })
}

fn parse_boolean(pair: Pair<Rule>) -> ProcLangResult<Predicate> {
    let inner = pair
        .into_inner()
        .next()
        .expect("boolean always wraps exactly one child");
    match inner.as_rule() {
        Rule::waitfor => parse_waitfor(inner),
        Rule::comparison => parse_comparison(inner),
        Rule::boolean_expr => parse_boolean_expr(inner),
        other => unreachable!("unexpected boolean child {other:?}"),
    }
}

fn parse_waitfor(pair: Pair<Rule>) -> ProcLangResult<Predicate> {
    let time_pair = pair
        .into_inner()
        .next()
        .expect("waitfor always wraps a time");
    let seconds = parse_number(time_pair)?;
    Ok(Predicate::WaitFor(s_to_micros(seconds)))
}

fn parse_comparison(pair: Pair<Rule>) -> ProcLangResult<Predicate> {
    let mut inner = pair.into_inner();
    let node = inner.next().expect("comparison always has a node").as_str().to_string();
    let operator = inner.next().expect("comparison always has an operator");
    let value_pair = inner.next().expect("comparison always has a value");

    let op = match operator.as_str() {
        "<" => Comparison::Less,
        ">" => Comparison::Greater,
        "<=" => Comparison::LessEqual,
        ">=" => Comparison::GreaterEqual,
        "==" => Comparison::Equal,
        other => return Err(ProcLangError::UnknownOperator(other.to_string())),
    };
    let value = parse_number(value_pair)?;

    Ok(Predicate::Comparison { node, op, value })
}

fn parse_action(pair: Pair<Rule>) -> ProcLangResult<Action> {
    let inner = pair
        .into_inner()
        .next()
        .expect("action always wraps exactly one child");
    match inner.as_rule() {
        Rule::state_change_action => {
            let mut fields = inner.into_inner();
            let component = fields
                .next()
                .expect("state_change_action always has a component")
                .as_str()
                .to_string();
            let state = fields
                .next()
                .expect("state_change_action always has a state")
                .as_str()
                .to_string();
            Ok(Action::StateChange { component, state })
        }
        Rule::misc_action => Ok(Action::Misc(inner.as_str().to_string())),
        other => unreachable!("unexpected action child {other:?}"),
    }
}

fn parse_deviation(pair: Pair<Rule>) -> ProcLangResult<(Predicate, Transition)> {
    let mut inner = pair.into_inner();
    let condition = parse_condition(inner.next().expect("deviation always has a condition"))?;
    let transition_pair = inner.next().expect("deviation always has a transition");
    let mut fields = transition_pair.into_inner();
    let procedure = fields
        .next()
        .expect("transition always names a procedure")
        .as_str()
        .to_string();
    let step_id = fields
        .next()
        .expect("transition always names a step")
        .as_str()
        .to_string();

    Ok((condition, Transition { procedure, step_id }))
}

fn parse_number(pair: Pair<Rule>) -> ProcLangResult<f64> {
    pair.as_str().parse().map_err(|source| ProcLangError::Number {
        literal: pair.as_str().to_string(),
        source,
    })
}
