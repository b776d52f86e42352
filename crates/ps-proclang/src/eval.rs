//! Evaluates a [`Predicate`] against a snapshot of engine state.
//!
//! New relative to the original: `proclang.py` only builds the predicate
//! tree, the transformer never evaluates it. Derived directly from spec.md
//! §3's description of `WaitFor` ("fires when the current step has been
//! active for at least its duration") and the comparison operators already
//! encoded in [`Comparison`].

use indexmap::IndexMap;

use crate::model::Predicate;

/// `elapsed_in_step_micros` is how long the current step has held, measured
/// in the engine's own clock (spec.md §5: "timeouts are wall-clock
/// independent").
pub fn evaluate(
    predicate: &Predicate,
    pressures: &IndexMap<String, f64>,
    elapsed_in_step_micros: u64,
) -> bool {
    match predicate {
        Predicate::Immediate => true,
        Predicate::WaitFor(duration) => elapsed_in_step_micros >= *duration,
        Predicate::Comparison { node, op, value } => pressures
            .get(node)
            .is_some_and(|pressure| op.holds(*pressure, *value)),
        Predicate::And(children) => children
            .iter()
            .all(|child| evaluate(child, pressures, elapsed_in_step_micros)),
        Predicate::Or(children) => children
            .iter()
            .any(|child| evaluate(child, pressures, elapsed_in_step_micros)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Comparison;

    fn pressures() -> IndexMap<String, f64> {
        IndexMap::from_iter([("p1".to_string(), 150.0)])
    }

    #[test]
    fn immediate_always_fires() {
        assert!(evaluate(&Predicate::Immediate, &pressures(), 0));
    }

    #[test]
    fn waitfor_fires_once_elapsed_reaches_duration() {
        let predicate = Predicate::WaitFor(1_000_000);
        assert!(!evaluate(&predicate, &pressures(), 999_999));
        assert!(evaluate(&predicate, &pressures(), 1_000_000));
    }

    #[test]
    fn comparison_reads_named_node() {
        let predicate = Predicate::Comparison {
            node: "p1".to_string(),
            op: Comparison::GreaterEqual,
            value: 150.0,
        };
        assert!(evaluate(&predicate, &pressures(), 0));
    }

    #[test]
    fn unknown_node_never_satisfies_comparison() {
        let predicate = Predicate::Comparison {
            node: "missing".to_string(),
            op: Comparison::Equal,
            value: 0.0,
        };
        assert!(!evaluate(&predicate, &pressures(), 0));
    }

    #[test]
    fn or_short_circuits_to_true() {
        let predicate = Predicate::Or(vec![
            Predicate::Comparison {
                node: "p1".to_string(),
                op: Comparison::Less,
                value: 0.0,
            },
            Predicate::Immediate,
        ]);
        assert!(evaluate(&predicate, &pressures(), 0));
    }

    #[test]
    fn and_requires_every_child() {
        let predicate = Predicate::And(vec![
            Predicate::Immediate,
            Predicate::Comparison {
                node: "p1".to_string(),
                op: Comparison::Less,
                value: 0.0,
            },
        ]);
        assert!(!evaluate(&predicate, &pressures(), 0));
    }
}
