use ps_proclang::{evaluate, parse, Action, Predicate};

fn suite_text() -> &'static str {
    "startup:\n\
     1.eng: [p1 > 100] set fill_valve to open\n\
     2.eng: [30s] set fill_valve to closed - [p1 >= 500] abort.1\n\
     abort:\n\
     1.eng: set vent to open\n"
}

#[test]
fn entry_point_is_first_procedure_in_source() {
    let suite = parse(suite_text()).unwrap();
    assert_eq!(suite.entry().unwrap().name, "startup");
}

#[test]
fn cross_procedure_deviation_resolves_by_name() {
    let suite = parse(suite_text()).unwrap();
    let startup = suite.get("startup").unwrap();
    let step2 = startup.step("2").unwrap();

    // step2 is the procedure's last step, so its only outbound transition
    // is its own deviation; there is no natural successor to append.
    assert_eq!(step2.out_conditions.len(), 1);
    let (deviation_guard, deviation_target) = &step2.out_conditions[0];
    assert_eq!(deviation_target.procedure, "abort");
    assert_eq!(deviation_target.step_id, "1");
    assert!(matches!(deviation_guard, Predicate::Comparison { .. }));

    assert!(suite.get(&deviation_target.procedure).is_some());
}

#[test]
fn natural_successor_guarded_by_next_steps_waitfor() {
    let suite = parse(suite_text()).unwrap();
    let startup = suite.get("startup").unwrap();
    let step1 = startup.step("1").unwrap();

    assert_eq!(
        step1.action,
        Action::StateChange {
            component: "fill_valve".to_string(),
            state: "open".to_string(),
        }
    );
    assert_eq!(step1.out_conditions.len(), 1);
    assert_eq!(step1.out_conditions[0].0, Predicate::WaitFor(30_000_000));
}

#[test]
fn comparison_guard_evaluates_against_a_pressure_snapshot() {
    let suite = parse(suite_text()).unwrap();
    let startup = suite.get("startup").unwrap();
    let step2 = startup.step("2").unwrap();

    let pressures_low = indexmap::IndexMap::from_iter([("p1".to_string(), 50.0)]);
    let pressures_high = indexmap::IndexMap::from_iter([("p1".to_string(), 600.0)]);

    let (guard, _) = &step2.out_conditions[0];
    assert!(!evaluate(guard, &pressures_low, 0));
    assert!(evaluate(guard, &pressures_high, 0));
}
