//! Integration tests for ps-engine, covering the concrete scenarios a
//! two-valve network must satisfy: closed/closed holds pressure, an open
//! path equilibrates toward ATM, state changes take effect on the next
//! step, and malformed construction is rejected or accumulated.

use indexmap::IndexMap;

use ps_components::{ComponentNodeId, EdgeDef, PlumbingComponent};
use ps_engine::{BadInputError, EngineStepError, InvalidEngineError, Mapping, PlumbingEngine};

fn valve(name: &str, open_fwd: f64, open_back: f64) -> PlumbingComponent {
    let edges = vec![
        EdgeDef::new("fwd", ComponentNodeId::from(1i64), ComponentNodeId::from(2i64)),
        EdgeDef::new("back", ComponentNodeId::from(2i64), ComponentNodeId::from(1i64)),
    ];
    let mut states = IndexMap::new();
    states.insert(
        "open".to_string(),
        IndexMap::from_iter([("fwd".to_string(), open_fwd), ("back".to_string(), open_back)]),
    );
    states.insert(
        "closed".to_string(),
        IndexMap::from_iter([("fwd".to_string(), 0.0), ("back".to_string(), 0.0)]),
    );
    PlumbingComponent::new(name, edges, states, "closed")
}

fn mapping_for(valve_in: &str, valve_out: &str) -> Mapping {
    IndexMap::from_iter([
        (ComponentNodeId::from(1i64), valve_in.to_string()),
        (ComponentNodeId::from(2i64), valve_out.to_string()),
    ])
}

/// Two valves in series between a source node and ATM, both closed.
fn two_valve_network(state1: &str, state2: &str) -> PlumbingEngine {
    let v1 = valve("v1", 1e6, 0.0);
    let v2 = valve("v2", 1e6, 0.0);

    let components = IndexMap::from_iter([("v1".to_string(), v1), ("v2".to_string(), v2)]);
    let mapping = IndexMap::from_iter([
        ("v1".to_string(), mapping_for("source", "mid")),
        ("v2".to_string(), mapping_for("mid", "atm")),
    ]);
    let pressures = IndexMap::from_iter([
        ("source".to_string(), (100_000.0, true)),
        ("mid".to_string(), (0.0, false)),
        ("atm".to_string(), (0.0, true)),
    ]);
    let states = IndexMap::from_iter([
        ("v1".to_string(), state1.to_string()),
        ("v2".to_string(), state2.to_string()),
    ]);

    PlumbingEngine::new(components, mapping, pressures, states).expect("network should construct")
}

#[test]
fn closed_closed_network_holds_pressure() {
    let mut engine = two_valve_network("closed", "closed");
    assert!(engine.is_valid());

    let before = engine.current_pressures(&["mid".to_string()]);
    for _ in 0..10 {
        engine.step(None).unwrap();
    }
    let after = engine.current_pressures(&["mid".to_string()]);
    assert_eq!(before, after);
}

#[test]
fn open_path_moves_pressure_toward_source() {
    let mut engine = two_valve_network("open", "closed");
    for _ in 0..50 {
        engine.step(None).unwrap();
    }
    let mid = match engine.current_pressures(&["mid".to_string()]) {
        ps_engine::ScalarOrMap::Scalar(p) => p,
        _ => panic!("expected a scalar"),
    };
    assert!(mid > 0.0, "pressure should have risen from the open side, got {mid}");
}

#[test]
fn state_change_applies_on_next_step() {
    let mut engine = two_valve_network("closed", "closed");
    engine.step(None).unwrap();
    let before = match engine.current_pressures(&["mid".to_string()]) {
        ps_engine::ScalarOrMap::Scalar(p) => p,
        _ => panic!("expected a scalar"),
    };
    assert_eq!(before, 0.0);

    engine.set_component_state("v1", "open").unwrap();
    for _ in 0..20 {
        engine.step(None).unwrap();
    }
    let after = match engine.current_pressures(&["mid".to_string()]) {
        ps_engine::ScalarOrMap::Scalar(p) => p,
        _ => panic!("expected a scalar"),
    };
    assert!(after > before);
}

#[test]
fn unintroduced_pressure_node_is_rejected() {
    let v1 = valve("v1", 1e6, 0.0);
    let components = IndexMap::from_iter([("v1".to_string(), v1)]);
    let mapping = IndexMap::from_iter([("v1".to_string(), mapping_for("source", "mid"))]);
    let pressures = IndexMap::from_iter([("ghost".to_string(), (1.0, true))]);
    let states = IndexMap::from_iter([("v1".to_string(), "closed".to_string())]);

    let result = PlumbingEngine::new(components, mapping, pressures, states);
    assert!(matches!(result, Err(BadInputError::UnintroducedPressureNode(n)) if n == "ghost"));
}

#[test]
fn stepping_a_component_free_engine_is_rejected() {
    let mut engine = PlumbingEngine::default();
    assert!(matches!(
        engine.step(None),
        Err(EngineStepError::Invalid(InvalidEngineError::EmptyGraph))
    ));
}

#[test]
fn solving_a_component_free_engine_is_rejected() {
    let mut engine = PlumbingEngine::default();
    assert!(matches!(
        engine.solve(1e-3, 1.0, None),
        Err(EngineStepError::Invalid(InvalidEngineError::EmptyGraph))
    ));
}

#[test]
fn invalid_component_accumulates_rather_than_raising() {
    let edges = vec![EdgeDef::new(
        "fwd",
        ComponentNodeId::from(1i64),
        ComponentNodeId::from(2i64),
    )];
    let mut states = IndexMap::new();
    states.insert("open".to_string(), IndexMap::from_iter([]));
    let broken = PlumbingComponent::new("broken", edges, states, "open");
    assert!(!broken.is_valid());

    let components = IndexMap::from_iter([("broken".to_string(), broken)]);
    let mapping = IndexMap::from_iter([("broken".to_string(), mapping_for("a", "b"))]);
    let engine = PlumbingEngine::new(
        components,
        mapping,
        IndexMap::new(),
        IndexMap::from_iter([("broken".to_string(), "open".to_string())]),
    )
    .expect("construction itself never raises for an invalid component");

    assert!(!engine.is_valid());
    assert_eq!(engine.errors().len(), 1);
}

#[test]
fn stepping_an_invalid_engine_fails() {
    let edges = vec![EdgeDef::new(
        "fwd",
        ComponentNodeId::from(1i64),
        ComponentNodeId::from(2i64),
    )];
    let mut states = IndexMap::new();
    states.insert("open".to_string(), IndexMap::from_iter([]));
    let broken = PlumbingComponent::new("broken", edges, states, "open");

    let components = IndexMap::from_iter([("broken".to_string(), broken)]);
    let mapping = IndexMap::from_iter([("broken".to_string(), mapping_for("a", "b"))]);
    let mut engine = PlumbingEngine::new(
        components,
        mapping,
        IndexMap::new(),
        IndexMap::from_iter([("broken".to_string(), "open".to_string())]),
    )
    .unwrap();

    assert!(engine.step(None).is_err());
}

#[test]
fn remove_component_clears_its_errors() {
    let edges = vec![EdgeDef::new(
        "fwd",
        ComponentNodeId::from(1i64),
        ComponentNodeId::from(2i64),
    )];
    let mut states = IndexMap::new();
    states.insert("open".to_string(), IndexMap::from_iter([]));
    let broken = PlumbingComponent::new("broken", edges, states, "open");

    let components = IndexMap::from_iter([("broken".to_string(), broken)]);
    let mapping = IndexMap::from_iter([("broken".to_string(), mapping_for("a", "b"))]);
    let mut engine = PlumbingEngine::new(
        components,
        mapping,
        IndexMap::new(),
        IndexMap::from_iter([("broken".to_string(), "open".to_string())]),
    )
    .unwrap();
    assert!(!engine.is_valid());

    engine.remove_component("broken").unwrap();
    assert!(engine.is_valid());
}

#[test]
fn reset_restores_initial_pressures_and_states() {
    let mut engine = two_valve_network("open", "open");
    for _ in 0..20 {
        engine.step(None).unwrap();
    }
    engine.reset(false).unwrap();

    assert_eq!(engine.time(), 0);
    let mid = match engine.current_pressures(&["mid".to_string()]) {
        ps_engine::ScalarOrMap::Scalar(p) => p,
        _ => panic!("expected a scalar"),
    };
    assert_eq!(mid, 0.0);
    let state = match engine.current_state(&["v1".to_string()]) {
        ps_engine::ScalarOrMap::Scalar(s) => s,
        _ => panic!("expected a scalar"),
    };
    assert_eq!(state, "open");
}

#[test]
fn reverse_orientation_swaps_fc() {
    let mut engine = two_valve_network("open", "closed");
    let fwd_before = match engine.current_fc(&["v1.fwd".to_string()]) {
        ps_engine::ScalarOrMap::Scalar(fc) => fc,
        _ => panic!("expected a scalar"),
    };
    let back_before = match engine.current_fc(&["v1.back".to_string()]) {
        ps_engine::ScalarOrMap::Scalar(fc) => fc,
        _ => panic!("expected a scalar"),
    };
    engine.reverse_orientation("v1").unwrap();
    let fwd_after = match engine.current_fc(&["v1.fwd".to_string()]) {
        ps_engine::ScalarOrMap::Scalar(fc) => fc,
        _ => panic!("expected a scalar"),
    };
    assert_eq!(fwd_after, back_before);
    assert_ne!(fwd_after, fwd_before);
}

#[test]
fn set_teq_rejects_too_small_value() {
    let mut engine = two_valve_network("closed", "closed");
    let which_edge = IndexMap::from_iter([(
        "closed".to_string(),
        IndexMap::from_iter([("fwd".to_string(), 0.0)]),
    )]);
    let result = engine.set_teq("v1", which_edge);
    assert!(matches!(result, Err(BadInputError::TeqTooSmall { .. })));
}

#[test]
fn list_toggles_reports_multi_state_components() {
    let engine = two_valve_network("closed", "closed");
    let toggles = engine.list_toggles();
    assert_eq!(toggles.len(), 2);
    assert!(toggles.contains(&"v1".to_string()));
    assert!(toggles.contains(&"v2".to_string()));
}
