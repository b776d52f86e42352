use ps_app::Driver;
use ps_pdl::Source;

fn pdl_text() -> &'static str {
    r#"
name: example
body:
- component:
    name: fill_valve
    edges:
      edge1:
        nodes: [0, 1]
    states:
      open:
        edge1: 5
      closed:
        edge1: closed
- graph:
    name: main
    nodes:
      tank:
        fixed_pressure: 1000
        components:
          - [fill_valve, 0]
      vessel:
        pressure: 0
        components:
          - [fill_valve, 1]
    states:
      fill_valve: closed
"#
}

fn proclang_text() -> &'static str {
    "fill:\n1.eng: set fill_valve to open\n2.eng: [vessel >= 500] set fill_valve to closed\n"
}

#[test]
fn driver_applies_first_step_action_immediately() {
    let engine = ps_app::load_engine(vec![Source::text(pdl_text())]).unwrap();
    let suite = ps_app::load_procedures(proclang_text()).unwrap();
    let driver = Driver::new(engine, suite).unwrap();

    assert_eq!(driver.current_procedure(), "fill");
    assert_eq!(driver.current_step(), "1");
    assert_eq!(driver.engine().current_state(&["fill_valve".to_string()]), ps_engine::ScalarOrMap::Scalar("open".to_string()));
}

#[test]
fn driver_transitions_once_pressure_threshold_is_met() {
    let engine = ps_app::load_engine(vec![Source::text(pdl_text())]).unwrap();
    let suite = ps_app::load_procedures(proclang_text()).unwrap();
    let mut driver = Driver::new(engine, suite).unwrap();

    for _ in 0..2000 {
        driver.tick(None).unwrap();
        if driver.current_step() == "2" {
            break;
        }
    }

    assert_eq!(driver.current_step(), "2");
}
