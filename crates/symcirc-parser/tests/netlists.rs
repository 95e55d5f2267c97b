//! Whole-netlist parsing tests.

use symcirc_core::{ComponentKind, Direction};
use symcirc_parser::{Error, parse_circuit, parse_netlist};

/// Non-inverting amplifier drawn with explicit directions.
///
/// Circuit: Vin drives the + input of an ideal VCVS-modelled opamp,
/// feedback through R1/R2 to the - input.
const AMPLIFIER: &str = "\
# non-inverting amplifier
Vin 1 0 step {Vi}; up
E1 3 0 1 2 {A}; right
R1 3 2; left
R2 2 0_1; down
W1 0 0_1; right
";

#[test]
fn test_amplifier_netlist() {
    let components = parse_netlist(AMPLIFIER).unwrap();
    let kinds: Vec<_> = components.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ComponentKind::VoltageSource,
            ComponentKind::Vcvs,
            ComponentKind::Resistor,
            ComponentKind::Resistor,
            ComponentKind::Wire,
        ]
    );
    assert_eq!(components[0].direction(), Direction::Up);
    assert_eq!(components[3].direction(), Direction::Down);
}

#[test]
fn test_circuit_graph_from_netlist() {
    let circuit = parse_circuit(AMPLIFIER).unwrap();
    let graph = circuit.graph().unwrap();
    assert_eq!(graph.node_names().collect::<Vec<_>>(), vec!["0", "1", "2", "3"]);
    let at_two: Vec<_> = graph
        .connected("2")
        .unwrap()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(at_two, vec!["R1", "R2"]);
}

#[test]
fn test_duplicate_name_last_wins() {
    let circuit = parse_circuit("R1 1 0 10\nR1 1 0 20\n").unwrap();
    assert_eq!(circuit.len(), 1);
    let value = circuit.get("R1").and_then(|c| c.value().expr()).cloned();
    assert_eq!(value.and_then(|v| v.as_constant()), Some(20.0));
}

#[test]
fn test_error_reports_line() {
    let err = parse_netlist("R1 1 0\nR2 1\n").unwrap_err();
    assert!(matches!(err, Error::Line { line: 2, .. }));
    assert!(err.to_string().starts_with("line 2:"));
}
