//! Validation of nodal equations against hand-derived and analytical solutions.
//!
//! Test naming convention:
//! - `test_equations_*` - structure of the emitted symbolic equations
//! - `test_dc_*` - numeric solves of the DC matrix form
//! - `test_laplace_*` / `test_phasor_*` - solves in the transform domains

use std::collections::HashMap;

use num_complex::Complex64;
use symcirc_nodal::{AnalysisKind, Error, NodalAnalysis};
use symcirc_parser::parse_circuit;

/// Tolerance for solved node voltages.
const VOLTAGE_TOL: f64 = 1e-9;

fn analyse(netlist: &str, kind: AnalysisKind) -> NodalAnalysis {
    let circuit = parse_circuit(netlist).expect("parse failed");
    NodalAnalysis::new(&circuit, kind).expect("analysis failed")
}

fn bindings(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

// ============================================================================
// Equation structure
// ============================================================================

/// Test: source, series resistor, shunt inductor in the Laplace domain.
///
/// Circuit: V1 -- node1 -- R1 -- node2 -- L1 -- GND
/// Expected: node 1 pinned by V1, node 2 a KCL sum over R1 and L1.
#[test]
fn test_equations_series_rl() {
    let netlist = "\
V1 1 0; down
R1 1 2; right
L1 2 0; down
";
    let na = analyse(netlist, AnalysisKind::Laplace);
    let eqs = na.equations();

    assert_eq!(eqs.keys().collect::<Vec<_>>(), vec!["1", "2"]);
    assert_eq!(eqs["1"].to_string(), "V1(s) = V1");
    assert_eq!(
        eqs["2"].to_string(),
        "-((V1(s) - V2(s))/R1) + V2(s)/(s*L1) = 0"
    );

    let m = na.equations_matrix().unwrap();
    let x = m
        .solve(&bindings(&[("V1", 1.0), ("R1", 1.0), ("L1", 1.0), ("s", 1.0)]))
        .unwrap();
    assert!((x[0] - 1.0).abs() < VOLTAGE_TOL, "V(1) = {}", x[0]);
    assert!((x[1] - 0.5).abs() < VOLTAGE_TOL, "V(2) = {}", x[1]);
}

/// Test: same netlist analysed twice yields identical equation sets.
#[test]
fn test_equations_deterministic() {
    let netlist = "V1 1 0\nR1 1 2\nC1 2 3\nR2 3 0\nL1 2 0";
    let a = analyse(netlist, AnalysisKind::Laplace);
    let b = analyse(netlist, AnalysisKind::Laplace);
    assert_eq!(a.equations(), b.equations());
    assert_eq!(a.unknowns(), b.unknowns());
}

/// Test: every incident component contributes exactly one current term.
///
/// Circuit: two parallel resistors and a third to node 2, all from node 1.
/// With unit resistors node 1 carries 1/R1 + 1/R2 + 1/R3 on its diagonal
/// and the source current moves to the right-hand side.
#[test]
fn test_equations_kcl_conservation() {
    let na = analyse("I1 0 1\nR1 1 0\nR2 1 0\nR3 1 2\nR4 2 0", AnalysisKind::Dc);
    let values = bindings(&[
        ("R1", 1.0),
        ("R2", 1.0),
        ("R3", 1.0),
        ("R4", 1.0),
        ("I1", 2.0),
    ]);
    let (a, b) = na.equations_matrix().unwrap().evaluate(&values).unwrap();
    assert!((a[(0, 0)] - 3.0).abs() < VOLTAGE_TOL, "A[0,0] = {}", a[(0, 0)]);
    assert!((a[(0, 1)] + 1.0).abs() < VOLTAGE_TOL, "A[0,1] = {}", a[(0, 1)]);
    assert!((b[0] + 2.0).abs() < VOLTAGE_TOL, "b[0] = {}", b[0]);
}

/// Test: a source named like a node keeps its own symbol in DC.
///
/// Circuit: V2 (unvalued) -- node1 -- R1=1 -- node2 -- R2=1 -- GND
/// Expected: node 1 pinned to the source value, V(2) = V2/2
#[test]
fn test_equations_dc_source_symbol_distinct_from_node() {
    let na = analyse("V2 1 0\nR1 1 2 1\nR2 2 0 1", AnalysisKind::Dc);
    assert_eq!(na.equations()["1"].to_string(), "V1(dc) = V2");

    let x = na
        .equations_matrix()
        .unwrap()
        .solve(&bindings(&[("V2", 2.0)]))
        .unwrap();
    assert!((x[0] - 2.0).abs() < VOLTAGE_TOL, "V(1) = {}", x[0]);
    assert!((x[1] - 1.0).abs() < VOLTAGE_TOL, "V(2) = {}", x[1]);

    let na = analyse("V1 1 0\nR1 1 0 1", AnalysisKind::Dc);
    assert_eq!(na.equations()["1"].to_string(), "V1(dc) = V1");
    let x = na
        .equations_matrix()
        .unwrap()
        .solve(&bindings(&[("V1", 3.0)]))
        .unwrap();
    assert!((x[0] - 3.0).abs() < VOLTAGE_TOL, "V(1) = {}", x[0]);
}

/// Test: initial conditions appear in the Laplace-domain branch currents.
#[test]
fn test_equations_capacitor_initial_condition() {
    let na = analyse("C1 1 0 C1 2\nR1 1 0", AnalysisKind::Laplace);
    assert_eq!(
        na.equations()["1"].to_string(),
        "s*C1*V1(s) - C1*2 + V1(s)/R1 = 0"
    );
}

/// Test: time-domain equations have no matrix form.
#[test]
fn test_equations_time_domain_matrix_rejected() {
    let na = analyse("V1 1 0 step 1\nR1 1 2\nC1 2 0", AnalysisKind::Time);
    assert_eq!(na.equations()["1"].to_string(), "v1(t) = Heaviside(t)");
    assert_eq!(
        na.equations()["2"].to_string(),
        "-((v1(t) - v2(t))/R1) + C1*Derivative(v2(t), t) = 0"
    );
    assert!(matches!(na.equations_matrix(), Err(Error::TimeDomain)));
}

// ============================================================================
// DC solves
// ============================================================================

/// Test: voltage divider.
///
/// Circuit: V1=10V -- R1=1k -- node2 -- R2=1k -- GND
/// Expected: V(2) = 10 * 1k/2k = 5V
#[test]
fn test_dc_voltage_divider() {
    let na = analyse("V1 1 0 dc 10\nR1 1 2 1k\nR2 2 0 1k", AnalysisKind::Dc);
    let x = na.equations_matrix().unwrap().solve(&HashMap::new()).unwrap();
    assert!((x[0] - 10.0).abs() < VOLTAGE_TOL, "V(1) = {}", x[0]);
    assert!((x[1] - 5.0).abs() < VOLTAGE_TOL, "V(2) = {}", x[1]);
}

/// Test: current source into a resistor.
///
/// Circuit: I1=2A into node1, R1=1 to GND
/// Expected: V(1) = 2V
#[test]
fn test_dc_current_source() {
    let na = analyse("I1 1 0 2\nR1 1 0 1", AnalysisKind::Dc);
    let x = na.equations_matrix().unwrap().solve(&HashMap::new()).unwrap();
    assert!((x[0] - 2.0).abs() < VOLTAGE_TOL, "V(1) = {}", x[0]);
}

/// Test: voltage-controlled voltage source.
///
/// Circuit: V1=2V at node1, E1 drives node2 with gain 3 from V(1)
/// Expected: V(2) = 6V
#[test]
fn test_dc_vcvs_gain() {
    let na = analyse("V1 1 0 2\nR1 1 0 1\nE1 2 0 1 0 3\nR2 2 0 1", AnalysisKind::Dc);
    assert_eq!(na.equations()["2"].to_string(), "V2(dc) = 3*V1(dc)");
    let x = na.equations_matrix().unwrap().solve(&HashMap::new()).unwrap();
    assert!((x[1] - 6.0).abs() < VOLTAGE_TOL, "V(2) = {}", x[1]);
}

/// Test: voltage-controlled current source.
///
/// Circuit: V1=2V at node1, G1 pushes 3*V(1) into node2 across R2=1
/// Expected: V(2) = 6V
#[test]
fn test_dc_vccs_transconductance() {
    let na = analyse("V1 1 0 2\nR1 1 0 1\nG1 2 0 1 0 3\nR2 2 0 1", AnalysisKind::Dc);
    let x = na.equations_matrix().unwrap().solve(&HashMap::new()).unwrap();
    assert!((x[1] - 6.0).abs() < VOLTAGE_TOL, "V(2) = {}", x[1]);
}

/// Test: a floating node makes the system singular.
#[test]
fn test_dc_singular_system() {
    let na = analyse("I1 1 0 1\nC1 1 0", AnalysisKind::Dc);
    let result = na.equations_matrix().unwrap().solve(&HashMap::new());
    assert!(matches!(result, Err(Error::SingularMatrix)));
}

// ============================================================================
// Transform-domain solves
// ============================================================================

/// Test: capacitor with an initial voltage discharging into a resistor.
///
/// With s = 1, C1 = 1, R1 = 1 and v0 = 2: (sC + 1/R) V = C v0, V = 1.
#[test]
fn test_laplace_initial_condition_solve() {
    let na = analyse("C1 1 0 C1 2\nR1 1 0", AnalysisKind::Laplace);
    let x = na
        .equations_matrix()
        .unwrap()
        .solve(&bindings(&[("s", 1.0), ("C1", 1.0), ("R1", 1.0)]))
        .unwrap();
    assert!((x[0] - 1.0).abs() < VOLTAGE_TOL, "V(1) = {}", x[0]);
}

/// Test: RC low-pass at its corner frequency.
///
/// Circuit: V1=1 (ac) -- R1=1 -- node2 -- C1=1 -- GND, omega = 1
/// Expected: V(2) = 1/(1 + j) = 0.5 - 0.5j
#[test]
fn test_phasor_rc_lowpass() {
    let na = analyse("V1 1 0 ac 1\nR1 1 2 1\nC1 2 0 1", AnalysisKind::Phasor);
    let values: HashMap<String, Complex64> =
        [("omega".to_string(), Complex64::new(1.0, 0.0))].into_iter().collect();
    let x = na.equations_matrix().unwrap().solve_complex(&values).unwrap();
    assert!((x[1] - Complex64::new(0.5, -0.5)).norm() < VOLTAGE_TOL, "V(2) = {}", x[1]);
}
