//! Nodal analysis: one KCL or source constraint per node.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, warn};
use symcirc_core::{Circuit, CircuitGraph, Component, node};
use symcirc_expr::Expr;

use crate::error::Result;
use crate::kind::AnalysisKind;
use crate::matrix::MatrixEquations;
use crate::models::{BranchModel, IdealModels, NodeVoltages};

/// `lhs = rhs` for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub lhs: Expr,
    pub rhs: Expr,
}

impl Equation {
    /// `lhs - rhs`, zero when the equation holds.
    pub fn residual(&self) -> Expr {
        self.lhs.clone().sub(self.rhs.clone())
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// Options for [`NodalAnalysis`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodalOptions {
    /// Inserted between `V` and the node name to tell node voltages apart
    /// from component voltages (`Vn1(s)` rather than `V1(s)`).
    pub node_prefix: String,
}

/// Nodal equations of a circuit, built once at construction.
///
/// ```
/// use symcirc_nodal::{AnalysisKind, NodalAnalysis};
///
/// let circuit = symcirc_parser::parse_circuit("V1 1 0\nR1 1 2\nL1 2 0").unwrap();
/// let na = NodalAnalysis::new(&circuit, AnalysisKind::Laplace).unwrap();
/// assert_eq!(na.equations()["1"].to_string(), "V1(s) = V1");
/// ```
#[derive(Debug, Clone)]
pub struct NodalAnalysis {
    kind: AnalysisKind,
    options: NodalOptions,
    graph: CircuitGraph,
    unknowns: BTreeMap<String, Expr>,
    equations: BTreeMap<String, Equation>,
}

impl NodalAnalysis {
    /// Analyse with the ideal element models and default options.
    pub fn new(circuit: &Circuit, kind: AnalysisKind) -> Result<Self> {
        Self::with_options(circuit, kind, NodalOptions::default())
    }

    pub fn with_options(circuit: &Circuit, kind: AnalysisKind, options: NodalOptions) -> Result<Self> {
        Self::from_graph(circuit.graph()?, kind, options, &IdealModels)
    }

    /// Analyse a prebuilt graph with caller-supplied branch models.
    pub fn from_graph(
        graph: CircuitGraph,
        kind: AnalysisKind,
        options: NodalOptions,
        models: &dyn BranchModel,
    ) -> Result<Self> {
        let unknowns: BTreeMap<String, Expr> = graph
            .nodes()
            .filter(|n| !n.is_reference() && !n.is_dummy())
            .map(|n| {
                (
                    n.name().to_string(),
                    kind.node_voltage(&options.node_prefix, n.name()),
                )
            })
            .collect();

        let equations = make_equations(&graph, &unknowns, kind, models)?;
        debug!(
            "nodal analysis ({}): {} unknowns, {} equations",
            kind,
            unknowns.len(),
            equations.len()
        );

        Ok(Self {
            kind,
            options,
            graph,
            unknowns,
            equations,
        })
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    pub fn options(&self) -> &NodalOptions {
        &self.options
    }

    pub fn graph(&self) -> &CircuitGraph {
        &self.graph
    }

    /// Equations keyed by node name, sorted ascending.
    pub fn equations(&self) -> &BTreeMap<String, Equation> {
        &self.equations
    }

    /// Unknown node voltages in the same order as the equations.
    pub fn unknowns(&self) -> Vec<Expr> {
        self.unknowns.values().cloned().collect()
    }

    /// Voltage of a node by any of its names.
    pub fn voltage(&self, node: &str) -> Result<Expr> {
        NodeVoltages::new(&self.graph, &self.unknowns).voltage(node)
    }

    /// The equations as `A·y = b`. Not available in the time domain.
    pub fn equations_matrix(&self) -> Result<MatrixEquations> {
        MatrixEquations::from_equations(self.kind, &self.equations, self.unknowns())
    }
}

fn make_equations(
    graph: &CircuitGraph,
    unknowns: &BTreeMap<String, Expr>,
    kind: AnalysisKind,
    models: &dyn BranchModel,
) -> Result<BTreeMap<String, Equation>> {
    let voltages = NodeVoltages::new(graph, unknowns);
    let mut equations = BTreeMap::new();

    for name in unknowns.keys() {
        let connected = graph.connected(name)?;

        let equation = match connected.iter().find(|c| c.kind().is_voltage_source()) {
            Some(source) => pinning_equation(graph, source, name, &voltages, kind, models)?,
            None => kcl_equation(graph, &connected, name, &voltages, kind, models)?,
        };
        equations.insert(name.clone(), equation);
    }

    Ok(equations)
}

/// Terminal pair of a two-terminal branch, resolved to representatives.
fn branch_nodes<'g>(graph: &'g CircuitGraph, component: &Component) -> Result<(&'g str, &'g str)> {
    let terminals = component.current_terminals();
    if terminals.len() < 2 {
        return Err(symcirc_core::Error::TooFewNodes(component.name().to_string()).into());
    }
    let resolve = |name: &str| {
        graph
            .representative(name)
            .ok_or_else(|| symcirc_core::Error::NodeNotFound(name.to_string()))
    };
    Ok((resolve(&terminals[0])?, resolve(&terminals[1])?))
}

fn pinning_equation(
    graph: &CircuitGraph,
    source: &Component,
    node: &str,
    voltages: &NodeVoltages<'_>,
    kind: AnalysisKind,
    models: &dyn BranchModel,
) -> Result<Equation> {
    let (n1, n2) = branch_nodes(graph, source)?;
    if !node::is_reference(n1) && !node::is_reference(n2) {
        warn!(
            "voltage source {} between {} and {} is floating; node {} repeats its constraint",
            source.name(),
            n1,
            n2,
            node
        );
    }

    let v = models.source_voltage(source, voltages, kind)?;
    Ok(Equation {
        lhs: voltages.voltage(n1)?,
        rhs: voltages.voltage(n2)?.add(v),
    })
}

fn kcl_equation(
    graph: &CircuitGraph,
    connected: &[&Component],
    node: &str,
    voltages: &NodeVoltages<'_>,
    kind: AnalysisKind,
    models: &dyn BranchModel,
) -> Result<Equation> {
    let mut terms = Vec::with_capacity(connected.len());

    for component in connected {
        let (n1, n2) = branch_nodes(graph, component)?;
        if n1 == n2 {
            debug!("{} is shorted at node {}, no current term", component.name(), node);
            continue;
        }

        let v = voltages.difference(n1, n2)?;
        let current = models.branch_current(component, v, voltages, kind)?;
        let term = if node == n1 {
            current
        } else if node == n2 {
            current.neg()
        } else {
            return Err(symcirc_core::Error::NodeNotOnComponent {
                component: component.name().to_string(),
                node: node.to_string(),
            }
            .into());
        };
        terms.push(term);
    }

    Ok(Equation {
        lhs: Expr::sum(terms),
        rhs: Expr::zero(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use symcirc_parser::parse_circuit;

    fn analyse(netlist: &str, kind: AnalysisKind) -> NodalAnalysis {
        NodalAnalysis::new(&parse_circuit(netlist).unwrap(), kind).unwrap()
    }

    #[test]
    fn test_voltage_source_precedence() {
        let na = analyse("V1 1 0 5\nR1 1 0\nR2 1 0", AnalysisKind::Dc);
        assert_eq!(na.equations()["1"].to_string(), "V1(dc) = 5");
    }

    #[test]
    fn test_kcl_signs() {
        let na = analyse("I1 1 0 2\nR1 1 2\nR2 2 0", AnalysisKind::Dc);
        assert_eq!(na.equations()["1"].to_string(), "-2 + (V1(dc) - V2(dc))/R1 = 0");
        assert_eq!(na.equations()["2"].to_string(), "-((V1(dc) - V2(dc))/R1) + V2(dc)/R2 = 0");
    }

    #[test]
    fn test_unknown_order_and_prefix() {
        let circuit = parse_circuit("R1 b a\nR2 a 0\nR3 b 0").unwrap();
        let na = NodalAnalysis::with_options(
            &circuit,
            AnalysisKind::Laplace,
            NodalOptions {
                node_prefix: "n".to_string(),
            },
        )
        .unwrap();
        let names: Vec<_> = na.unknowns().iter().map(|u| u.to_string()).collect();
        assert_eq!(names, vec!["Vna(s)", "Vnb(s)"]);
        assert_eq!(na.equations().keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_reference_voltage_is_zero() {
        let na = analyse("R1 1 0\nR2 1 0_1", AnalysisKind::Laplace);
        assert!(na.voltage("0").unwrap().is_zero());
        assert!(na.voltage("0_1").unwrap().is_zero());
        assert_eq!(na.equations().len(), 1);
    }

    #[test]
    fn test_dummy_nodes_skipped() {
        let na = analyse("V1 1 0\nR1 1 *x\nR2 *x 0\nW1 *x *y", AnalysisKind::Laplace);
        assert_eq!(na.equations().keys().collect::<Vec<_>>(), vec!["1"]);
    }

    #[test]
    fn test_self_loop_skipped() {
        let na = analyse("I1 1 0\nR1 1 0\nR2 1 1_1", AnalysisKind::Dc);
        assert_eq!(na.equations()["1"].to_string(), "-I1 + V1(dc)/R1 = 0");
    }

    #[test]
    fn test_unsupported_component_named() {
        let err = NodalAnalysis::new(
            &parse_circuit("V1 1 0\nF1 2 0 V1 3\nR1 2 0").unwrap(),
            AnalysisKind::Laplace,
        )
        .unwrap_err();
        assert!(err.to_string().contains("F1"));
    }

    #[test]
    fn test_floating_source_duplicates_constraint() {
        let na = analyse("V1 1 2 3\nR1 1 0\nR2 2 0", AnalysisKind::Dc);
        assert_eq!(na.equations()["1"], na.equations()["2"]);
    }
}
