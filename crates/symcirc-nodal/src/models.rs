//! Per-component branch equations.

use std::collections::BTreeMap;

use symcirc_core::{CircuitGraph, Component, ComponentKind, ComponentValue, Waveform, node};
use symcirc_expr::Expr;

use crate::error::{Error, Result};
use crate::kind::AnalysisKind;

/// Node voltages as seen by the branch models.
pub struct NodeVoltages<'a> {
    graph: &'a CircuitGraph,
    unknowns: &'a BTreeMap<String, Expr>,
}

impl<'a> NodeVoltages<'a> {
    pub fn new(graph: &'a CircuitGraph, unknowns: &'a BTreeMap<String, Expr>) -> Self {
        Self { graph, unknowns }
    }

    /// Voltage of any public node name; the reference node is zero.
    pub fn voltage(&self, name: &str) -> Result<Expr> {
        let rep = self
            .graph
            .representative(name)
            .ok_or_else(|| symcirc_core::Error::NodeNotFound(name.to_string()))?;
        if node::is_reference(rep) {
            return Ok(Expr::zero());
        }
        self.unknowns
            .get(rep)
            .cloned()
            .ok_or_else(|| symcirc_core::Error::NodeNotFound(name.to_string()).into())
    }

    /// `voltage(a) - voltage(b)`.
    pub fn difference(&self, a: &str, b: &str) -> Result<Expr> {
        Ok(self.voltage(a)?.sub(self.voltage(b)?))
    }
}

/// Supplies branch currents and source voltages for the nodal analysis.
pub trait BranchModel {
    /// Current leaving the first terminal of `component` and flowing through
    /// it, where `v` is the voltage from its first terminal to its second.
    fn branch_current(
        &self,
        component: &Component,
        v: Expr,
        voltages: &NodeVoltages<'_>,
        kind: AnalysisKind,
    ) -> Result<Expr>;

    /// Voltage a voltage-type source holds from its first terminal to its second.
    fn source_voltage(
        &self,
        component: &Component,
        voltages: &NodeVoltages<'_>,
        kind: AnalysisKind,
    ) -> Result<Expr>;
}

/// Branch equations for ideal lumped elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdealModels;

fn unsupported(component: &Component, kind: AnalysisKind) -> Error {
    Error::Unsupported {
        component: component.name().to_string(),
        kind,
    }
}

fn omega() -> Expr {
    Expr::symbol("omega")
}

/// Value of an independent source in `kind`, shaped by its waveform.
pub fn source_value(
    component: &Component,
    waveform: Waveform,
    value: &Expr,
    kind: AnalysisKind,
) -> Result<Expr> {
    use AnalysisKind as A;
    use Waveform as W;

    let v = value.clone();
    let result = match (waveform, kind) {
        (W::Generic, _) => Some(v),

        (W::Dc, A::Time | A::Dc) => Some(v),
        (W::Dc, A::Laplace) => Some(v.div(Expr::s())),
        (W::Dc, A::Phasor) => Some(Expr::zero()),

        (W::Ac, A::Time) => Some(v.mul(Expr::function("cos", vec![omega().mul(Expr::t())]))),
        (W::Ac, A::Phasor) => Some(v),
        (W::Ac, A::Dc) => Some(Expr::zero()),

        (W::Step, A::Time) => Some(v.mul(Expr::function("Heaviside", vec![Expr::t()]))),
        (W::Step, A::Laplace) => Some(v.div(Expr::s())),

        (W::Impulse, A::Time) => Some(v.mul(Expr::function("DiracDelta", vec![Expr::t()]))),
        (W::Impulse, A::Laplace) => Some(v),

        (W::S, A::Laplace) => Some(v),

        _ => None,
    };

    result.ok_or_else(|| Error::UnsupportedWaveform {
        component: component.name().to_string(),
        waveform: waveform.keyword().unwrap_or("generic").to_string(),
        kind,
    })
}

fn control_voltage(component: &Component, voltages: &NodeVoltages<'_>) -> Result<Expr> {
    let nodes = component.nodes();
    match nodes {
        [_, _, cp, cn] => voltages.difference(cp, cn),
        _ => Err(symcirc_core::Error::TooFewNodes(component.name().to_string()).into()),
    }
}

impl BranchModel for IdealModels {
    fn branch_current(
        &self,
        component: &Component,
        v: Expr,
        voltages: &NodeVoltages<'_>,
        kind: AnalysisKind,
    ) -> Result<Expr> {
        use AnalysisKind as A;

        let current = match (component.kind(), component.value()) {
            (ComponentKind::Resistor, ComponentValue::Passive { value, .. }) => {
                v.div(value.clone())
            }

            (ComponentKind::Capacitor, ComponentValue::Passive { value: c, initial }) => {
                match kind {
                    A::Laplace => {
                        let i = Expr::s().mul(c.clone()).mul(v);
                        match initial {
                            Some(v0) => i.sub(c.clone().mul(v0.clone())),
                            None => i,
                        }
                    }
                    A::Phasor => Expr::j_omega().mul(c.clone()).mul(v),
                    A::Time => c.clone().mul(Expr::function("Derivative", vec![v, Expr::t()])),
                    A::Dc => Expr::zero(),
                }
            }

            (ComponentKind::Inductor, ComponentValue::Passive { value: l, initial }) => {
                match kind {
                    A::Laplace => {
                        let i = v.div(Expr::s().mul(l.clone()));
                        match initial {
                            Some(i0) => i.add(i0.clone().div(Expr::s())),
                            None => i,
                        }
                    }
                    A::Phasor => v.div(Expr::j_omega().mul(l.clone())),
                    A::Time => {
                        let i = Expr::function("Integral", vec![v, Expr::t()]).div(l.clone());
                        match initial {
                            Some(i0) => i.add(i0.clone()),
                            None => i,
                        }
                    }
                    A::Dc => return Err(unsupported(component, kind)),
                }
            }

            (ComponentKind::CurrentSource, ComponentValue::Source { waveform, value }) => {
                source_value(component, *waveform, value, kind)?.neg()
            }

            (ComponentKind::Vccs, ComponentValue::VoltageControlled { gain }) => gain
                .clone()
                .mul(control_voltage(component, voltages)?)
                .neg(),

            _ => return Err(unsupported(component, kind)),
        };
        Ok(current)
    }

    fn source_voltage(
        &self,
        component: &Component,
        voltages: &NodeVoltages<'_>,
        kind: AnalysisKind,
    ) -> Result<Expr> {
        match (component.kind(), component.value()) {
            (ComponentKind::VoltageSource, ComponentValue::Source { waveform, value }) => {
                source_value(component, *waveform, value, kind)
            }
            (ComponentKind::Vcvs, ComponentValue::VoltageControlled { gain }) => {
                Ok(gain.clone().mul(control_voltage(component, voltages)?))
            }
            _ => Err(unsupported(component, kind)),
        }
    }
}
