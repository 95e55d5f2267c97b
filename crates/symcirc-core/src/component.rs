//! Component records.

use std::fmt;

use symcirc_expr::Expr;

use crate::error::{Error, Result};
use crate::hints::{Direction, LayoutHints};

/// Element type, selected from the component name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ComponentKind {
    /// R
    Resistor,
    /// C
    Capacitor,
    /// L
    Inductor,
    /// V
    VoltageSource,
    /// I
    CurrentSource,
    /// E, voltage-controlled voltage source.
    Vcvs,
    /// G, voltage-controlled current source.
    Vccs,
    /// F, current-controlled current source.
    Cccs,
    /// H, current-controlled voltage source.
    Ccvs,
    /// TF, ideal transformer.
    Transformer,
    /// K, mutual inductance between two inductors.
    MutualInductance,
    /// W
    Wire,
    /// O
    OpenCircuit,
    /// P
    Port,
}

impl ComponentKind {
    /// Kind for a component name, or `None` for an unknown prefix.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.starts_with("TF") {
            return Some(ComponentKind::Transformer);
        }
        let kind = match name.chars().next()? {
            'R' => ComponentKind::Resistor,
            'C' => ComponentKind::Capacitor,
            'L' => ComponentKind::Inductor,
            'V' => ComponentKind::VoltageSource,
            'I' => ComponentKind::CurrentSource,
            'E' => ComponentKind::Vcvs,
            'G' => ComponentKind::Vccs,
            'F' => ComponentKind::Cccs,
            'H' => ComponentKind::Ccvs,
            'K' => ComponentKind::MutualInductance,
            'W' => ComponentKind::Wire,
            'O' => ComponentKind::OpenCircuit,
            'P' => ComponentKind::Port,
            _ => return None,
        };
        Some(kind)
    }

    pub fn prefix(self) -> &'static str {
        match self {
            ComponentKind::Resistor => "R",
            ComponentKind::Capacitor => "C",
            ComponentKind::Inductor => "L",
            ComponentKind::VoltageSource => "V",
            ComponentKind::CurrentSource => "I",
            ComponentKind::Vcvs => "E",
            ComponentKind::Vccs => "G",
            ComponentKind::Cccs => "F",
            ComponentKind::Ccvs => "H",
            ComponentKind::Transformer => "TF",
            ComponentKind::MutualInductance => "K",
            ComponentKind::Wire => "W",
            ComponentKind::OpenCircuit => "O",
            ComponentKind::Port => "P",
        }
    }

    /// Number of terminal nodes a component of this kind takes.
    pub fn arity(self) -> usize {
        match self {
            ComponentKind::Vcvs | ComponentKind::Vccs | ComponentKind::Transformer => 4,
            ComponentKind::MutualInductance => 0,
            _ => 2,
        }
    }

    pub fn default_direction(self) -> Direction {
        match self {
            ComponentKind::OpenCircuit | ComponentKind::Port => Direction::Down,
            _ => Direction::Right,
        }
    }

    /// Sources that fix the voltage between their output terminals.
    pub fn is_voltage_source(self) -> bool {
        matches!(self, ComponentKind::VoltageSource | ComponentKind::Vcvs)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Resistor => "resistor",
            ComponentKind::Capacitor => "capacitor",
            ComponentKind::Inductor => "inductor",
            ComponentKind::VoltageSource => "voltage source",
            ComponentKind::CurrentSource => "current source",
            ComponentKind::Vcvs => "VCVS",
            ComponentKind::Vccs => "VCCS",
            ComponentKind::Cccs => "CCCS",
            ComponentKind::Ccvs => "CCVS",
            ComponentKind::Transformer => "transformer",
            ComponentKind::MutualInductance => "mutual inductance",
            ComponentKind::Wire => "wire",
            ComponentKind::OpenCircuit => "open circuit",
            ComponentKind::Port => "port",
        };
        f.write_str(name)
    }
}

/// Time behaviour of an independent source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    /// Value used unchanged in every domain.
    #[default]
    Generic,
    Dc,
    Ac,
    Step,
    Impulse,
    /// Value already expressed in the Laplace domain.
    S,
}

impl Waveform {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "dc" => Some(Waveform::Dc),
            "ac" => Some(Waveform::Ac),
            "step" => Some(Waveform::Step),
            "impulse" => Some(Waveform::Impulse),
            "s" => Some(Waveform::S),
            _ => None,
        }
    }

    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Waveform::Generic => None,
            Waveform::Dc => Some("dc"),
            Waveform::Ac => Some("ac"),
            Waveform::Step => Some("step"),
            Waveform::Impulse => Some("impulse"),
            Waveform::S => Some("s"),
        }
    }
}

/// Value arguments, shaped by component kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// R, C, L. `initial` is the capacitor voltage or inductor current at t = 0.
    Passive { value: Expr, initial: Option<Expr> },
    /// V, I.
    Source { waveform: Waveform, value: Expr },
    /// E, G: gain from the controlling node pair.
    VoltageControlled { gain: Expr },
    /// F, H: gain from the current through voltage source `control`.
    CurrentControlled { control: String, gain: Expr },
    Transformer { ratio: Expr },
    Coupling {
        first: String,
        second: String,
        coefficient: Expr,
    },
    /// W, O, P.
    None,
}

impl ComponentValue {
    /// The value a component gets when its line carries no arguments.
    pub fn default_for(kind: ComponentKind, name: &str) -> Self {
        let symbol = Expr::symbol(name);
        match kind {
            ComponentKind::Resistor | ComponentKind::Capacitor | ComponentKind::Inductor => {
                ComponentValue::Passive {
                    value: symbol,
                    initial: None,
                }
            }
            ComponentKind::VoltageSource | ComponentKind::CurrentSource => ComponentValue::Source {
                waveform: Waveform::Generic,
                value: symbol,
            },
            ComponentKind::Vcvs | ComponentKind::Vccs => {
                ComponentValue::VoltageControlled { gain: symbol }
            }
            ComponentKind::Cccs | ComponentKind::Ccvs => ComponentValue::CurrentControlled {
                control: String::new(),
                gain: symbol,
            },
            ComponentKind::Transformer => ComponentValue::Transformer { ratio: symbol },
            ComponentKind::MutualInductance => ComponentValue::Coupling {
                first: String::new(),
                second: String::new(),
                coefficient: symbol,
            },
            ComponentKind::Wire | ComponentKind::OpenCircuit | ComponentKind::Port => {
                ComponentValue::None
            }
        }
    }

    /// The principal symbolic value, if the kind has one.
    pub fn expr(&self) -> Option<&Expr> {
        match self {
            ComponentValue::Passive { value, .. } | ComponentValue::Source { value, .. } => {
                Some(value)
            }
            ComponentValue::VoltageControlled { gain }
            | ComponentValue::CurrentControlled { gain, .. } => Some(gain),
            ComponentValue::Transformer { ratio } => Some(ratio),
            ComponentValue::Coupling { coefficient, .. } => Some(coefficient),
            ComponentValue::None => None,
        }
    }

    fn accepts(&self, kind: ComponentKind) -> bool {
        use ComponentKind as K;
        match self {
            ComponentValue::Passive { initial, .. } => match kind {
                K::Resistor => initial.is_none(),
                K::Capacitor | K::Inductor => true,
                _ => false,
            },
            ComponentValue::Source { .. } => matches!(kind, K::VoltageSource | K::CurrentSource),
            ComponentValue::VoltageControlled { .. } => matches!(kind, K::Vcvs | K::Vccs),
            ComponentValue::CurrentControlled { .. } => matches!(kind, K::Cccs | K::Ccvs),
            ComponentValue::Transformer { .. } => kind == K::Transformer,
            ComponentValue::Coupling { .. } => kind == K::MutualInductance,
            ComponentValue::None => matches!(kind, K::Wire | K::OpenCircuit | K::Port),
        }
    }
}

/// One circuit element. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    kind: ComponentKind,
    nodes: Vec<String>,
    value: ComponentValue,
    hints: Option<LayoutHints>,
}

impl Component {
    /// Build a component, checking the name prefix, node count and value shape.
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<String>,
        value: ComponentValue,
        hints: Option<LayoutHints>,
    ) -> Result<Self> {
        let name = name.into();
        let kind =
            ComponentKind::from_name(&name).ok_or_else(|| Error::UnknownKind(name.clone()))?;

        if nodes.len() != kind.arity() {
            return Err(Error::Arity {
                name,
                kind,
                expected: kind.arity(),
                found: nodes.len(),
            });
        }
        if !value.accepts(kind) {
            return Err(Error::InvalidValue {
                name,
                message: format!("{} takes different arguments", kind),
            });
        }

        Ok(Self {
            name,
            kind,
            nodes,
            value,
            hints,
        })
    }

    /// Component with the default value for its kind.
    pub fn with_defaults(name: &str, nodes: &[&str]) -> Result<Self> {
        let kind = ComponentKind::from_name(name).ok_or_else(|| Error::UnknownKind(name.into()))?;
        Self::new(
            name,
            nodes.iter().map(|n| n.to_string()).collect(),
            ComponentValue::default_for(kind, name),
            None,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn value(&self) -> &ComponentValue {
        &self.value
    }

    /// Directives as written, `None` if the line had no `;` part.
    pub fn hints(&self) -> Option<&LayoutHints> {
        self.hints.as_ref()
    }

    pub fn direction(&self) -> Direction {
        self.hints
            .as_ref()
            .and_then(|h| h.direction)
            .unwrap_or_else(|| self.kind.default_direction())
    }

    pub fn size(&self) -> f64 {
        self.hints.as_ref().map_or(1.0, |h| h.size)
    }

    /// Terminals through which the element carries current.
    pub fn current_terminals(&self) -> &[String] {
        match self.kind {
            ComponentKind::Wire
            | ComponentKind::OpenCircuit
            | ComponentKind::Port
            | ComponentKind::MutualInductance => &[],
            ComponentKind::Transformer => &self.nodes,
            _ => &self.nodes[..2],
        }
    }

    /// Terminals that appear on a drawing.
    pub fn drawn_terminals(&self) -> &[String] {
        match self.kind {
            ComponentKind::MutualInductance => &[],
            ComponentKind::Vcvs | ComponentKind::Vccs => &self.nodes[..2],
            _ => &self.nodes,
        }
    }

    /// True for a capacitor or inductor with an explicit initial condition.
    pub fn has_initial_condition(&self) -> bool {
        matches!(
            self.value,
            ComponentValue::Passive {
                initial: Some(_),
                ..
            }
        )
    }
}

fn braced(e: &Expr) -> String {
    format!("{{{}}}", e)
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.name.clone()];
        parts.extend(self.nodes.iter().cloned());

        match &self.value {
            ComponentValue::Passive { value, initial } => {
                parts.push(braced(value));
                if let Some(initial) = initial {
                    parts.push(braced(initial));
                }
            }
            ComponentValue::Source { waveform, value } => {
                if let Some(word) = waveform.keyword() {
                    parts.push(word.to_string());
                }
                parts.push(braced(value));
            }
            ComponentValue::VoltageControlled { gain } => parts.push(braced(gain)),
            ComponentValue::CurrentControlled { control, gain } => {
                parts.push(control.clone());
                parts.push(braced(gain));
            }
            ComponentValue::Transformer { ratio } => parts.push(braced(ratio)),
            ComponentValue::Coupling {
                first,
                second,
                coefficient,
            } => {
                parts.push(first.clone());
                parts.push(second.clone());
                parts.push(braced(coefficient));
            }
            ComponentValue::None => {}
        }

        write!(f, "{}", parts.join(" "))?;
        if let Some(hints) = &self.hints {
            write!(f, "; {}", hints)?;
        }
        Ok(())
    }
}
