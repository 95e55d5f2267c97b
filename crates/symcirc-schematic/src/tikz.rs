//! circuitikz output.

use std::fmt::Write as _;

use symcirc_core::{Component, ComponentKind, ComponentValue, LabelKind, Waveform};
use symcirc_expr::{Expr, latex_name};

use crate::engformat;
use crate::error::Result;
use crate::layout::format_coord;
use crate::options::SchematicOptions;
use crate::schematic::Schematic;

/// circuitikz bipole for a component kind.
fn bipole(kind: ComponentKind) -> Option<&'static str> {
    use ComponentKind as K;
    match kind {
        K::Resistor => Some("R"),
        K::Capacitor => Some("C"),
        K::Inductor => Some("L"),
        K::VoltageSource => Some("V"),
        K::CurrentSource => Some("I"),
        K::Vcvs | K::Ccvs => Some("cV"),
        K::Vccs | K::Cccs => Some("cI"),
        K::Wire => Some("short"),
        K::OpenCircuit | K::Port => Some("open"),
        _ => None,
    }
}

/// Coordinate name; `*` is not allowed in tikz node names.
///
/// Netlist node names never contain whitespace, so `dummy ` cannot clash
/// with a node that is literally called `dummyx`.
fn coord(name: &str) -> String {
    name.replace('*', "dummy ")
}

/// `R_{1}`, or `None` for wires, ports and open circuits.
pub fn id_label(component: &Component) -> Option<String> {
    match component.kind() {
        ComponentKind::Wire | ComponentKind::OpenCircuit | ComponentKind::Port => None,
        _ => Some(latex_name(component.name())),
    }
}

/// Value annotation in LaTeX math.
pub fn value_label(component: &Component) -> Option<String> {
    let numeric = |value: &Expr| {
        let unit = engformat::unit(component.kind())?;
        value.as_constant().map(|v| engformat::format(v, unit))
    };

    match component.value() {
        ComponentValue::Passive { value, .. } => {
            Some(numeric(value).unwrap_or_else(|| value.to_latex()))
        }
        ComponentValue::Source { waveform, value } => {
            let shaped = |f: &str| value.clone().mul(Expr::function(f, vec![Expr::t()]));
            match waveform {
                Waveform::Step => Some(shaped("Heaviside").to_latex()),
                Waveform::Impulse => Some(shaped("DiracDelta").to_latex()),
                _ => Some(numeric(value).unwrap_or_else(|| value.to_latex())),
            }
        }
        ComponentValue::VoltageControlled { gain } | ComponentValue::CurrentControlled { gain, .. } => {
            Some(gain.to_latex())
        }
        ComponentValue::Transformer { ratio } => Some(format!("1:{}", ratio.to_latex())),
        _ => None,
    }
}

impl Schematic {
    /// Terminal marker: `o` for ports, `*` for other visible nodes.
    fn marker(&self, name: &str, options: &SchematicOptions) -> &'static str {
        match self.nodes().get(name) {
            Some(node) if node.is_dummy() => "",
            Some(node) if node.is_port() => "o",
            Some(node) if options.draw_nodes.shows(node) => "*",
            _ => "",
        }
    }

    /// Value label unless disabled globally or by `novalue`/`nolabels`.
    fn shown_value_label(component: &Component, options: &SchematicOptions) -> Option<String> {
        let suppressed = component.hints().is_some_and(|h| h.suppress.values);
        value_label(component).filter(|_| options.label_values && !suppressed)
    }

    fn label_args(&self, component: &Component, options: &SchematicOptions) -> Vec<String> {
        let hints = component.hints().cloned().unwrap_or_default();
        let mut args = Vec::new();

        let explicit: Vec<_> = hints
            .labels
            .iter()
            .filter(|l| l.kind == LabelKind::Component)
            .collect();
        if explicit.is_empty() {
            let value = Self::shown_value_label(component, options);
            let id = id_label(component).filter(|_| options.label_ids && !hints.suppress.ids);
            if let Some(text) = value.or(id) {
                args.push(format!("l=${}$", text));
            }
        } else {
            args.extend(explicit.iter().map(|l| format!("{}={}", l.key, l.text)));
        }

        args.extend(
            hints
                .labels
                .iter()
                .filter(|l| l.kind != LabelKind::Component)
                .map(|l| format!("{}={}", l.key, l.text)),
        );
        args.extend(hints.passthrough.iter().map(|(key, value)| match value {
            Some(value) => format!("{}={}", key, value),
            None => key.clone(),
        }));
        args
    }

    fn draw_component(&self, out: &mut String, component: &Component, options: &SchematicOptions) {
        let nodes = component.drawn_terminals();

        if let (ComponentKind::Transformer, [n1, n2, n3, n4]) = (component.kind(), nodes) {
            let _ = writeln!(out, "  \\draw ({}) to [L] ({});", coord(n1), coord(n2));
            let _ = writeln!(out, "  \\draw ({}) to [L] ({});", coord(n3), coord(n4));
            if let Some(label) = Self::shown_value_label(component, options) {
                let _ = writeln!(
                    out,
                    "  \\draw ($({})!0.5!({})$) node {{${}$}};",
                    coord(n1),
                    coord(n4),
                    label
                );
            }
            return;
        }

        let (Some(kind), [n1, n2, ..]) = (bipole(component.kind()), nodes) else {
            return;
        };

        let mut args = vec![kind.to_string()];
        args.extend(self.label_args(component, options));
        let markers = format!("{}-{}", self.marker(n1, options), self.marker(n2, options));
        if markers != "-" {
            args.push(markers);
        }

        let _ = writeln!(
            out,
            "  \\draw ({}) to [{}] ({});",
            coord(n1),
            args.join(", "),
            coord(n2)
        );
    }

    /// The schematic as a circuitikz `tikzpicture`.
    pub fn tikz(&mut self, options: &SchematicOptions) -> Result<String> {
        let positions = self.compute_positions()?;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "\\begin{{tikzpicture}}[scale={:.2},/tikz/circuitikz/bipoles/length={:.1}cm,{}]",
            options.node_spacing(),
            options.component_size(),
            options.style.tikz_options()
        );

        for (name, position) in &positions {
            let _ = writeln!(
                out,
                "  \\coordinate ({}) at ({},{});",
                coord(name),
                format_coord(position.x),
                format_coord(position.y)
            );
        }

        for component in self.components().values() {
            self.draw_component(&mut out, component, options);
        }

        for wire in self.implicit_wires()? {
            if let [n1, n2] = wire.nodes() {
                let _ = writeln!(out, "  \\draw ({}) to [short] ({});", coord(n1), coord(n2));
            }
        }

        for node in self.nodes().values() {
            if options.label_nodes.shows(node) {
                let _ = writeln!(
                    out,
                    "  \\draw {{[anchor=south east] ({}) node {{{}}}}};",
                    coord(node.name()),
                    node.name().replace('_', "\\_")
                );
            }
        }

        out.push_str("\\end{tikzpicture}\n");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schematic(netlist: &str) -> Schematic {
        let mut sch = Schematic::new();
        sch.add(netlist).unwrap();
        sch
    }

    #[test]
    fn test_value_labels() {
        let sch = schematic("R1 1 2 4.7k\nC1 2 0 1e-6\nV1 1 0 step 5\nE1 3 0 2 0 A\nTF1 4 0 3 0 n\nW1 1 5");
        assert_eq!(value_label(&sch.components()["R1"]).unwrap(), "4.7\\,\\mbox{k$\\Omega$}");
        assert_eq!(value_label(&sch.components()["C1"]).unwrap(), "1\\,\\mbox{$\\mu$F}");
        assert_eq!(value_label(&sch.components()["V1"]).unwrap(), "5 u(t)");
        assert_eq!(value_label(&sch.components()["E1"]).unwrap(), "A");
        assert_eq!(value_label(&sch.components()["TF1"]).unwrap(), "1:n");
        assert!(value_label(&sch.components()["W1"]).is_none());
        assert!(id_label(&sch.components()["W1"]).is_none());
    }

    #[test]
    fn test_draw_line() {
        let mut sch = schematic("V1 1 0; down\nR1 1 2; right\nR2 2 0_2; down\nW1 0 0_2; right");
        let tikz = sch.tikz(&SchematicOptions::default()).unwrap();
        assert!(tikz.starts_with(
            "\\begin{tikzpicture}[scale=2.00,/tikz/circuitikz/bipoles/length=1.5cm,american currents,american voltages]\n"
        ));
        assert!(tikz.contains("  \\coordinate (2) at (1,1);\n"));
        assert!(tikz.contains("  \\draw (1) to [R, l=$R_{1}$, *-*] (2);\n"));
        assert!(tikz.contains("  \\draw (0) to [short] (0_2);\n"));
        assert!(tikz.contains("  \\draw {[anchor=south east] (1) node {1}};\n"));
        assert!(!tikz.contains("node {0\\_2}"));
        assert!(tikz.ends_with("\\end{tikzpicture}\n"));
    }

    #[test]
    fn test_explicit_labels_and_passthrough() {
        let mut sch = schematic("R1 1 2 10; right, l=$R_s$, i=$i_1$, color=blue\nR2 2 0; down, nolabels");
        let tikz = sch.tikz(&SchematicOptions::default()).unwrap();
        assert!(tikz.contains("to [R, l=$R_s$, i=$i_1$, color=blue, o-*] (2);"));
        assert!(tikz.contains("  \\draw (2) to [R, *-o] (0);\n"));
    }

    #[test]
    fn test_label_options() {
        let mut sch = schematic("R1 1 2 10; right");
        let options = SchematicOptions {
            label_values: false,
            ..SchematicOptions::default()
        };
        assert!(sch.tikz(&options).unwrap().contains("[R, l=$R_{1}$, o-o]"));
        let options = SchematicOptions {
            label_values: false,
            label_ids: false,
            ..SchematicOptions::default()
        };
        assert!(sch.tikz(&options).unwrap().contains("[R, o-o]"));
    }

    #[test]
    fn test_dummy_coordinate_distinct_from_named_node() {
        let mut sch = schematic("R1 1 *x; right\nR2 *x dummyx; right");
        let tikz = sch.tikz(&SchematicOptions::default()).unwrap();
        assert!(tikz.contains("  \\coordinate (dummy x) at (1,0);\n"));
        assert!(tikz.contains("  \\coordinate (dummyx) at (2,0);\n"));
        assert!(tikz.contains("  \\draw (dummy x) to [R, l=$R_{2}$, -o] (dummyx);\n"));
    }

    #[test]
    fn test_transformer_ratio_label_suppression() {
        let mut sch = schematic("TF1 1 2 3 4 n\nTF2 5 6 7 8 m; nolabels");
        let tikz = sch.tikz(&SchematicOptions::default()).unwrap();
        assert!(tikz.contains("  \\draw ($(1)!0.5!(4)$) node {$1:n$};\n"));
        assert!(!tikz.contains("1:m"));

        let mut sch = schematic("TF1 1 2 3 4 n; novalue");
        assert!(!sch.tikz(&SchematicOptions::default()).unwrap().contains("1:n"));
    }

    #[test]
    fn test_mutual_inductance_not_drawn() {
        let mut sch = schematic("L1 1 0; down\nL2 2 0_2; down\nK1 L1 L2 k\nW1 0 0_2; right");
        let tikz = sch.tikz(&SchematicOptions::default()).unwrap();
        assert!(!tikz.contains("K_{1}"));
    }
}
