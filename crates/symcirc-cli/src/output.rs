//! Text output for the subcommands.

use std::fmt::Write as _;

use symcirc_nodal::NodalAnalysis;
use symcirc_schematic::Layout;

/// One `node: lhs = rhs` line per equation.
pub fn equations_text(analysis: &NodalAnalysis) -> String {
    let width = analysis
        .equations()
        .keys()
        .map(|k| k.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (node, equation) in analysis.equations() {
        let _ = writeln!(out, "{:>width$}: {}", node, equation, width = width);
    }
    out
}

/// Node coordinates followed by the drawing extent.
pub fn layout_text(layout: &Layout) -> String {
    let width = layout.positions.keys().map(|k| k.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (node, position) in &layout.positions {
        let _ = writeln!(out, "{:<width$} {}", node, position, width = width);
    }
    let _ = writeln!(out, "extent {} x {}", layout.width, layout.height);
    out
}
