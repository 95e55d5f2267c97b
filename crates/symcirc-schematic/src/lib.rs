//! Schematic layout and drawing for symcirc netlists.
//!
//! Components carry drawing directives (`right`, `down`, `size=2`, labels)
//! after a `;` on their netlist line. [`Schematic`] collects them, places
//! every node on a grid by solving a longest-path problem per axis, and
//! writes the result as a circuitikz picture, optionally compiled to PDF,
//! SVG or PNG by external tools.
//!
//! ```
//! use symcirc_schematic::{Schematic, SchematicOptions};
//!
//! let mut sch = Schematic::new();
//! sch.add("R1 1 2; right\nR2 2 3; right").unwrap();
//! let tikz = sch.tikz(&SchematicOptions::default()).unwrap();
//! assert!(tikz.contains("\\coordinate (3) at (2,0);"));
//! ```

pub mod cnodes;
pub mod engformat;
pub mod error;
pub mod layout;
pub mod options;
pub mod render;
mod schematic;
mod tikz;

pub use cnodes::CommonNodes;
pub use error::{Error, Result};
pub use layout::{Layout, LayoutGraph, Position};
pub use options::{DrawNodes, LabelNodes, SchematicOptions, Style};
pub use render::{Format, RenderConfig};
pub use schematic::Schematic;
pub use tikz::{id_label, value_label};
