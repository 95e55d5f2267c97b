//! Drawing options.

use std::fmt;
use std::str::FromStr;

use symcirc_core::Node;

use crate::error::Error;

/// Which nodes get a connection dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawNodes {
    None,
    All,
    /// Nodes joining more than two components.
    Connections,
    /// Nodes whose name has no sub-index.
    #[default]
    Primary,
}

impl DrawNodes {
    /// Ports are always drawn; dummy nodes never are.
    pub fn shows(self, node: &Node) -> bool {
        if node.is_dummy() {
            return false;
        }
        if node.is_port() {
            return true;
        }
        match self {
            DrawNodes::None => false,
            DrawNodes::All => true,
            DrawNodes::Connections => node.count() > 2,
            DrawNodes::Primary => node.is_primary(),
        }
    }
}

/// Which nodes get their name printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelNodes {
    None,
    All,
    #[default]
    Primary,
}

impl LabelNodes {
    pub fn shows(self, node: &Node) -> bool {
        match self {
            LabelNodes::None => false,
            LabelNodes::All => !node.is_dummy(),
            LabelNodes::Primary => !node.is_dummy() && node.is_primary(),
        }
    }
}

/// circuitikz symbol conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    American,
    British,
    European,
}

impl Style {
    pub(crate) fn tikz_options(self) -> &'static str {
        match self {
            Style::American => "american currents,american voltages",
            Style::British => "american currents, european voltages",
            Style::European => "european currents, european voltages",
        }
    }
}

macro_rules! keyword_enum {
    ($ty:ident, $what:literal, { $($word:literal => $variant:ident),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Error> {
                match s.to_ascii_lowercase().as_str() {
                    $($word => Ok($ty::$variant),)+
                    _ => Err(Error::UnknownOption {
                        what: $what,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let word = match self {
                    $($ty::$variant => $word,)+
                };
                f.write_str(word)
            }
        }
    };
}

keyword_enum!(DrawNodes, "node drawing mode", {
    "none" => None,
    "all" => All,
    "connections" => Connections,
    "primary" => Primary,
});

keyword_enum!(LabelNodes, "node labelling mode", {
    "none" => None,
    "all" => All,
    "primary" => Primary,
});

keyword_enum!(Style, "style", {
    "american" => American,
    "british" => British,
    "european" => European,
});

/// Options for [`Schematic::tikz`](crate::Schematic::tikz) and
/// [`Schematic::draw`](crate::Schematic::draw).
#[derive(Debug, Clone, PartialEq)]
pub struct SchematicOptions {
    pub draw_nodes: DrawNodes,
    pub label_nodes: LabelNodes,
    pub label_ids: bool,
    pub label_values: bool,
    pub style: Style,
    /// Overall picture scale.
    pub scale: f64,
    /// Grid spacing relative to the component length.
    pub stretch: f64,
    /// Raster density multiplier for PNG output.
    pub oversample: f64,
    /// Keep `.tex`, `.log` and `.pdf` files produced on the way.
    pub keep_intermediate: bool,
}

impl Default for SchematicOptions {
    fn default() -> Self {
        Self {
            draw_nodes: DrawNodes::default(),
            label_nodes: LabelNodes::default(),
            label_ids: true,
            label_values: true,
            style: Style::default(),
            scale: 1.0,
            stretch: 1.0,
            oversample: 2.0,
            keep_intermediate: false,
        }
    }
}

impl SchematicOptions {
    /// Distance between grid lines in cm.
    pub fn node_spacing(&self) -> f64 {
        2.0 * self.stretch * self.scale
    }

    /// Bipole length in cm.
    pub fn component_size(&self) -> f64 {
        1.5 * self.scale
    }
}
