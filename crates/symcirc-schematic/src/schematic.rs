//! Schematic assembler: components, drawn nodes and a cached layout.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use symcirc_core::{Circuit, Component, ComponentKind, ComponentValue, Node};

use crate::error::{Error, Result};
use crate::layout::{Layout, Position};

/// A netlist together with its drawing state.
///
/// ```
/// use symcirc_schematic::Schematic;
///
/// let mut sch = Schematic::new();
/// sch.add("V1 1 0; down\nR1 1 2; right\nL1 2 0_2; down\nW1 0 0_2; right").unwrap();
/// let positions = sch.compute_positions().unwrap();
/// assert_eq!(positions["2"].x, 1.0);
/// assert_eq!(sch.bounding_extent().unwrap(), (1.0, 1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schematic {
    circuit: Circuit,
    nodes: IndexMap<String, Node>,
    hints: bool,
    layout: Option<Layout>,
}

impl Schematic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a netlist file into a new schematic.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut schematic = Self::new();
        schematic.netfile_add(path)?;
        Ok(schematic)
    }

    /// Add one or more netlist lines. Blank lines and comments are skipped;
    /// a repeated name replaces the earlier component.
    pub fn add(&mut self, text: &str) -> Result<()> {
        for component in symcirc_parser::parse_netlist(text)? {
            self.add_component(component);
        }
        Ok(())
    }

    pub fn add_component(&mut self, component: Component) {
        if component.hints().is_some() {
            self.hints = true;
        }
        self.layout = None;

        if self.circuit.add(component.clone()).is_some() {
            self.rebuild_nodes();
        } else {
            self.add_nodes(&component);
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<Component> {
        let component = self
            .circuit
            .remove(name)
            .ok_or_else(|| Error::UnknownComponent(name.to_string()))?;
        self.layout = None;
        self.rebuild_nodes();
        Ok(component)
    }

    pub fn netfile_add(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("read netlist {}", path.display());
        self.add(&text)
    }

    /// The current netlist, one component per line.
    pub fn netlist(&self) -> String {
        self.circuit
            .components()
            .values()
            .map(|c| format!("{}\n", c))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.circuit.get(name)
    }

    pub fn components(&self) -> &IndexMap<String, Component> {
        self.circuit.components()
    }

    /// The components as a circuit, for analysis.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Drawn nodes in order of first appearance.
    pub fn nodes(&self) -> &IndexMap<String, Node> {
        &self.nodes
    }

    /// True once any line carried drawing directives.
    pub fn has_hints(&self) -> bool {
        self.hints
    }

    fn add_nodes(&mut self, component: &Component) {
        for name in component.drawn_terminals() {
            let node = self
                .nodes
                .entry(name.clone())
                .or_insert_with(|| Node::new(name.as_str()));
            node.append(component.name(), component.kind() != ComponentKind::OpenCircuit);
            if component.kind() == ComponentKind::Port {
                node.mark_port();
            }
        }
    }

    fn rebuild_nodes(&mut self) {
        self.nodes.clear();
        let components: Vec<Component> = self.circuit.components().values().cloned().collect();
        for component in &components {
            self.add_nodes(component);
        }
    }

    /// Node placement, solved on first use after a change.
    pub fn layout(&mut self) -> Result<&Layout> {
        let layout = match self.layout.take() {
            Some(layout) => layout,
            None => {
                let names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
                Layout::compute(&names, self.circuit.components().values())?
            }
        };
        Ok(self.layout.insert(layout))
    }

    pub fn compute_positions(&mut self) -> Result<IndexMap<String, Position>> {
        Ok(self.layout()?.positions.clone())
    }

    /// `(width, height)` of the drawing in grid units.
    pub fn bounding_extent(&mut self) -> Result<(f64, f64)> {
        let layout = self.layout()?;
        Ok((layout.width, layout.height))
    }

    /// Wires joining node names that share a root name, e.g. `0`, `0_1`
    /// and `0_2`. These are drawn but never constrain the layout.
    pub fn implicit_wires(&self) -> Result<Vec<Component>> {
        let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for node in self.nodes.values().filter(|n| !n.is_dummy()) {
            groups.entry(node.root_name()).or_default().push(node.name());
        }

        let mut wires = Vec::new();
        for names in groups.values() {
            for pair in names.windows(2) {
                wires.push(Component::new(
                    format!("W_{}_{}", pair[0], pair[1]),
                    vec![pair[0].to_string(), pair[1].to_string()],
                    ComponentValue::None,
                    None,
                )?);
            }
        }
        Ok(wires)
    }
}
