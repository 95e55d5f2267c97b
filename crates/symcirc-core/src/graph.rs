//! Electrical connectivity of a circuit.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::component::{Component, ComponentKind};
use crate::error::{Error, Result};
use crate::node::{self, Node};
use crate::sets::DisjointSets;

/// Multigraph of merged nodes and the components incident on them.
///
/// Wires and node names sharing a root (`3`, `3_1`) collapse into one
/// electrical node, keyed by a representative name.
#[derive(Debug, Clone)]
pub struct CircuitGraph {
    components: IndexMap<String, Component>,
    /// Public node name to representative name.
    node_map: BTreeMap<String, String>,
    nodes: BTreeMap<String, Node>,
}

/// Lower sorts first: reference, then visible, then primary, then by name.
fn rank(name: &str) -> (bool, bool, bool, &str) {
    (
        name != node::REFERENCE,
        node::is_dummy(name),
        !node::is_primary(name),
        name,
    )
}

impl CircuitGraph {
    /// Build the graph in one pass over `components`, in their given order.
    pub fn new(components: &IndexMap<String, Component>) -> Result<Self> {
        let mut names: IndexMap<String, usize> = IndexMap::new();
        let mut sets = DisjointSets::new();

        for component in components.values() {
            if component.nodes().len() < component.kind().arity() {
                return Err(Error::TooFewNodes(component.name().to_string()));
            }
            for name in component.nodes() {
                if !names.contains_key(name) {
                    names.insert(name.clone(), sets.make_set());
                }
            }
        }

        for component in components.values() {
            if component.kind() == ComponentKind::Wire {
                let a = names[&component.nodes()[0]];
                let b = names[&component.nodes()[1]];
                sets.union(a, b);
            }
        }

        let mut roots: IndexMap<&str, usize> = IndexMap::new();
        for (name, &index) in &names {
            match roots.get(node::root_name(name)) {
                Some(&first) => {
                    sets.union(first, index);
                }
                None => {
                    roots.insert(node::root_name(name), index);
                }
            }
        }

        let mut node_map = BTreeMap::new();
        let mut nodes = BTreeMap::new();
        for rep in sets.representatives() {
            let chosen = sets
                .members(rep)
                .iter()
                .filter_map(|&i| names.get_index(i).map(|(n, _)| n.as_str()))
                .min_by(|a, b| rank(a).cmp(&rank(b)));
            let Some(chosen) = chosen else { continue };
            for &i in sets.members(rep) {
                if let Some((name, _)) = names.get_index(i) {
                    node_map.insert(name.clone(), chosen.to_string());
                }
            }
            nodes.insert(chosen.to_string(), Node::new(chosen));
        }

        for component in components.values() {
            if component.kind() == ComponentKind::Port {
                for name in component.nodes() {
                    if let Some(n) = node_map.get(name).and_then(|r| nodes.get_mut(r)) {
                        n.mark_port();
                    }
                }
            }
            for name in component.current_terminals() {
                if let Some(n) = node_map.get(name).and_then(|r| nodes.get_mut(r)) {
                    n.append(component.name(), true);
                }
            }
        }

        if !nodes.is_empty() && !nodes.contains_key(node::REFERENCE) {
            warn!("circuit has no reference node {}", node::REFERENCE);
        }
        debug!(
            "circuit graph: {} components, {} names, {} nodes",
            components.len(),
            node_map.len(),
            nodes.len()
        );

        Ok(Self {
            components: components.clone(),
            node_map,
            nodes,
        })
    }

    /// Representative nodes, sorted by name.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Node for any public name, resolved to its representative.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.representative(name).and_then(|r| self.nodes.get(r))
    }

    pub fn representative(&self, name: &str) -> Option<&str> {
        self.node_map.get(name).map(String::as_str)
    }

    pub fn node_map(&self) -> &BTreeMap<String, String> {
        &self.node_map
    }

    /// Components incident on `name`, in netlist order.
    pub fn connected(&self, name: &str) -> Result<Vec<&Component>> {
        let node = self
            .node(name)
            .ok_or_else(|| Error::NodeNotFound(name.to_string()))?;
        Ok(node
            .components()
            .iter()
            .filter_map(|c| self.components.get(c))
            .collect())
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn has_reference(&self) -> bool {
        self.nodes.contains_key(node::REFERENCE)
    }
}
