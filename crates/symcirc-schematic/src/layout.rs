//! Grid placement of schematic nodes.
//!
//! Each axis is solved on its own. Components drawn across the axis force
//! their terminals into one common-node group; components drawn along it add
//! a minimum-separation edge between groups. The coordinate of a group is the
//! average of its forward and reverse longest-path positions, so any slack is
//! split evenly on both sides.

use std::collections::{HashMap, HashSet};
use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use symcirc_core::{Axis, Component, ComponentKind};

use crate::cnodes::CommonNodes;
use crate::error::{Error, Result};

/// Grid coordinate of a node, y growing upwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// `{:.2}` without trailing zeros, as circuitikz coordinates are written.
pub(crate) fn format_coord(value: f64) -> String {
    let mut s = format!("{:.2}", value);
    if s.contains('.') {
        s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if s == "-0" { "0".to_string() } else { s }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", format_coord(self.x), format_coord(self.y))
    }
}

/// Weighted digraph stored as incoming edge lists.
#[derive(Debug, Clone)]
pub struct LayoutGraph {
    name: String,
    incoming: IndexMap<String, Vec<(String, f64)>>,
}

impl LayoutGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            incoming: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_node(&mut self, node: &str) {
        if !self.incoming.contains_key(node) {
            self.incoming.insert(node.to_string(), Vec::new());
        }
    }

    /// Require `to` to lie at least `weight` beyond `from`.
    pub fn add(&mut self, from: &str, to: &str, weight: f64) {
        self.add_node(from);
        self.add_node(to);
        if let Some(edges) = self.incoming.get_mut(to) {
            edges.push((from.to_string(), weight));
        }
    }

    pub fn len(&self) -> usize {
        self.incoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty()
    }

    /// Longest distance to every node from a virtual root that feeds all
    /// nodes without incoming edges.
    pub fn longest_paths(&self) -> Result<IndexMap<String, f64>> {
        if !self.incoming.is_empty() && self.incoming.values().all(|edges| !edges.is_empty()) {
            return Err(Error::NoStartNode {
                graph: self.name.clone(),
            });
        }

        let mut memo: HashMap<&str, f64> = HashMap::with_capacity(self.incoming.len());
        let mut in_progress: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(&str, bool)> = Vec::new();

        for start in self.incoming.keys() {
            if memo.contains_key(start.as_str()) {
                continue;
            }
            stack.push((start.as_str(), false));

            while let Some((node, expanded)) = stack.pop() {
                let edges = self.incoming.get(node).map_or(&[][..], Vec::as_slice);

                if expanded {
                    let longest = edges
                        .iter()
                        .filter_map(|(from, w)| memo.get(from.as_str()).map(|d| d + w))
                        .fold(0.0, f64::max);
                    in_progress.remove(node);
                    memo.insert(node, longest);
                    continue;
                }

                if memo.contains_key(node) {
                    continue;
                }
                if !in_progress.insert(node) {
                    return Err(self.dodgy(node));
                }
                stack.push((node, true));

                for (from, _) in edges {
                    if memo.contains_key(from.as_str()) {
                        continue;
                    }
                    if in_progress.contains(from.as_str()) {
                        return Err(self.dodgy(from));
                    }
                    stack.push((from.as_str(), false));
                }
            }
        }

        Ok(self
            .incoming
            .keys()
            .map(|n| (n.clone(), memo.get(n.as_str()).copied().unwrap_or_default()))
            .collect())
    }

    fn dodgy(&self, node: &str) -> Error {
        Error::DodgyGraph {
            graph: self.name.clone(),
            node: node.to_string(),
        }
    }
}

/// Forward graph and its edge-reversed twin for one axis.
#[derive(Debug, Clone)]
struct AxisGraphs {
    forward: LayoutGraph,
    reverse: LayoutGraph,
}

impl AxisGraphs {
    fn new(axis: Axis) -> Self {
        Self {
            forward: LayoutGraph::new(format!("forward {}", axis)),
            reverse: LayoutGraph::new(format!("reverse {}", axis)),
        }
    }

    fn add_node(&mut self, node: &str) {
        self.forward.add_node(node);
        self.reverse.add_node(node);
    }

    /// Signed span from `from` to `to`; a negative span runs the other way.
    fn add_span(&mut self, from: &str, to: &str, span: f64) {
        if span > 0.0 {
            self.forward.add(from, to, span);
            self.reverse.add(to, from, span);
        } else if span < 0.0 {
            self.forward.add(to, from, -span);
            self.reverse.add(from, to, -span);
        }
    }

    /// Coordinate per representative and the axis extent.
    fn solve(&self) -> Result<(IndexMap<String, f64>, f64)> {
        let forward = self.forward.longest_paths()?;
        let reverse = self.reverse.longest_paths()?;
        let total = forward.values().copied().fold(0.0, f64::max);
        debug!("{}: {} groups, extent {}", self.forward.name(), forward.len(), total);

        let coords = forward
            .iter()
            .map(|(node, &fwd)| {
                let rev = reverse.get(node).copied().unwrap_or_default();
                (node.clone(), 0.5 * (fwd + total - rev))
            })
            .collect();
        Ok((coords, total))
    }
}

/// Terminal pairs merged into one group on `axis`, and signed spans along it.
fn constraints(component: &Component, axis: Axis) -> (Vec<(&str, &str)>, Vec<(&str, &str, f64)>) {
    let nodes = component.drawn_terminals();
    let size = component.size();

    match (component.kind(), nodes) {
        (ComponentKind::MutualInductance, _) => (vec![], vec![]),
        // Both windings stand upright, the secondary to the right of the primary.
        (ComponentKind::Transformer, [n1, n2, n3, n4]) => {
            let (n1, n2, n3, n4) = (n1.as_str(), n2.as_str(), n3.as_str(), n4.as_str());
            match axis {
                Axis::Horizontal => (
                    vec![(n1, n2), (n3, n4)],
                    vec![(n1, n3, size), (n2, n4, size)],
                ),
                Axis::Vertical => (
                    vec![(n1, n3), (n2, n4)],
                    vec![(n2, n1, size), (n4, n3, size)],
                ),
            }
        }
        (_, [n1, n2, ..]) => {
            let (n1, n2) = (n1.as_str(), n2.as_str());
            let direction = component.direction();
            if direction.axis() == axis {
                (vec![], vec![(n1, n2, direction.sign() * size)])
            } else {
                (vec![(n1, n2)], vec![])
            }
        }
        _ => (vec![], vec![]),
    }
}

fn solve_axis<'a>(
    axis: Axis,
    names: &[&'a str],
    components: impl Iterator<Item = &'a Component> + Clone,
) -> Result<(IndexMap<String, f64>, f64)> {
    let mut cnodes = CommonNodes::new(names.iter().copied());

    for component in components.clone() {
        let (links, _) = constraints(component, axis);
        for (a, b) in links {
            cnodes.link(a, b)?;
        }
    }

    let mut graphs = AxisGraphs::new(axis);
    for rep in cnodes.representatives() {
        graphs.add_node(rep);
    }
    for component in components {
        let (_, spans) = constraints(component, axis);
        for (from, to, span) in spans {
            graphs.add_span(cnodes.representative(from)?, cnodes.representative(to)?, span);
        }
    }

    let (by_rep, total) = graphs.solve()?;
    let coords = names
        .iter()
        .map(|&name| {
            let rep = cnodes.representative(name)?;
            Ok((name.to_string(), by_rep.get(rep).copied().unwrap_or_default()))
        })
        .collect::<Result<_>>()?;
    Ok((coords, total))
}

/// Solved placement of every node.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    pub positions: IndexMap<String, Position>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    /// Place `names` according to the directions and sizes of `components`.
    pub fn compute<'a>(
        names: &[&'a str],
        components: impl Iterator<Item = &'a Component> + Clone,
    ) -> Result<Self> {
        let (xs, width) = solve_axis(Axis::Horizontal, names, components.clone())?;
        let (ys, height) = solve_axis(Axis::Vertical, names, components)?;

        let positions = names
            .iter()
            .map(|&name| {
                let x = xs.get(name).copied().unwrap_or_default();
                let y = ys.get(name).copied().unwrap_or_default();
                (name.to_string(), Position::new(x, y))
            })
            .collect();

        Ok(Self {
            positions,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_paths_diamond() {
        let mut graph = LayoutGraph::new("forward horizontal");
        graph.add("a", "b", 1.0);
        graph.add("a", "c", 3.0);
        graph.add("b", "d", 1.0);
        graph.add("c", "d", 1.0);
        let longest = graph.longest_paths().unwrap();
        assert_eq!(longest["a"], 0.0);
        assert_eq!(longest["b"], 1.0);
        assert_eq!(longest["d"], 4.0);
    }

    #[test]
    fn test_isolated_nodes_are_roots() {
        let mut graph = LayoutGraph::new("forward vertical");
        graph.add_node("x");
        graph.add_node("y");
        let longest = graph.longest_paths().unwrap();
        assert_eq!(longest.values().copied().collect::<Vec<_>>(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_cycle_behind_root_is_dodgy() {
        let mut graph = LayoutGraph::new("forward horizontal");
        graph.add("in", "a", 1.0);
        graph.add("a", "b", 1.0);
        graph.add("b", "a", 1.0);
        assert!(matches!(
            graph.longest_paths(),
            Err(Error::DodgyGraph { ref graph, .. }) if graph == "forward horizontal"
        ));
    }

    #[test]
    fn test_pure_cycle_has_no_start() {
        let mut graph = LayoutGraph::new("forward vertical");
        graph.add("a", "b", 1.0);
        graph.add("b", "a", 1.0);
        assert!(matches!(graph.longest_paths(), Err(Error::NoStartNode { .. })));
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut graph = LayoutGraph::new("forward horizontal");
        for i in 0..100_000 {
            graph.add(&i.to_string(), &(i + 1).to_string(), 1.0);
        }
        let longest = graph.longest_paths().unwrap();
        assert_eq!(longest["100000"], 100_000.0);
    }

    #[test]
    fn test_negative_span_reverses_edge() {
        let mut graphs = AxisGraphs::new(Axis::Horizontal);
        graphs.add_span("a", "b", -2.0);
        graphs.add_span("a", "c", 0.0);
        let (coords, total) = graphs.solve().unwrap();
        assert_eq!(total, 2.0);
        assert_eq!(coords["b"], 0.0);
        assert_eq!(coords["a"], 2.0);
    }

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(1.0), "1");
        assert_eq!(format_coord(0.5), "0.5");
        assert_eq!(format_coord(1.256), "1.26");
        assert_eq!(format_coord(-0.001), "0");
        assert_eq!(Position::new(2.0, -1.5).to_string(), "(2,-1.5)");
    }
}
