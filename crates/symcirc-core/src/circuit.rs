//! Name-keyed component container.

use indexmap::IndexMap;
use log::warn;

use crate::component::Component;
use crate::error::Result;
use crate::graph::CircuitGraph;

/// Components in netlist order, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    components: IndexMap<String, Component>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component. A duplicate name replaces the earlier entry in place.
    pub fn add(&mut self, component: Component) -> Option<Component> {
        let previous = self
            .components
            .insert(component.name().to_string(), component);
        if let Some(prev) = &previous {
            warn!("component {} redefined, replacing '{}'", prev.name(), prev);
        }
        previous
    }

    pub fn remove(&mut self, name: &str) -> Option<Component> {
        self.components.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn components(&self) -> &IndexMap<String, Component> {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// True when some capacitor or inductor carries an initial condition.
    pub fn is_ivp(&self) -> bool {
        self.components.values().any(Component::has_initial_condition)
    }

    pub fn graph(&self) -> Result<CircuitGraph> {
        CircuitGraph::new(&self.components)
    }
}

impl FromIterator<Component> for Circuit {
    fn from_iter<T: IntoIterator<Item = Component>>(iter: T) -> Self {
        let mut circuit = Circuit::new();
        for component in iter {
            circuit.add(component);
        }
        circuit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentValue;
    use symcirc_expr::Expr;

    #[test]
    fn test_last_write_wins() {
        let mut circuit = Circuit::new();
        circuit.add(Component::with_defaults("R1", &["1", "0"]).unwrap());
        circuit.add(Component::with_defaults("R2", &["1", "2"]).unwrap());
        let prev = circuit.add(Component::with_defaults("R1", &["2", "0"]).unwrap());
        assert!(prev.is_some());
        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit.get("R1").unwrap().nodes(), &["2".to_string(), "0".to_string()]);
        assert_eq!(circuit.components().get_index(0).unwrap().0, "R1");
    }

    #[test]
    fn test_is_ivp() {
        let mut circuit: Circuit = [Component::with_defaults("C1", &["1", "0"]).unwrap()]
            .into_iter()
            .collect();
        assert!(!circuit.is_ivp());
        circuit.add(
            Component::new(
                "C2",
                vec!["1".into(), "0".into()],
                ComponentValue::Passive {
                    value: Expr::symbol("C2"),
                    initial: Some(Expr::symbol("v0")),
                },
                None,
            )
            .unwrap(),
        );
        assert!(circuit.is_ivp());
    }
}
