//! Circuit nodes.

/// Name of the reference (ground) node.
pub const REFERENCE: &str = "0";

/// Separator between a node's root name and its sub-index (`3_1`).
pub const SUBINDEX_SEPARATOR: char = '_';

/// Prefix marking an internal node that is never drawn or solved for.
pub const DUMMY_PREFIX: char = '*';

/// A named connection point and the components touching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    components: Vec<String>,
    explicit_port: bool,
    count: usize,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            explicit_port: false,
            count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Incident component names, in insertion order.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Record an incident component. Open circuits are listed but not counted.
    pub fn append(&mut self, component: &str, counted: bool) {
        if !self.components.iter().any(|c| c == component) {
            self.components.push(component.to_string());
        }
        if counted {
            self.count += 1;
        }
    }

    pub fn mark_port(&mut self) {
        self.explicit_port = true;
    }

    /// Number of incident components other than open circuits.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Explicit port, or a dangling end with a single connection.
    pub fn is_port(&self) -> bool {
        self.explicit_port || self.count == 1
    }

    pub fn is_primary(&self) -> bool {
        is_primary(&self.name)
    }

    pub fn root_name(&self) -> &str {
        root_name(&self.name)
    }

    pub fn is_dummy(&self) -> bool {
        is_dummy(&self.name)
    }

    pub fn is_reference(&self) -> bool {
        is_reference(&self.name)
    }
}

/// Text before the first sub-index separator, or the whole name if it leads with one.
pub fn root_name(name: &str) -> &str {
    if name.starts_with(SUBINDEX_SEPARATOR) {
        return name;
    }
    name.split(SUBINDEX_SEPARATOR).next().unwrap_or(name)
}

pub fn is_primary(name: &str) -> bool {
    !name.contains(SUBINDEX_SEPARATOR)
}

pub fn is_dummy(name: &str) -> bool {
    name.starts_with(DUMMY_PREFIX)
}

/// The ground node and its sub-indexed aliases (`0_1`).
pub fn is_reference(name: &str) -> bool {
    root_name(name) == REFERENCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_name() {
        assert_eq!(root_name("3_1"), "3");
        assert_eq!(root_name("in_a_b"), "in");
        assert_eq!(root_name("_x"), "_x");
        assert_eq!(root_name("7"), "7");
    }

    #[test]
    fn test_flags() {
        assert!(is_primary("3"));
        assert!(!is_primary("3_1"));
        assert!(is_dummy("*int"));
        assert!(is_reference("0"));
        assert!(is_reference("0_2"));
        assert!(!is_reference("10"));
    }

    #[test]
    fn test_port_detection() {
        let mut n = Node::new("1");
        n.append("R1", true);
        assert!(n.is_port());
        n.append("R2", true);
        assert!(!n.is_port());
        n.mark_port();
        assert!(n.is_port());
    }

    #[test]
    fn test_open_circuit_not_counted() {
        let mut n = Node::new("2");
        n.append("O1", false);
        n.append("R1", true);
        n.append("R2", true);
        assert_eq!(n.components().len(), 3);
        assert_eq!(n.count(), 2);
        assert!(!n.is_port());
    }
}
