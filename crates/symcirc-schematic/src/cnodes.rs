//! Groups of node names sharing one coordinate on an axis.

use indexmap::IndexMap;
use symcirc_core::DisjointSets;

use crate::error::Result;

/// Node names merged for one axis. The representative of a group is the
/// member seen first.
#[derive(Debug, Clone, Default)]
pub struct CommonNodes {
    index: IndexMap<String, usize>,
    sets: DisjointSets,
}

impl CommonNodes {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut cnodes = Self::default();
        for name in names {
            cnodes.insert(name);
        }
        cnodes
    }

    pub fn insert(&mut self, name: &str) {
        if !self.index.contains_key(name) {
            let i = self.sets.make_set();
            self.index.insert(name.to_string(), i);
        }
    }

    fn lookup(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| symcirc_core::Error::NodeNotFound(name.to_string()).into())
    }

    /// Make `a` and `b` share a coordinate.
    pub fn link(&mut self, a: &str, b: &str) -> Result<()> {
        let ia = self.lookup(a)?;
        let ib = self.lookup(b)?;
        self.sets.union(ia, ib);
        Ok(())
    }

    fn name_of(&self, i: usize) -> &str {
        self.index.get_index(i).map_or("", |(n, _)| n.as_str())
    }

    pub fn representative(&self, name: &str) -> Result<&str> {
        let i = self.lookup(name)?;
        Ok(self.name_of(self.sets.root(i)))
    }

    pub fn same(&self, a: &str, b: &str) -> bool {
        match (self.lookup(a), self.lookup(b)) {
            (Ok(ia), Ok(ib)) => self.sets.same_set(ia, ib),
            _ => false,
        }
    }

    /// Every name, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Representatives, in insertion order.
    pub fn representatives(&self) -> impl Iterator<Item = &str> {
        self.sets.representatives().map(|i| self.name_of(i))
    }

    /// Groups as lists of names in insertion order, keyed by representative.
    pub fn groups(&self) -> IndexMap<&str, Vec<&str>> {
        self.sets
            .representatives()
            .map(|rep| {
                let mut indices = self.sets.members(rep).to_vec();
                indices.sort_unstable();
                let members = indices.into_iter().map(|i| self.name_of(i)).collect();
                (self.name_of(rep), members)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_is_transitive() {
        let mut cnodes = CommonNodes::new(["a", "b", "c", "d"]);
        cnodes.link("c", "b").unwrap();
        cnodes.link("b", "a").unwrap();
        assert!(cnodes.same("a", "c"));
        assert!(!cnodes.same("a", "d"));
        assert_eq!(cnodes.representative("c").unwrap(), "a");
    }

    #[test]
    fn test_groups() {
        let mut cnodes = CommonNodes::new(["1", "2", "3"]);
        cnodes.link("3", "2").unwrap();
        let groups = cnodes.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["2"], vec!["2", "3"]);
        assert_eq!(cnodes.representatives().collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_unknown_name() {
        let mut cnodes = CommonNodes::new(["1"]);
        assert!(cnodes.link("1", "9").is_err());
    }
}
