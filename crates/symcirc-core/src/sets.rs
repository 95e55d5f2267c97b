//! Disjoint-set forest over dense indices.

use std::collections::BTreeMap;

/// Union-find with path compression and a representative → members index.
///
/// The representative of a set is always its smallest index, so a merge is
/// immediately visible from every earlier member without rewriting them.
/// Indices are handed out in creation order, so the sorted member index
/// also lists surviving sets in creation order.
#[derive(Debug, Clone, Default)]
pub struct DisjointSets {
    parent: Vec<usize>,
    members: BTreeMap<usize, Vec<usize>>,
}

impl DisjointSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_len(n: usize) -> Self {
        let mut sets = Self::new();
        for _ in 0..n {
            sets.make_set();
        }
        sets
    }

    /// Add a singleton set and return its index.
    pub fn make_set(&mut self) -> usize {
        let index = self.parent.len();
        self.parent.push(index);
        self.members.insert(index, vec![index]);
        index
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `index`, compressing the path behind it.
    pub fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = index;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Representative of `index` without mutating the forest.
    pub fn root(&self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }

    /// Merge the sets holding `a` and `b`, returning the new representative.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        let (keep, gone) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[gone] = keep;
        let mut moved = self.members.remove(&gone).unwrap_or_default();
        let kept = self.members.entry(keep).or_default();
        // Append the smaller list onto the larger one.
        if moved.len() > kept.len() {
            std::mem::swap(kept, &mut moved);
        }
        kept.extend(moved);
        keep
    }

    pub fn same_set(&self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }

    /// Members of the set whose representative is `rep`, in no particular order.
    pub fn members(&self, rep: usize) -> &[usize] {
        self.members.get(&rep).map_or(&[], |m| m.as_slice())
    }

    /// Representatives in creation order of the sets that survive.
    pub fn representatives(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.keys().copied()
    }
}
