
/// Disjoint-set forest over dense indices `0..len`, with union by size and path halving.
#[derive(Clone, Debug, Default)]
pub struct UnionFind {
    /// Parent pointer for each element; roots point at themselves
    parent: Vec<usize>,
    /// Size of the set rooted at each element, only meaningful for roots
    size: Vec<usize>,
}

impl UnionFind {
    /// Creates `len` singleton sets
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len]
        }
    }

    /// Number of elements, not sets
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the set containing `index`.
    /// # Panics
    /// * if `index` is out of bounds
    pub fn find(&mut self, mut index: usize) -> usize {
        while self.parent[index] != index {
            let grandparent = self.parent[self.parent[index]];
            self.parent[index] = grandparent;
            index = grandparent;
        }
        index
    }

    /// Merges the sets containing `a` and `b`, returns true if they were separate
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        // attach the smaller tree below the larger one
        if self.size[root_a] < self.size[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        true
    }

    /// Partitions all elements into their sets.
    /// Sets are ordered by their smallest element, and elements within a set are ascending.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let mut root_to_group: Vec<Option<usize>> = vec![None; self.len()];
        let mut groups: Vec<Vec<usize>> = vec![];
        for index in 0..self.len() {
            let root = self.find(index);
            let group_index = *root_to_group[root].get_or_insert_with(|| {
                groups.push(vec![]);
                groups.len() - 1
            });
            groups[group_index].push(index);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut uf = UnionFind::new(3);
        assert_eq!(uf.len(), 3);
        assert_eq!(uf.groups(), vec![vec![0], vec![1], vec![2]]);

        let mut empty = UnionFind::new(0);
        assert!(empty.is_empty());
        assert!(empty.groups().is_empty());
    }

    #[test]
    fn test_union() {
        let mut uf = UnionFind::new(6);
        assert!(uf.union(4, 1));
        assert!(uf.union(1, 5));
        assert!(!uf.union(5, 4));
        assert!(uf.union(0, 2));
        assert_eq!(uf.find(4), uf.find(5));
        assert_ne!(uf.find(0), uf.find(1));
        assert_eq!(uf.groups(), vec![vec![0, 2], vec![1, 4, 5], vec![3]]);

        // merging everything yields one group
        assert!(uf.union(3, 2));
        assert!(uf.union(5, 3));
        assert_eq!(uf.groups(), vec![vec![0, 1, 2, 3, 4, 5]]);
    }

    #[test]
    fn test_long_chain() {
        let n = 10_000;
        let mut uf = UnionFind::new(n);
        for i in 1..n {
            uf.union(i - 1, i);
        }
        let groups = uf.groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), n);
    }
}
