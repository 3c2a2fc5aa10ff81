/// Weighted quick-union over the element IDs `0..len`.
///
/// Union by size keeps every tree at most `log2(len)` deep, so the read-only
/// queries stay logarithmic; `union` additionally halves the paths it walks.
#[derive(Debug, Clone)]
pub struct WeightedQuickUnion {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl WeightedQuickUnion {
    /// Create a new structure with `len` singleton components.
    pub fn new(len: usize) -> Self {
        WeightedQuickUnion {
            parent: (0..len).collect(),
            size: vec![1; len],
            count: len,
        }
    }

    /// Number of elements in the universe.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true if the universe has no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint components.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Root of `x`, compressing the path by halving.
    pub(crate) fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Root of `x` without touching the forest.
    pub fn find_root(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    /// Merge the components containing `p` and `q`.
    pub fn union(&mut self, p: usize, q: usize) {
        let root_p = self.find(p);
        let root_q = self.find(q);
        if root_p == root_q {
            return;
        }

        // Smaller tree hangs under the larger one
        if self.size[root_p] < self.size[root_q] {
            self.parent[root_p] = root_q;
            self.size[root_q] += self.size[root_p];
        } else {
            self.parent[root_q] = root_p;
            self.size[root_p] += self.size[root_q];
        }
        self.count -= 1;
    }

    /// Check if two elements are in the same component
    pub fn connected(&self, p: usize, q: usize) -> bool {
        self.find_root(p) == self.find_root(q)
    }
}
