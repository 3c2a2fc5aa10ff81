use super::{check_site, check_size, neighbors, Percolation};
use crate::error::Result;

/// Percolation system kept as a plain grid of open flags.
///
/// Fullness is recomputed from scratch on every query by flood filling from
/// the open sites of the top row. Each query costs O(n^2); the type serves as
/// the reference the incremental [`UfPercolation`](super::UfPercolation) is
/// checked against.
#[derive(Debug, Clone)]
pub struct ArrayPercolation {
    n: usize,
    open: Vec<bool>, // row-major, n * n
    open_sites: usize,
}

impl ArrayPercolation {
    #[inline(always)]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.n + j
    }

    /// Marks every site reachable from an open top-row site.
    fn flood_fill(&self) -> Vec<bool> {
        let n = self.n;
        let mut full = vec![false; n * n];
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for top in 0..n {
            let start = self.idx(0, top);
            if self.open[start] && !full[start] {
                full[start] = true;
                stack.push((0, top));
            }

            while let Some((i, j)) = stack.pop() {
                for (row, col) in neighbors(n, i, j) {
                    let k = self.idx(row, col);
                    // Filled sites are never pushed twice, so cycles terminate
                    if self.open[k] && !full[k] {
                        full[k] = true;
                        stack.push((row, col));
                    }
                }
            }
        }
        full
    }
}

impl Percolation for ArrayPercolation {
    fn new(n: usize) -> Result<Self> {
        check_size(n)?;
        Ok(Self {
            n,
            open: vec![false; n * n],
            open_sites: 0,
        })
    }

    fn size(&self) -> usize {
        self.n
    }

    fn open(&mut self, i: usize, j: usize) -> Result<()> {
        check_site(self.n, i, j)?;
        let k = self.idx(i, j);
        if !self.open[k] {
            self.open[k] = true;
            self.open_sites += 1;
        }
        Ok(())
    }

    fn is_open(&self, i: usize, j: usize) -> Result<bool> {
        check_site(self.n, i, j)?;
        Ok(self.open[self.idx(i, j)])
    }

    fn is_full(&self, i: usize, j: usize) -> Result<bool> {
        check_site(self.n, i, j)?;
        Ok(self.flood_fill()[self.idx(i, j)])
    }

    fn number_of_open_sites(&self) -> usize {
        self.open_sites
    }

    fn percolates(&self) -> bool {
        let full = self.flood_fill();
        let last = self.n - 1;
        (0..self.n).any(|col| full[self.idx(last, col)])
    }
}
