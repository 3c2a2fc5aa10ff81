use log::trace;

use super::{check_site, check_size, neighbors, Percolation};
use crate::error::Result;
use crate::union_find::WeightedQuickUnion;

/// Element ID of the virtual site joined to every open top-row site.
const SOURCE: usize = 0;

/// Percolation system backed by union-find.
///
/// Site (i, j) is element `i * n + j + 1`; the virtual source is element 0
/// and the virtual sink is element `n * n + 1`. Opening a site unions it with
/// its open neighbours (and the source or sink for the boundary rows), so
/// `percolates` is a single source/sink connectivity query.
///
/// A second structure without the sink answers `is_full`. Sharing one
/// structure would let a percolating system "backwash" through the sink and
/// mark bottom-row sites full that have no path to the top.
#[derive(Debug, Clone)]
pub struct UfPercolation {
    n: usize,
    open: Vec<bool>, // row-major, n * n
    open_sites: usize,
    uf: WeightedQuickUnion,       // sites + source + sink
    fullness: WeightedQuickUnion, // sites + source
}

impl UfPercolation {
    /// Returns the union-find element for site (i, j).
    #[inline(always)]
    fn encode(&self, i: usize, j: usize) -> usize {
        i * self.n + j + 1
    }

    #[inline(always)]
    fn sink(&self) -> usize {
        self.n * self.n + 1
    }

    fn connect(&mut self, p: usize, q: usize) {
        self.uf.union(p, q);
        if p != self.sink() && q != self.sink() {
            self.fullness.union(p, q);
        }
    }
}

impl Percolation for UfPercolation {
    fn new(n: usize) -> Result<Self> {
        check_size(n)?;
        let sites = n * n;
        Ok(Self {
            n,
            open: vec![false; sites],
            open_sites: 0,
            uf: WeightedQuickUnion::new(sites + 2),
            fullness: WeightedQuickUnion::new(sites + 1),
        })
    }

    fn size(&self) -> usize {
        self.n
    }

    fn open(&mut self, i: usize, j: usize) -> Result<()> {
        check_site(self.n, i, j)?;
        let site = self.encode(i, j);
        if self.open[site - 1] {
            return Ok(());
        }
        self.open[site - 1] = true;
        self.open_sites += 1;

        if i == 0 {
            self.connect(SOURCE, site);
        }
        if i == self.n - 1 {
            self.connect(site, self.sink());
        }
        for (row, col) in neighbors(self.n, i, j) {
            let neighbor = self.encode(row, col);
            if self.open[neighbor - 1] {
                self.connect(site, neighbor);
            }
        }
        trace!("Opened site ({}, {}); {} components remain", i, j, self.uf.count());
        Ok(())
    }

    fn is_open(&self, i: usize, j: usize) -> Result<bool> {
        check_site(self.n, i, j)?;
        Ok(self.open[self.encode(i, j) - 1])
    }

    fn is_full(&self, i: usize, j: usize) -> Result<bool> {
        check_site(self.n, i, j)?;
        let site = self.encode(i, j);
        Ok(self.open[site - 1] && self.fullness.connected(SOURCE, site))
    }

    fn number_of_open_sites(&self) -> usize {
        self.open_sites
    }

    fn percolates(&self) -> bool {
        self.uf.connected(SOURCE, self.sink())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PercolationError;

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(
            UfPercolation::new(0),
            Err(PercolationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_grid_too_large_to_index() {
        assert!(matches!(
            UfPercolation::new(1usize << 33),
            Err(PercolationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn encodes_row_major_after_source() {
        let perc = UfPercolation::new(3).unwrap();
        assert_eq!(perc.encode(0, 0), 1);
        assert_eq!(perc.encode(1, 2), 6);
        assert_eq!(perc.encode(2, 2), 9);
        assert_eq!(perc.sink(), 10);
        assert_eq!(perc.uf.len(), 11);
    }

    #[test]
    fn top_row_site_is_full_once_open() {
        let mut perc = UfPercolation::new(4).unwrap();
        assert!(!perc.is_full(0, 3).unwrap());
        perc.open(0, 3).unwrap();
        assert!(perc.is_full(0, 3).unwrap());
        assert!(!perc.percolates());
    }

    #[test]
    fn bottom_row_alone_does_not_percolate() {
        let mut perc = UfPercolation::new(3).unwrap();
        for j in 0..3 {
            perc.open(2, j).unwrap();
        }
        assert!(!perc.percolates());
        assert!(!perc.is_full(2, 0).unwrap());
    }

    #[test]
    fn no_backwash_through_sink() {
        let mut perc = UfPercolation::new(3).unwrap();
        for i in 0..3 {
            perc.open(i, 0).unwrap();
        }
        // Isolated bottom-right site touches the sink only
        perc.open(2, 2).unwrap();
        assert!(perc.percolates());
        assert!(perc.is_full(2, 0).unwrap());
        assert!(!perc.is_full(2, 2).unwrap());
    }

    #[test]
    fn out_of_range_sites() {
        let mut perc = UfPercolation::new(2).unwrap();
        let expected = PercolationError::OutOfRange { i: 0, j: 2, n: 2 };
        assert_eq!(perc.open(0, 2).unwrap_err(), expected);
        assert_eq!(perc.is_open(0, 2).unwrap_err(), expected);
        assert_eq!(perc.is_full(0, 2).unwrap_err(), expected);
    }
}
