//! Percolation systems: an n x n grid of blocked or open sites.
//!
//! A site is *full* when a chain of open, 4-adjacent sites connects it to the
//! top row; the system *percolates* when some bottom-row site is full.
//! [`ArrayPercolation`] answers these questions by flood filling the grid on
//! every query, [`UfPercolation`] maintains the answer incrementally with a
//! union-find structure.

mod array;
mod uf;

pub use array::ArrayPercolation;
pub use uf::UfPercolation;

use crate::error::{PercolationError, Result};

/// Capability set shared by every percolation system.
pub trait Percolation {
    /// Constructs an n x n system with all sites blocked.
    fn new(n: usize) -> Result<Self>
    where
        Self: Sized;

    /// Side length n of the grid.
    fn size(&self) -> usize;

    /// Opens site (i, j) if it is not already open.
    fn open(&mut self, i: usize, j: usize) -> Result<()>;

    /// Returns true if site (i, j) is open.
    fn is_open(&self, i: usize, j: usize) -> Result<bool>;

    /// Returns true if site (i, j) is connected to the top row through open sites.
    fn is_full(&self, i: usize, j: usize) -> Result<bool>;

    /// Number of distinct sites opened so far.
    fn number_of_open_sites(&self) -> usize;

    /// Returns true if some bottom-row site is full.
    fn percolates(&self) -> bool;
}

/// Rejects a grid size of zero, or one whose n * n sites plus the two
/// virtual endpoints do not fit in `usize`.
pub(crate) fn check_size(n: usize) -> Result<()> {
    if n == 0 {
        return Err(PercolationError::InvalidArgument(
            "grid size must be positive, got 0".to_string(),
        ));
    }
    if n.checked_mul(n).and_then(|sites| sites.checked_add(2)).is_none() {
        return Err(PercolationError::InvalidArgument(format!(
            "grid size {n} is too large"
        )));
    }
    Ok(())
}

/// Rejects (i, j) outside `[0, n)^2`.
pub(crate) fn check_site(n: usize, i: usize, j: usize) -> Result<()> {
    if i >= n || j >= n {
        return Err(PercolationError::OutOfRange {
            i: i64::try_from(i).unwrap_or(i64::MAX),
            j: i64::try_from(j).unwrap_or(i64::MAX),
            n,
        });
    }
    Ok(())
}

/// Converts signed text input into a checked site coordinate.
pub fn site_from_signed(n: usize, i: i64, j: i64) -> Result<(usize, usize)> {
    match (usize::try_from(i), usize::try_from(j)) {
        (Ok(row), Ok(col)) if row < n && col < n => Ok((row, col)),
        _ => Err(PercolationError::OutOfRange { i, j, n }),
    }
}

/// Converts a signed grid size into a checked one.
pub fn size_from_signed(n: i64) -> Result<usize> {
    match usize::try_from(n) {
        Ok(size) if size > 0 => {
            check_size(size)?;
            Ok(size)
        }
        _ => Err(PercolationError::InvalidArgument(format!(
            "grid size must be positive, got {n}"
        ))),
    }
}

/// In-bounds 4-neighbours (N, S, W, E) of site (i, j).
pub(crate) fn neighbors(n: usize, i: usize, j: usize) -> impl Iterator<Item = (usize, usize)> {
    const MOVES: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    MOVES.into_iter().filter_map(move |(di, dj)| {
        let row = i.checked_add_signed(di)?;
        let col = j.checked_add_signed(dj)?;
        (row < n && col < n).then_some((row, col))
    })
}
