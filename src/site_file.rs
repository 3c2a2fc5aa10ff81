use crate::error::{PercolationError, Result};
use crate::percolation::{site_from_signed, size_from_signed, Percolation};
use std::path::Path;

/// A grid size followed by the sites to open, as read from a text file.
///
/// The format is whitespace-separated integers: `n` first, then `i j` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    pub n: usize,
    pub sites: Vec<(usize, usize)>,
}

impl SiteFile {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let text = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read site file '{}': {}", path_ref.display(), e))?;
        let sites = Self::parse(&text)
            .map_err(|e| anyhow::anyhow!("Invalid site file '{}': {}", path_ref.display(), e))?;
        Ok(sites)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace().map(|token| {
            token.parse::<i64>().map_err(|_| {
                PercolationError::InvalidArgument(format!("expected an integer, found '{token}'"))
            })
        });

        let n = match tokens.next() {
            Some(token) => size_from_signed(token?)?,
            None => {
                return Err(PercolationError::InvalidArgument(
                    "missing grid size".to_string(),
                ))
            }
        };

        let mut sites = Vec::new();
        while let Some(i) = tokens.next() {
            let i = i?;
            let j = tokens.next().ok_or_else(|| {
                PercolationError::InvalidArgument(format!("row {i} has no matching column"))
            })??;
            sites.push(site_from_signed(n, i, j)?);
        }
        Ok(Self { n, sites })
    }

    /// Builds an n x n system of type `P` with every listed site opened.
    pub fn apply<P: Percolation>(&self) -> Result<P> {
        let mut perc = P::new(self.n)?;
        for &(i, j) in &self.sites {
            perc.open(i, j)?;
        }
        Ok(perc)
    }
}
