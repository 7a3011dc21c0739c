//! Grid definitions and the shared ticker pool.

use std::collections::BTreeSet;

/// A named group of symbols sharing one manifest. Rebuilt from its ticker
/// list source on every run; only the manifest output persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub name: String,
    pub symbols: Vec<String>,
}

impl Grid {
    pub fn count(&self) -> usize {
        self.symbols.len()
    }
}

/// Parse a ticker list: one symbol per line, blank lines and `#` comments
/// skipped, tokens upper-cased. Declared order is preserved. No symbol
/// format validation happens here; the fetch layer is the only validator.
pub fn parse_symbol_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_uppercase)
        .collect()
}

/// Union of all grids' symbols for one run. Duplicates across grids collapse
/// so each physical symbol is fetched once regardless of how many grids
/// reference it. Iteration order is sorted, which fixes batch order.
pub fn ticker_pool(grids: &[Grid]) -> BTreeSet<String> {
    grids
        .iter()
        .flat_map(|grid| grid.symbols.iter().cloned())
        .collect()
}
