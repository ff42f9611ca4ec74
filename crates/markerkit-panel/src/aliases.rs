//! Alias spellings mapped to canonical symbols.
//!
//! Feature tables sometimes carry mixed annotations such as `SDC1/CD138`;
//! these are rewritten to the canonical symbol before lookup. Lookup is a
//! single exact step: no chains, no case folding.

use std::collections::HashMap;

/// Built-in alias → canonical symbol entries.
pub static GENE_ALIASES: &[(&str, &str)] = &[("SDC1/CD138", "SDC1")];

/// Owned alias table, seeded from [`GENE_ALIASES`] and extensible from
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// An empty table; every symbol maps to itself.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in aliases.
    pub fn builtin() -> Self {
        Self::empty().extend(GENE_ALIASES.iter().copied())
    }

    /// Add or replace one alias.
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.entries.insert(alias.into(), canonical.into());
        self
    }

    /// Add or replace many aliases.
    pub fn extend<I, A, C>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        self.entries
            .extend(aliases.into_iter().map(|(a, c)| (a.into(), c.into())));
        self
    }

    /// Canonical form of `symbol`, or `symbol` itself when it is not an alias.
    pub fn canonical<'a>(&'a self, symbol: &'a str) -> &'a str {
        match self.entries.get(symbol) {
            Some(canonical) => {
                log::trace!("alias {symbol} -> {canonical}");
                canonical.as_str()
            }
            None => symbol,
        }
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
