//! Gene symbol → row identifier mapping.
//!
//! Symbols are first rewritten through the alias table, then resolved against
//! a [`FeatureTable`]:
//!
//! - with a symbol column, each symbol maps to the identifier of the first row
//!   (in the table's current ordering) annotated with it;
//! - without one, the row identifiers are taken to be symbols and matching
//!   symbols are returned as-is.
//!
//! Unmatched symbols are dropped, never reported as errors. Output order
//! follows input order and duplicate inputs give duplicate outputs.
//!
//! # Example
//!
//! ```
//! use markerkit_panel::{FeatureFrame, SymbolMapper};
//!
//! let table = FeatureFrame::with_symbols(
//!     ["ENSG00000115884", "ENSG00000132465"],
//!     vec![Some("SDC1".into()), Some("JCHAIN".into())],
//! )?;
//! let ids = SymbolMapper::default().map_symbols(&table, &["SDC1/CD138", "ACTB"]);
//! assert_eq!(ids, vec!["ENSG00000115884"]);
//! # Ok::<(), markerkit_panel::Error>(())
//! ```

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::aliases::AliasTable;
use crate::table::FeatureTable;

/// One resolved symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolMatch {
    /// Symbol as the caller spelled it.
    pub input: String,
    /// Symbol after alias normalization.
    pub canonical: String,
    /// Matching row identifier.
    pub row_id: String,
}

/// Outcome of mapping a symbol list, for callers that need to know what was
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    /// Matches in input order.
    pub matched: Vec<SymbolMatch>,
    /// Input spellings with no match, in input order.
    pub unmatched: Vec<String>,
}

impl MappingReport {
    /// Matched row identifiers in input order.
    pub fn row_ids(&self) -> Vec<String> {
        self.matched.iter().map(|m| m.row_id.clone()).collect()
    }

    /// Returns `true` when every requested symbol matched.
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Maps gene symbols to the row identifiers of a feature table.
#[derive(Debug, Clone)]
pub struct SymbolMapper {
    aliases: AliasTable,
}

impl Default for SymbolMapper {
    fn default() -> Self {
        Self::new(AliasTable::builtin())
    }
}

impl SymbolMapper {
    /// Create a mapper using `aliases` for normalization.
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// The alias table in use.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Rewrite each symbol to its canonical form, keeping order and
    /// duplicates.
    pub fn normalize<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<String> {
        symbols
            .iter()
            .map(|s| self.aliases.canonical(s.as_ref()).to_string())
            .collect()
    }

    /// Symbol → row identifier lookup over the rows with a symbol.
    ///
    /// When several rows share a symbol the first row in the table's current
    /// ordering wins. Returns `None` for tables without a symbol column.
    pub fn symbol_index<'t, T: FeatureTable + ?Sized>(
        &self,
        table: &'t T,
    ) -> Option<HashMap<&'t str, &'t str>> {
        let column = table.symbol_column()?;
        let mut index = HashMap::with_capacity(column.len());
        for (row_id, symbol) in table.row_ids().iter().zip(column) {
            if let Some(symbol) = symbol {
                index.entry(symbol.as_str()).or_insert(row_id.as_str());
            }
        }
        Some(index)
    }

    /// Map `symbols` to row identifiers of `table`.
    ///
    /// Never fails; symbols without a match are omitted. The table is not
    /// modified.
    pub fn map_symbols<T, S>(&self, table: &T, symbols: &[S]) -> Vec<String>
    where
        T: FeatureTable + ?Sized,
        S: AsRef<str>,
    {
        self.map_symbols_report(table, symbols).row_ids()
    }

    /// Like [`map_symbols`](Self::map_symbols), but also reports which inputs
    /// did not match.
    pub fn map_symbols_report<T, S>(&self, table: &T, symbols: &[S]) -> MappingReport
    where
        T: FeatureTable + ?Sized,
        S: AsRef<str>,
    {
        let lookup = Lookup::build(self, table);
        let mut report = MappingReport::default();

        for input in symbols {
            let input = input.as_ref();
            let canonical = self.aliases.canonical(input);
            match lookup.resolve(canonical) {
                Some(row_id) => report.matched.push(SymbolMatch {
                    input: input.to_string(),
                    canonical: canonical.to_string(),
                    row_id: row_id.to_string(),
                }),
                None => {
                    log::debug!("no row for symbol {input}");
                    report.unmatched.push(input.to_string());
                }
            }
        }

        log::debug!(
            "mapped {} of {} symbols",
            report.matched.len(),
            symbols.len()
        );
        report
    }
}

/// Resolution strategy chosen once per call.
enum Lookup<'t> {
    BySymbol(HashMap<&'t str, &'t str>),
    ByRowId(HashSet<&'t str>),
}

impl<'t> Lookup<'t> {
    fn build<T: FeatureTable + ?Sized>(mapper: &SymbolMapper, table: &'t T) -> Self {
        match mapper.symbol_index(table) {
            Some(index) => Lookup::BySymbol(index),
            None => Lookup::ByRowId(table.row_ids().iter().map(String::as_str).collect()),
        }
    }

    fn resolve<'s>(&self, symbol: &'s str) -> Option<&'s str>
    where
        't: 's,
    {
        match self {
            Lookup::BySymbol(index) => index.get(symbol).copied(),
            Lookup::ByRowId(present) => present.contains(symbol).then_some(symbol),
        }
    }
}

/// Map `symbols` against `table` with the built-in aliases.
pub fn symbols_to_row_ids<T, S>(table: &T, symbols: &[S]) -> Vec<String>
where
    T: FeatureTable + ?Sized,
    S: AsRef<str>,
{
    SymbolMapper::default().map_symbols(table, symbols)
}
