//! Feature tables: the dataset side of symbol mapping.
//!
//! The mapper only needs two capabilities from a dataset: its ordered row
//! identifiers, and optionally a symbol annotation aligned with those rows.
//! [`FeatureTable`] captures exactly that, so any tabular backend can be
//! adapted with a thin wrapper. [`FeatureFrame`] is the in-memory
//! implementation, loadable from a CSV/TSV export of an AnnData `var` table.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Minimal read-only view of a feature-annotated dataset.
pub trait FeatureTable {
    /// Unique row identifiers, in the table's current order.
    fn row_ids(&self) -> &[String];

    /// Symbol annotation aligned with [`row_ids`](Self::row_ids), if the
    /// table has one. `None` entries are missing values.
    fn symbol_column(&self) -> Option<&[Option<String>]>;
}

impl<T: FeatureTable + ?Sized> FeatureTable for &T {
    fn row_ids(&self) -> &[String] {
        (**self).row_ids()
    }

    fn symbol_column(&self) -> Option<&[Option<String>]> {
        (**self).symbol_column()
    }
}

/// In-memory feature table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFrame {
    row_ids: Vec<String>,
    symbols: Option<Vec<Option<String>>>,
}

/// How to read a feature table from delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Column holding row identifiers; the first column when `None`.
    pub index_column: Option<String>,
    /// Column holding symbol annotations, used only if present.
    pub symbol_column: String,
    /// Field delimiter; inferred from the file extension when `None`.
    pub delimiter: Option<u8>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            index_column: None,
            symbol_column: "symbol".to_string(),
            delimiter: None,
        }
    }
}

impl FeatureFrame {
    /// A table whose row identifiers are themselves symbols.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateRowId`] if an identifier repeats.
    pub fn new<I, S>(row_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row_ids: Vec<String> = row_ids.into_iter().map(Into::into).collect();
        check_unique(&row_ids)?;
        Ok(Self {
            row_ids,
            symbols: None,
        })
    }

    /// A table with a symbol annotation column.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if `symbols` is not aligned with `row_ids`,
    /// [`Error::DuplicateRowId`] if an identifier repeats.
    pub fn with_symbols<I, S>(row_ids: I, symbols: Vec<Option<String>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row_ids: Vec<String> = row_ids.into_iter().map(Into::into).collect();
        if row_ids.len() != symbols.len() {
            return Err(Error::LengthMismatch {
                rows: row_ids.len(),
                symbols: symbols.len(),
            });
        }
        check_unique(&row_ids)?;
        Ok(Self {
            row_ids,
            symbols: Some(symbols),
        })
    }

    /// Read a table from delimited text with a header row.
    ///
    /// Empty symbol cells are missing values. When `options.delimiter` is
    /// unset a comma is used.
    pub fn from_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        let delimiter = options.delimiter.unwrap_or(b',');
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let index_idx = match &options.index_column {
            Some(name) => headers
                .iter()
                .position(|h| h == name.as_str())
                .ok_or_else(|| Error::missing_column(name.as_str()))?,
            None if headers.is_empty() => return Err(Error::missing_column("<index>")),
            None => 0,
        };
        let symbol_idx = headers.iter().position(|h| h == options.symbol_column);
        log::debug!(
            "reading feature table: index column {index_idx}, symbol column {symbol_idx:?}"
        );

        let mut row_ids = Vec::new();
        let mut symbols = symbol_idx.map(|_| Vec::new());
        for record in rdr.records() {
            let record = record?;
            let id = record.get(index_idx).ok_or_else(|| {
                Error::missing_column(headers.get(index_idx).unwrap_or("<index>"))
            })?;
            row_ids.push(id.to_string());

            if let (Some(idx), Some(column)) = (symbol_idx, symbols.as_mut()) {
                let value = record.get(idx).filter(|v| !v.is_empty());
                column.push(value.map(str::to_string));
            }
        }

        match symbols {
            Some(symbols) => Self::with_symbols(row_ids, symbols),
            None => Self::new(row_ids),
        }
    }

    /// Read a table from a `.csv` or `.tsv` file.
    pub fn from_csv_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io_with_path(e, path))?;

        let mut options = options.clone();
        if options.delimiter.is_none() {
            options.delimiter = Some(delimiter_for(path));
        }
        let frame = Self::from_csv_reader(file, &options)?;
        log::info!("loaded {} rows from {}", frame.len(), path.display());
        Ok(frame)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.row_ids.len()
    }

    /// Returns `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_ids.is_empty()
    }

    /// Returns `true` when the table carries a symbol column.
    pub fn has_symbol_column(&self) -> bool {
        self.symbols.is_some()
    }
}

impl FeatureTable for FeatureFrame {
    fn row_ids(&self) -> &[String] {
        &self.row_ids
    }

    fn symbol_column(&self) -> Option<&[Option<String>]> {
        self.symbols.as_deref()
    }
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => b'\t',
        _ => b',',
    }
}

fn check_unique(row_ids: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(row_ids.len());
    for id in row_ids {
        if !seen.insert(id.as_str()) {
            return Err(Error::DuplicateRowId { id: id.clone() });
        }
    }
    Ok(())
}
