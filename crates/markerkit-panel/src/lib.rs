//! markerkit panel: PBMC marker tables and gene symbol mapping.
//!
//! # Modules
//!
//! - [`markers`]: The two-level marker panel (lineage, then subtype)
//! - [`aliases`]: Alias spellings → canonical symbols
//! - [`table`]: The [`FeatureTable`] capability trait and the CSV-backed [`FeatureFrame`]
//! - [`mapper`]: Symbol → row identifier mapping
//! - [`error`]: Error types and Result alias
//!
//! The marker tables are `'static` data and safe to share between threads.

#![doc = include_str!("../README.md")]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod aliases;
pub mod error;
pub mod mapper;
pub mod markers;
pub mod table;

mod proptests;

pub use aliases::{AliasTable, GENE_ALIASES};
pub use error::{Error, Result};
pub use mapper::{MappingReport, SymbolMapper, SymbolMatch, symbols_to_row_ids};
pub use markers::{LEVEL1_MARKERS, LEVEL2_MARKERS, MarkerPanel, Placement};
pub use table::{CsvOptions, FeatureFrame, FeatureTable};
