//! Symbol mapping against realistic feature tables.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use markerkit_panel::{
    AliasTable, CsvOptions, FeatureFrame, FeatureTable, MarkerPanel, SymbolMapper,
    symbols_to_row_ids,
};

/// A `var` table as written by `adata.var.to_csv()`: unnamed index column of
/// Ensembl ids, a `symbol` column, one row without annotation and a
/// duplicated symbol.
const VAR_CSV: &str = "\
,symbol,feature_types
ENSG00000170476,MZB1,Gene Expression
ENSG00000115884,SDC1,Gene Expression
ENSG00000132465,JCHAIN,Gene Expression
ENSG00000137265,IRF4,Gene Expression
ENSG00000999999,IRF4,Gene Expression
ENSG00000105369,CD79A,Gene Expression
ENSG00000000000,,Gene Expression
";

fn var_table() -> FeatureFrame {
    FeatureFrame::from_csv_reader(VAR_CSV.as_bytes(), &CsvOptions::default())
        .expect("parse var table")
}

#[test]
fn test_alias_is_normalized_before_lookup() {
    let ids = symbols_to_row_ids(&var_table(), &["SDC1/CD138"]);
    assert_eq!(ids, vec!["ENSG00000115884"]);
}

#[test]
fn test_unmatched_symbols_are_omitted_in_order() {
    let ids = symbols_to_row_ids(&var_table(), &["MZB1", "UNKNOWNGENE", "JCHAIN"]);
    assert_eq!(ids, vec!["ENSG00000170476", "ENSG00000132465"]);
}

#[test]
fn test_index_only_table_uses_row_ids_as_symbols() {
    let table = FeatureFrame::new(["MS4A1", "CD79A"]).unwrap();
    let ids = symbols_to_row_ids(&table, &["CD79A", "MS4A1", "CD19"]);
    assert_eq!(ids, vec!["CD79A", "MS4A1"]);
}

#[test]
fn test_duplicated_symbol_keeps_first_row() {
    let table = var_table();
    let mapper = SymbolMapper::default();

    let index = mapper.symbol_index(&table).unwrap();
    assert_eq!(index["IRF4"], "ENSG00000137265");
    assert_eq!(mapper.map_symbols(&table, &["IRF4"]), vec!["ENSG00000137265"]);
}

#[test]
fn test_mapping_does_not_modify_the_table() {
    let table = var_table();
    let before = table.clone();
    let _ = symbols_to_row_ids(&table, &["MZB1", "SDC1/CD138"]);
    assert_eq!(table, before);
    assert_eq!(table.row_ids().len(), 7);
}

#[test]
fn test_panel_category_maps_against_table() {
    let panel = MarkerPanel::builtin();
    let plasma = panel.level1("Plasma").unwrap();

    let report = SymbolMapper::default().map_symbols_report(&var_table(), plasma);
    assert_eq!(
        report.row_ids(),
        vec![
            "ENSG00000170476",
            "ENSG00000132465",
            "ENSG00000115884",
            "ENSG00000137265",
        ]
    );
    assert_eq!(report.unmatched, vec!["XBP1", "PRDM1"]);
}

#[test]
fn test_configured_aliases_extend_builtins() {
    let aliases = AliasTable::builtin().extend([("CD20", "MS4A1"), ("CD79a", "CD79A")]);
    let mapper = SymbolMapper::new(aliases);
    let ids = mapper.map_symbols(&var_table(), &["CD79a", "SDC1/CD138", "CD20"]);
    assert_eq!(ids, vec!["ENSG00000105369", "ENSG00000115884"]);
}

#[test]
fn test_trait_objects_are_accepted() {
    let table = var_table();
    let dyn_table: &dyn FeatureTable = &table;
    assert_eq!(
        symbols_to_row_ids(dyn_table, &["CD79A"]),
        vec!["ENSG00000105369"]
    );
}
