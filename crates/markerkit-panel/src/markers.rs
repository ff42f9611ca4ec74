//! Canonical PBMC marker panel.
//!
//! Derived from the Inflammation PBMC Atlas marker dictionary, shortened to
//! 3–10 robust positive markers per cell type so dot plots stay readable.
//! Symbols are uppercase HGNC. A symbol may appear under several categories
//! when the marker is genuinely shared (e.g. `JCHAIN` in plasma cells and pDC).

use serde::Serialize;

/// Level-1 table: lineage → ordered symbols.
pub type Level1Table = &'static [(&'static str, &'static [&'static str])];

/// Level-2 table: lineage → subtype → ordered symbols.
pub type Level2Table =
    &'static [(&'static str, &'static [(&'static str, &'static [&'static str])])];

/// Lineage-level markers.
pub static LEVEL1_MARKERS: Level1Table = &[
    // B cells, excluding plasma cells
    ("B", &["MS4A1", "CD79A", "CD19", "TCL1A", "FCER2"]),
    ("Plasma", &["MZB1", "JCHAIN", "XBP1", "SDC1", "PRDM1", "IRF4"]),
    ("Mono_and_DC", &["LYZ", "CST3", "CD14", "FCGR3A", "CLEC9A", "CD1C"]),
    ("pDC", &["IL3RA", "LILRA4", "IRF7", "IRF8", "GZMB", "JCHAIN"]),
    // T, NK and ILC as one lymphoid lineage
    ("T_and_NK", &["CD3D", "CD4", "CD8A", "NKG7", "GNLY", "KLRD1"]),
    // Cells that do not conform to a classical lineage
    ("UTC", &["TMSB10", "MALAT1", "RPL13A"]),
    ("ILC", &["KIT", "NCR1", "KLRG1"]),
    ("Platelets", &["PPBP", "PF4", "NRGN"]),
    // Erythrocytes and hematopoietic progenitors
    ("RBC_and_HSC", &["HBA1", "HBB", "CD34", "KIT"]),
];

/// Subtype-level markers within each lineage.
pub static LEVEL2_MARKERS: Level2Table = &[
    (
        "B",
        &[
            ("B_Naive", &["TCL1A", "FCER2", "IGHD", "IGHM", "CCR7", "SELL"]),
            ("B_Memory", &["CD27", "TNFRSF13B", "BANK1", "IGHG1", "IGHA1", "CD74"]),
            ("B_Immature", &["CD19", "RAG1", "RAG2", "CD9", "SOX4"]),
            ("B_Atypical", &["TBX21", "ITGAX"]),
            ("B_Activated", &["CD69", "CD83", "NFKB1", "NFKB2"]),
            ("B_ISG", &["ISG15", "IFI6", "IFITM1", "IFITM2"]),
        ],
    ),
    (
        "Plasma",
        &[("Plasma", &["MZB1", "SDC1", "JCHAIN", "DERL3", "XBP1", "PRDM1", "IRF4"])],
    ),
    (
        "Mono_and_DC",
        &[
            ("Classical_Mono", &["CD14", "S100A8", "S100A9", "LYZ", "VCAN", "FCN1"]),
            ("NonClassical_Mono", &["FCGR3A", "CX3CR1", "HLA-DRB1", "HLA-DRA"]),
            ("cDC1", &["CLEC9A", "XCR1", "IDO1", "CLNK", "ZNF366"]),
            ("cDC2", &["CD1C", "FCER1A", "CLEC10A"]),
            ("DC3", &["CD1C", "S100A8", "S100A9", "ANXA1"]),
            ("DC4", &["ITGAX", "FCGR3A", "SERPINA1", "LILRB2", "SIGLEC10"]),
            ("DC5", &["AXL", "SIGLEC6", "CD22", "DAB2"]),
            ("aDC", &["CCL19", "CCR7", "IL7R", "AIRE"]),
        ],
    ),
    (
        "pDC",
        &[("pDC", &["IL3RA", "IRF7", "LILRA4", "IRF8", "JCHAIN", "GZMB"])],
    ),
    (
        "T_and_NK",
        &[
            ("CD4_Naive", &["CD4", "CCR7", "TCF7", "LEF1", "SELL", "KLF2"]),
            ("CD8_Naive", &["CD8A", "CD8B", "CCR7", "TCF7", "LEF1", "SELL"]),
            // Follicular helper plus a Th1/Th17 mix
            (
                "CD4_Effector_Th",
                &[
                    "CXCR3", "GATA3", "RORC", "RORA", "IL17A", "IL17F", "CXCR6", "IFNG", "CXCR5",
                    "CXCL13",
                ],
            ),
            (
                "CD8_Effector_Cytotoxic",
                &["GZMK", "GZMH", "PRF1", "NKG7", "CCL5", "CCL4", "ITGAE", "KLRG1", "CTSW"],
            ),
            (
                "Exhausted_T",
                &["HAVCR2", "LAG3", "PDCD1", "TIGIT", "TOX", "TOX2", "LAYN", "CTLA4"],
            ),
            (
                "Treg",
                &["FOXP3", "CTLA4", "IL2RA", "ICOS", "TIGIT", "IKZF2", "GATA3", "CCR7"],
            ),
            ("GammaDelta_T", &["TRGC1", "TRGC2", "TRDC"]),
            ("MAIT", &["KLRB1", "IL7R", "SLC4A10"]),
            // CD16hi / CD56dim
            (
                "NK",
                &["NCAM1", "FCGR3A", "CX3CR1", "GNLY", "KLRC2", "KLRD1", "KLRK1", "NKG7"],
            ),
            (
                "IFN_response_T",
                &[
                    "IFI16", "IFI35", "IFI44", "IFI44L", "IFI6", "IFIH1", "IFIT1", "IFIT2", "IFIT3",
                    "IFIT5", "ISG15",
                ],
            ),
            (
                "Proliferative_T",
                &["MKI67", "TOP2A", "STMN1", "UBE2C", "PCLAF", "CENPF", "CDK1"],
            ),
        ],
    ),
    ("ILC", &[("ILC", &["KIT", "NCR1", "KLRG1"])]),
    ("Platelets", &[("Platelets", &["PPBP", "PF4", "NRGN"])]),
    (
        "RBC_and_HSC",
        &[("RBC", &["HBA1", "HBB"]), ("HSCs", &["CD34", "KIT"])],
    ),
    // UTC = MAIT + γδT; these split a UTC-annotated cluster into its subtype
    (
        "UTC",
        &[
            ("MAIT", &["KLRB1", "IL7R", "SLC4A10"]),
            ("GammaDelta_T", &["TRGC1", "TRGC2", "TRDC"]),
        ],
    ),
];

/// Where a symbol sits in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum Placement {
    /// Listed under a lineage.
    Level1 {
        /// Lineage name
        category: &'static str,
    },
    /// Listed under a subtype of a lineage.
    Level2 {
        /// Lineage name
        category: &'static str,
        /// Subtype name
        subtype: &'static str,
    },
}

/// Read-only view over a two-level marker table.
#[derive(Debug, Clone, Copy)]
pub struct MarkerPanel {
    level1: Level1Table,
    level2: Level2Table,
}

impl Default for MarkerPanel {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MarkerPanel {
    /// The built-in PBMC panel.
    pub fn builtin() -> Self {
        Self::new(LEVEL1_MARKERS, LEVEL2_MARKERS)
    }

    /// A panel over arbitrary static tables.
    pub const fn new(level1: Level1Table, level2: Level2Table) -> Self {
        Self { level1, level2 }
    }

    /// Level-1 entries in table order.
    pub fn level1_entries(&self) -> Level1Table {
        self.level1
    }

    /// Level-2 entries in table order.
    pub fn level2_entries(&self) -> Level2Table {
        self.level2
    }

    /// Level-1 category names in table order.
    pub fn categories(&self) -> impl Iterator<Item = &'static str> {
        self.level1.iter().map(|(name, _)| *name)
    }

    /// Markers for a Level-1 category.
    pub fn level1(&self, category: &str) -> Option<&'static [&'static str]> {
        self.level1
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, symbols)| *symbols)
    }

    /// Subtype names under a category, or `None` for an unknown category.
    pub fn subtypes(&self, category: &str) -> Option<Vec<&'static str>> {
        self.level2_for(category)
            .map(|subs| subs.iter().map(|(name, _)| *name).collect())
    }

    /// Markers for a Level-2 subtype within a category.
    pub fn level2(&self, category: &str, subtype: &str) -> Option<&'static [&'static str]> {
        self.level2_for(category)?
            .iter()
            .find(|(name, _)| *name == subtype)
            .map(|(_, symbols)| *symbols)
    }

    /// Every distinct symbol in the panel, in first-seen order (Level 1
    /// before Level 2).
    pub fn symbols(&self) -> Vec<&'static str> {
        let mut seen = std::collections::HashSet::new();
        self.all_listings()
            .map(|(_, symbol)| symbol)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Every place `symbol` is listed.
    pub fn categories_for_symbol(&self, symbol: &str) -> Vec<Placement> {
        self.all_listings()
            .filter(|(_, s)| *s == symbol)
            .map(|(placement, _)| placement)
            .collect()
    }

    fn level2_for(
        &self,
        category: &str,
    ) -> Option<&'static [(&'static str, &'static [&'static str])]> {
        self.level2
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, subs)| *subs)
    }

    fn all_listings(&self) -> impl Iterator<Item = (Placement, &'static str)> {
        let level1 = self.level1.iter().flat_map(|&(category, symbols)| {
            symbols
                .iter()
                .map(move |&s| (Placement::Level1 { category }, s))
        });
        let level2 = self.level2.iter().flat_map(|&(category, subs)| {
            subs.iter().flat_map(move |&(subtype, symbols)| {
                symbols
                    .iter()
                    .map(move |&s| (Placement::Level2 { category, subtype }, s))
            })
        });
        level1.chain(level2)
    }
}

/// Returns `true` for an uppercase canonical symbol: uppercase ASCII letters
/// and digits, with `-` or `/` allowed after the first character.
pub fn is_canonical_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() || c.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '/')
}
