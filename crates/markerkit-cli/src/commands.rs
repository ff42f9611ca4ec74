//! Handlers for the markerkit subcommands.
//!
//! Each handler writes its output to the given writer so it can be exercised
//! in tests; logging goes to stderr through the tracing subscriber.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};

use markerkit_core::Config;
use markerkit_panel::{AliasTable, CsvOptions, FeatureFrame, MarkerPanel, SymbolMapper};

use crate::cli::{Command, ConfigAction, MapArgs, MarkersArgs};

/// Dispatch a parsed command.
pub fn run(command: Command, config_path: Option<&str>, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Root { from } => cmd_root(&Config::load(config_path)?, from, out),
        Command::Paths { from, json, create } => {
            cmd_paths(&Config::load(config_path)?, from, json, create, out)
        }
        Command::Markers(args) => cmd_markers(&args, out),
        Command::Map(args) => cmd_map(&Config::load(config_path)?, &args, out),
        Command::Config { action } => cmd_config(config_path, action, out),
    }
}

fn start_dir(from: Option<PathBuf>) -> PathBuf {
    from.unwrap_or_else(|| PathBuf::from("."))
}

// ============================================================================
// Project paths
// ============================================================================

/// Print the project root.
pub fn cmd_root(config: &Config, from: Option<PathBuf>, out: &mut impl Write) -> Result<()> {
    let root = config.resolver().resolve_root(start_dir(from))?;
    writeln!(out, "{}", root.display())?;
    Ok(())
}

/// Print (and optionally create) the project layout.
pub fn cmd_paths(
    config: &Config,
    from: Option<PathBuf>,
    json: bool,
    create: bool,
    out: &mut impl Write,
) -> Result<()> {
    let paths = config.resolver().resolve_paths(start_dir(from))?;

    if create {
        // each created directory is logged by `create_missing`
        paths.create_missing()?;
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &paths.to_map())?;
        writeln!(out)?;
    } else {
        for (role, path) in paths.iter() {
            writeln!(out, "{role}\t{}", path.display())?;
        }
    }
    Ok(())
}

// ============================================================================
// Marker panel
// ============================================================================

/// Symbols for a category, or for one of its subtypes.
fn panel_selection(
    panel: &MarkerPanel,
    category: &str,
    subtype: Option<&str>,
) -> Result<&'static [&'static str]> {
    let known = || panel.categories().collect::<Vec<_>>().join(", ");
    match subtype {
        None => panel
            .level1(category)
            .ok_or_else(|| anyhow!("unknown category '{category}' (known: {})", known())),
        Some(subtype) => {
            let subtypes = panel
                .subtypes(category)
                .ok_or_else(|| anyhow!("unknown category '{category}' (known: {})", known()))?;
            panel.level2(category, subtype).ok_or_else(|| {
                anyhow!(
                    "unknown subtype '{subtype}' in {category} (known: {})",
                    subtypes.join(", ")
                )
            })
        }
    }
}

/// Print the marker panel, a slice of it, or the placements of a symbol.
pub fn cmd_markers(args: &MarkersArgs, out: &mut impl Write) -> Result<()> {
    let panel = MarkerPanel::builtin();

    if let Some(symbol) = &args.find {
        let placements = panel.categories_for_symbol(symbol);
        if placements.is_empty() {
            bail!("{symbol} is not in the marker panel");
        }
        if args.json {
            serde_json::to_writer_pretty(&mut *out, &placements)?;
            writeln!(out)?;
            return Ok(());
        }
        for placement in placements {
            match placement {
                markerkit_panel::Placement::Level1 { category } => writeln!(out, "{category}")?,
                markerkit_panel::Placement::Level2 { category, subtype } => {
                    writeln!(out, "{category}/{subtype}")?
                }
            }
        }
        return Ok(());
    }

    if let Some(category) = &args.category {
        let symbols = panel_selection(&panel, category, args.subtype.as_deref())?;
        if args.json {
            serde_json::to_writer_pretty(&mut *out, symbols)?;
            writeln!(out)?;
        } else {
            for symbol in symbols {
                writeln!(out, "{symbol}")?;
            }
        }
        return Ok(());
    }

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &panel_as_json(&panel))?;
        writeln!(out)?;
        return Ok(());
    }

    for (category, symbols) in panel.level1_entries() {
        writeln!(out, "{category}: {}", symbols.join(" "))?;
        for subtype in panel.subtypes(category).unwrap_or_default() {
            let subs = panel.level2(category, subtype).unwrap_or_default();
            writeln!(out, "  {subtype}: {}", subs.join(" "))?;
        }
    }
    Ok(())
}

fn panel_as_json(panel: &MarkerPanel) -> serde_json::Value {
    let level1: BTreeMap<_, _> = panel.level1_entries().iter().copied().collect();
    let level2: BTreeMap<_, BTreeMap<_, _>> = panel
        .level2_entries()
        .iter()
        .map(|&(category, subs)| (category, subs.iter().copied().collect()))
        .collect();
    serde_json::json!({ "level1": level1, "level2": level2 })
}

// ============================================================================
// Symbol mapping
// ============================================================================

fn load_table(config: &Config, args: &MapArgs) -> Result<FeatureFrame> {
    let options = CsvOptions {
        index_column: args
            .index_column
            .clone()
            .or_else(|| config.table.index_column.clone()),
        symbol_column: args
            .symbol_column
            .clone()
            .unwrap_or_else(|| config.table.symbol_column.clone()),
        delimiter: None,
    };
    FeatureFrame::from_csv_path(&args.table, &options)
        .with_context(|| format!("failed to load feature table {}", args.table.display()))
}

/// Map symbols (explicit and/or from the panel) to row identifiers.
pub fn cmd_map(config: &Config, args: &MapArgs, out: &mut impl Write) -> Result<()> {
    let mut symbols = args.symbols.clone();
    if let Some(category) = &args.category {
        let panel = MarkerPanel::builtin();
        let selection = panel_selection(&panel, category, args.subtype.as_deref())?;
        symbols.extend(selection.iter().map(|s| s.to_string()));
    }
    if symbols.is_empty() {
        bail!("no symbols given: pass symbols or --category");
    }

    let table = load_table(config, args)?;
    let mapper = SymbolMapper::new(AliasTable::builtin().extend(config.aliases.clone()));
    let report = mapper.map_symbols_report(&table, &symbols);

    if !report.unmatched.is_empty() {
        tracing::warn!(
            unmatched = %report.unmatched.join(","),
            "{} of {} symbols not found in {}",
            report.unmatched.len(),
            symbols.len(),
            args.table.display()
        );
    }
    if args.strict && !report.is_complete() {
        bail!("symbols not found: {}", report.unmatched.join(", "));
    }

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        for row_id in report.row_ids() {
            writeln!(out, "{row_id}")?;
        }
    }
    Ok(())
}

// ============================================================================
// Config
// ============================================================================

/// Handle a config subcommand.
pub fn cmd_config(
    config_path: Option<&str>,
    action: ConfigAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = Config::resolve_config_path(config_path)
                .ok_or_else(|| anyhow!("Could not determine config directory for this platform"))?;
            writeln!(out, "{}", path.display())?;
            if !path.exists() {
                eprintln!("(file does not exist; run `markerkit config init` to create it)");
            }
        }
        ConfigAction::Show => {
            let config = Config::load(config_path)?;
            write!(out, "{}", config.to_toml_string()?)?;
        }
        ConfigAction::Init { file, force } => {
            let path = match file {
                Some(p) => PathBuf::from(p),
                None => Config::default_config_path()
                    .ok_or_else(|| anyhow!("Could not determine config directory"))?,
            };
            if path.exists() && !force {
                bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let mut config = Config::default();
            config.aliases.extend(
                markerkit_panel::GENE_ALIASES
                    .iter()
                    .map(|(a, c)| (a.to_string(), c.to_string())),
            );
            std::fs::write(&path, config.to_toml_string()?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(out, "Config file created at {}", path.display())?;
        }
    }
    Ok(())
}
