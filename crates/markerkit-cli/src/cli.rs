//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// markerkit - PBMC marker panels, project paths and gene symbol mapping
#[derive(Parser, Debug)]
#[command(name = "markerkit", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the project root
    Root {
        /// Directory to start from (defaults to the current directory)
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Print the project directory layout
    Paths {
        /// Directory to start from (defaults to the current directory)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Emit JSON
        #[arg(long)]
        json: bool,

        /// Create missing project directories
        #[arg(long)]
        create: bool,
    },

    /// Show the marker panel
    Markers(MarkersArgs),

    /// Map gene symbols to row identifiers of a feature table
    Map(MapArgs),

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug)]
pub struct MarkersArgs {
    /// Level-1 category (e.g. Plasma)
    #[arg(long)]
    pub category: Option<String>,

    /// Level-2 subtype within the category (e.g. Treg)
    #[arg(long, requires = "category")]
    pub subtype: Option<String>,

    /// List every place a symbol appears
    #[arg(long, conflicts_with_all = ["category", "subtype"])]
    pub find: Option<String>,

    /// Emit JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Feature table (.csv or .tsv) with a header row
    #[arg(long)]
    pub table: PathBuf,

    /// Column holding row identifiers (default: first column)
    #[arg(long)]
    pub index_column: Option<String>,

    /// Column holding gene symbols (default: from config, else "symbol")
    #[arg(long)]
    pub symbol_column: Option<String>,

    /// Take symbols from this panel category
    #[arg(long)]
    pub category: Option<String>,

    /// Narrow the panel selection to a Level-2 subtype
    #[arg(long, requires = "category")]
    pub subtype: Option<String>,

    /// Fail if any symbol has no match
    #[arg(long)]
    pub strict: bool,

    /// Emit the full mapping report as JSON
    #[arg(long)]
    pub json: bool,

    /// Gene symbols to map
    pub symbols: Vec<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Output file (defaults to the per-user config path)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_map() {
        let cli = Cli::try_parse_from([
            "markerkit",
            "-vv",
            "map",
            "--table",
            "var.csv",
            "--strict",
            "MZB1",
            "JCHAIN",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Map(args) => {
                assert_eq!(args.table, PathBuf::from("var.csv"));
                assert!(args.strict);
                assert_eq!(args.symbols, vec!["MZB1", "JCHAIN"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_subtype_requires_category() {
        let result = Cli::try_parse_from(["markerkit", "markers", "--subtype", "Treg"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_find_conflicts_with_category() {
        let result =
            Cli::try_parse_from(["markerkit", "markers", "--find", "KIT", "--category", "ILC"]);
        assert!(result.is_err());
    }
}
