//! Fixed directory layout of an analysis project.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// PathRole
// ============================================================================

/// Logical role of a directory in the project layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathRole {
    /// The directory the caller started from.
    NotebookDir,
    /// The discovered project root.
    ProjectRoot,
    /// `config/`
    ConfigDir,
    /// `data/`
    DataDir,
    /// `results/`
    ResultsDir,
    /// `figures/`
    FiguresDir,
    /// `src/`
    SrcDir,
    /// `R/`
    RDir,
    /// `notebooks/`
    NotebooksDir,
}

impl PathRole {
    /// All roles, in layout order.
    pub const ALL: [PathRole; 9] = [
        PathRole::NotebookDir,
        PathRole::ProjectRoot,
        PathRole::ConfigDir,
        PathRole::DataDir,
        PathRole::ResultsDir,
        PathRole::FiguresDir,
        PathRole::SrcDir,
        PathRole::RDir,
        PathRole::NotebooksDir,
    ];

    /// Key used when the layout is exported as a mapping.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotebookDir => "NOTEBOOK_DIR",
            Self::ProjectRoot => "PROJECT_ROOT",
            Self::ConfigDir => "CONFIG_DIR",
            Self::DataDir => "DATA_DIR",
            Self::ResultsDir => "RESULTS_DIR",
            Self::FiguresDir => "FIGURES_DIR",
            Self::SrcDir => "SRC_DIR",
            Self::RDir => "R_DIR",
            Self::NotebooksDir => "NOTEBOOKS_DIR",
        }
    }

    /// Directory name under the project root, for root-relative roles.
    pub fn dir_name(&self) -> Option<&'static str> {
        match self {
            Self::NotebookDir | Self::ProjectRoot => None,
            Self::ConfigDir => Some("config"),
            Self::DataDir => Some("data"),
            Self::ResultsDir => Some("results"),
            Self::FiguresDir => Some("figures"),
            Self::SrcDir => Some("src"),
            Self::RDir => Some("R"),
            Self::NotebooksDir => Some("notebooks"),
        }
    }
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ProjectPaths
// ============================================================================

/// Absolute paths of a project, all derived from one root.
///
/// Built once per invocation and never mutated. The root-relative entries are
/// computed by joining; they may not exist on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPaths {
    /// Directory the lookup started from.
    pub current_dir: PathBuf,
    /// Discovered project root.
    pub project_root: PathBuf,
    /// `<root>/config`.
    pub config_dir: PathBuf,
    /// `<root>/data`.
    pub data_dir: PathBuf,
    /// `<root>/results`.
    pub results_dir: PathBuf,
    /// `<root>/figures`.
    pub figures_dir: PathBuf,
    /// `<root>/src`.
    pub src_dir: PathBuf,
    /// R sources, kept apart from `src_dir`.
    pub r_dir: PathBuf,
    /// `<root>/notebooks`.
    pub notebooks_dir: PathBuf,
}

impl ProjectPaths {
    /// Build the layout for `root`, recording `current_dir` as-is.
    pub fn from_root(current_dir: PathBuf, root: PathBuf) -> Self {
        Self {
            current_dir,
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            results_dir: root.join("results"),
            figures_dir: root.join("figures"),
            src_dir: root.join("src"),
            r_dir: root.join("R"),
            notebooks_dir: root.join("notebooks"),
            project_root: root,
        }
    }

    /// Path for a given role.
    pub fn get(&self, role: PathRole) -> &Path {
        match role {
            PathRole::NotebookDir => &self.current_dir,
            PathRole::ProjectRoot => &self.project_root,
            PathRole::ConfigDir => &self.config_dir,
            PathRole::DataDir => &self.data_dir,
            PathRole::ResultsDir => &self.results_dir,
            PathRole::FiguresDir => &self.figures_dir,
            PathRole::SrcDir => &self.src_dir,
            PathRole::RDir => &self.r_dir,
            PathRole::NotebooksDir => &self.notebooks_dir,
        }
    }

    /// Iterate over `(role, path)` in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (PathRole, &Path)> + '_ {
        PathRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// The layout as a mapping keyed by role name (`DATA_DIR`, ...).
    pub fn to_map(&self) -> BTreeMap<&'static str, PathBuf> {
        self.iter()
            .map(|(role, path)| (role.as_str(), path.to_path_buf()))
            .collect()
    }

    /// Root-relative roles whose directory does not exist yet.
    pub fn missing(&self) -> Vec<PathRole> {
        self.iter()
            .filter(|(role, path)| role.dir_name().is_some() && !path.is_dir())
            .map(|(role, _)| role)
            .collect()
    }

    /// Create every missing root-relative directory.
    ///
    /// Returns the roles that were created.
    pub fn create_missing(&self) -> Result<Vec<PathRole>> {
        let missing = self.missing();
        for role in &missing {
            let path = self.get(*role);
            std::fs::create_dir_all(path).map_err(|e| Error::io_with_path(e, path))?;
            log::info!("created {}", path.display());
        }
        Ok(missing)
    }
}
