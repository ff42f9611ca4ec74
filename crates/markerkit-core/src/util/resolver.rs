//! Project root resolver.
//!
//! `RootResolver` finds the root of an analysis repository by walking up from
//! a starting directory until it meets a directory that directly contains one
//! of its marker entries (by default `.git` or `README.md`). From that root it
//! derives the fixed [`ProjectPaths`] layout.
//!
//! # Example
//!
//! ```no_run
//! use markerkit_core::util::resolver::RootResolver;
//!
//! let resolver = RootResolver::new().with_env_override("MARKERKIT_ROOT");
//! let paths = resolver.derive_paths(".")?;
//! println!("data lives in {}", paths.data_dir.display());
//! # Ok::<(), markerkit_core::Error>(())
//! ```

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::util::layout::ProjectPaths;
use crate::util::paths::{absolutize, expand_tilde, find_dir_with_any_marker};

/// Markers identifying a project root, checked in this order.
pub const DEFAULT_MARKERS: &[&str] = &[".git", "README.md"];

/// Configurable resolver for the project root.
#[derive(Debug, Clone)]
pub struct RootResolver {
    /// Entries whose presence marks a project root (e.g., [".git", "README.md"])
    markers: Vec<String>,
    /// Directory at which the upward walk stops
    ceiling: Option<PathBuf>,
    /// Environment variable consulted by `resolve_root`
    env_override: Option<String>,
}

impl Default for RootResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RootResolver {
    /// Create a resolver with the default markers and no ceiling.
    pub fn new() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|s| (*s).to_string()).collect(),
            ceiling: None,
            env_override: None,
        }
    }

    /// Replace the marker entries that identify the project root.
    pub fn with_markers<S: AsRef<str>>(mut self, markers: &[S]) -> Self {
        self.markers = markers.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Stop the upward walk at `ceiling` (inclusive).
    ///
    /// The ceiling is resolved the same way as start directories. Has no
    /// effect for start directories outside of it.
    pub fn with_ceiling(mut self, ceiling: impl AsRef<Path>) -> Self {
        let ceiling = ceiling.as_ref();
        self.ceiling = Some(absolutize(ceiling).unwrap_or_else(|_| ceiling.to_path_buf()));
        self
    }

    /// Let `resolve_root` honor an environment variable naming the root.
    pub fn with_env_override(mut self, var: &str) -> Self {
        self.env_override = Some(var.to_string());
        self
    }

    /// The marker entries this resolver looks for.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// The configured ceiling, if any.
    pub fn ceiling(&self) -> Option<&Path> {
        self.ceiling.as_deref()
    }

    /// Find the nearest directory at or above `start` that contains a marker.
    ///
    /// Ancestors are examined child before parent. Only existence checks are
    /// performed.
    ///
    /// # Errors
    ///
    /// [`Error::ProjectRootNotFound`] if no ancestor up to the filesystem
    /// root (or ceiling) qualifies, [`Error::Io`] if a relative `start` cannot
    /// be resolved.
    pub fn locate_root(&self, start: impl AsRef<Path>) -> Result<PathBuf> {
        let start = absolutize(start.as_ref())?;

        match find_dir_with_any_marker(&start, &self.markers, self.ceiling.as_deref()) {
            Some(root) => {
                log::debug!("project root: {}", root.display());
                Ok(root)
            }
            None => Err(Error::ProjectRootNotFound {
                start,
                markers: self.markers.clone(),
            }),
        }
    }

    /// Like [`locate_root`](Self::locate_root), but an existing directory
    /// named by the override environment variable takes precedence.
    pub fn resolve_root(&self, start: impl AsRef<Path>) -> Result<PathBuf> {
        if let Some(var) = &self.env_override {
            if let Ok(value) = env::var(var) {
                let path = expand_tilde(&value);
                if path.is_dir() {
                    log::debug!("project root from {var}: {}", path.display());
                    return Ok(absolutize(&path)?);
                }
                log::warn!("{var}={value} is not a directory; searching for markers instead");
            }
        }
        self.locate_root(start)
    }

    /// Locate the root from `working_dir` and derive the project layout.
    ///
    /// Child directories are joined, not checked.
    pub fn derive_paths(&self, working_dir: impl AsRef<Path>) -> Result<ProjectPaths> {
        let current_dir = absolutize(working_dir.as_ref())?;
        let root = self.locate_root(&current_dir)?;
        Ok(ProjectPaths::from_root(current_dir, root))
    }

    /// [`derive_paths`](Self::derive_paths) using [`resolve_root`](Self::resolve_root).
    pub fn resolve_paths(&self, working_dir: impl AsRef<Path>) -> Result<ProjectPaths> {
        let current_dir = absolutize(working_dir.as_ref())?;
        let root = self.resolve_root(&current_dir)?;
        Ok(ProjectPaths::from_root(current_dir, root))
    }
}

/// Locate the project root from `start` with the default markers.
pub fn find_project_root(start: impl AsRef<Path>) -> Result<PathBuf> {
    RootResolver::default().locate_root(start)
}

/// Derive the project layout from `cwd` with the default markers.
pub fn project_paths(cwd: impl AsRef<Path>) -> Result<ProjectPaths> {
    RootResolver::default().derive_paths(cwd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sandbox() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        (temp, base)
    }

    #[test]
    fn test_new_default_markers() {
        let resolver = RootResolver::new();
        assert_eq!(resolver.markers(), &[".git", "README.md"]);
        assert!(resolver.ceiling().is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let resolver = RootResolver::new()
            .with_markers(&["Cargo.toml"])
            .with_ceiling("/")
            .with_env_override("SOME_ROOT");
        assert_eq!(resolver.markers(), &["Cargo.toml"]);
        assert_eq!(resolver.ceiling(), Some(Path::new("/")));
    }

    #[test]
    fn test_locate_root_from_root_itself() {
        let (_temp, base) = sandbox();
        fs::write(base.join("README.md"), "# project").unwrap();

        let resolver = RootResolver::new().with_ceiling(&base);
        assert_eq!(resolver.locate_root(&base).unwrap(), base);
    }

    #[test]
    fn test_locate_root_git_dir() {
        let (_temp, base) = sandbox();
        fs::create_dir(base.join(".git")).unwrap();
        let nb = base.join("notebooks").join("qc");
        fs::create_dir_all(&nb).unwrap();

        let resolver = RootResolver::new().with_ceiling(&base);
        assert_eq!(resolver.locate_root(&nb).unwrap(), base);
    }

    #[test]
    fn test_locate_root_git_file_counts() {
        // Worktrees and submodules have a `.git` file instead of a directory.
        let (_temp, base) = sandbox();
        fs::write(base.join(".git"), "gitdir: ../.git/worktrees/x").unwrap();

        let resolver = RootResolver::new().with_ceiling(&base);
        assert_eq!(resolver.locate_root(&base).unwrap(), base);
    }

    #[test]
    fn test_locate_root_nearest_wins() {
        let (_temp, base) = sandbox();
        let sub = base.join("sub");
        let deep = sub.join("a").join("b");
        fs::create_dir_all(&deep).unwrap();
        fs::create_dir(base.join(".git")).unwrap();
        fs::write(sub.join("README.md"), "").unwrap();

        let resolver = RootResolver::new().with_ceiling(&base);
        assert_eq!(resolver.locate_root(&deep).unwrap(), sub);
    }

    #[test]
    fn test_locate_root_not_found() {
        let (_temp, base) = sandbox();
        let deep = base.join("x").join("y");
        fs::create_dir_all(&deep).unwrap();

        let resolver = RootResolver::new().with_ceiling(&base);
        let err = resolver.locate_root(&deep).unwrap_err();
        match err {
            Error::ProjectRootNotFound { start, markers } => {
                assert_eq!(start, deep);
                assert_eq!(markers, vec![".git", "README.md"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_locate_root_custom_marker() {
        let (_temp, base) = sandbox();
        fs::write(base.join("README.md"), "").unwrap();
        let sub = base.join("pkg");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("DESCRIPTION"), "").unwrap();

        let resolver = RootResolver::new()
            .with_markers(&["DESCRIPTION"])
            .with_ceiling(&base);
        assert_eq!(resolver.locate_root(&sub).unwrap(), sub);
    }

    #[test]
    fn test_locate_root_missing_start_dir() {
        let (_temp, base) = sandbox();
        fs::write(base.join("README.md"), "").unwrap();

        let resolver = RootResolver::new().with_ceiling(&base);
        let root = resolver.locate_root(base.join("not-created-yet")).unwrap();
        assert_eq!(root, base);
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_root_missing_start_dir_under_symlink() {
        let (_temp, base) = sandbox();
        let project = base.join("target");
        fs::create_dir_all(project.join("inner")).unwrap();
        fs::write(project.join("README.md"), "").unwrap();
        fs::create_dir(base.join("proj")).unwrap();
        let link = base.join("proj").join("link");
        std::os::unix::fs::symlink(project.join("inner"), &link).unwrap();

        let resolver = RootResolver::new().with_ceiling(&base);
        let root = resolver.locate_root(link.join("missing")).unwrap();
        assert_eq!(root, project);

        let paths = resolver.derive_paths(link.join("missing")).unwrap();
        assert_eq!(paths.current_dir, project.join("inner").join("missing"));
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_resolve_root_env_override() {
        let (_temp, base) = sandbox();
        let elsewhere = base.join("elsewhere");
        fs::create_dir(&elsewhere).unwrap();
        fs::write(base.join("README.md"), "").unwrap();

        let var = "MARKERKIT_TEST_RESOLVER_OVERRIDE_ROOT";
        // SAFETY: the variable name is unique to this test.
        unsafe { env::set_var(var, &elsewhere) };

        let resolver = RootResolver::new()
            .with_ceiling(&base)
            .with_env_override(var);
        assert_eq!(resolver.resolve_root(&base).unwrap(), elsewhere);
        // locate_root never looks at the environment
        assert_eq!(resolver.locate_root(&base).unwrap(), base);

        unsafe { env::remove_var(var) };
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_resolve_root_ignores_missing_override() {
        let (_temp, base) = sandbox();
        fs::write(base.join("README.md"), "").unwrap();

        let var = "MARKERKIT_TEST_RESOLVER_MISSING_ROOT";
        // SAFETY: the variable name is unique to this test.
        unsafe { env::set_var(var, base.join("does-not-exist")) };

        let resolver = RootResolver::new()
            .with_ceiling(&base)
            .with_env_override(var);
        assert_eq!(resolver.resolve_root(&base).unwrap(), base);

        unsafe { env::remove_var(var) };
    }

    #[test]
    fn test_derive_paths_layout() {
        let (_temp, base) = sandbox();
        fs::create_dir(base.join(".git")).unwrap();
        let wd = base.join("notebooks");
        fs::create_dir(&wd).unwrap();

        let paths = RootResolver::new()
            .with_ceiling(&base)
            .derive_paths(&wd)
            .unwrap();
        assert_eq!(paths.current_dir, wd);
        assert_eq!(paths.project_root, base);
        assert_eq!(paths.config_dir, base.join("config"));
        assert_eq!(paths.r_dir, base.join("R"));
    }

    #[test]
    fn test_derive_paths_propagates_not_found() {
        let (_temp, base) = sandbox();
        let err = RootResolver::new()
            .with_ceiling(&base)
            .derive_paths(&base)
            .unwrap_err();
        assert!(err.is_root_not_found());
    }
}
