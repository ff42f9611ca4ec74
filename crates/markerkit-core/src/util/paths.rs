//! Generic path utilities.
//!
//! Absolute path resolution, tilde expansion and upward marker search. These
//! helpers only check for existence; they never read file contents.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
///
/// # Example
///
/// ```
/// use markerkit_core::util::paths::expand_tilde;
///
/// assert_eq!(expand_tilde("/abs/path"), std::path::PathBuf::from("/abs/path"));
/// ```
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Resolve `path` to an absolute path.
///
/// Relative paths are joined to the process working directory. Existing paths
/// are canonicalized. For a path that does not exist, the longest existing
/// prefix is canonicalized (symlinks followed) and the remaining components
/// are appended, so a missing directory is not an error.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    match absolute.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(_) => Ok(resolve_partially(&absolute)),
    }
}

/// Walk the components of an absolute `path`, canonicalizing after each
/// step while the prefix exists.
///
/// `..` pops the already resolved prefix, so it follows the physical parent
/// of a symlink target rather than the link's lexical parent.
fn resolve_partially(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` on a bare root is a no-op, matching `/..` == `/`
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if let Ok(canonical) = resolved.canonicalize() {
                    resolved = canonical;
                }
            }
        }
    }
    resolved
}

/// Returns `true` if any of `markers` exists directly inside `dir`.
pub fn has_any_marker<S: AsRef<str>>(dir: &Path, markers: &[S]) -> bool {
    markers.iter().any(|m| dir.join(m.as_ref()).exists())
}

/// Walk up from `start` (inclusive) looking for a directory containing
/// `marker`.
///
/// Returns the nearest such directory.
pub fn find_dir_with_marker(start: &Path, marker: &str) -> Option<PathBuf> {
    find_dir_with_any_marker(start, &[marker], None)
}

/// Walk up from `start` (inclusive) looking for a directory containing any of
/// `markers`, nearest first.
///
/// When `ceiling` is given and is an ancestor of `start`, the walk examines
/// the ceiling and then stops.
pub fn find_dir_with_any_marker<S: AsRef<str>>(
    start: &Path,
    markers: &[S],
    ceiling: Option<&Path>,
) -> Option<PathBuf> {
    for candidate in start.ancestors() {
        log::debug!("checking {} for project markers", candidate.display());
        if has_any_marker(candidate, markers) {
            return Some(candidate.to_path_buf());
        }
        if ceiling.is_some_and(|c| c == candidate) {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // -------------------------------------------------------------------------
    // absolutize tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_absolutize_existing_dir_is_canonical() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a");
        fs::create_dir(&nested).unwrap();

        let resolved = absolutize(&nested.join("..").join("a")).unwrap();
        assert_eq!(resolved, nested.canonicalize().unwrap());
    }

    #[test]
    fn test_absolutize_missing_dir() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        let missing = base.join("not").join("..").join("there");

        assert_eq!(absolutize(&missing).unwrap(), base.join("there"));
    }

    #[test]
    fn test_absolutize_parent_of_root() {
        assert_eq!(
            absolutize(Path::new("/../x")).unwrap(),
            absolutize(Path::new("/x")).unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_absolutize_missing_dir_under_symlink() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        let target = base.join("target").join("inner");
        fs::create_dir_all(&target).unwrap();
        fs::create_dir(base.join("proj")).unwrap();
        let link = base.join("proj").join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(absolutize(&link.join("missing")).unwrap(), target.join("missing"));
        // `..` after the link climbs from the target, not from `proj`
        assert_eq!(
            absolutize(&link.join("missing").join("..").join("..").join("other")).unwrap(),
            base.join("target").join("other")
        );
    }

    #[test]
    fn test_absolutize_relative() {
        let resolved = absolutize(Path::new(".")).unwrap();
        assert!(resolved.is_absolute());
    }

    // -------------------------------------------------------------------------
    // marker search tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_find_dir_with_marker_nearest() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let deep = root.join("x").join("y");
        fs::create_dir_all(&deep).unwrap();
        fs::write(root.join("MARK"), "").unwrap();
        fs::write(root.join("x").join("MARK"), "").unwrap();

        assert_eq!(find_dir_with_marker(&deep, "MARK"), Some(root.join("x")));
    }

    #[test]
    fn test_find_dir_with_any_marker_stops_at_ceiling() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let ceiling = root.join("inner");
        let deep = ceiling.join("deep");
        fs::create_dir_all(&deep).unwrap();
        // Marker above the ceiling is invisible.
        fs::write(root.join("MARK"), "").unwrap();

        assert_eq!(
            find_dir_with_any_marker(&deep, &["MARK"], Some(&ceiling)),
            None
        );
        assert_eq!(
            find_dir_with_any_marker(&deep, &["MARK"], None),
            Some(root.clone())
        );
    }

    #[test]
    fn test_has_any_marker_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        assert!(has_any_marker(temp.path(), &[".git", "README.md"]));
        assert!(!has_any_marker(temp.path(), &["README.md"]));
    }

    #[test]
    fn test_expand_tilde_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x"), home.join("x"));
        }
    }
}
