use std::path::{self, Component, Path, PathBuf};

use crate::ConfigError;

/// Lexically normalises `path`: removes `.` components and resolves `..`
/// against the preceding component. Symbolic links are not consulted.
///
/// ```
/// use settings::normalize;
/// use std::path::Path;
///
/// assert_eq!(normalize(Path::new("/a/./b/../c/")), Path::new("/a/c"));
/// assert_eq!(normalize(Path::new("/../a")), Path::new("/a"));
/// ```
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                );
                if !at_root {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Returns `true` when `a` and `b` are the same path or one lies inside the
/// other. Both paths are expected to be absolute and normalised.
///
/// ```
/// use settings::is_nested;
/// use std::path::Path;
///
/// assert!(is_nested(Path::new("/data"), Path::new("/data/backup")));
/// assert!(is_nested(Path::new("/data/src"), Path::new("/data")));
/// assert!(!is_nested(Path::new("/data/src"), Path::new("/data/src-backup")));
/// ```
#[must_use]
pub fn is_nested(a: &Path, b: &Path) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

/// Makes `path` absolute against the current directory and normalises it.
pub(crate) fn absolutize(path: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = path::absolute(path).map_err(|source| ConfigError::Absolutize {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize(&absolute))
}
