//! Path normalization for `#import` targets.

use std::path::{Component, Path, PathBuf};

/// Collapses `.` and `..` components without touching the filesystem.
/// A `..` past the root is silently absorbed rather than treated as an
/// error, matching the reference resolver's behavior for malformed but
/// harmless import paths.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(out.components().next_back(), None | Some(Component::RootDir)) {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Resolves an `#import "..."` target relative to the importing file's
/// parent directory, then normalizes the result.
pub fn resolve_relative(importing_file: &Path, import_target: &str) -> PathBuf {
    let base = importing_file.parent().unwrap_or_else(|| Path::new(""));
    normalize(&base.join(import_target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_current_dir_components() {
        assert_eq!(normalize(Path::new("a/./b")), PathBuf::from("a/b"));
    }

    #[test]
    fn collapses_parent_dir_components() {
        assert_eq!(normalize(Path::new("a/b/../c")), PathBuf::from("a/c"));
    }

    #[test]
    fn absorbs_parent_dir_past_root_silently() {
        assert_eq!(normalize(Path::new("../../a")), PathBuf::from("a"));
    }

    #[test]
    fn resolve_relative_joins_importing_files_directory() {
        let resolved = resolve_relative(Path::new("shaders/main.kiln"), "common/util.kiln");
        assert_eq!(resolved, PathBuf::from("shaders/common/util.kiln"));
    }
}
