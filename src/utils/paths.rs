//! Path helpers
//!
//! Rules and diagnostics are matched by absolute path string, so every path
//! entering the sieve goes through [`resolve`].

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` and normalize it lexically.
///
/// `.` and `..` components are folded without touching the filesystem, so
/// files that no longer exist still resolve.
pub fn resolve(base: &Path, path: &str) -> String {
    let joined = base.join(path);
    normalize(&joined).to_string_lossy().into_owned()
}

/// Fold `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Display `path` relative to `base`, walking up with `..` when needed.
///
/// Relative inputs are returned as given.
pub fn display_relative(path: &str, base: &Path) -> String {
    let target = normalize(Path::new(path));
    let base = normalize(base);
    if !target.is_absolute() || !base.is_absolute() {
        return path.to_string();
    }

    let common = target
        .components()
        .zip(base.components())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in base.components().skip(common) {
        relative.push("..");
    }
    for component in target.components().skip(common) {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        ".".to_string()
    } else {
        relative.to_string_lossy().into_owned()
    }
}

/// Whether `path` is inside `root` (lexically).
pub fn is_within(path: &str, root: &Path) -> bool {
    normalize(Path::new(path)).starts_with(normalize(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve(Path::new("/repo"), "src/a.ts"), "/repo/src/a.ts");
        assert_eq!(resolve(Path::new("/repo"), "./src/../lib/b.ts"), "/repo/lib/b.ts");
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(resolve(Path::new("/repo"), "/abs/c.ts"), "/abs/c.ts");
    }

    #[test]
    fn test_display_relative() {
        assert_eq!(display_relative("/repo/src/a.ts", Path::new("/repo")), "src/a.ts");
        assert_eq!(display_relative("/repo", Path::new("/repo")), ".");
        assert_eq!(display_relative("relative/a.ts", Path::new("/repo")), "relative/a.ts");
    }

    #[test]
    fn test_display_relative_above_base() {
        assert_eq!(display_relative("/repo/a.ts", Path::new("/repo/sub")), "../a.ts");
        assert_eq!(
            display_relative("/elsewhere/a.ts", Path::new("/repo/sub")),
            "../../elsewhere/a.ts"
        );
        assert_eq!(
            display_relative("/repo/other/b.ts", Path::new("/repo/sub/dir")),
            "../../other/b.ts"
        );
    }

    #[test]
    fn test_is_within() {
        assert!(is_within("/repo/src/a.ts", Path::new("/repo")));
        assert!(!is_within("/repository/a.ts", Path::new("/repo")));
        assert!(!is_within("/repo/../other/a.ts", Path::new("/repo")));
    }
}
