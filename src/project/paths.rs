//! Path normalization for consistent registry keys.

use std::path::{Component, Path, PathBuf};

/// Normalize a path for use as a document identity.
///
/// Relative paths are made absolute against the current directory, then `.`
/// and `..` components are folded lexically. The file system is not
/// consulted, so unsaved and in-memory files normalize the same way.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("/"))
            .join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
