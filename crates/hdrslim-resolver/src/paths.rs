//! Lexical path helpers

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without touching the filesystem
///
/// A `..` pops the preceding normal component. Leading `..` components of a
/// relative path are kept, and `..` directly under the root is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut ret = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match ret.components().next_back() {
                Some(Component::Normal(_)) => {
                    ret.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => ret.push(".."),
            },
            other => ret.push(other.as_os_str()),
        }
    }
    ret
}
