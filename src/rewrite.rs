//! Rewriting of `SF` paths so that reports produced in different build roots
//! all point at sources relative to the directory the merge runs in.
//!
//! All path handling is lexical: nothing here touches the filesystem, so
//! the referenced sources do not need to exist.

use std::path::{Component, Path, PathBuf};

/// Rewrite `source_file` (the raw `SF` value from an LCOV file located in
/// `source_dir`) into a `./`-prefixed path relative to `cwd`.
///
/// `path_fix` is the relative path from `source_dir` to the directory the
/// `SF` paths were recorded against. The three parts are joined segment by
/// segment, so a leading `/` on `path_fix` or `source_file` does not reset
/// the path.
pub fn rewrite_source_path(
    source_dir: &Path,
    path_fix: &str,
    source_file: &str,
    cwd: &Path,
) -> String {
    let mut joined = cwd.join(source_dir);
    for segment in [path_fix, source_file] {
        for component in Path::new(segment).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {}
                other => joined.push(other.as_os_str()),
            }
        }
    }

    let full_path = normalize(&joined);
    let root_rel_path = relative_path(&normalize(cwd), &full_path);
    format!("./{}", root_rel_path.to_string_lossy())
}

/// Resolve `.` and `..` components lexically. `..` at the root stays at the
/// root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path from `base` to `target`, both already normalized.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();
    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component.as_os_str());
    }
    rel
}
