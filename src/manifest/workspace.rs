//! Workspace member discovery
//!
//! Expands `[workspace].members` entries relative to the workspace root.
//! Plain paths are taken as-is; a `*` in the last path segment matches
//! sibling directories (`crates/*`, `crates/zcash_*`). `exclude` entries
//! are removed after expansion.
//!
//! Also locates the workspace root owning a package, which is where Cargo
//! keeps the lockfile.

use super::cargo_toml::{CargoManifest, WorkspaceSection};
use crate::domain::MANIFEST_FILENAME;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Root of the workspace that owns the package in `dir`.
///
/// This is the nearest directory (starting at `dir`) whose `Cargo.toml` has a
/// `[workspace]` table, or `dir` itself for a standalone package. Manifests
/// outside that root are never consulted.
pub fn workspace_root(dir: &Path) -> PathBuf {
    let dir = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    for candidate in dir.ancestors() {
        let manifest_path = candidate.join(MANIFEST_FILENAME);
        if !manifest_path.is_file() {
            continue;
        }
        match CargoManifest::load(&manifest_path) {
            Ok(manifest) if manifest.workspace.is_some() => {
                debug!(root = %candidate.display(), "Found workspace root");
                return candidate.to_path_buf();
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "Ignoring unreadable ancestor manifest"),
        }
    }
    dir
}

/// Directories of all workspace members, sorted and deduplicated
pub fn member_dirs(root: &Path, workspace: &WorkspaceSection) -> Vec<PathBuf> {
    let excluded: Vec<PathBuf> = workspace
        .exclude
        .iter()
        .map(|e| normalize(&root.join(e)))
        .collect();

    let mut dirs: Vec<PathBuf> = workspace
        .members
        .iter()
        .flat_map(|entry| expand(root, entry))
        .map(|d| normalize(&d))
        .filter(|d| !excluded.contains(d))
        .filter(|d| d != &normalize(root))
        .collect();

    dirs.sort();
    dirs.dedup();
    dirs
}

fn expand(root: &Path, entry: &str) -> Vec<PathBuf> {
    let entry = entry.trim_end_matches('/');
    let (parent, pattern) = match entry.rsplit_once('/') {
        Some((parent, last)) => (root.join(parent), last),
        None => (root.to_path_buf(), entry),
    };

    if parent.to_string_lossy().contains('*') {
        warn!(member = entry, "Skipping workspace member with a wildcard before the last segment");
        return Vec::new();
    }

    if !pattern.contains('*') {
        return vec![root.join(entry)];
    }

    let Ok(read_dir) = std::fs::read_dir(&parent) else {
        return Vec::new();
    };

    read_dir
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.join(MANIFEST_FILENAME).is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| wildcard_match(pattern, n))
        })
        .collect()
}

/// Matches `name` against a pattern where `*` stands for any run of characters
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    let (first, last) = (parts[0], parts[parts.len() - 1]);

    if !name.starts_with(first) || name.len() < first.len() + last.len() {
        return false;
    }
    if !name[first.len()..].ends_with(last) {
        return false;
    }

    let mut rest = &name[first.len()..name.len() - last.len()];
    for middle in &parts[1..parts.len() - 1] {
        match rest.find(middle) {
            Some(idx) => rest = &rest[idx + middle.len()..],
            None => return false,
        }
    }
    true
}

/// Lexically removes `.` components so excluded paths compare equal
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
