//! Manifest introspection
//!
//! This module provides functionality to:
//! - List the packages a Cargo project produces (its own package and workspace members)
//! - List the direct dependency edges a Cargo project declares
//! - Look up the version a project resolves for one of its dependencies (Cargo.lock)
//!
//! All queries are shallow and read-only: dependency graphs are never resolved
//! and no manifest is modified.

mod cargo_lock;
mod cargo_toml;
mod workspace;

pub use cargo_lock::{Lockfile, LOCKFILE_FILENAME};
pub use cargo_toml::{CargoManifest, DeclaredDependency};
pub use workspace::{member_dirs, workspace_root};

use crate::domain::{ManifestRef, ManifestRole, MANIFEST_FILENAME};
use crate::error::{InvalidInputError, ManifestError};
use std::path::PathBuf;
use tracing::debug;

/// Read-only query surface over a project manifest
pub trait ManifestIntrospector: Send + Sync {
    /// Returns true if the reference designates a readable manifest
    fn is_resolvable(&self, manifest: &ManifestRef) -> bool {
        manifest.manifest_path().is_file()
    }

    /// Names of the packages the project produces
    fn produced_packages(&self, manifest: &ManifestRef) -> Result<Vec<String>, ManifestError>;

    /// Names of the project's direct dependencies
    fn direct_dependencies(&self, manifest: &ManifestRef) -> Result<Vec<String>, ManifestError>;

    /// Version the project currently uses for `package`, if known
    fn resolved_version(
        &self,
        manifest: &ManifestRef,
        package: &str,
    ) -> Result<Option<String>, ManifestError>;
}

/// Rejects empty or unresolvable manifest references
pub fn validate(
    introspector: &dyn ManifestIntrospector,
    manifest: &ManifestRef,
    role: ManifestRole,
) -> Result<(), InvalidInputError> {
    manifest.ensure_not_empty(role)?;
    if !introspector.is_resolvable(manifest) {
        return Err(InvalidInputError::unresolvable(
            role.to_string(),
            manifest.manifest_path(),
        ));
    }
    Ok(())
}

/// Introspector reading Cargo.toml / Cargo.lock files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoIntrospector;

impl CargoIntrospector {
    pub fn new() -> Self {
        Self
    }

    /// Load the manifest and, when it is a workspace root, every member manifest
    fn load_project(
        &self,
        manifest: &ManifestRef,
    ) -> Result<Vec<(PathBuf, CargoManifest)>, ManifestError> {
        let root_path = manifest.manifest_path();
        let root = CargoManifest::load(&root_path)?;

        let members = match &root.workspace {
            Some(ws) => member_dirs(&manifest.manifest_dir(), ws),
            None => Vec::new(),
        };

        let mut project = vec![(root_path.clone(), root)];
        for dir in members {
            let member_path = dir.join(MANIFEST_FILENAME);
            if !member_path.is_file() {
                return Err(ManifestError::missing_member(
                    &root_path,
                    dir.display().to_string(),
                ));
            }
            let member = CargoManifest::load(&member_path)?;
            project.push((member_path, member));
        }

        debug!(
            manifest = %root_path.display(),
            manifests = project.len(),
            "Loaded project manifests"
        );
        Ok(project)
    }

    fn declared(&self, manifest: &ManifestRef) -> Result<Vec<DeclaredDependency>, ManifestError> {
        Ok(self
            .load_project(manifest)?
            .iter()
            .flat_map(|(_, m)| m.declared_dependencies())
            .collect())
    }
}

impl ManifestIntrospector for CargoIntrospector {
    fn produced_packages(&self, manifest: &ManifestRef) -> Result<Vec<String>, ManifestError> {
        let mut names: Vec<String> = self
            .load_project(manifest)?
            .iter()
            .filter_map(|(_, m)| m.package_name().map(String::from))
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn direct_dependencies(&self, manifest: &ManifestRef) -> Result<Vec<String>, ManifestError> {
        let mut names: Vec<String> = self
            .declared(manifest)?
            .into_iter()
            .map(|d| d.name)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn resolved_version(
        &self,
        manifest: &ManifestRef,
        package: &str,
    ) -> Result<Option<String>, ManifestError> {
        let declared: Vec<DeclaredDependency> = self
            .declared(manifest)?
            .into_iter()
            .filter(|d| d.name == package)
            .collect();
        let requirements: Vec<String> = declared
            .iter()
            .filter_map(|d| d.requirement.clone())
            .collect();

        let root = workspace_root(&manifest.manifest_dir());
        if let Some(lock_path) = Lockfile::find(&root) {
            let lockfile = Lockfile::load(&lock_path)?;
            if let Some(version) = lockfile.resolve(package, &requirements) {
                debug!(package, version = %version, lockfile = %lock_path.display(), "Resolved from lockfile");
                return Ok(Some(version));
            }
        }

        // No lockfile entry: fall back to a requirement naming a single version
        let pinned = declared.iter().find_map(DeclaredDependency::pinned_version);
        debug!(package, version = ?pinned, "Resolved from declared requirement");
        Ok(pinned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn upstream_workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "Cargo.toml",
            "[workspace]\nmembers = [\"components/*\", \"zcash_primitives\"]\n",
        );
        write(
            dir.path(),
            "zcash_primitives/Cargo.toml",
            "[package]\nname = \"zcash_primitives\"\nversion = \"0.2.0\"\n",
        );
        write(
            dir.path(),
            "components/zcash_note_encryption/Cargo.toml",
            "[package]\nname = \"zcash_note_encryption\"\nversion = \"0.4.0\"\n",
        );
        dir
    }

    #[test]
    fn test_validate_empty() {
        let err = validate(&CargoIntrospector, &ManifestRef::new(""), ManifestRole::Upstream)
            .unwrap_err();
        assert!(matches!(err, InvalidInputError::EmptyLocator { .. }));
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = TempDir::new().unwrap();
        let manifest = ManifestRef::new(dir.path().join("nope").join("Cargo.toml"));
        let err = validate(&CargoIntrospector, &manifest, ManifestRole::Downstream).unwrap_err();
        assert!(matches!(err, InvalidInputError::Unresolvable { .. }));
    }

    #[test]
    fn test_validate_directory_locator() {
        let dir = upstream_workspace();
        let manifest = ManifestRef::new(dir.path());
        assert!(validate(&CargoIntrospector, &manifest, ManifestRole::Upstream).is_ok());
    }

    #[test]
    fn test_produced_packages_workspace() {
        let dir = upstream_workspace();
        let names = CargoIntrospector
            .produced_packages(&ManifestRef::new(dir.path()))
            .unwrap();
        assert_eq!(names, vec!["zcash_note_encryption", "zcash_primitives"]);
    }

    #[test]
    fn test_produced_packages_single_package() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Cargo.toml", "[package]\nname = \"solo\"\n");
        let names = CargoIntrospector
            .produced_packages(&ManifestRef::new(dir.path().join("Cargo.toml")))
            .unwrap();
        assert_eq!(names, vec!["solo"]);
    }

    #[test]
    fn test_missing_member_is_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Cargo.toml", "[workspace]\nmembers = [\"gone\"]\n");
        let result = CargoIntrospector.produced_packages(&ManifestRef::new(dir.path()));
        assert!(matches!(result, Err(ManifestError::MissingMember { .. })));
    }

    #[test]
    fn test_direct_dependencies_include_members() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "Cargo.toml",
            r#"
[package]
name = "bindings"

[workspace]
members = ["cli"]

[dependencies]
zcash_primitives = "0.1.0"
serde = "1.0.0"
"#,
        );
        write(
            dir.path(),
            "cli/Cargo.toml",
            "[package]\nname = \"cli\"\n\n[dependencies]\nzcash_proofs = \"0.1.0\"\nserde = \"1\"\n",
        );

        let deps = CargoIntrospector
            .direct_dependencies(&ManifestRef::new(dir.path()))
            .unwrap();
        assert_eq!(deps, vec!["serde", "zcash_primitives", "zcash_proofs"]);
    }

    #[test]
    fn test_resolved_version_prefers_lockfile() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "Cargo.toml",
            "[package]\nname = \"d\"\n\n[dependencies]\nzcash_primitives = \"0.1\"\n",
        );
        write(
            dir.path(),
            "Cargo.lock",
            "version = 3\n\n[[package]]\nname = \"zcash_primitives\"\nversion = \"0.1.4\"\n",
        );

        let version = CargoIntrospector
            .resolved_version(&ManifestRef::new(dir.path()), "zcash_primitives")
            .unwrap();
        assert_eq!(version.as_deref(), Some("0.1.4"));
    }

    #[test]
    fn test_resolved_version_falls_back_to_requirement() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "Cargo.toml",
            "[package]\nname = \"d\"\n\n[dependencies]\nzcash_primitives = \"=0.1.0\"\norchard = \"0.6\"\n",
        );
        let manifest = ManifestRef::new(dir.path());

        let pinned = CargoIntrospector
            .resolved_version(&manifest, "zcash_primitives")
            .unwrap();
        assert_eq!(pinned.as_deref(), Some("0.1.0"));

        let partial = CargoIntrospector.resolved_version(&manifest, "orchard").unwrap();
        assert!(partial.is_none());

        let unknown = CargoIntrospector.resolved_version(&manifest, "serde").unwrap();
        assert!(unknown.is_none());
    }

    #[test]
    fn test_resolved_version_ignores_lockfile_of_enclosing_project() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Cargo.toml", "[package]\nname = \"unrelated\"\n");
        write(
            dir.path(),
            "Cargo.lock",
            "version = 3\n\n[[package]]\nname = \"zcash_primitives\"\nversion = \"0.0.9\"\n",
        );
        write(
            dir.path(),
            "app/Cargo.toml",
            "[package]\nname = \"app\"\n\n[dependencies]\nzcash_primitives = \"=0.2.0\"\n",
        );

        let version = CargoIntrospector
            .resolved_version(&ManifestRef::new(dir.path().join("app")), "zcash_primitives")
            .unwrap();
        assert_eq!(version.as_deref(), Some("0.2.0"));
    }

    #[test]
    fn test_resolved_version_member_uses_workspace_lockfile() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Cargo.toml", "[workspace]\nmembers = [\"app\"]\n");
        write(
            dir.path(),
            "Cargo.lock",
            "version = 3\n\n[[package]]\nname = \"zcash_primitives\"\nversion = \"0.2.3\"\n",
        );
        write(
            dir.path(),
            "app/Cargo.toml",
            "[package]\nname = \"app\"\n\n[dependencies]\nzcash_primitives = \"0.2\"\n",
        );

        let version = CargoIntrospector
            .resolved_version(&ManifestRef::new(dir.path().join("app")), "zcash_primitives")
            .unwrap();
        assert_eq!(version.as_deref(), Some("0.2.3"));
    }
}
