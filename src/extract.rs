//! Dependency extraction
//!
//! Computes which packages produced by an upstream project are direct
//! dependencies of a downstream project.

use crate::domain::{ManifestRef, ManifestRole, PackageSet};
use crate::error::AppError;
use crate::manifest::{self, ManifestIntrospector};
use std::collections::HashMap;
use tracing::{debug, info};

/// Upstream packages the downstream project depends on directly.
///
/// Fails with `InvalidInput` if either manifest reference is empty or does
/// not resolve to a manifest.
pub fn extract_dependencies(
    introspector: &dyn ManifestIntrospector,
    upstream: &ManifestRef,
    downstream: &ManifestRef,
) -> Result<PackageSet, AppError> {
    manifest::validate(introspector, upstream, ManifestRole::Upstream)?;
    manifest::validate(introspector, downstream, ManifestRole::Downstream)?;

    let produced = introspector.produced_packages(upstream)?;
    debug!(count = produced.len(), manifest = %upstream, "Upstream packages");

    let dependencies = introspector.direct_dependencies(downstream)?;
    debug!(count = dependencies.len(), manifest = %downstream, "Downstream dependencies");

    let matched = match_packages(&produced, &dependencies);
    info!(matched = matched.len(), "Extracted upstream dependencies");
    Ok(matched)
}

/// Downstream names that match an upstream name, ignoring case.
///
/// Matching is a membership test on lower-cased names, never a substring
/// or pattern match. The downstream spelling is kept.
pub fn match_packages(upstream: &[String], downstream: &[String]) -> PackageSet {
    let index: HashMap<String, &str> = upstream
        .iter()
        .map(|name| (name.to_lowercase(), name.as_str()))
        .collect();

    downstream
        .iter()
        .filter(|dep| match index.get(&dep.to_lowercase()) {
            Some(canonical) => {
                if *canonical != dep.as_str() {
                    debug!(dependency = %dep, upstream = %canonical, "Matched case variant");
                }
                true
            }
            None => false,
        })
        .cloned()
        .collect()
}
