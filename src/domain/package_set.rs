//! Set of package names shared between the extractor and the checker

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Separators accepted between names in a delimited package list
static LIST_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,;]+").expect("valid separator pattern"));

/// Unique package names, always iterated in lexical order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageSet {
    names: BTreeSet<String>,
}

impl PackageSet {
    /// Creates an empty package set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a delimited list such as `"a b"`, `"a,b"` or `"a; b"`.
    /// An empty or blank string yields an empty set.
    pub fn parse(list: &str) -> Self {
        LIST_SEPARATOR_RE
            .split(list.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Returns true if the name is present (exact match)
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names in lexical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Joins the names with the given delimiter
    pub fn join(&self, delimiter: &str) -> String {
        self.iter().collect::<Vec<_>>().join(delimiter)
    }
}

impl<S: Into<String>> FromIterator<S> for PackageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for PackageSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_and_sorted() {
        let set: PackageSet = ["zcash_proofs", "orchard", "zcash_proofs"]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["orchard", "zcash_proofs"]);
    }

    #[test]
    fn test_parse_space_delimited() {
        let set = PackageSet::parse("zcash_primitives zcash_proofs");
        assert_eq!(set.join(","), "zcash_primitives,zcash_proofs");
    }

    #[test]
    fn test_parse_mixed_separators() {
        let set = PackageSet::parse(" a,b ;c\n d ");
        assert_eq!(set.join(" "), "a b c d");
    }

    #[test]
    fn test_parse_empty() {
        assert!(PackageSet::parse("").is_empty());
        assert!(PackageSet::parse("  \n ").is_empty());
        assert!(PackageSet::parse(",,").is_empty());
    }

    #[test]
    fn test_contains_is_exact() {
        let set = PackageSet::parse("serde serde");
        assert_eq!(set.len(), 1);
        assert!(set.contains("serde"));
        assert!(!set.contains("Serde"));
    }

    #[test]
    fn test_serialize_as_array() {
        let set = PackageSet::parse("b a");
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
    }
}
