//! The set of country names a user has visited.

use std::collections::BTreeSet;

/// Country names to highlight.
///
/// Matching is exact and case-sensitive against the dataset's `name`
/// property. No normalization: "Côte d'Ivoire" and "Cote d'Ivoire" are
/// different countries as far as this set is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    names: BTreeSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_case_sensitive_match() {
        let visited: VisitedSet = ["France", "Côte d'Ivoire"].into_iter().collect();
        assert!(visited.contains("France"));
        assert!(!visited.contains("france"));
        assert!(!visited.contains("Cote d'Ivoire"));
    }

    #[test]
    fn duplicates_collapse() {
        let visited: VisitedSet = vec!["Peru".to_string(), "Peru".to_string()].into_iter().collect();
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn iterates_in_sorted_order() {
        let mut visited = VisitedSet::new();
        assert!(visited.insert("Peru"));
        assert!(visited.insert("Chile"));
        assert!(!visited.insert("Peru"));
        assert_eq!(visited.iter().collect::<Vec<_>>(), vec!["Chile", "Peru"]);
    }
}
