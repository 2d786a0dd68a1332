//! Active filter set and the card match rule.

use std::collections::BTreeMap;

/// Required value per filter dimension.
///
/// Holds at most one value per dimension; sentinel values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilterSet {
    constraints: BTreeMap<String, String>,
}

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a constraint, returning the value it replaced.
    pub fn insert(&mut self, dimension: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.constraints.insert(dimension.into(), value.into())
    }

    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.constraints.get(dimension).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when every constraint is satisfied by the tags `lookup` returns
    /// for its dimension. Vacuously true for an empty set.
    pub fn matches<F>(&self, mut lookup: F) -> bool
    where
        F: FnMut(&str) -> Option<String>,
    {
        self.iter().all(|(dimension, required)| {
            lookup(dimension).is_some_and(|tags| tag_list_contains(&tags, required))
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ActiveFilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ActiveFilterSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Whether a comma-separated tag list contains `required`, ignoring case and
/// surrounding whitespace. An empty list never matches.
pub fn tag_list_contains(tags: &str, required: &str) -> bool {
    if tags.is_empty() {
        return false;
    }
    let required = required.to_lowercase();
    tags.split(',').any(|tag| tag.trim().to_lowercase() == required)
}
