//! Dataset container.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::datapoint::Datapoint;

/// Mapping from compound identifier to [`Datapoint`].
///
/// Backed by a `BTreeMap`, so [`Dataset::iter`] and [`Dataset::ids`] always
/// yield identifiers in ascending lexicographic order. Serializes as a plain
/// JSON object keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    entries: BTreeMap<String, Datapoint>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a datapoint, returning the previous one stored under `id`.
    pub fn insert(&mut self, id: impl Into<String>, datapoint: Datapoint) -> Option<Datapoint> {
        self.entries.insert(id.into(), datapoint)
    }

    /// Number of compounds.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Datapoint> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(identifier, datapoint)` pairs in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Datapoint)> {
        self.entries.iter().map(|(id, dp)| (id.as_str(), dp))
    }

    /// The entry with the smallest identifier.
    pub fn first(&self) -> Option<(&str, &Datapoint)> {
        self.entries.iter().next().map(|(id, dp)| (id.as_str(), dp))
    }

    /// Copy the given identifiers into a new dataset.
    ///
    /// Identifiers that are not present are ignored.
    pub fn subset<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Dataset {
        ids.into_iter()
            .filter_map(|id| self.entries.get_key_value(id))
            .map(|(id, dp)| (id.clone(), dp.clone()))
            .collect()
    }
}

impl FromIterator<(String, Datapoint)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, Datapoint)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Datapoint)> for Dataset {
    fn extend<I: IntoIterator<Item = (String, Datapoint)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Dataset {
    type Item = (String, Datapoint);
    type IntoIter = std::collections::btree_map::IntoIter<String, Datapoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
