//! Column layout shared between the matrix builder and the transform pipeline.

use std::fmt;

/// Identifies one column of the label matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    /// A prediction target, by name.
    Target(String),
    /// A descriptor trained as an extra task, by descriptor index.
    Descriptor(usize),
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Target(name) => write!(f, "`{name}`"),
            ColumnKey::Descriptor(idx) => write!(f, "descriptor {idx}"),
        }
    }
}

/// Column order of `y` and `W`.
///
/// Target columns come first, sorted by name; descriptor columns follow in
/// ascending index order. The builder produces exactly one layout per build
/// and the pipeline reads column positions from it, so both always agree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnLayout {
    targets: Vec<String>,
    n_descriptors: usize,
}

impl ColumnLayout {
    /// Build a layout from target names (sorted and deduplicated here) and a
    /// descriptor count.
    pub fn new<S: Into<String>>(targets: impl IntoIterator<Item = S>, n_descriptors: usize) -> Self {
        let mut targets: Vec<String> = targets.into_iter().map(Into::into).collect();
        targets.sort();
        targets.dedup();
        Self {
            targets,
            n_descriptors,
        }
    }

    #[inline]
    pub fn n_targets(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    pub fn n_descriptors(&self) -> usize {
        self.n_descriptors
    }

    /// Total number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len() + self.n_descriptors
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted target names.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Column index of a target.
    pub fn target_column(&self, name: &str) -> Option<usize> {
        self.targets.binary_search_by(|t| t.as_str().cmp(name)).ok()
    }

    /// Column index of a descriptor.
    pub fn descriptor_column(&self, descriptor: usize) -> Option<usize> {
        (descriptor < self.n_descriptors).then(|| self.targets.len() + descriptor)
    }

    /// Key of the column at `index`.
    pub fn key(&self, index: usize) -> Option<ColumnKey> {
        if index < self.targets.len() {
            Some(ColumnKey::Target(self.targets[index].clone()))
        } else if index < self.len() {
            Some(ColumnKey::Descriptor(index - self.targets.len()))
        } else {
            None
        }
    }

    /// All column keys in column order.
    pub fn keys(&self) -> impl Iterator<Item = ColumnKey> + '_ {
        (0..self.len()).filter_map(|i| self.key(i))
    }

    /// Whether the column at `index` holds descriptor values.
    #[inline]
    pub fn is_descriptor_column(&self, index: usize) -> bool {
        index >= self.targets.len() && index < self.len()
    }
}
