//! Per-compound records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw sentinel that marks an unmeasured label in numeric label sources.
pub const MISSING_LABEL: f64 = -1.0;

/// A single target label.
///
/// Raw numeric sources encode "not measured" as `-1`; [`Label::from_raw`] and
/// the serde representation map that sentinel to [`Label::Missing`]. A genuine
/// measurement of `-1` is therefore read as missing as well. Sources that can
/// produce such values must build [`Label::Present`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub enum Label {
    /// A measured value.
    Present(f64),
    /// No measurement for this compound.
    Missing,
}

impl Label {
    /// Interpret a raw numeric label, treating `-1` as missing.
    #[inline]
    pub fn from_raw(value: f64) -> Self {
        if value == MISSING_LABEL {
            Label::Missing
        } else {
            Label::Present(value)
        }
    }

    /// The raw numeric encoding (`-1` for missing).
    #[inline]
    pub fn to_raw(self) -> f64 {
        match self {
            Label::Present(v) => v,
            Label::Missing => MISSING_LABEL,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Label::Missing)
    }

    /// The measured value, if any.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            Label::Present(v) => Some(*v),
            Label::Missing => None,
        }
    }
}

impl From<f64> for Label {
    fn from(value: f64) -> Self {
        Label::from_raw(value)
    }
}

impl From<Label> for f64 {
    fn from(label: Label) -> Self {
        label.to_raw()
    }
}

/// Everything known about one compound.
///
/// `feature` is the fingerprint (or any fixed-length feature vector).
/// `descriptors` are auxiliary computed properties that can be trained as
/// extra tasks. `scaffold` is the structural class key used by scaffold splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    #[serde(alias = "fingerprint")]
    pub feature: Vec<f64>,

    pub labels: BTreeMap<String, Label>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptors: Option<Vec<f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaffold: Option<String>,
}

impl Datapoint {
    /// Create a datapoint with the given feature vector and no labels.
    pub fn new(feature: Vec<f64>) -> Self {
        Self {
            feature,
            labels: BTreeMap::new(),
            descriptors: None,
            scaffold: None,
        }
    }

    /// Add (or replace) a label. Raw `f64` values go through [`Label::from_raw`].
    pub fn with_label(mut self, target: impl Into<String>, label: impl Into<Label>) -> Self {
        self.labels.insert(target.into(), label.into());
        self
    }

    /// Attach a descriptor vector.
    pub fn with_descriptors(mut self, descriptors: Vec<f64>) -> Self {
        self.descriptors = Some(descriptors);
        self
    }

    /// Attach a scaffold key.
    pub fn with_scaffold(mut self, scaffold: impl Into<String>) -> Self {
        self.scaffold = Some(scaffold.into());
        self
    }

    /// Target names in ascending order.
    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_maps_to_missing() {
        assert_eq!(Label::from_raw(-1.0), Label::Missing);
        assert_eq!(Label::from_raw(0.0), Label::Present(0.0));
        assert_eq!(Label::from_raw(-0.5), Label::Present(-0.5));
        assert_eq!(Label::Missing.to_raw(), -1.0);
        assert!(Label::Missing.value().is_none());
        assert_eq!(Label::Present(2.5).value(), Some(2.5));
    }

    #[test]
    fn test_builder_methods() {
        let dp = Datapoint::new(vec![1.0, 2.0])
            .with_label("b", Label::Present(1.0))
            .with_label("a", Label::Missing)
            .with_descriptors(vec![0.1])
            .with_scaffold("c1ccccc1");

        assert_eq!(dp.target_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(dp.descriptors.as_deref(), Some(&[0.1][..]));
        assert_eq!(dp.scaffold.as_deref(), Some("c1ccccc1"));
    }
}
