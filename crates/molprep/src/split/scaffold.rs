//! Scaffold grouping and scaffold-based splits.

use std::collections::BTreeMap;

use super::check_frac_train;
use crate::dataset::Dataset;
use crate::error::{PrepError, Result};

/// Compounds sharing one scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldGroup {
    pub scaffold: String,
    /// Member identifiers, ascending.
    pub ids: Vec<String>,
}

impl ScaffoldGroup {
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Group compounds by scaffold.
///
/// Groups are ordered by member count, largest first. Groups of equal size
/// are ordered by scaffold key, ascending.
///
/// # Errors
///
/// [`PrepError::MissingField`] if any compound has no scaffold.
pub fn scaffold_groups(dataset: &Dataset) -> Result<Vec<ScaffoldGroup>> {
    let mut by_scaffold: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (id, dp) in dataset.iter() {
        let scaffold = dp.scaffold.as_deref().ok_or_else(|| PrepError::MissingField {
            id: id.to_string(),
            field: "scaffold",
        })?;
        by_scaffold.entry(scaffold).or_default().push(id.to_string());
    }

    let mut groups: Vec<ScaffoldGroup> = by_scaffold
        .into_iter()
        .map(|(scaffold, ids)| ScaffoldGroup {
            scaffold: scaffold.to_string(),
            ids,
        })
        .collect();
    // Stable: equal sizes keep ascending scaffold order.
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    Ok(groups)
}

/// Split whole scaffold groups into train and test.
///
/// Groups are visited largest first and go to train while
/// `train_len + group_len <= frac_train * n`. The first group that would
/// exceed that budget goes to test, and so does every later group. With
/// `backfill`, later groups are still checked one by one and go to train
/// whenever they fit.
///
/// No scaffold ever appears in both sets, and rare scaffolds end up in test.
///
/// # Errors
///
/// - [`PrepError::InvalidArgument`] if `frac_train` is outside (0, 1)
/// - [`PrepError::MissingField`] if any compound has no scaffold
pub fn scaffold_split(dataset: &Dataset, frac_train: f64, backfill: bool) -> Result<(Dataset, Dataset)> {
    check_frac_train(frac_train)?;
    let groups = scaffold_groups(dataset)?;
    let train_budget = frac_train * dataset.len() as f64;

    let mut train_ids: Vec<&str> = Vec::new();
    let mut test_ids: Vec<&str> = Vec::new();
    let mut overflowed = false;
    for group in &groups {
        let fits = (train_ids.len() + group.len()) as f64 <= train_budget;
        let members = group.ids.iter().map(String::as_str);
        if fits && (backfill || !overflowed) {
            train_ids.extend(members);
        } else {
            overflowed = true;
            test_ids.extend(members);
        }
    }

    log::debug!(
        "scaffold split over {} scaffolds: {} train / {} test compounds",
        groups.len(),
        train_ids.len(),
        test_ids.len()
    );
    Ok((dataset.subset(train_ids), dataset.subset(test_ids)))
}
