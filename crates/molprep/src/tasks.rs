//! Task-level reshaping: per-target datasets and one-hot labels.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView1};

use crate::dataset::{Datapoint, Dataset};
use crate::error::{PrepError, Result};

/// Split a multitask dataset into one dataset per target.
///
/// The targets are taken from the first compound (in identifier order). Each
/// per-target dataset holds only the compounds whose label for that target is
/// present, each carrying just that single label. Features, descriptors and
/// scaffolds are kept.
///
/// # Errors
///
/// [`PrepError::EmptyDataset`] if the dataset has no compounds.
pub fn multitask_to_singletask(dataset: &Dataset) -> Result<BTreeMap<String, Dataset>> {
    let (_, first) = dataset.first().ok_or(PrepError::EmptyDataset)?;

    let mut by_task: BTreeMap<String, Dataset> = first
        .target_names()
        .map(|name| (name.to_string(), Dataset::new()))
        .collect();

    for (task, task_dataset) in by_task.iter_mut() {
        for (id, dp) in dataset.iter() {
            let Some(label) = dp.labels.get(task) else {
                continue;
            };
            if label.is_missing() {
                continue;
            }
            let single = Datapoint {
                labels: BTreeMap::from([(task.clone(), *label)]),
                ..dp.clone()
            };
            task_dataset.insert(id, single);
        }
        log::debug!("task `{task}`: {} labelled compounds", task_dataset.len());
    }

    Ok(by_task)
}

/// Encode binary labels as `n × 2` one-hot rows: 0 → `[1, 0]`, 1 → `[0, 1]`.
///
/// # Errors
///
/// [`PrepError::InvalidLabel`] if any entry is not exactly 0 or 1.
pub fn to_one_hot(labels: ArrayView1<'_, f64>) -> Result<Array2<f64>> {
    let mut encoded = Array2::zeros((labels.len(), 2));
    for (index, &value) in labels.iter().enumerate() {
        let class = match value {
            v if v == 0.0 => 0,
            v if v == 1.0 => 1,
            _ => return Err(PrepError::InvalidLabel { index, value }),
        };
        encoded[[index, class]] = 1.0;
    }
    Ok(encoded)
}
