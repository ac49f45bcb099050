//! Per-column transform pipeline over `y`.

use std::collections::BTreeMap;

use ndarray::{ArrayView2, ArrayViewMut2};

use super::op::TransformOp;
use super::report::{DistributionReporter, NoopReporter};
use crate::config::PrepConfig;
use crate::dataset::Dataset;
use crate::error::{PrepError, Result};
use crate::matrix::{ColumnKey, ColumnLayout, Matrices, MatrixBuilder};
use crate::utils::{Parallelism, run_with_threads};

/// Applies ordered transform chains to the columns of `y`.
///
/// Target columns take their chain from `task_transforms` (by name) and
/// compute `normalize` statistics only over rows whose weight is nonzero.
/// Descriptor columns take their chain from `desc_transforms` (by index) and
/// always use every row. Columns without an entry are left as they are.
///
/// `X` and `W` are never modified. Transforms are computed into scratch
/// buffers and written back only after every column succeeded, so an error
/// leaves `y` exactly as it was.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use molprep::dataset::{Datapoint, Dataset, Label};
/// use molprep::matrix::MatrixBuilder;
/// use molprep::transform::{ColumnTransformPipeline, NoopReporter};
///
/// let mut ds = Dataset::new();
/// for (id, v) in [("a", 1.0), ("b", 3.0), ("c", -1.0)] {
///     ds.insert(id, Datapoint::new(vec![0.0]).with_label("t", Label::from_raw(v)));
/// }
///
/// let mut m = MatrixBuilder::new().build(&ds).unwrap();
/// let transforms = BTreeMap::from([("t".to_string(), vec!["normalize".to_string()])]);
/// ColumnTransformPipeline::new(transforms)
///     .apply(&mut m, &NoopReporter)
///     .unwrap();
///
/// assert_eq!(m.y().column(0).to_vec(), vec![-1.0, 1.0, 0.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnTransformPipeline {
    task_transforms: BTreeMap<String, Vec<String>>,
    desc_transforms: BTreeMap<usize, Vec<String>>,
    add_descriptors: bool,
    parallelism: Parallelism,
}

impl ColumnTransformPipeline {
    /// Pipeline over target columns only.
    pub fn new(task_transforms: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            task_transforms,
            ..Self::default()
        }
    }

    /// Pipeline configured from a [`PrepConfig`].
    pub fn from_config(config: &PrepConfig) -> Self {
        Self {
            task_transforms: config.task_transforms.clone(),
            desc_transforms: config.desc_transforms.clone(),
            add_descriptors: config.add_descriptors,
            parallelism: Parallelism::Sequential,
        }
    }

    /// Also transform descriptor columns, using `desc_transforms`.
    pub fn with_descriptor_transforms(mut self, desc_transforms: BTreeMap<usize, Vec<String>>) -> Self {
        self.desc_transforms = desc_transforms;
        self.add_descriptors = true;
        self
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Transform `y` of the given matrices in place.
    pub fn apply(&self, matrices: &mut Matrices, reporter: &dyn DistributionReporter) -> Result<()> {
        let (y, w, layout) = matrices.labels_mut();
        self.apply_arrays(y, w, layout, reporter)
    }

    /// Transform a raw `y` in place, using `w` as the missing-label mask.
    ///
    /// # Errors
    ///
    /// - [`PrepError::InvalidArgument`] if shapes disagree with `layout`, if a
    ///   transform entry names a column the layout does not have, or if the
    ///   layout has descriptor columns while descriptors are not included
    /// - [`PrepError::UnsupportedTransform`] for an unknown transform name
    /// - [`PrepError::Domain`] if `log` meets a non-positive value
    pub fn apply_arrays(
        &self,
        mut y: ArrayViewMut2<'_, f64>,
        w: ArrayView2<'_, f64>,
        layout: &ColumnLayout,
        reporter: &dyn DistributionReporter,
    ) -> Result<()> {
        if y.ncols() != layout.len() || y.dim() != w.dim() {
            return Err(PrepError::InvalidArgument(format!(
                "y {:?} and W {:?} do not match a layout of {} columns",
                y.dim(),
                w.dim(),
                layout.len()
            )));
        }
        let plan = self.plan(layout)?;

        let columns = {
            let y = y.view();
            self.parallelism.maybe_par_map(0..layout.len(), |col| -> Result<Vec<f64>> {
                let mut values = y.column(col).to_vec();
                let mask = (!layout.is_descriptor_column(col))
                    .then(|| w.column(col).iter().map(|&wt| wt != 0.0).collect::<Vec<_>>());
                let (key, ops) = &plan[col];
                for op in ops {
                    op.apply(&mut values, mask.as_deref(), key, col)?;
                }
                Ok(values)
            })
        };
        let columns = columns.into_iter().collect::<Result<Vec<_>>>()?;

        for (col, values) in columns.into_iter().enumerate() {
            for (dst, v) in y.column_mut(col).iter_mut().zip(values) {
                *dst = v;
            }
        }

        for (col, (key, _)) in plan.iter().enumerate() {
            reporter.report(col, key, y.column(col));
        }
        Ok(())
    }

    /// Resolve the transform chain of every column in layout order.
    fn plan(&self, layout: &ColumnLayout) -> Result<Vec<(ColumnKey, Vec<TransformOp>)>> {
        if let Some(name) = self
            .task_transforms
            .keys()
            .find(|name| layout.target_column(name).is_none())
        {
            return Err(PrepError::InvalidArgument(format!(
                "transforms given for target `{name}`, which is not a column of y"
            )));
        }

        if self.add_descriptors {
            if let Some(idx) = self
                .desc_transforms
                .keys()
                .find(|&&idx| layout.descriptor_column(idx).is_none())
            {
                return Err(PrepError::InvalidArgument(format!(
                    "transforms given for descriptor {idx}, but y has {} descriptor columns",
                    layout.n_descriptors()
                )));
            }
        } else if layout.n_descriptors() > 0 {
            return Err(PrepError::InvalidArgument(
                "y has descriptor columns but descriptors are not included".to_string(),
            ));
        }

        layout
            .keys()
            .map(|key| -> Result<(ColumnKey, Vec<TransformOp>)> {
                let names = match &key {
                    ColumnKey::Target(name) => self.task_transforms.get(name),
                    ColumnKey::Descriptor(idx) => self.desc_transforms.get(idx),
                };
                let ops = match names {
                    Some(names) => TransformOp::resolve_chain(names, &key)?,
                    None => Vec::new(),
                };
                Ok((key, ops))
            })
            .collect()
    }
}

/// Build matrices from `dataset` and transform them according to `config`.
///
/// Runs with the thread count from `config.n_threads`; columns are
/// transformed in parallel when more than one thread is available.
pub fn prepare(dataset: &Dataset, config: &PrepConfig, reporter: &dyn DistributionReporter) -> Result<Matrices> {
    let mut matrices = MatrixBuilder::new()
        .with_descriptors(config.add_descriptors)
        .with_desc_weight(config.desc_weight)
        .build(dataset)?;

    run_with_threads(config.n_threads, |parallelism| {
        let pipeline = ColumnTransformPipeline::from_config(config).with_parallelism(parallelism);
        let (y, w, layout) = matrices.labels_mut();
        pipeline.apply_arrays(y, w, layout, &NoopReporter)
    })?;

    // Report outside the pool so the reporter needs no `Send`.
    for (col, key) in matrices.layout().keys().enumerate() {
        reporter.report(col, &key, matrices.y().column(col));
    }
    Ok(matrices)
}
