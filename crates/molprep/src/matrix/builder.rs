//! Dataset → dense `(X, y, W)` conversion.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use super::layout::ColumnLayout;
use crate::dataset::{Dataset, Label};
use crate::error::{PrepError, Result};

/// Default weight of descriptor columns in `W`.
pub const DEFAULT_DESC_WEIGHT: f64 = 0.5;

/// Dense matrices built from a [`Dataset`].
///
/// - `x`: `[n_samples, n_features]`
/// - `y`, `w`: `[n_samples, layout.len()]`
///
/// Row `i` is the compound `ids[i]`; identifiers are in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrices {
    ids: Vec<String>,
    x: Array2<f64>,
    y: Array2<f64>,
    w: Array2<f64>,
    layout: ColumnLayout,
}

impl Matrices {
    /// Number of rows.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.ids.len()
    }

    /// Number of feature columns in `x`.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Row identifiers, ascending.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView2<'_, f64> {
        self.y.view()
    }

    pub fn w(&self) -> ArrayView2<'_, f64> {
        self.w.view()
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Mutable `y` together with read-only `W` and layout.
    pub(crate) fn labels_mut(&mut self) -> (ArrayViewMut2<'_, f64>, ArrayView2<'_, f64>, &ColumnLayout) {
        (self.y.view_mut(), self.w.view(), &self.layout)
    }

    /// Consume into `(ids, x, y, w, layout)`.
    pub fn into_parts(self) -> (Vec<String>, Array2<f64>, Array2<f64>, Array2<f64>, ColumnLayout) {
        (self.ids, self.x, self.y, self.w, self.layout)
    }
}

/// Converts a keyed [`Dataset`] into aligned [`Matrices`].
///
/// Missing labels become `y = 0` with `W = 0`; present labels are copied with
/// `W = 1`. With descriptors enabled, each compound's descriptor vector is
/// appended after the target columns and the matching `W` entries are set to
/// the descriptor weight.
///
/// # Example
///
/// ```
/// use molprep::dataset::{Datapoint, Dataset, Label};
/// use molprep::matrix::MatrixBuilder;
///
/// let mut ds = Dataset::new();
/// ds.insert("b", Datapoint::new(vec![0.0, 1.0]).with_label("t", Label::Missing));
/// ds.insert("a", Datapoint::new(vec![1.0, 0.0]).with_label("t", Label::Present(3.0)));
///
/// let m = MatrixBuilder::new().build(&ds).unwrap();
/// assert_eq!(m.ids(), &["a".to_string(), "b".to_string()]);
/// assert_eq!(m.y()[[0, 0]], 3.0);
/// assert_eq!(m.w()[[1, 0]], 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixBuilder {
    add_descriptors: bool,
    desc_weight: f64,
}

impl Default for MatrixBuilder {
    fn default() -> Self {
        Self {
            add_descriptors: false,
            desc_weight: DEFAULT_DESC_WEIGHT,
        }
    }
}

impl MatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append descriptor columns to `y` and `W`.
    pub fn with_descriptors(mut self, add_descriptors: bool) -> Self {
        self.add_descriptors = add_descriptors;
        self
    }

    /// Weight stored in `W` for descriptor columns.
    pub fn with_desc_weight(mut self, desc_weight: f64) -> Self {
        self.desc_weight = desc_weight;
        self
    }

    /// Build the matrices.
    ///
    /// # Errors
    ///
    /// - [`PrepError::EmptyDataset`] for a dataset with no entries
    /// - [`PrepError::Shape`] if a feature, label or descriptor vector length
    ///   differs from the first compound's
    /// - [`PrepError::InconsistentTargets`] if target names differ
    /// - [`PrepError::MissingField`] if descriptors are requested but absent
    pub fn build(&self, dataset: &Dataset) -> Result<Matrices> {
        let (first_id, first) = dataset.first().ok_or(PrepError::EmptyDataset)?;

        let n_samples = dataset.len();
        let n_features = first.feature.len();
        let n_desc = if self.add_descriptors {
            first
                .descriptors
                .as_ref()
                .map(Vec::len)
                .ok_or_else(|| PrepError::MissingField {
                    id: first_id.to_string(),
                    field: "descriptors",
                })?
        } else {
            0
        };
        let layout = ColumnLayout::new(first.target_names(), n_desc);
        let n_targets = layout.n_targets();

        self.validate(dataset, &layout, n_features)?;

        let mut ids = Vec::with_capacity(n_samples);
        let mut x = Array2::<f64>::zeros((n_samples, n_features));
        let mut y = Array2::<f64>::zeros((n_samples, layout.len()));
        let mut w = Array2::<f64>::zeros((n_samples, layout.len()));

        for (row, (id, dp)) in dataset.iter().enumerate() {
            ids.push(id.to_string());

            for (dst, &v) in x.row_mut(row).iter_mut().zip(&dp.feature) {
                *dst = v;
            }

            // Labels iterate in the same sorted order as the layout's targets.
            for (col, label) in dp.labels.values().enumerate() {
                if let Label::Present(v) = label {
                    y[[row, col]] = *v;
                    w[[row, col]] = 1.0;
                }
            }

            if let Some(descriptors) = dp.descriptors.as_ref().filter(|_| self.add_descriptors) {
                for (offset, &v) in descriptors.iter().enumerate() {
                    y[[row, n_targets + offset]] = v;
                    w[[row, n_targets + offset]] = self.desc_weight;
                }
            }
        }

        Ok(Matrices {
            ids,
            x,
            y,
            w,
            layout,
        })
    }

    /// Check every compound against the first one before anything is written.
    fn validate(&self, dataset: &Dataset, layout: &ColumnLayout, n_features: usize) -> Result<()> {
        for (id, dp) in dataset.iter() {
            if dp.feature.len() != n_features {
                return Err(PrepError::Shape {
                    id: id.to_string(),
                    field: "feature",
                    expected: n_features,
                    got: dp.feature.len(),
                });
            }

            if dp.labels.len() != layout.n_targets() {
                return Err(PrepError::Shape {
                    id: id.to_string(),
                    field: "labels",
                    expected: layout.n_targets(),
                    got: dp.labels.len(),
                });
            }
            if !dp.target_names().eq(layout.targets().iter().map(String::as_str)) {
                return Err(PrepError::InconsistentTargets { id: id.to_string() });
            }

            if self.add_descriptors {
                let descriptors = dp.descriptors.as_ref().ok_or_else(|| PrepError::MissingField {
                    id: id.to_string(),
                    field: "descriptors",
                })?;
                if descriptors.len() != layout.n_descriptors() {
                    return Err(PrepError::Shape {
                        id: id.to_string(),
                        field: "descriptors",
                        expected: layout.n_descriptors(),
                        got: descriptors.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Datapoint;
    use crate::matrix::ColumnKey;

    fn two_task_dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.insert(
            "CCO",
            Datapoint::new(vec![1.0, 0.0, 1.0])
                .with_label("tox", Label::Present(1.0))
                .with_label("abs", Label::Missing)
                .with_descriptors(vec![10.0, 20.0]),
        );
        ds.insert(
            "CC",
            Datapoint::new(vec![0.0, 0.0, 1.0])
                .with_label("tox", Label::Missing)
                .with_label("abs", Label::Present(0.25))
                .with_descriptors(vec![11.0, 21.0]),
        );
        ds
    }

    #[test]
    fn test_rows_sorted_and_labels_masked() {
        let m = MatrixBuilder::new().build(&two_task_dataset()).unwrap();

        assert_eq!(m.ids(), &["CC".to_string(), "CCO".to_string()]);
        assert_eq!(m.x().dim(), (2, 3));
        assert_eq!(m.x().row(1).to_vec(), vec![1.0, 0.0, 1.0]);

        // Columns: abs, tox
        assert_eq!(m.layout().key(0), Some(ColumnKey::Target("abs".into())));
        assert_eq!(m.y().row(0).to_vec(), vec![0.25, 0.0]);
        assert_eq!(m.w().row(0).to_vec(), vec![1.0, 0.0]);
        assert_eq!(m.y().row(1).to_vec(), vec![0.0, 1.0]);
        assert_eq!(m.w().row(1).to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_descriptor_columns_appended() {
        let m = MatrixBuilder::new()
            .with_descriptors(true)
            .build(&two_task_dataset())
            .unwrap();

        assert_eq!(m.y().dim(), (2, 4));
        assert_eq!(m.y().row(0).to_vec(), vec![0.25, 0.0, 11.0, 21.0]);
        assert_eq!(m.w().row(0).to_vec(), vec![1.0, 0.0, 0.5, 0.5]);
        assert_eq!(m.layout().n_descriptors(), 2);
    }

    #[test]
    fn test_custom_desc_weight() {
        let m = MatrixBuilder::new()
            .with_descriptors(true)
            .with_desc_weight(0.1)
            .build(&two_task_dataset())
            .unwrap();

        assert_eq!(m.w()[[1, 3]], 0.1);
    }

    #[test]
    fn test_empty_dataset() {
        let err = MatrixBuilder::new().build(&Dataset::new()).unwrap_err();
        assert_eq!(err, PrepError::EmptyDataset);
    }

    #[test]
    fn test_feature_length_mismatch() {
        let mut ds = two_task_dataset();
        ds.insert(
            "N",
            Datapoint::new(vec![1.0])
                .with_label("tox", Label::Missing)
                .with_label("abs", Label::Missing),
        );

        let err = MatrixBuilder::new().build(&ds).unwrap_err();
        assert!(matches!(
            err,
            PrepError::Shape { field: "feature", expected: 3, got: 1, .. }
        ));
    }

    #[test]
    fn test_label_set_mismatch() {
        let mut ds = two_task_dataset();
        ds.insert(
            "N",
            Datapoint::new(vec![0.0; 3])
                .with_label("tox", Label::Missing)
                .with_label("other", Label::Missing),
        );
        let err = MatrixBuilder::new().build(&ds).unwrap_err();
        assert_eq!(err, PrepError::InconsistentTargets { id: "N".into() });

        let mut ds = two_task_dataset();
        ds.insert("N", Datapoint::new(vec![0.0; 3]).with_label("tox", Label::Missing));
        let err = MatrixBuilder::new().build(&ds).unwrap_err();
        assert!(matches!(err, PrepError::Shape { field: "labels", .. }));
    }

    #[test]
    fn test_descriptor_errors() {
        let mut ds = two_task_dataset();
        ds.insert(
            "N",
            Datapoint::new(vec![0.0; 3])
                .with_label("tox", Label::Missing)
                .with_label("abs", Label::Missing),
        );

        // Descriptors are only checked when requested.
        assert!(MatrixBuilder::new().build(&ds).is_ok());

        let err = MatrixBuilder::new().with_descriptors(true).build(&ds).unwrap_err();
        assert_eq!(
            err,
            PrepError::MissingField {
                id: "N".into(),
                field: "descriptors"
            }
        );

        ds.insert(
            "N",
            Datapoint::new(vec![0.0; 3])
                .with_label("tox", Label::Missing)
                .with_label("abs", Label::Missing)
                .with_descriptors(vec![1.0, 2.0, 3.0]),
        );
        let err = MatrixBuilder::new().with_descriptors(true).build(&ds).unwrap_err();
        assert!(matches!(err, PrepError::Shape { field: "descriptors", .. }));
    }

    #[test]
    fn test_build_is_reproducible() {
        let ds = two_task_dataset();
        let a = MatrixBuilder::new().build(&ds).unwrap();
        let b = MatrixBuilder::new().build(&ds).unwrap();
        assert_eq!(a, b);
    }
}
