//! Post-transform distribution reporting.

use std::fmt;

use ndarray::ArrayView1;

use crate::matrix::ColumnKey;
use crate::utils::{mean_std, median};

/// Receives each finished column after the pipeline has transformed it.
///
/// Called once per column, in column order, on the calling thread. The
/// pipeline does not depend on anything the reporter does.
pub trait DistributionReporter {
    fn report(&self, index: usize, column: &ColumnKey, values: ArrayView1<'_, f64>);
}

impl<F> DistributionReporter for F
where
    F: Fn(usize, &ColumnKey, ArrayView1<'_, f64>),
{
    fn report(&self, index: usize, column: &ColumnKey, values: ArrayView1<'_, f64>) {
        self(index, column, values)
    }
}

/// Logs a [`DistributionSummary`] per column at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl DistributionReporter for LogReporter {
    fn report(&self, index: usize, column: &ColumnKey, values: ArrayView1<'_, f64>) {
        if log::log_enabled!(log::Level::Info) {
            let summary = DistributionSummary::from_values(values);
            log::info!("post-transform column {index} ({column}) distribution: {summary}");
        }
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl DistributionReporter for NoopReporter {
    fn report(&self, _index: usize, _column: &ColumnKey, _values: ArrayView1<'_, f64>) {}
}

/// Basic statistics of a column.
///
/// All fields except `count` are NaN for an empty column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub median: f64,
}

impl DistributionSummary {
    pub fn from_values(values: ArrayView1<'_, f64>) -> Self {
        let (mean, std) = mean_std(values.iter().copied()).unwrap_or((f64::NAN, f64::NAN));
        let (min, max) = if values.is_empty() {
            (f64::NAN, f64::NAN)
        } else {
            values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        };
        Self {
            count: values.len(),
            min,
            max,
            mean,
            std,
            median: median(&values.to_vec()),
        }
    }
}

impl fmt::Display for DistributionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} min={:.4} max={:.4} mean={:.4} std={:.4} median={:.4}",
            self.count, self.min, self.max, self.mean, self.std, self.median
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_summary() {
        let values = array![1.0, 2.0, 3.0, 4.0];
        let s = DistributionSummary::from_values(values.view());

        assert_eq!(s.count, 4);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert_abs_diff_eq!(s.mean, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.std, 1.25f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(s.median, 2.5, epsilon = 1e-12);
        assert!(s.to_string().starts_with("n=4 min=1.0000"));
    }

    #[test]
    fn test_summary_empty() {
        let values = ndarray::Array1::<f64>::zeros(0);
        let s = DistributionSummary::from_values(values.view());
        assert_eq!(s.count, 0);
        assert!(s.min.is_nan() && s.mean.is_nan() && s.median.is_nan());
    }

    #[test]
    fn test_closure_reporter() {
        let seen = std::cell::RefCell::new(Vec::new());
        let reporter = |index: usize, column: &ColumnKey, values: ArrayView1<'_, f64>| {
            seen.borrow_mut().push((index, column.clone(), values.sum()));
        };
        reporter.report(3, &ColumnKey::Descriptor(1), array![1.0, 2.0].view());
        assert_eq!(*seen.borrow(), vec![(3, ColumnKey::Descriptor(1), 3.0)]);
    }
}
