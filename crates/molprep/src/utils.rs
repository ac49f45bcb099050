//! Common utilities used across the crate.
//!
//! Small statistics helpers shared by the transform pipeline and the
//! distribution reporter, plus the sequential/parallel execution switch.

use std::num::NonZeroUsize;

use rayon::prelude::*;

// =============================================================================
// Statistical Utilities
// =============================================================================

/// Mean and population standard deviation (`ddof = 0`) of the values.
///
/// Returns `None` if the iterator is empty.
pub fn mean_std(values: impl IntoIterator<Item = f64> + Clone) -> Option<(f64, f64)> {
    let (count, sum) = values
        .clone()
        .into_iter()
        .fold((0usize, 0.0f64), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;
    let var = values
        .into_iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / count as f64;
    Some((mean, var.sqrt()))
}

/// Median of a slice (average of the two middle values for even lengths).
///
/// Returns `f64::NAN` if `values` is empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// Components that may fan out over independent columns receive this flag
/// and use rayon only when it is [`Parallelism::Parallel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Parallelism {
    #[default]
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Map over the items, in parallel when allowed. Output order matches input order.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// - `None` = use rayon's global pool (all available cores)
/// - `Some(1)` = sequential
/// - `Some(n)` = a dedicated pool with exactly `n` threads
///
/// If the dedicated pool cannot be created the closure runs sequentially.
pub fn run_with_threads<T: Send>(
    n_threads: Option<NonZeroUsize>,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> T {
    let Some(n) = n_threads else {
        return f(Parallelism::from_threads(0));
    };
    if n.get() == 1 {
        return f(Parallelism::Sequential);
    }

    match rayon::ThreadPoolBuilder::new().num_threads(n.get()).build() {
        Ok(pool) => pool.install(|| f(Parallelism::Parallel)),
        Err(err) => {
            log::warn!("failed to create a {n}-thread pool ({err}); running sequentially");
            f(Parallelism::Sequential)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_std_population() {
        let (mean, std) = mean_std([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_abs_diff_eq!(mean, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(std, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_std_empty() {
        assert!(mean_std(std::iter::empty::<f64>()).is_none());
    }

    #[test]
    fn test_median() {
        assert!(median(&[]).is_nan());
        assert_eq!(median(&[3.0]), 3.0);
        assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_parallelism_from_threads() {
        assert!(!Parallelism::from_threads(1).is_parallel());
        assert!(Parallelism::from_threads(2).is_parallel());
        assert!(Parallelism::from_threads(8).is_parallel());
    }

    #[test]
    fn test_maybe_par_map_keeps_order() {
        let result: Vec<_> = Parallelism::Sequential.maybe_par_map(0..5usize, |i| i * 2);
        assert_eq!(result, vec![0, 2, 4, 6, 8]);

        let result: Vec<_> = Parallelism::Parallel.maybe_par_map(0..5usize, |i| i * 2);
        assert_eq!(result, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_run_with_threads() {
        assert_eq!(run_with_threads(NonZeroUsize::new(1), |p| p), Parallelism::Sequential);
        let n = run_with_threads(NonZeroUsize::new(2), |_| rayon::current_num_threads());
        assert_eq!(n, 2);
        assert_eq!(run_with_threads(None, |_| 42), 42);
    }
}
