//! Label and descriptor transforms.
//!
//! Each column of `y` gets an ordered chain of [`TransformOp`]s, configured
//! by name:
//!
//! | name        | effect                                                  |
//! |-------------|---------------------------------------------------------|
//! | `log`       | natural log; fails on values `<= 0`                     |
//! | `1+max-val` | `1 + max(column) - v`, reverses the ranking             |
//! | `normalize` | zero mean, unit variance over present labels            |
//!
//! [`ColumnTransformPipeline`] applies the chains, and [`prepare`] builds the
//! matrices and transforms them in one call. After transformation every
//! column is handed to a [`DistributionReporter`].

mod op;
mod pipeline;
mod report;

use std::collections::BTreeMap;

pub use op::TransformOp;
pub use pipeline::{ColumnTransformPipeline, prepare};
pub use report::{DistributionReporter, DistributionSummary, LogReporter, NoopReporter};

/// Number of RDKit descriptors covered by [`default_descriptor_transforms`]
/// (196 computed descriptors minus 39 excluded ones).
pub const N_DEFAULT_DESCRIPTORS: usize = 196 - 39;

/// `normalize` for each of the first [`N_DEFAULT_DESCRIPTORS`] descriptors.
pub fn default_descriptor_transforms() -> BTreeMap<usize, Vec<String>> {
    (0..N_DEFAULT_DESCRIPTORS)
        .map(|idx| (idx, vec![TransformOp::Normalize.name().to_string()]))
        .collect()
}
