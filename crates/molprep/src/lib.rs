//! molprep: molecular dataset preparation for multitask learning.
//!
//! Turns per-compound records (fingerprints, sparse per-target labels,
//! optional descriptors and scaffolds) into aligned dense matrices, applies
//! per-column label transforms, and splits datasets into train and test sets.
//!
//! # Key Types
//!
//! - [`Dataset`] / [`Datapoint`] / [`Label`] - In-memory compound records
//! - [`MatrixBuilder`] / [`Matrices`] - Dense `X`, `y`, `W` construction
//! - [`ColumnTransformPipeline`] - Per-column `log` / `1+max-val` / `normalize` chains
//! - [`PrepConfig`] / [`SplitConfig`] - Configuration builders
//!
//! # Preparing Matrices
//!
//! Use `PrepConfig::builder()` to configure, then [`prepare()`].
//! See the [`transform`] module for the available transforms.
//!
//! # Splitting
//!
//! [`split()`] dispatches to [`split::random_split`] or
//! [`split::scaffold_split`]; both keep every compound in exactly one side.

pub mod config;
pub mod dataset;
pub mod error;
pub mod matrix;
pub mod split;
pub mod tasks;
pub mod testing;
pub mod transform;
pub mod utils;
pub mod weights;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Errors
pub use error::{PrepError, Result};

// Data types
pub use dataset::{Datapoint, Dataset, Label};
pub use matrix::{ColumnKey, ColumnLayout, Matrices, MatrixBuilder};

// Configuration types
pub use config::{PrepConfig, SplitConfig};

// Transforms
pub use transform::{ColumnTransformPipeline, DistributionReporter, LogReporter, NoopReporter, TransformOp, prepare};

// Splits and label utilities
pub use split::{SplitStrategy, split};
pub use tasks::{multitask_to_singletask, to_one_hot};
pub use weights::labels_to_weights;

// Shared utilities
pub use utils::{Parallelism, run_with_threads};
