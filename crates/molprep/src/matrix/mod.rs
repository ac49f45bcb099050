//! Dense matrix construction.
//!
//! [`MatrixBuilder`] turns a [`Dataset`](crate::dataset::Dataset) into a
//! feature matrix `X`, a label matrix `y` and a weight matrix `W`, all aligned
//! on rows sorted by compound identifier. The [`ColumnLayout`] it returns is
//! the single source of truth for which `y` column holds which target or
//! descriptor; the transform pipeline consumes it as-is.

mod builder;
mod layout;

pub use builder::{DEFAULT_DESC_WEIGHT, Matrices, MatrixBuilder};
pub use layout::{ColumnKey, ColumnLayout};
