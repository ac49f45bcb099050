//! Typed in-memory compound datasets.
//!
//! A [`Dataset`] maps a unique compound identifier (typically a canonical
//! SMILES string) to a [`Datapoint`]. Entries are kept ordered by identifier,
//! so every iteration visits compounds in ascending identifier order. That
//! ordering is what the matrix builder uses for its rows.
//!
//! # Key Types
//!
//! - [`Dataset`]: identifier → datapoint container
//! - [`Datapoint`]: feature vector, labels, optional descriptors and scaffold
//! - [`Label`]: a measured value or an explicit missing marker
//!
//! # Example
//!
//! ```
//! use molprep::dataset::{Datapoint, Dataset, Label};
//!
//! let mut ds = Dataset::new();
//! ds.insert(
//!     "CCO",
//!     Datapoint::new(vec![1.0, 0.0])
//!         .with_label("solubility", Label::Present(0.7))
//!         .with_scaffold("C"),
//! );
//! ds.insert(
//!     "c1ccccc1",
//!     Datapoint::new(vec![0.0, 1.0])
//!         .with_label("solubility", Label::Missing)
//!         .with_scaffold("c1ccccc1"),
//! );
//!
//! assert_eq!(ds.len(), 2);
//! assert_eq!(ds.ids().collect::<Vec<_>>(), vec!["CCO", "c1ccccc1"]);
//! ```

mod datapoint;
mod dataset;

pub use datapoint::{Datapoint, Label, MISSING_LABEL};
pub use dataset::Dataset;
