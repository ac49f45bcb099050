//! Train/test splitting.
//!
//! Two strategies partition a [`Dataset`] into disjoint train and test sets
//! that together contain every compound:
//!
//! - [`random_split`]: uniform shuffle, first `floor(frac_train * n)` to train
//! - [`scaffold_split`]: whole scaffold groups, largest first, so structurally
//!   rare compounds land in test
//!
//! [`random_split_simple`] is declared for task-level splits that may share
//! compounds between train and test; it is not supported yet.
//!
//! [`split`] dispatches on a [`SplitStrategy`] using a [`SplitConfig`].

mod random;
mod scaffold;

use serde::{Deserialize, Serialize};

pub use random::{random_split, random_split_seeded, random_split_simple, split_rng};
pub use scaffold::{ScaffoldGroup, scaffold_groups, scaffold_split};

use crate::config::SplitConfig;
use crate::dataset::Dataset;
use crate::error::{PrepError, Result};

/// Available split strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Uniform random split over compounds.
    #[default]
    Random,
    /// Random split without entity separation (not supported yet).
    RandomSimple,
    /// Greedy split over scaffold groups.
    Scaffold,
}

/// Split `dataset` with the given strategy.
///
/// `config.seed` drives the random strategies; `config.backfill` only
/// affects [`SplitStrategy::Scaffold`].
pub fn split(dataset: &Dataset, strategy: SplitStrategy, config: &SplitConfig) -> Result<(Dataset, Dataset)> {
    match strategy {
        SplitStrategy::Random => random_split_seeded(dataset, config.frac_train, config.seed),
        SplitStrategy::RandomSimple => random_split_simple(dataset, config.frac_train, config.seed),
        SplitStrategy::Scaffold => scaffold_split(dataset, config.frac_train, config.backfill),
    }
}

/// Check that a train fraction lies strictly between 0 and 1.
pub fn check_frac_train(frac_train: f64) -> Result<()> {
    if frac_train > 0.0 && frac_train < 1.0 {
        Ok(())
    } else {
        Err(PrepError::InvalidArgument(format!(
            "frac_train must be in (0, 1), got {frac_train}"
        )))
    }
}
