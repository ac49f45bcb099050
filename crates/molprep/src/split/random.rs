//! Uniform random train/test splits.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::check_frac_train;
use crate::dataset::Dataset;
use crate::error::{PrepError, Result};

/// RNG for a split: seeded when `seed` is given, OS-seeded otherwise.
pub fn split_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Shuffle the compounds with `rng` and put the first
/// `floor(frac_train * n)` into the train set.
///
/// Identifiers are shuffled starting from their sorted order, so the same RNG
/// state and the same dataset always give the same split.
///
/// # Errors
///
/// [`PrepError::InvalidArgument`] if `frac_train` is outside (0, 1).
pub fn random_split<R: Rng + ?Sized>(dataset: &Dataset, frac_train: f64, rng: &mut R) -> Result<(Dataset, Dataset)> {
    check_frac_train(frac_train)?;

    let mut ids: Vec<&str> = dataset.ids().collect();
    ids.shuffle(rng);

    let cutoff = ((frac_train * ids.len() as f64).floor() as usize).min(ids.len());
    let (train_ids, test_ids) = ids.split_at(cutoff);
    log::debug!(
        "random split: {} train / {} test compounds",
        train_ids.len(),
        test_ids.len()
    );

    Ok((
        dataset.subset(train_ids.iter().copied()),
        dataset.subset(test_ids.iter().copied()),
    ))
}

/// [`random_split`] with an RNG from [`split_rng`].
///
/// # Example
///
/// ```
/// use molprep::dataset::{Datapoint, Dataset};
/// use molprep::split::random_split_seeded;
///
/// let ds: Dataset = (0..5)
///     .map(|i| (format!("mol-{i}"), Datapoint::new(vec![i as f64])))
///     .collect();
///
/// let (train, test) = random_split_seeded(&ds, 0.8, Some(42)).unwrap();
/// assert_eq!((train.len(), test.len()), (4, 1));
/// assert_eq!(random_split_seeded(&ds, 0.8, Some(42)).unwrap(), (train, test));
/// ```
pub fn random_split_seeded(dataset: &Dataset, frac_train: f64, seed: Option<u64>) -> Result<(Dataset, Dataset)> {
    random_split(dataset, frac_train, &mut split_rng(seed))
}

/// Random split without separating compounds across tasks.
///
/// Unlike [`random_split`], this would allow one compound to appear in both
/// train and test (for different targets). Not supported yet; always fails.
///
/// # Errors
///
/// [`PrepError::InvalidArgument`] for a bad `frac_train`, otherwise
/// [`PrepError::Unimplemented`].
pub fn random_split_simple(_dataset: &Dataset, frac_train: f64, _seed: Option<u64>) -> Result<(Dataset, Dataset)> {
    check_frac_train(frac_train)?;
    Err(PrepError::Unimplemented("random split without entity separation"))
}
