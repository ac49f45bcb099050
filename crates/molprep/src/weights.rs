//! Class-imbalance sample weights.

use ndarray::{Array1, ArrayView1};

use crate::error::{PrepError, Result};

/// Per-sample weights for binary labels.
///
/// Negatives (0) get weight 1. Positives (1) get `floor(n_negatives / n_positives)`,
/// so both classes carry roughly the same total weight.
///
/// # Errors
///
/// - [`PrepError::InvalidLabel`] if any entry is not exactly 0 or 1
/// - [`PrepError::InvalidArgument`] if there are no positive labels
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use molprep::weights::labels_to_weights;
///
/// let w = labels_to_weights(array![0.0, 0.0, 0.0, 1.0].view()).unwrap();
/// assert_eq!(w, array![1.0, 1.0, 1.0, 3.0]);
/// ```
pub fn labels_to_weights(ytrue: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
    let mut n_positives = 0usize;
    for (index, &value) in ytrue.iter().enumerate() {
        if value == 1.0 {
            n_positives += 1;
        } else if value != 0.0 {
            return Err(PrepError::InvalidLabel { index, value });
        }
    }
    if n_positives == 0 {
        return Err(PrepError::InvalidArgument(
            "cannot derive weights with zero positive examples".to_string(),
        ));
    }

    let n_negatives = ytrue.len() - n_positives;
    let pos_weight = (n_negatives / n_positives) as f64;
    Ok(ytrue.mapv(|v| if v == 1.0 { pos_weight } else { 1.0 }))
}
