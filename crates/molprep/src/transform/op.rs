//! Individual column transforms.

use std::fmt;

use crate::error::{PrepError, Result};
use crate::matrix::ColumnKey;
use crate::utils::mean_std;

/// One step of a per-column transform chain.
///
/// Names as written in configuration: `log`, `1+max-val`, `normalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformOp {
    /// `v → ln(v)`. Every value in the column must be positive.
    Log,
    /// `v → 1 + max(column) − v`. Reverses the ranking so the largest value
    /// becomes 1. The maximum is taken over the whole column, masked rows included.
    OnePlusMax,
    /// Zero mean, unit variance over the selected rows.
    Normalize,
}

impl TransformOp {
    /// Look up a transform by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "log" => Some(Self::Log),
            "1+max-val" => Some(Self::OnePlusMax),
            "normalize" => Some(Self::Normalize),
            _ => None,
        }
    }

    /// Configuration name of the transform.
    pub fn name(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::OnePlusMax => "1+max-val",
            Self::Normalize => "normalize",
        }
    }

    /// Resolve a chain of names for `column`.
    ///
    /// # Errors
    ///
    /// [`PrepError::UnsupportedTransform`] naming the first unknown transform.
    pub fn resolve_chain<S: AsRef<str>>(names: &[S], column: &ColumnKey) -> Result<Vec<Self>> {
        names
            .iter()
            .map(|name| {
                Self::from_name(name.as_ref()).ok_or_else(|| PrepError::UnsupportedTransform {
                    transform: name.as_ref().to_string(),
                    column: column.to_string(),
                })
            })
            .collect()
    }

    /// Apply the transform to one column in place.
    ///
    /// `mask` selects the rows whose statistics `Normalize` uses and which it
    /// rewrites; `None` selects every row. The other transforms ignore it.
    ///
    /// # Errors
    ///
    /// [`PrepError::Domain`] if `Log` meets a value `<= 0` (or NaN). The column
    /// is left unchanged in that case.
    pub fn apply(self, values: &mut [f64], mask: Option<&[bool]>, column: &ColumnKey, index: usize) -> Result<()> {
        match self {
            Self::Log => {
                if let Some((row, &value)) = values.iter().enumerate().find(|(_, v)| !(**v > 0.0)) {
                    return Err(PrepError::Domain {
                        column: column.to_string(),
                        row,
                        value,
                    });
                }
                values.iter_mut().for_each(|v| *v = v.ln());
            }
            Self::OnePlusMax => {
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                values.iter_mut().for_each(|v| *v = 1.0 + max - *v);
            }
            Self::Normalize => normalize(values, mask, column, index),
        }
        Ok(())
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(values: &mut [f64], mask: Option<&[bool]>, column: &ColumnKey, index: usize) {
    let selected = |row: usize| mask.is_none_or(|m| m[row]);

    let stats = mean_std(
        values
            .iter()
            .enumerate()
            .filter(|&(row, _)| selected(row))
            .map(|(_, &v)| v),
    );
    let Some((mean, std)) = stats else {
        log::warn!("normalization skipped for column {index} ({column}): no present labels");
        return;
    };

    if std == 0.0 {
        log::warn!("variance normalization skipped for column {index} ({column}) due to 0 stdev");
    }
    for (row, v) in values.iter_mut().enumerate() {
        if selected(row) {
            *v -= mean;
            if std != 0.0 {
                *v /= std;
            }
        }
    }
}
