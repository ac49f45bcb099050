//! Preparation and split configuration with builder pattern.
//!
//! [`PrepConfig`] controls matrix building and label transforms;
//! [`SplitConfig`] controls train/test splitting. Both use the `bon` crate
//! for builder generation and validate at `build()`. Both also derive serde
//! traits, so they can be read from JSON or any other serde format; call
//! `validate()` on deserialized values.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use molprep::config::{PrepConfig, SplitConfig};
//!
//! let prep = PrepConfig::builder()
//!     .task_transforms(BTreeMap::from([(
//!         "solubility".to_string(),
//!         vec!["log".to_string(), "normalize".to_string()],
//!     )]))
//!     .add_descriptors(true)
//!     .build()
//!     .unwrap();
//! assert_eq!(prep.desc_weight, 0.5);
//!
//! let split = SplitConfig::builder().frac_train(0.9).seed(7).build().unwrap();
//! assert_eq!(split.seed, Some(7));
//!
//! assert!(SplitConfig::builder().frac_train(1.0).build().is_err());
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};
use crate::matrix::DEFAULT_DESC_WEIGHT;
use crate::split::check_frac_train;
use crate::transform::default_descriptor_transforms;

// =============================================================================
// PrepConfig
// =============================================================================

/// Configuration for building and transforming matrices.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(derive(Clone, Debug), finish_fn(vis = "", name = __build_internal))]
#[serde(default)]
pub struct PrepConfig {
    /// Target name → ordered transform names. Targets not listed are left as-is.
    #[builder(default)]
    pub task_transforms: BTreeMap<String, Vec<String>>,

    /// Descriptor index → ordered transform names. Only used when
    /// `add_descriptors` is set. Default: `normalize` for the first 157.
    #[builder(default = default_descriptor_transforms())]
    pub desc_transforms: BTreeMap<usize, Vec<String>>,

    /// Append descriptors to `y` as extra tasks. Default: `false`.
    #[builder(default)]
    pub add_descriptors: bool,

    /// Weight of descriptor columns in `W`. Default: 0.5.
    #[builder(default = DEFAULT_DESC_WEIGHT)]
    pub desc_weight: f64,

    /// Number of threads for column transforms. `None` uses all available cores.
    pub n_threads: Option<NonZeroUsize>,
}

impl<S: prep_config_builder::IsComplete> PrepConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// [`PrepError::InvalidArgument`] if `desc_weight` is not a positive finite number.
    pub fn build(self) -> Result<PrepConfig> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

impl PrepConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.desc_weight.is_finite() && self.desc_weight > 0.0) {
            return Err(PrepError::InvalidArgument(format!(
                "desc_weight must be positive and finite, got {}",
                self.desc_weight
            )));
        }
        Ok(())
    }
}

// =============================================================================
// SplitConfig
// =============================================================================

/// Configuration for train/test splitting.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(derive(Clone, Debug), finish_fn(vis = "", name = __build_internal))]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of compounds in the train set, strictly between 0 and 1. Default: 0.8.
    #[builder(default = 0.8)]
    pub frac_train: f64,

    /// Seed for random splits. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,

    /// Scaffold split only: keep testing smaller scaffolds against the train
    /// budget after the first one that does not fit. Default: `false`.
    #[builder(default)]
    pub backfill: bool,
}

impl<S: split_config_builder::IsComplete> SplitConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// [`PrepError::InvalidArgument`] if `frac_train` is outside (0, 1).
    pub fn build(self) -> Result<SplitConfig> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

impl SplitConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        check_frac_train(self.frac_train)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_prep_defaults() {
        let config = PrepConfig::default();
        assert!(config.task_transforms.is_empty());
        assert_eq!(config.desc_transforms.len(), 157);
        assert!(!config.add_descriptors);
        assert_eq!(config.desc_weight, 0.5);
        assert!(config.n_threads.is_none());
        assert_eq!(PrepConfig::builder().build().unwrap(), config);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_prep_rejects_bad_desc_weight(#[case] weight: f64) {
        let err = PrepConfig::builder().desc_weight(weight).build().unwrap_err();
        assert!(matches!(err, PrepError::InvalidArgument(_)));
    }

    #[test]
    fn test_split_defaults() {
        let config = SplitConfig::default();
        assert_eq!(config.frac_train, 0.8);
        assert_eq!(config.seed, None);
        assert!(!config.backfill);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(1.5)]
    #[case(-0.2)]
    #[case(f64::NAN)]
    fn test_split_rejects_bad_fraction(#[case] frac: f64) {
        let err = SplitConfig::builder().frac_train(frac).build().unwrap_err();
        assert!(matches!(err, PrepError::InvalidArgument(_)));
    }

    #[test]
    fn test_configs_from_json() {
        let prep: PrepConfig = serde_json::from_str(
            r#"{
                "task_transforms": {"ic50": ["log", "1+max-val", "normalize"]},
                "desc_transforms": {"0": ["normalize"], "3": []},
                "add_descriptors": true
            }"#,
        )
        .unwrap();
        prep.validate().unwrap();
        assert_eq!(prep.task_transforms["ic50"].len(), 3);
        assert_eq!(prep.desc_transforms.len(), 2);
        assert_eq!(prep.desc_weight, 0.5);

        let split: SplitConfig = serde_json::from_str(r#"{"frac_train": 0.7, "seed": 42}"#).unwrap();
        assert_eq!(split.frac_train, 0.7);
        assert_eq!(split.seed, Some(42));
        assert!(!split.backfill);
    }
}
