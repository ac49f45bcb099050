//! Synthetic datasets for tests and benchmarks.

use rand::prelude::*;

use crate::dataset::{Datapoint, Dataset, Label};

/// Shape of a generated dataset.
///
/// Present labels are uniform in `[0.1, 10]`, so every transform (including
/// `log`) accepts them. Descriptors are uniform in `[-5, 5]`. Scaffold sizes
/// are skewed: low-numbered scaffolds are much more common.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDataset {
    pub n_compounds: usize,
    pub n_features: usize,
    pub n_targets: usize,
    /// 0 means no compound carries descriptors.
    pub n_descriptors: usize,
    pub n_scaffolds: usize,
    /// Probability that a single label is missing.
    pub missing_fraction: f64,
}

impl Default for SyntheticDataset {
    fn default() -> Self {
        Self {
            n_compounds: 100,
            n_features: 16,
            n_targets: 3,
            n_descriptors: 0,
            n_scaffolds: 10,
            missing_fraction: 0.2,
        }
    }
}

impl SyntheticDataset {
    /// Target name for column `t`.
    pub fn target_name(t: usize) -> String {
        format!("task-{t}")
    }

    /// Generate the dataset. The same seed always gives the same dataset.
    pub fn generate(&self, seed: u64) -> Dataset {
        assert!(self.n_scaffolds > 0);
        assert!((0.0..1.0).contains(&self.missing_fraction));
        let mut rng = StdRng::seed_from_u64(seed);

        (0..self.n_compounds)
            .map(|i| {
                let feature = (0..self.n_features)
                    .map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 })
                    .collect();
                let mut dp = Datapoint::new(feature);

                for t in 0..self.n_targets {
                    let label = if rng.gen_bool(self.missing_fraction) {
                        Label::Missing
                    } else {
                        Label::Present(rng.gen_range(0.1..=10.0))
                    };
                    dp = dp.with_label(Self::target_name(t), label);
                }

                if self.n_descriptors > 0 {
                    let descriptors = (0..self.n_descriptors).map(|_| rng.gen_range(-5.0..=5.0)).collect();
                    dp = dp.with_descriptors(descriptors);
                }

                let u: f64 = rng.r#gen();
                let scaffold = ((u * u * self.n_scaffolds as f64) as usize).min(self.n_scaffolds - 1);
                dp = dp.with_scaffold(format!("scaffold-{scaffold:03}"));

                (format!("mol-{i:05}"), dp)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let shape = SyntheticDataset {
            n_descriptors: 4,
            ..Default::default()
        };
        let a = shape.generate(7);
        assert_eq!(a, shape.generate(7));
        assert_ne!(a, shape.generate(8));

        assert_eq!(a.len(), 100);
        let (_, first) = a.first().unwrap();
        assert_eq!(first.feature.len(), 16);
        assert_eq!(first.labels.len(), 3);
        assert_eq!(first.descriptors.as_ref().map(Vec::len), Some(4));
        assert!(a.iter().all(|(_, dp)| dp.scaffold.is_some()));
    }

    #[test]
    fn test_present_labels_are_positive() {
        let ds = SyntheticDataset::default().generate(1);
        let labels = ds.iter().flat_map(|(_, dp)| dp.labels.values().copied());
        assert!(labels.filter_map(|l| l.value()).all(|v| v > 0.0));
    }
}
