//! Error type shared by every preparation step.

/// Errors raised while building, transforming, splitting or weighting a dataset.
///
/// Every error aborts the operation that raised it; no partially built or
/// partially transformed matrices are ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PrepError {
    #[error("dataset is empty; cannot infer matrix dimensions")]
    EmptyDataset,

    #[error("shape mismatch in `{field}` for compound {id}: expected length {expected}, got {got}")]
    Shape {
        id: String,
        field: &'static str,
        expected: usize,
        got: usize,
    },

    /// Same label count as the first compound, but different target names.
    #[error("target names of compound {id} differ from those of the first compound")]
    InconsistentTargets { id: String },

    #[error("unsupported transform `{transform}` for column {column} (expected log, 1+max-val or normalize)")]
    UnsupportedTransform { transform: String, column: String },

    #[error("log transform of column {column} needs positive values, found {value} at row {row}")]
    Domain { column: String, row: usize, value: f64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("labels must be 0 or 1, found {value} at index {index}")]
    InvalidLabel { index: usize, value: f64 },

    #[error("compound {id} is missing required field `{field}`")]
    MissingField { id: String, field: &'static str },

    #[error("{0} is not supported yet")]
    Unimplemented(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_names_compound_and_field() {
        let err = PrepError::Shape {
            id: "CCO".to_string(),
            field: "feature",
            expected: 4,
            got: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("CCO"));
        assert!(msg.contains("`feature`"));
        assert!(msg.contains("expected length 4, got 3"));
    }

    #[test]
    fn unsupported_transform_names_transform_and_column() {
        let err = PrepError::UnsupportedTransform {
            transform: "sqrt".to_string(),
            column: "assay-1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("`sqrt`"));
        assert!(msg.contains("assay-1"));
    }

    #[test]
    fn error_is_std_error() {
        let err = PrepError::Unimplemented("simple random split");
        let _: &dyn std::error::Error = &err;
        assert_eq!(err.to_string(), "simple random split is not supported yet");
    }
}
