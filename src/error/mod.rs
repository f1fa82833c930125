use thiserror::Error;

/// The ways a quality computation can reject its input.
///
/// Public functions in this crate return `anyhow::Result`; the error inside is
/// always one of these kinds (or an error produced by a caller supplied
/// [`Estimator`](crate::registry::Estimator)), so callers can recover it with
/// `err.downcast_ref::<QualityError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityError {
    /// Shape problems: non-square distance matrices, point counts that differ
    /// between the high and low representation, labels of the wrong length.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A required argument such as `n_neighbors` or one side of the data was
    /// not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(String),

    /// A normalizing denominator evaluated to exactly zero.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// A metric or measure name that is not registered.
    #[error("unknown name: {0}")]
    UnknownName(String),
}

impl QualityError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        QualityError::MalformedInput(msg.into())
    }

    pub fn missing(msg: impl Into<String>) -> Self {
        QualityError::MissingArgument(msg.into())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        QualityError::DegenerateInput(msg.into())
    }
}

/// Returns the [`QualityError`] kind carried by an `anyhow::Error`, if any.
pub fn error_kind(err: &anyhow::Error) -> Option<&QualityError> {
    err.downcast_ref::<QualityError>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_survives_anyhow() {
        let err: anyhow::Error = QualityError::missing("n_neighbors is required").into();
        assert_eq!(
            error_kind(&err),
            Some(&QualityError::MissingArgument("n_neighbors is required".to_string()))
        );
        assert_eq!(err.to_string(), "missing argument: n_neighbors is required");
    }

    #[test]
    fn test_foreign_error_has_no_kind() {
        let err = anyhow::anyhow!("PCA has not been fitted yet");
        assert!(error_kind(&err).is_none());
    }
}
