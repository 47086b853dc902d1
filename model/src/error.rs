use thiserror::Error;

/// Failures that stop a trail from being animated at all. Absent or empty input is never one of
/// these; that's just a path that's still waiting for data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrailError {
    /// The whole normalization is abandoned. Skipping the record would shift every later point
    /// out of line with its time.
    #[error("malformed location record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl TrailError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        TrailError::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }

    /// The offending record, if this is a `MalformedRecord`
    pub fn record_index(&self) -> Option<usize> {
        match self {
            TrailError::MalformedRecord { index, .. } => Some(*index),
            TrailError::InvalidConfiguration(_) => None,
        }
    }
}

/// Loop lengths, speeds and trail lengths all have to be real numbers; most also have to be
/// positive.
pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), TrailError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrailError::InvalidConfiguration(format!(
            "{name} must be positive, but got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn check_non_negative(name: &str, value: f64) -> Result<(), TrailError> {
    if !value.is_finite() || value < 0.0 {
        return Err(TrailError::InvalidConfiguration(format!(
            "{name} can't be negative, but got {value}"
        )));
    }
    Ok(())
}
