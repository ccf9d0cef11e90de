use thiserror::Error;

/// Fatal errors for a design run.
///
/// Infeasible grid cells are not errors; they are carried as
/// [`Infeasibility`](crate::feasibility::Infeasibility) values so the sweep can
/// keep going.
#[derive(Error, Debug)]
pub enum DesignError {
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },
    #[error("no feasible design in the {spans} x {velocities} span/velocity grid")]
    EmptyFeasibleSet { spans: usize, velocities: usize },
    #[error("failed to read or write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

impl DesignError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DesignError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub fn require_positive(field: &str, value: f64) -> Result<f64, DesignError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DesignError::invalid(
            field,
            format!("must be a finite positive number, got {value}"),
        ))
    }
}
