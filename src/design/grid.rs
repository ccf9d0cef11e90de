use serde::Serialize;

use crate::error::DesignError;

// ---------------------------------------------------------------------------
// Sweep axis
// ---------------------------------------------------------------------------

/// Largest number of samples one axis may hold.
pub const MAX_AXIS_SAMPLES: usize = 1_000_000;

/// Strictly increasing, strictly positive sample values along one design variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    name: String,
    values: Vec<f64>,
}

impl Axis {
    /// `start, start + step, ...` up to but excluding `stop`.
    pub fn arange(name: &str, start: f64, stop: f64, step: f64) -> Result<Self, DesignError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(DesignError::invalid(name, format!("step must be positive, got {step}")));
        }
        if !(start.is_finite() && stop.is_finite() && start < stop) {
            return Err(DesignError::invalid(
                name,
                format!("empty range {start} .. {stop}"),
            ));
        }
        // tolerance keeps an exact multiple from sprouting an extra sample
        let count = ((stop - start) / step - 1e-9).ceil();
        if count > MAX_AXIS_SAMPLES as f64 {
            return Err(DesignError::invalid(
                name,
                format!("{start} .. {stop} in steps of {step} needs {count:.0} samples, limit is {MAX_AXIS_SAMPLES}"),
            ));
        }
        let count = count as usize;
        let values = (0..count).map(|k| start + k as f64 * step).collect();
        Self::from_values(name, values)
    }

    pub fn from_values(name: &str, values: Vec<f64>) -> Result<Self, DesignError> {
        if values.is_empty() {
            return Err(DesignError::invalid(name, "axis has no values"));
        }
        if let Some(bad) = values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
            return Err(DesignError::invalid(name, format!("values must be positive, got {bad}")));
        }
        if values.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DesignError::invalid(name, "values must be strictly increasing"));
        }
        Ok(Self { name: name.to_string(), values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Span x velocity grid
// ---------------------------------------------------------------------------

/// Cross product of a wing-span axis (rows) and a velocity axis (columns).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignGrid {
    pub spans: Axis,
    pub velocities: Axis,
}

impl DesignGrid {
    pub fn new(spans: Axis, velocities: Axis) -> Self {
        Self { spans, velocities }
    }

    /// (span count, velocity count)
    pub fn shape(&self) -> (usize, usize) {
        (self.spans.len(), self.velocities.len())
    }

    pub fn cell_count(&self) -> usize {
        self.spans.len() * self.velocities.len()
    }

    /// (span, velocity) of cell `(i, j)`.
    pub fn coordinates(&self, i: usize, j: usize) -> (f64, f64) {
        (self.spans.values[i], self.velocities.values[j])
    }

    /// Cell index for position `k` of column-major storage.
    pub fn index_of(&self, k: usize) -> (usize, usize) {
        let rows = self.spans.len();
        (k % rows, k / rows)
    }
}
