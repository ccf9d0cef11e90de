use serde::Serialize;

use crate::error::{require_positive, DesignError};

// ---------------------------------------------------------------------------
// Ambient air at the operating site
// ---------------------------------------------------------------------------

const R_AIR: f64 = 287.058; // specific gas constant for dry air, J/(kg·K)
const CELSIUS_OFFSET: f64 = 273.0;

/// Air pressure and temperature for one design run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirState {
    pub pressure: f64,      // Pa
    pub temperature_c: f64, // °C
}

impl Default for AirState {
    /// Warm day near sea level.
    fn default() -> Self {
        Self {
            pressure: 101_000.0,
            temperature_c: 25.0,
        }
    }
}

impl AirState {
    /// Site conditions from pressure (Pa) and temperature (°C).
    pub fn new(pressure: f64, temperature_c: f64) -> Result<Self, DesignError> {
        require_positive("pressure", pressure)?;
        if !temperature_c.is_finite() {
            return Err(DesignError::invalid("temperature", format!("not a finite number: {temperature_c}")));
        }
        let air = Self { pressure, temperature_c };
        require_positive("temperature", air.temperature_k())?;
        Ok(air)
    }

    pub fn temperature_k(&self) -> f64 {
        self.temperature_c + CELSIUS_OFFSET
    }

    /// Ideal gas density, kg/m^3.
    pub fn density(&self) -> f64 {
        self.pressure / (R_AIR * self.temperature_k())
    }
}

/// q = 1/2 * rho * v^2
pub fn dynamic_pressure(rho: f64, vel: f64) -> f64 {
    0.5 * rho * vel * vel
}

/// Speed that produces dynamic pressure `q`.
pub fn velocity_from_dynamic_pressure(rho: f64, q: f64) -> f64 {
    (2.0 * q / rho).sqrt()
}
