use clap::ValueEnum;
use serde::Serialize;
use tracing::warn;

use crate::constants::MAX_TAKEOFF_MASS;
use crate::error::{require_positive, DesignError};
use super::grid::Axis;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fraction of the overall span left for wing + rotors (fuselage takes the rest).
const USABLE_SPAN_FRACTION: f64 = 0.9;
/// Fuselage width between the wing roots, m.
const BODY_DIAMETER: f64 = 0.125;
/// Section lift coefficients are stored at 95 % of the wing value.
const SECTION_TO_WING_CL: f64 = 0.95;

/// Number of positional fields in an input vector.
pub const INPUT_FIELDS: usize = 7;

const INPUT_NAMES: [&str; INPUT_FIELDS] = [
    "mass",
    "span_or_prop_diameter",
    "cl_max",
    "cl_cruise",
    "cd0",
    "cm",
    "tc",
];

// ---------------------------------------------------------------------------
// Rotor layout
// ---------------------------------------------------------------------------

/// How the rotors share the airframe width with the wing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PropLayout {
    /// Tip-to-tip width is fixed; each rotor gets what the wing leaves over.
    OverallSpan { overall_span: f64 },
    /// Rotor size is fixed; the airframe grows with the wing.
    PropDiameter { prop_diameter: f64 },
}

/// Which meaning index 1 of an input vector carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutKind {
    OverallSpan,
    PropDiameter,
}

impl PropLayout {
    pub fn from_kind(kind: LayoutKind, value: f64) -> Self {
        match kind {
            LayoutKind::OverallSpan => PropLayout::OverallSpan { overall_span: value },
            LayoutKind::PropDiameter => PropLayout::PropDiameter { prop_diameter: value },
        }
    }

    pub fn prop_diameter(&self, wing_span: f64) -> f64 {
        match *self {
            PropLayout::OverallSpan { overall_span } => {
                USABLE_SPAN_FRACTION * overall_span - wing_span
            }
            PropLayout::PropDiameter { prop_diameter } => prop_diameter,
        }
    }

    /// Tip-to-tip width of the aircraft.
    pub fn overall_span(&self, wing_span: f64) -> f64 {
        match *self {
            PropLayout::OverallSpan { overall_span } => overall_span,
            PropLayout::PropDiameter { prop_diameter } => {
                wing_span + BODY_DIAMETER + prop_diameter
            }
        }
    }

    /// Span sweep used when the caller gives none.
    pub fn default_span_axis(&self) -> Result<Axis, DesignError> {
        match *self {
            PropLayout::OverallSpan { overall_span } => {
                let usable = USABLE_SPAN_FRACTION * overall_span;
                Axis::arange("span", 0.5 * usable, usable, 0.01)
            }
            PropLayout::PropDiameter { prop_diameter } => {
                Axis::arange("span", prop_diameter, 8.0 * prop_diameter, 0.05)
            }
        }
    }

    fn dimension(&self) -> (&'static str, f64) {
        match *self {
            PropLayout::OverallSpan { overall_span } => ("overall_span", overall_span),
            PropLayout::PropDiameter { prop_diameter } => ("prop_diameter", prop_diameter),
        }
    }
}

/// Velocity sweep used when the caller gives none, m/s.
pub fn default_velocity_axis() -> Result<Axis, DesignError> {
    Axis::arange("velocity", 15.0, 45.1, 0.25)
}

// ---------------------------------------------------------------------------
// Aircraft
// ---------------------------------------------------------------------------

/// Immutable aircraft definition for one design run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AircraftSpec {
    pub mass: f64, // kg, at most MAX_TAKEOFF_MASS
    pub layout: PropLayout,
    pub cl_max: f64,
    pub cl_cruise: f64,
    pub cd0: f64,
    pub cm: f64,
    pub tc: f64, // airfoil thickness / chord
}

impl AircraftSpec {
    /// Build from the positional input vector
    /// `[mass, span|prop, Cl_max*0.95, Cl_cruise*0.95, Cd0, Cm, t/c]`.
    pub fn from_inputs(values: &[f64], kind: LayoutKind) -> Result<Self, DesignError> {
        if values.len() != INPUT_FIELDS {
            return Err(DesignError::invalid(
                "inputs",
                format!("expected {} numeric fields, got {}", INPUT_FIELDS, values.len()),
            ));
        }
        for (name, v) in INPUT_NAMES.iter().zip(values) {
            if !v.is_finite() {
                return Err(DesignError::invalid(*name, format!("not a finite number: {v}")));
            }
        }

        AircraftSpecBuilder::new()
            .mass(values[0])
            .layout(PropLayout::from_kind(kind, values[1]))
            .cl_max(values[2] / SECTION_TO_WING_CL)
            .cl_cruise(values[3] / SECTION_TO_WING_CL)
            .cd0(values[4])
            .cm(values[5])
            .tc(values[6])
            .build()
    }

    /// Stall speed on the clean wing, m/s.
    pub fn stall_speed(&self, rho: f64, wing_area: f64) -> f64 {
        (2.0 * self.mass * crate::constants::GRAVITY / (rho * wing_area * self.cl_max)).sqrt()
    }
}

// ---------------------------------------------------------------------------
// Aircraft builder
// ---------------------------------------------------------------------------

pub struct AircraftSpecBuilder {
    mass: f64,
    layout: PropLayout,
    cl_max: f64,
    cl_cruise: f64,
    cd0: f64,
    cm: f64,
    tc: f64,
}

impl Default for AircraftSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AircraftSpecBuilder {
    pub fn new() -> Self {
        Self {
            mass: 16.0,
            layout: PropLayout::OverallSpan { overall_span: 1.85 },
            cl_max: 1.55,
            cl_cruise: 1.1 / SECTION_TO_WING_CL,
            cd0: 0.02,
            cm: 0.03,
            tc: 0.14,
        }
    }

    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn layout(mut self, v: PropLayout) -> Self { self.layout = v; self }
    pub fn cl_max(mut self, v: f64) -> Self { self.cl_max = v; self }
    pub fn cl_cruise(mut self, v: f64) -> Self { self.cl_cruise = v; self }
    pub fn cd0(mut self, v: f64) -> Self { self.cd0 = v; self }
    pub fn cm(mut self, v: f64) -> Self { self.cm = v; self }
    pub fn tc(mut self, v: f64) -> Self { self.tc = v; self }

    /// Validate and clamp the mass to the regulatory limit.
    pub fn build(self) -> Result<AircraftSpec, DesignError> {
        let mut mass = require_positive("mass", self.mass)?;
        if mass > MAX_TAKEOFF_MASS {
            warn!(requested = mass, limit = MAX_TAKEOFF_MASS, "aircraft mass clamped to regulatory limit");
            mass = MAX_TAKEOFF_MASS;
        }
        let (name, dimension) = self.layout.dimension();
        require_positive(name, dimension)?;
        require_positive("cl_max", self.cl_max)?;
        require_positive("cl_cruise", self.cl_cruise)?;
        require_positive("tc", self.tc)?;
        if !(self.cd0.is_finite() && self.cd0 >= 0.0) {
            return Err(DesignError::invalid("cd0", format!("must be finite and non-negative, got {}", self.cd0)));
        }
        if !self.cm.is_finite() {
            return Err(DesignError::invalid("cm", format!("not a finite number: {}", self.cm)));
        }

        Ok(AircraftSpec {
            mass,
            layout: self.layout,
            cl_max: self.cl_max,
            cl_cruise: self.cl_cruise,
            cd0: self.cd0,
            cm: self.cm,
            tc: self.tc,
        })
    }
}

// ---------------------------------------------------------------------------
// Mission and battery
// ---------------------------------------------------------------------------

/// Energy the battery must hold back before cruise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MissionProfile {
    pub num_props: u32,
    pub takeoff_cycles: u32,    // vertical take-off + landing pairs
    pub hover_reserve_min: f64, // minutes of hover kept in reserve
}

impl Default for MissionProfile {
    fn default() -> Self {
        Self {
            num_props: 2,
            takeoff_cycles: 1,
            hover_reserve_min: 5.0,
        }
    }
}

impl MissionProfile {
    /// Defaults per layout. Fixed-rotor airframes budget only the vertical
    /// take-off and landing, without a hover reserve.
    pub fn for_layout(layout: &PropLayout) -> Self {
        match layout {
            PropLayout::OverallSpan { .. } => Self::default(),
            PropLayout::PropDiameter { .. } => Self { hover_reserve_min: 0.0, ..Self::default() },
        }
    }

    pub fn validate(&self) -> Result<(), DesignError> {
        if self.num_props == 0 {
            return Err(DesignError::invalid("num_props", "at least one rotor is required"));
        }
        if !(self.hover_reserve_min.is_finite() && self.hover_reserve_min >= 0.0) {
            return Err(DesignError::invalid(
                "hover_reserve_min",
                format!("must be finite and non-negative, got {}", self.hover_reserve_min),
            ));
        }
        Ok(())
    }
}

/// Battery sizing by mass fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryModel {
    pub mass_fraction: f64,   // battery + wing share of take-off mass
    pub specific_energy: f64, // Whr/kg
    pub whr_per_cost_unit: f64,
    pub electricity_price: f64, // per kWh
}

impl Default for BatteryModel {
    fn default() -> Self {
        Self {
            mass_fraction: 0.35,
            specific_energy: 120.0,
            whr_per_cost_unit: 1.56,
            electricity_price: 0.21,
        }
    }
}

impl BatteryModel {
    /// Whatever the wing leaves of the mass allowance, kg.
    pub fn battery_mass(&self, ac_mass: f64, wing_mass: f64) -> f64 {
        self.mass_fraction * ac_mass - wing_mass
    }

    pub fn capacity_whr(&self, battery_mass: f64) -> f64 {
        self.specific_energy * battery_mass
    }

    pub fn cost(&self, capacity_whr: f64) -> f64 {
        capacity_whr / self.whr_per_cost_unit
    }

    /// Distance flown per unit spent on electricity to charge the pack.
    pub fn km_per_cost_unit(&self, distance_km: f64, capacity_whr: f64) -> f64 {
        distance_km / capacity_whr * 1000.0 / self.electricity_price
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// 1.85 m tilt-rotor, 16 kg, NACA 25112 section.
    pub fn tiltrotor() -> Result<AircraftSpec, DesignError> {
        AircraftSpecBuilder::new().build()
    }

    /// Heaviest legal airframe on 0.4 m rotors.
    pub fn heavy_lifter() -> Result<AircraftSpec, DesignError> {
        AircraftSpecBuilder::new()
            .mass(MAX_TAKEOFF_MASS)
            .layout(PropLayout::PropDiameter { prop_diameter: 0.4 })
            .build()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
