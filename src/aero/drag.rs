use std::f64::consts::PI;

use serde::Serialize;

use super::atmosphere::dynamic_pressure;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const DYNAMIC_VISCOSITY: f64 = 1.75e-5; // air, Pa·s

/// Chord Reynolds number at which the boundary layer is taken as turbulent.
pub const TRANSITION_REYNOLDS: f64 = 2.0e6;

/// Fuselage drag area (reference area x Cd), m^2.
const BODY_DRAG_AREA: f64 = 0.2 * 0.02;

/// Taper parameter fed to the span-efficiency fit. The wing is always
/// treated as untapered.
const TAPER_RATIO: f64 = 1.0;

// ---------------------------------------------------------------------------
// Skin friction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

impl FlowRegime {
    pub fn from_reynolds(re: f64) -> Self {
        if re < TRANSITION_REYNOLDS {
            FlowRegime::Laminar
        } else {
            FlowRegime::Turbulent
        }
    }
}

/// Re = rho * v * c / mu
pub fn reynolds_number(rho: f64, vel: f64, chord: f64) -> f64 {
    rho * vel * chord / DYNAMIC_VISCOSITY
}

/// Flat-plate skin friction: Blasius (laminar) or 1/7-power (turbulent).
pub fn skin_friction_coefficient(re: f64) -> f64 {
    match FlowRegime::from_reynolds(re) {
        FlowRegime::Laminar => 1.328 / re.sqrt(),
        FlowRegime::Turbulent => 0.027 / re.powf(1.0 / 7.0),
    }
}

/// Skin friction on both wing surfaces.
pub fn parasitic_drag(s: f64, b: f64, vel: f64, rho: f64) -> f64 {
    let q = dynamic_pressure(rho, vel);
    let re = reynolds_number(rho, vel, s / b);
    2.0 * q * skin_friction_coefficient(re) * s
}

// ---------------------------------------------------------------------------
// Lift-dependent drag
// ---------------------------------------------------------------------------

/// Empirical quartic fit of the span-efficiency penalty against taper.
pub fn span_efficiency_factor(gamma: f64) -> f64 {
    0.0524 * gamma.powi(4) - 0.15 * gamma.powi(3) + 0.1659 * gamma.powi(2) - 0.0706 * gamma
        + 0.0119
}

/// Oswald efficiency e = 1 / (1 + f(gamma) * AR)
pub fn oswald_efficiency(aspect_ratio: f64) -> f64 {
    1.0 / (1.0 + span_efficiency_factor(TAPER_RATIO) * aspect_ratio)
}

/// Profile plus induced drag: Cd = Cd0 + Cl^2 / (pi * AR * e)
pub fn induced_drag(s: f64, b: f64, cl: f64, cd0: f64, vel: f64, rho: f64) -> f64 {
    let q = dynamic_pressure(rho, vel);
    let ar = b * b / s;
    let cd = cd0 + cl * cl / (PI * ar * oswald_efficiency(ar));
    q * cd * s
}

pub fn body_drag(vel: f64, rho: f64) -> f64 {
    dynamic_pressure(rho, vel) * BODY_DRAG_AREA
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragBreakdown {
    pub parasitic: f64, // N
    pub induced: f64,   // N
    pub body: f64,      // N
}

impl DragBreakdown {
    pub fn new(s: f64, b: f64, cl: f64, cd0: f64, vel: f64, rho: f64) -> Self {
        Self {
            parasitic: parasitic_drag(s, b, vel, rho),
            induced: induced_drag(s, b, cl, cd0, vel, rho),
            body: body_drag(vel, rho),
        }
    }

    pub fn total(&self) -> f64 {
        self.parasitic + self.induced + self.body
    }
}

pub fn total_drag(s: f64, b: f64, cl: f64, cd0: f64, vel: f64, rho: f64) -> f64 {
    DragBreakdown::new(s, b, cl, cd0, vel, rho).total()
}

/// Power to overcome `drag` at `vel`, W.
pub fn power_at_speed(drag: f64, vel: f64) -> f64 {
    vel * drag
}
