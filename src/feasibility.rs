use serde::Serialize;

/// Why a grid cell has no usable design.
///
/// Carried by value through the sweep in place of a not-a-number marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Infeasibility {
    /// Spar outer diameter (m) at or below the manufacturing floor.
    SparTooThin { diameter: f64 },
    /// Even the initial wall thickness breaks the strain limit.
    StrainExceeded { strain_pct: f64, wall_thickness: f64 },
    /// No room left for a rotor at this wing span.
    PropTooSmall { diameter: f64 },
    /// Disk loading (kg/m^2) beyond the range the hover-efficiency fit covers.
    HoverOutOfDomain { disk_loading: f64 },
    /// Wing is heavier than the whole battery allowance.
    NoBatteryMass { battery_mass: f64 },
}

impl Infeasibility {
    pub fn label(&self) -> &'static str {
        match self {
            Infeasibility::SparTooThin { .. } => "spar-too-thin",
            Infeasibility::StrainExceeded { .. } => "strain-exceeded",
            Infeasibility::PropTooSmall { .. } => "prop-too-small",
            Infeasibility::HoverOutOfDomain { .. } => "hover-out-of-domain",
            Infeasibility::NoBatteryMass { .. } => "no-battery-mass",
        }
    }
}
