pub mod aircraft;
pub mod grid;
pub mod optimum;
pub mod sweep;

pub use aircraft::{presets, AircraftSpec, AircraftSpecBuilder, BatteryModel, LayoutKind, MissionProfile, PropLayout};
pub use grid::{Axis, DesignGrid};
pub use optimum::{Objective, OptimizationResult};
pub use sweep::{CellOutcome, DesignPoint, DesignSweep, PerformancePoint, SweepResult};

use crate::error::DesignError;

/// Sweep the default velocity range (or `velocities`) over `spans` with the
/// layout's default mission, returning the full result and the best design.
pub fn sweep(
    aircraft: AircraftSpec,
    spans: Option<Axis>,
    velocities: Option<Axis>,
    objective: Objective,
) -> Result<(SweepResult, OptimizationResult), DesignError> {
    let spans = match spans {
        Some(axis) => axis,
        None => aircraft.layout.default_span_axis()?,
    };
    let velocities = match velocities {
        Some(axis) => axis,
        None => aircraft::default_velocity_axis()?,
    };
    DesignSweep::new(aircraft, MissionProfile::for_layout(&aircraft.layout))?
        .optimize(&DesignGrid::new(spans, velocities), objective)
}
