use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::design::sweep::{CellOutcome, SweepResult};
use crate::error::DesignError;

/// One exported grid cell. Performance columns are blank for infeasible cells.
#[derive(Debug, Serialize)]
struct GridRow {
    span: f64,
    velocity: f64,
    status: &'static str,
    wing_mass: Option<f64>,
    aspect_ratio: Option<f64>,
    wing_area: Option<f64>,
    max_strain_pct: Option<f64>,
    wall_thickness: Option<f64>,
    prop_diameter: Option<f64>,
    power_cruise: Option<f64>,
    power_hover: Option<f64>,
    battery_whr: Option<f64>,
    distance_m: Option<f64>,
    hover_duration_min: Option<f64>,
    km_per_cost_unit: Option<f64>,
    wing_loading: Option<f64>,
}

impl GridRow {
    fn new(span: f64, velocity: f64, cell: &CellOutcome) -> Self {
        let p = cell.design();
        let status = match cell {
            CellOutcome::Feasible(_) => "feasible",
            CellOutcome::Infeasible(reason) => reason.label(),
        };
        Self {
            span,
            velocity,
            status,
            wing_mass: p.map(|p| p.wing.mass),
            aspect_ratio: p.map(|p| p.wing.aspect_ratio),
            wing_area: p.map(|p| p.wing.area),
            max_strain_pct: p.map(|p| p.wing.max_strain_pct),
            wall_thickness: p.map(|p| p.wing.wall_thickness),
            prop_diameter: p.map(|p| p.performance.prop_diameter),
            power_cruise: p.map(|p| p.performance.power_cruise),
            power_hover: p.map(|p| p.performance.power_hover),
            battery_whr: p.map(|p| p.performance.battery_whr),
            distance_m: p.map(|p| p.performance.distance_m),
            hover_duration_min: p.map(|p| p.performance.hover_duration_min),
            km_per_cost_unit: p.map(|p| p.performance.km_per_cost_unit),
            wing_loading: p.map(|p| p.performance.wing_loading),
        }
    }
}

/// Write every grid cell, span-major, as one CSV row with a header.
pub fn write_grid<W: Write>(writer: W, result: &SweepResult) -> Result<(), DesignError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let (rows, cols) = result.grid.shape();
    for i in 0..rows {
        for j in 0..cols {
            let (span, vel) = result.grid.coordinates(i, j);
            wtr.serialize(GridRow::new(span, vel, result.cell(i, j)))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_grid_file(path: impl AsRef<Path>, result: &SweepResult) -> Result<(), DesignError> {
    let file = std::fs::File::create(path)?;
    write_grid(file, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::aircraft::{AircraftSpecBuilder, MissionProfile};
    use crate::design::grid::{Axis, DesignGrid};
    use crate::design::sweep::DesignSweep;

    #[test]
    fn one_row_per_cell_with_blank_infeasible_fields() {
        let ac = AircraftSpecBuilder::new().mass(24.95).build().unwrap();
        let grid = DesignGrid::new(
            Axis::from_values("span", vec![1.0, 1.65]).unwrap(),
            Axis::from_values("velocity", vec![20.0, 30.0, 40.0]).unwrap(),
        );
        let result = DesignSweep::new(ac, MissionProfile::default()).unwrap().run(&grid);

        let mut buf = Vec::new();
        write_grid(&mut buf, &result).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("span,velocity,status,wing_mass"));
        assert_eq!(lines.len(), 1 + 6);
        assert!(lines[1].starts_with("1.0,20.0,feasible,"));
        // 1.65 m of wing leaves a 15 mm rotor
        assert!(lines[4].starts_with("1.65,20.0,hover-out-of-domain,,"));
        assert!(lines[4].ends_with(",,"));
    }
}
