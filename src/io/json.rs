use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::design::optimum::OptimizationResult;
use crate::design::sweep::{DesignSweep, SweepResult};
use crate::error::DesignError;

/// Run summary: configuration echo, grid statistics and the chosen design.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub config: &'a DesignSweep,
    pub density: f64,
    pub spans: usize,
    pub velocities: usize,
    pub feasible_cells: usize,
    pub optimum: &'a OptimizationResult,
}

impl<'a> RunSummary<'a> {
    pub fn new(config: &'a DesignSweep, result: &SweepResult, optimum: &'a OptimizationResult) -> Self {
        let (spans, velocities) = result.grid.shape();
        Self {
            config,
            density: result.density,
            spans,
            velocities,
            feasible_cells: result.feasible_count(),
            optimum,
        }
    }
}

pub fn write_summary<W: Write>(writer: W, summary: &RunSummary) -> Result<(), DesignError> {
    serde_json::to_writer_pretty(writer, summary)?;
    Ok(())
}

pub fn write_summary_file(path: impl AsRef<Path>, summary: &RunSummary) -> Result<(), DesignError> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)?;
    writeln!(file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::aircraft::{presets, MissionProfile};
    use crate::design::grid::{Axis, DesignGrid};
    use crate::design::optimum::Objective;

    #[test]
    fn summary_is_valid_json() {
        let engine = DesignSweep::new(presets::tiltrotor().unwrap(), MissionProfile::default()).unwrap();
        let grid = DesignGrid::new(
            Axis::arange("span", 0.9, 1.3, 0.1).unwrap(),
            Axis::arange("velocity", 20.0, 40.0, 5.0).unwrap(),
        );
        let (result, best) = engine.optimize(&grid, Objective::HoverTime).unwrap();

        let mut buf = Vec::new();
        write_summary(&mut buf, &RunSummary::new(&engine, &result, &best)).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(v["spans"], 4);
        assert_eq!(v["optimum"]["objective"], "hover-time");
        assert_eq!(v["config"]["mission"]["num_props"], 2);
        assert_eq!(v["config"]["aircraft"]["layout"]["OverallSpan"]["overall_span"], 1.85);
        assert!(v["optimum"]["design"]["performance"]["distance_m"].as_f64().unwrap() > 0.0);
    }
}
