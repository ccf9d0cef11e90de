use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::aero::atmosphere::{dynamic_pressure, AirState};
use crate::aero::drag::{power_at_speed, DragBreakdown};
use crate::error::DesignError;
use crate::feasibility::Infeasibility;
use crate::propulsion::hover::{energy_hover, HoverModel};
use crate::structures::wing::{WingDesign, WingSizer, WingSizing};
use super::aircraft::{AircraftSpec, BatteryModel, MissionProfile};
use super::grid::DesignGrid;
use super::optimum::{Objective, OptimizationResult};

// ---------------------------------------------------------------------------
// Per-cell results
// ---------------------------------------------------------------------------

/// Energy and endurance figures for one sized design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformancePoint {
    pub power_cruise: f64,       // W
    pub power_hover: f64,        // W
    pub reserve_whr: f64,        // take-off/landing cycles + hover reserve
    pub battery_mass: f64,       // kg
    pub battery_whr: f64,        // installed capacity
    pub battery_cost: f64,
    pub remaining_whr: f64,      // available for cruise
    pub cruise_duration_s: f64,
    pub distance_m: f64,
    pub hover_duration_min: f64, // hovering on the remaining energy
    pub km_per_cost_unit: f64,
    pub prop_diameter: f64,      // m
    pub overall_span: f64,       // m
    pub wing_loading: f64,       // kg/m^2
}

/// Everything known about one feasible grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignPoint {
    pub span: f64,             // m
    pub velocity: f64,         // m/s
    pub dynamic_pressure: f64, // Pa
    pub wing: WingDesign,
    pub drag: DragBreakdown,
    pub performance: PerformancePoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellOutcome {
    Feasible(DesignPoint),
    Infeasible(Infeasibility),
}

impl CellOutcome {
    pub fn design(&self) -> Option<&DesignPoint> {
        match self {
            CellOutcome::Feasible(p) => Some(p),
            CellOutcome::Infeasible(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sweep engine
// ---------------------------------------------------------------------------

/// Evaluates every (span, velocity) pair of a grid for one aircraft.
///
/// Cells are independent; `run` spreads them over the rayon pool and
/// collects them back in grid order, so the result matches `run_sequential`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSweep {
    pub aircraft: AircraftSpec,
    pub mission: MissionProfile,
    pub air: AirState,
    pub sizer: WingSizer,
    pub hover: HoverModel,
    pub battery: BatteryModel,
}

impl DesignSweep {
    pub fn new(aircraft: AircraftSpec, mission: MissionProfile) -> Result<Self, DesignError> {
        mission.validate()?;
        Ok(Self {
            aircraft,
            mission,
            air: AirState::default(),
            sizer: WingSizer::default(),
            hover: HoverModel::default(),
            battery: BatteryModel::default(),
        })
    }

    pub fn with_air(mut self, air: AirState) -> Self {
        self.air = air;
        self
    }

    pub fn density(&self) -> f64 {
        self.air.density()
    }

    /// Size and fly one design.
    pub fn evaluate(&self, span: f64, velocity: f64) -> CellOutcome {
        match self.evaluate_point(span, velocity) {
            Ok(point) => CellOutcome::Feasible(point),
            Err(reason) => CellOutcome::Infeasible(reason),
        }
    }

    fn evaluate_point(&self, span: f64, velocity: f64) -> Result<DesignPoint, Infeasibility> {
        let ac = &self.aircraft;
        let rho = self.density();
        let q = dynamic_pressure(rho, velocity);

        let wing = match self.sizer.size(ac.mass, span, q, ac.cl_cruise, ac.cm, ac.tc) {
            WingSizing::Feasible(w) => w,
            WingSizing::Infeasible { reason, .. } => return Err(reason),
        };

        let prop_diameter = ac.layout.prop_diameter(span);
        let power_hover = self.hover.power_hover(ac.mass, prop_diameter, self.mission.num_props)?;

        let drag = DragBreakdown::new(wing.area, span, ac.cl_cruise, ac.cd0, velocity, rho);
        let power_cruise = power_at_speed(drag.total(), velocity);

        let takeoff_whr = self.hover.energy_takeoff(power_hover, wing.area, rho);
        let reserve_whr = self.mission.takeoff_cycles as f64 * takeoff_whr
            + energy_hover(self.mission.hover_reserve_min, power_hover);

        let battery_mass = self.battery.battery_mass(ac.mass, wing.mass);
        if battery_mass <= 0.0 {
            return Err(Infeasibility::NoBatteryMass { battery_mass });
        }
        let battery_whr = self.battery.capacity_whr(battery_mass);
        let remaining_whr = battery_whr - reserve_whr;

        let cruise_duration_s = remaining_whr * 3600.0 / power_cruise;
        let distance_m = velocity * cruise_duration_s;

        Ok(DesignPoint {
            span,
            velocity,
            dynamic_pressure: q,
            wing,
            drag,
            performance: PerformancePoint {
                power_cruise,
                power_hover,
                reserve_whr,
                battery_mass,
                battery_whr,
                battery_cost: self.battery.cost(battery_whr),
                remaining_whr,
                cruise_duration_s,
                distance_m,
                hover_duration_min: remaining_whr / power_hover * 60.0,
                km_per_cost_unit: self.battery.km_per_cost_unit(distance_m / 1000.0, battery_whr),
                prop_diameter,
                overall_span: ac.layout.overall_span(span),
                wing_loading: ac.mass / wing.area,
            },
        })
    }

    /// Evaluate the whole grid across worker threads.
    pub fn run(&self, grid: &DesignGrid) -> SweepResult {
        info!(spans = grid.spans.len(), velocities = grid.velocities.len(), "sweeping design grid");
        let cells: Vec<CellOutcome> = (0..grid.cell_count())
            .into_par_iter()
            .map(|k| {
                let (i, j) = grid.index_of(k);
                let (span, vel) = grid.coordinates(i, j);
                self.evaluate(span, vel)
            })
            .collect();
        self.finish(grid, cells)
    }

    /// Same as `run`, on the calling thread.
    pub fn run_sequential(&self, grid: &DesignGrid) -> SweepResult {
        let cells: Vec<CellOutcome> = (0..grid.cell_count())
            .map(|k| {
                let (i, j) = grid.index_of(k);
                let (span, vel) = grid.coordinates(i, j);
                self.evaluate(span, vel)
            })
            .collect();
        self.finish(grid, cells)
    }

    fn finish(&self, grid: &DesignGrid, cells: Vec<CellOutcome>) -> SweepResult {
        let (rows, cols) = grid.shape();
        let result = SweepResult {
            grid: grid.clone(),
            cells: DMatrix::from_vec(rows, cols, cells),
            density: self.density(),
        };
        info!(
            feasible = result.feasible_count(),
            total = grid.cell_count(),
            "sweep complete"
        );
        result
    }

    /// Sweep `grid` and pick the best design for `objective`.
    pub fn optimize(
        &self,
        grid: &DesignGrid,
        objective: Objective,
    ) -> Result<(SweepResult, OptimizationResult), DesignError> {
        let sweep = self.run(grid);
        let best = sweep.optimum(objective)?;
        Ok((sweep, best))
    }
}

// ---------------------------------------------------------------------------
// Sweep result
// ---------------------------------------------------------------------------

/// Grid of cell outcomes, indexed `(span_index, velocity_index)`.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub grid: DesignGrid,
    pub cells: DMatrix<CellOutcome>,
    pub density: f64, // kg/m^3
}

impl SweepResult {
    pub fn cell(&self, i: usize, j: usize) -> &CellOutcome {
        &self.cells[(i, j)]
    }

    /// Feasible cells in (span, velocity) order.
    pub fn feasible(&self) -> impl Iterator<Item = ((usize, usize), &DesignPoint)> + '_ {
        let (rows, cols) = self.grid.shape();
        (0..rows)
            .flat_map(move |i| (0..cols).map(move |j| (i, j)))
            .filter_map(move |(i, j)| self.cells[(i, j)].design().map(|p| ((i, j), p)))
    }

    pub fn feasible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.design().is_some()).count()
    }

    /// Scalar field for plotting and export; infeasible cells become NaN.
    pub fn field<F>(&self, f: F) -> DMatrix<f64>
    where
        F: Fn(&DesignPoint) -> f64,
    {
        self.cells.map(|c| c.design().map_or(f64::NAN, &f))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::design::aircraft::AircraftSpecBuilder;
    use crate::design::grid::Axis;

    fn engine() -> DesignSweep {
        let ac = AircraftSpecBuilder::new().mass(24.95).build().unwrap();
        DesignSweep::new(ac, MissionProfile::default()).unwrap()
    }

    fn small_grid() -> DesignGrid {
        DesignGrid::new(
            Axis::arange("span", 0.85, 1.45, 0.1).unwrap(),
            Axis::arange("velocity", 15.0, 45.0, 5.0).unwrap(),
        )
    }

    #[test]
    fn feasible_cell_energy_bookkeeping() {
        let e = engine();
        let CellOutcome::Feasible(p) = e.evaluate(0.9, 30.0) else {
            panic!("expected a feasible design");
        };
        let perf = &p.performance;
        assert_relative_eq!(perf.battery_mass, 0.35 * 24.95 - p.wing.mass, max_relative = 1e-12);
        assert_relative_eq!(perf.battery_whr, 120.0 * perf.battery_mass, max_relative = 1e-12);
        assert_relative_eq!(perf.remaining_whr, perf.battery_whr - perf.reserve_whr, max_relative = 1e-12);
        assert_relative_eq!(perf.distance_m, 30.0 * perf.cruise_duration_s, max_relative = 1e-12);
        assert_relative_eq!(perf.prop_diameter, 0.9 * 1.85 - 0.9, max_relative = 1e-12);
        assert!(perf.distance_m > 0.0);
        assert!(perf.hover_duration_min > 0.0);
    }

    #[test]
    fn thinner_air_needs_more_wing() {
        let air = AirState::new(80_000.0, 25.0).unwrap();
        let sea = engine();
        let high = engine().with_air(air);
        assert_relative_eq!(high.run(&small_grid()).density, air.density());

        let (CellOutcome::Feasible(a), CellOutcome::Feasible(b)) = (sea.evaluate(0.9, 30.0), high.evaluate(0.9, 30.0)) else {
            panic!("expected feasible designs");
        };
        assert!(b.wing.area > a.wing.area);
        assert_relative_eq!(b.wing.area / a.wing.area, 101_000.0 / 80_000.0, max_relative = 1e-12);
    }

    #[test]
    fn rotorless_span_is_infeasible() {
        // wing fills the whole usable span
        let e = engine();
        assert!(matches!(
            e.evaluate(0.9 * 1.85, 30.0),
            CellOutcome::Infeasible(Infeasibility::PropTooSmall { .. })
        ));
    }

    #[test]
    fn structural_failure_masks_cell() {
        let ac = AircraftSpecBuilder::new().mass(24.95).tc(0.001).build().unwrap();
        let e = DesignSweep::new(ac, MissionProfile::default()).unwrap();
        assert!(matches!(
            e.evaluate(1.2, 30.0),
            CellOutcome::Infeasible(Infeasibility::SparTooThin { .. })
        ));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let e = engine();
        let g = small_grid();
        let a = e.run(&g);
        let b = e.run_sequential(&g);
        assert_eq!(a.cells, b.cells);
        assert!(a.feasible_count() > 0);
    }

    #[test]
    fn cells_are_indexed_span_then_velocity() {
        let e = engine();
        let g = small_grid();
        let r = e.run(&g);
        assert_eq!(r.cells.shape(), g.shape());
        for ((i, j), p) in r.feasible() {
            let (span, vel) = g.coordinates(i, j);
            assert_eq!((p.span, p.velocity), (span, vel));
        }
    }

    #[test]
    fn field_marks_infeasible_cells_nan() {
        // the widest wings leave rotors too loaded to hover
        let e = engine();
        let g = DesignGrid::new(
            Axis::arange("span", 1.2, 1.66, 0.05).unwrap(),
            Axis::arange("velocity", 15.0, 45.0, 5.0).unwrap(),
        );
        let r = e.run(&g);
        assert!(r.feasible_count() > 0 && r.feasible_count() < g.cell_count());
        let f = r.field(|p| p.performance.distance_m);
        for i in 0..f.nrows() {
            for j in 0..f.ncols() {
                assert_eq!(f[(i, j)].is_nan(), r.cell(i, j).design().is_none());
            }
        }
    }
}
