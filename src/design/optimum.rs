use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use crate::error::DesignError;
use super::sweep::{DesignPoint, SweepResult};

/// Share of the best value a design may give up and still count as near-optimal.
pub const NEAR_OPTIMAL_TOLERANCE: f64 = 0.02;

/// Quantity the sweep maximizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Objective {
    /// Cruise distance, m
    Range,
    /// Hover minutes on the energy left after reserves
    #[value(name = "hover", alias = "hover-time")]
    HoverTime,
    /// Kilometres flown per currency unit of charge
    #[value(name = "cost", alias = "cost-efficiency")]
    CostEfficiency,
}

impl Objective {
    pub fn value(&self, point: &DesignPoint) -> f64 {
        let perf = &point.performance;
        match self {
            Objective::Range => perf.distance_m,
            Objective::HoverTime => perf.hover_duration_min,
            Objective::CostEfficiency => perf.km_per_cost_unit,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Objective::Range => "range",
            Objective::HoverTime => "hover time",
            Objective::CostEfficiency => "cost efficiency",
        }
    }
}

/// Best feasible cell for one objective.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub objective: Objective,
    pub index: (usize, usize), // (span index, velocity index)
    pub value: f64,
    pub design: DesignPoint,
    /// Cells within `NEAR_OPTIMAL_TOLERANCE` of the best, in grid order.
    pub near_optimal: Vec<(usize, usize)>,
}

impl SweepResult {
    /// Arg-max of `objective` over the feasible cells.
    ///
    /// Ties keep the first cell in (span, velocity) order. Cells whose
    /// objective is not finite are skipped.
    pub fn optimum(&self, objective: Objective) -> Result<OptimizationResult, DesignError> {
        let mut best: Option<((usize, usize), f64, &DesignPoint)> = None;
        for (idx, point) in self.feasible() {
            let value = objective.value(point);
            if !value.is_finite() {
                continue;
            }
            if best.map_or(true, |(_, v, _)| value > v) {
                best = Some((idx, value, point));
            }
        }

        let Some((index, value, design)) = best else {
            let (spans, velocities) = self.grid.shape();
            return Err(DesignError::EmptyFeasibleSet { spans, velocities });
        };

        let threshold = value - NEAR_OPTIMAL_TOLERANCE * value.abs();
        let near_optimal: Vec<(usize, usize)> = self
            .feasible()
            .filter(|(_, p)| objective.value(p) >= threshold)
            .map(|(idx, _)| idx)
            .collect();

        debug!(
            objective = objective.label(),
            span = design.span,
            velocity = design.velocity,
            value,
            near_optimal = near_optimal.len(),
            "optimum selected"
        );

        Ok(OptimizationResult {
            objective,
            index,
            value,
            design: *design,
            near_optimal,
        })
    }
}
