//! Design-space explorer for small VTOL tilt-rotor drones.
//!
//! Sweeps wing span against cruise velocity, sizes a carbon spar for every
//! pair, and picks the design that flies furthest (or hovers longest).

pub mod aero;
pub mod constants;
pub mod design;
pub mod error;
pub mod feasibility;
pub mod io;
pub mod propulsion;
pub mod structures;

pub use design::{sweep, AircraftSpec, DesignSweep, Objective, OptimizationResult, SweepResult};
pub use error::DesignError;
pub use feasibility::Infeasibility;
