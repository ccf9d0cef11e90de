use serde::Serialize;

use crate::constants::GRAVITY;
use crate::feasibility::Infeasibility;
use super::beam;
use super::section::{bending_strain, torsion_strain, TubeSection};

// ---------------------------------------------------------------------------
// Material and sizing rules
// ---------------------------------------------------------------------------

/// Spar material properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub modulus: f64,       // Pa
    pub shear_modulus: f64, // Pa
    pub density: f64,       // kg/m^3
    pub strain_limit: f64,  // combined strain at failure (fraction)
}

impl Material {
    pub const CARBON_FIBER: Material = Material {
        modulus: 228e9,
        shear_modulus: 10e9,
        density: 1750.0,
        strain_limit: 0.015,
    };
}

impl Default for Material {
    fn default() -> Self {
        Self::CARBON_FIBER
    }
}

/// Design loads and manufacturing limits for the printed wing.
///
/// Wall thickness is counted in whole `wall_step`s so repeated thinning
/// never drifts off the 0.5 mm grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizingRules {
    pub safety_factor: f64,
    pub load_factor: f64,        // FAA manoeuvre limit
    pub shell_thickness: f64,    // printed airfoil skin, m
    pub skin_areal_density: f64, // printed skin, kg/m^2 of planform
    pub min_spar_diameter: f64,  // m
    pub wall_step: f64,          // m
    pub initial_wall_steps: u32,
    pub min_wall_steps: u32,
}

impl Default for SizingRules {
    fn default() -> Self {
        Self {
            safety_factor: 1.5,
            load_factor: 4.4,
            shell_thickness: 0.001,
            skin_areal_density: 2.320,
            min_spar_diameter: 0.005,
            wall_step: 0.0005,
            initial_wall_steps: 5, // 2.5 mm
            min_wall_steps: 2,     // 1.0 mm
        }
    }
}

impl SizingRules {
    pub fn wall_thickness(&self, steps: u32) -> f64 {
        steps as f64 * self.wall_step
    }

    fn ultimate(&self) -> f64 {
        self.safety_factor * self.load_factor
    }
}

// ---------------------------------------------------------------------------
// Planform, loads and results
// ---------------------------------------------------------------------------

/// Rectangular planform sized so the wing carries the aircraft at cruise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Planform {
    pub span: f64,         // m
    pub area: f64,         // m^2
    pub aspect_ratio: f64,
    pub chord: f64,        // m
}

impl Planform {
    /// S = m*g/(Cl*q), AR = b^2/S, c = S/b
    pub fn for_cruise(ac_mass: f64, span: f64, q: f64, cl: f64) -> Self {
        let area = ac_mass * GRAVITY / (cl * q);
        Self {
            span,
            area,
            aspect_ratio: span * span / area,
            chord: area / span,
        }
    }

    pub fn half_span(&self) -> f64 {
        self.span / 2.0
    }
}

/// Ultimate design loads on one half wing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WingLoads {
    pub distributed: f64, // N/m, lift spread over the span
    pub tip: f64,         // N, aircraft lifted by its wing tips
    pub torque: f64,      // N*m, pitching moment of the half wing
    pub half_span: f64,   // m
}

impl WingLoads {
    /// Root bending moment used for sizing (uniform lift distribution).
    pub fn governing_moment(&self) -> f64 {
        beam::max_moment_uniform_load(self.distributed, self.half_span)
    }

    /// Root moment when the aircraft hangs from its wing tips.
    pub fn tip_lift_moment(&self) -> f64 {
        beam::max_moment_point_load(self.tip, self.half_span)
    }
}

/// A sized wing with its spar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WingDesign {
    pub mass: f64,           // kg, spar + printed skin
    pub aspect_ratio: f64,
    pub area: f64,           // m^2
    pub max_strain_pct: f64, // % of the strain limit at the chosen wall
    pub wall_thickness: f64, // m
    pub spar_diameter: f64,  // m
    pub chord: f64,          // m
    pub tip_twist_deg: f64,
    pub tip_deflection: f64, // m
}

/// Outcome of sizing one (span, dynamic pressure) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WingSizing {
    Feasible(WingDesign),
    /// `wall_thickness` is the last wall tried and carries no design meaning.
    Infeasible { reason: Infeasibility, wall_thickness: f64 },
}

impl WingSizing {
    pub fn design(&self) -> Option<&WingDesign> {
        match self {
            WingSizing::Feasible(d) => Some(d),
            WingSizing::Infeasible { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Wall thickness search
// ---------------------------------------------------------------------------

enum WallSearch {
    /// Nothing evaluated yet.
    Searching { steps: u32 },
    /// `steps` passed with `strain_pct`; try one step thinner.
    FeasibleFound { steps: u32, strain_pct: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum WallOutcome {
    Settled { steps: u32, strain_pct: f64 },
    Overstrained { steps: u32, strain_pct: f64 },
}

// ---------------------------------------------------------------------------
// Wing sizer
// ---------------------------------------------------------------------------

/// Finds the lightest carbon spar that keeps the wing under its strain limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WingSizer {
    pub material: Material,
    pub rules: SizingRules,
}

impl WingSizer {
    pub fn new(material: Material, rules: SizingRules) -> Self {
        Self { material, rules }
    }

    /// Size the wing for aircraft mass `ac_mass` (kg), `span` (m), dynamic
    /// pressure `q` (Pa), cruise lift coefficient `cl`, pitching moment
    /// coefficient `cm` and thickness ratio `tc`.
    pub fn size(&self, ac_mass: f64, span: f64, q: f64, cl: f64, cm: f64, tc: f64) -> WingSizing {
        let planform = Planform::for_cruise(ac_mass, span, q, cl);
        let loads = self.loads(ac_mass, &planform, q, cm);

        let diameter = self.spar_diameter(planform.chord, tc);
        if diameter <= self.rules.min_spar_diameter {
            return WingSizing::Infeasible {
                reason: Infeasibility::SparTooThin { diameter },
                wall_thickness: self.rules.wall_thickness(self.rules.initial_wall_steps),
            };
        }

        let (steps, strain_pct) = match self.search_wall(diameter, &loads) {
            WallOutcome::Settled { steps, strain_pct } => (steps, strain_pct),
            WallOutcome::Overstrained { steps, strain_pct } => {
                let wall_thickness = self.rules.wall_thickness(steps);
                return WingSizing::Infeasible {
                    reason: Infeasibility::StrainExceeded { strain_pct, wall_thickness },
                    wall_thickness,
                };
            }
        };

        let wall_thickness = self.rules.wall_thickness(steps);
        let Some(section) = TubeSection::new(diameter, wall_thickness) else {
            return WingSizing::Infeasible {
                reason: Infeasibility::SparTooThin { diameter },
                wall_thickness,
            };
        };

        let spar_mass = self.material.density * section.area() * span;
        let skin_mass = planform.area * self.rules.skin_areal_density;

        WingSizing::Feasible(WingDesign {
            mass: spar_mass + skin_mass,
            aspect_ratio: planform.aspect_ratio,
            area: planform.area,
            max_strain_pct: strain_pct,
            wall_thickness,
            spar_diameter: diameter,
            chord: planform.chord,
            tip_twist_deg: beam::tip_twist_deg(
                loads.torque,
                loads.half_span,
                section.polar_moment(),
                self.material.shear_modulus,
            ),
            tip_deflection: beam::tip_deflection_uniform_load(
                loads.distributed,
                loads.half_span,
                self.material.modulus,
                section.second_moment_of_area(),
            ),
        })
    }

    pub fn loads(&self, ac_mass: f64, planform: &Planform, q: f64, cm: f64) -> WingLoads {
        let weight = ac_mass * GRAVITY;
        WingLoads {
            distributed: weight / planform.span * self.rules.ultimate(),
            tip: weight / 2.0,
            torque: cm * q * planform.area / 2.0 * planform.chord * self.rules.ultimate(),
            half_span: planform.half_span(),
        }
    }

    /// Largest tube that fits inside the printed airfoil, floored to whole mm.
    pub fn spar_diameter(&self, chord: f64, tc: f64) -> f64 {
        let raw = tc * chord - 2.0 * self.rules.shell_thickness;
        (raw * 1000.0).floor() / 1000.0
    }

    /// Combined bending + torsion strain as a percentage of the material limit.
    /// Walls that do not form a tube count as infinitely strained.
    pub fn strain_pct(&self, loads: &WingLoads, diameter: f64, wall_thickness: f64) -> f64 {
        let Some(section) = TubeSection::new(diameter, wall_thickness) else {
            return f64::INFINITY;
        };
        let bending = bending_strain(
            loads.governing_moment(),
            self.material.modulus,
            section.second_moment_of_area(),
            diameter,
        );
        let torsion = torsion_strain(
            loads.torque,
            section.polar_moment(),
            diameter,
            self.material.shear_modulus,
        );
        bending.hypot(torsion) / self.material.strain_limit * 100.0
    }

    /// Thin the wall one step at a time until the next step would break the
    /// strain limit or the minimum wall is reached.
    fn search_wall(&self, diameter: f64, loads: &WingLoads) -> WallOutcome {
        let min_steps = self.rules.min_wall_steps;
        let strain_at = |steps: u32| self.strain_pct(loads, diameter, self.rules.wall_thickness(steps));

        let mut state = WallSearch::Searching { steps: self.rules.initial_wall_steps };
        loop {
            state = match state {
                WallSearch::Searching { steps } => {
                    let strain_pct = strain_at(steps);
                    if strain_pct > 100.0 {
                        return WallOutcome::Overstrained { steps, strain_pct };
                    }
                    if steps <= min_steps {
                        return WallOutcome::Settled { steps, strain_pct };
                    }
                    WallSearch::FeasibleFound { steps, strain_pct }
                }
                WallSearch::FeasibleFound { steps, strain_pct } => {
                    let thinner = steps - 1;
                    let thinner_strain = strain_at(thinner);
                    if thinner_strain > 100.0 {
                        // undo the last thinning
                        return WallOutcome::Settled { steps, strain_pct };
                    }
                    if thinner <= min_steps {
                        return WallOutcome::Settled { steps: thinner, strain_pct: thinner_strain };
                    }
                    WallSearch::FeasibleFound { steps: thinner, strain_pct: thinner_strain }
                }
            };
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MASS: f64 = 24.95;
    const CL: f64 = 1.0;
    const CM: f64 = 0.03;
    const TC: f64 = 0.14;

    /// Dynamic pressure that gives `chord` on a wing of `span`.
    fn q_for_chord(span: f64, chord: f64) -> f64 {
        MASS * GRAVITY / (CL * span * chord)
    }

    fn assert_all_finite(d: &WingDesign) {
        for v in [d.mass, d.aspect_ratio, d.area, d.max_strain_pct, d.wall_thickness] {
            assert!(v.is_finite(), "non-finite field in {:?}", d);
        }
    }

    #[test]
    fn planform_relations() {
        let p = Planform::for_cruise(MASS, 1.5, 531.0, 1.1 / 0.95);
        assert_relative_eq!(p.area * p.aspect_ratio, p.span * p.span, max_relative = 1e-12);
        assert_relative_eq!(p.chord * p.span, p.area, max_relative = 1e-12);
    }

    #[test]
    fn uniform_load_governs_over_tip_lift() {
        let sizer = WingSizer::default();
        let p = Planform::for_cruise(MASS, 1.5, 531.0, 1.158);
        let loads = sizer.loads(MASS, &p, 531.0, CM);
        assert!(loads.governing_moment() > loads.tip_lift_moment());
    }

    #[test]
    fn spar_diameter_is_floored_to_mm() {
        let sizer = WingSizer::default();
        // 0.14 * 0.089 - 0.002 = 0.01046
        assert_relative_eq!(sizer.spar_diameter(0.089, 0.14), 0.010, max_relative = 1e-12);
    }

    #[test]
    fn lightly_loaded_wing_thins_to_minimum_wall() {
        let sizer = WingSizer::default();
        let q = 0.5 * 1.1807 * 30.0 * 30.0;
        let sizing = sizer.size(MASS, 1.5, q, 1.1 / 0.95, CM, TC);
        let d = sizing.design().expect("should be feasible");
        assert_all_finite(d);
        assert_relative_eq!(d.wall_thickness, 0.001, max_relative = 1e-12);
        assert!(d.max_strain_pct <= 100.0);
        assert!(d.mass > 0.0 && d.tip_twist_deg > 0.0 && d.tip_deflection > 0.0);
    }

    #[test]
    fn wall_stays_thick_when_next_step_breaks_limit() {
        // 10 mm spar: ~96 % strain at 2.5 mm, ~104 % at 2.0 mm
        let sizer = WingSizer::default();
        let sizing = sizer.size(MASS, 1.5, q_for_chord(1.5, 0.089), CL, CM, TC);
        let d = sizing.design().expect("should be feasible");
        assert_relative_eq!(d.spar_diameter, 0.010, max_relative = 1e-12);
        assert_relative_eq!(d.wall_thickness, 0.0025, max_relative = 1e-12);
        assert!(d.max_strain_pct > 90.0 && d.max_strain_pct <= 100.0);
    }

    #[test]
    fn thin_spar_is_infeasible() {
        let sizer = WingSizer::default();
        let sizing = sizer.size(MASS, 1.5, 531.0, 1.158, CM, 0.001);
        assert!(matches!(
            sizing,
            WingSizing::Infeasible { reason: Infeasibility::SparTooThin { .. }, .. }
        ));
        assert!(sizing.design().is_none());
    }

    #[test]
    fn overstrained_initial_wall_is_infeasible() {
        // 6 mm spar cannot carry a 25 kg aircraft
        let sizer = WingSizer::default();
        let sizing = sizer.size(MASS, 1.5, q_for_chord(1.5, 0.06), CL, CM, TC);
        match sizing {
            WingSizing::Infeasible {
                reason: Infeasibility::StrainExceeded { strain_pct, .. },
                wall_thickness,
            } => {
                assert!(strain_pct > 100.0);
                assert_relative_eq!(wall_thickness, 0.0025, max_relative = 1e-12);
            }
            other => panic!("expected strain failure, got {:?}", other),
        }
    }

    #[test]
    fn returned_wall_is_thinnest_passing_wall() {
        let sizer = WingSizer::default();
        let step = sizer.rules.wall_step;
        let min_wall = sizer.rules.wall_thickness(sizer.rules.min_wall_steps);
        let mut saw_rethicken = false;

        for k in 0..200 {
            let chord = 0.05 + 0.0005 * k as f64;
            let q = q_for_chord(1.5, chord);
            let sizing = sizer.size(MASS, 1.5, q, CL, CM, TC);
            let WingSizing::Feasible(d) = sizing else { continue };
            assert_all_finite(&d);

            let p = Planform::for_cruise(MASS, 1.5, q, CL);
            let loads = sizer.loads(MASS, &p, q, CM);
            let at_wall = sizer.strain_pct(&loads, d.spar_diameter, d.wall_thickness);
            assert_relative_eq!(at_wall, d.max_strain_pct, max_relative = 1e-12);
            assert!(at_wall <= 100.0);

            if d.wall_thickness > min_wall + 1e-12 {
                saw_rethicken = true;
                let thinner = sizer.strain_pct(&loads, d.spar_diameter, d.wall_thickness - step);
                assert!(thinner > 100.0, "chord {chord}: thinner wall also passes");
            }
        }
        assert!(saw_rethicken);
    }
}
