use std::f64::consts::PI;

use serde::Serialize;

use crate::feasibility::Infeasibility;

// ---------------------------------------------------------------------------
// Hover efficiency curve
// ---------------------------------------------------------------------------

/// Measured (disk loading kg/m^2, hovering efficiency kg/kW) pairs.
pub const REFERENCE_POINTS: [(f64, f64); 2] = [(36.62, 6.080), (2929.45, 0.608)];

/// Hovering efficiency as a straight line in ln(disk loading):
/// eff = slope * ln(DL) + intercept
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoverCurve {
    pub slope: f64,
    pub intercept: f64,
}

impl HoverCurve {
    /// Line through the two reference measurements.
    pub fn reference() -> Self {
        let [(x0, y0), (x1, y1)] = REFERENCE_POINTS;
        let (lx0, lx1) = (x0.ln(), x1.ln());
        let slope = (y1 - y0) / (lx1 - lx0);
        Self { slope, intercept: y0 - slope * lx0 }
    }

    /// Least-squares fit over any number of points. `None` when fewer than
    /// two distinct disk loadings are given.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        let n = points.len() as f64;
        if points.len() < 2 || points.iter().any(|&(x, _)| x <= 0.0) {
            return None;
        }
        let mean_x = points.iter().map(|&(x, _)| x.ln()).sum::<f64>() / n;
        let mean_y = points.iter().map(|&(_, y)| y).sum::<f64>() / n;
        let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), &(x, y)| {
            let dx = x.ln() - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });
        if sxx <= f64::EPSILON {
            return None;
        }
        let slope = sxy / sxx;
        Some(Self { slope, intercept: mean_y - slope * mean_x })
    }

    /// kg of aircraft held per kW of shaft power.
    pub fn efficiency(&self, disk_loading: f64) -> f64 {
        self.slope * disk_loading.ln() + self.intercept
    }
}

impl Default for HoverCurve {
    /// Least-squares fit of `REFERENCE_POINTS`.
    fn default() -> Self {
        Self::fit(&REFERENCE_POINTS).unwrap_or_else(Self::reference)
    }
}

// ---------------------------------------------------------------------------
// Vertical take-off and landing profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VerticalProfile {
    pub altitude: f64,     // m
    pub ascent_rate: f64,  // m/s
    pub descent_rate: f64, // m/s
    pub plate_cd: f64,     // airframe seen edge-on in a climb
    pub area_factor: f64,  // wing + fuselage planform over wing area
}

impl Default for VerticalProfile {
    fn default() -> Self {
        Self {
            altitude: 120.0,
            ascent_rate: 4.0,
            descent_rate: 3.0,
            plate_cd: 1.1,
            area_factor: 1.2,
        }
    }
}

// ---------------------------------------------------------------------------
// Hover model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HoverModel {
    pub curve: HoverCurve,
    pub profile: VerticalProfile,
}

/// Aircraft mass over total rotor disk area, kg/m^2.
pub fn disk_loading(mass: f64, prop_diameter: f64, num_props: u32) -> f64 {
    let area = num_props as f64 * PI * prop_diameter * prop_diameter / 4.0;
    mass / area
}

impl HoverModel {
    /// Shaft power to hover, W.
    pub fn power_hover(&self, mass: f64, prop_diameter: f64, num_props: u32) -> Result<f64, Infeasibility> {
        if prop_diameter <= 0.0 || num_props == 0 {
            return Err(Infeasibility::PropTooSmall { diameter: prop_diameter });
        }
        let loading = disk_loading(mass, prop_diameter, num_props);
        let kg_per_kw = self.curve.efficiency(loading);
        if !(kg_per_kw > 0.0) {
            return Err(Infeasibility::HoverOutOfDomain { disk_loading: loading });
        }
        Ok(mass / kg_per_kw * 1000.0)
    }

    /// Energy for one vertical climb to altitude and one descent, Whr.
    ///
    /// Each leg is booked twice. The climb also pays for pushing the
    /// airframe broadside through the air.
    pub fn energy_takeoff(&self, power_hover: f64, wing_area: f64, rho: f64) -> f64 {
        let p = &self.profile;
        let power_climb =
            0.5 * rho * p.plate_cd * (p.area_factor * wing_area) * p.ascent_rate.powi(3);

        let ascent_hr = p.altitude / p.ascent_rate / 3600.0;
        let whr_ascent = 2.0 * ascent_hr * (power_hover + power_climb);

        let descent_hr = p.altitude / p.descent_rate / 3600.0;
        let whr_descent = 2.0 * descent_hr * power_hover;

        whr_ascent + whr_descent
    }
}

/// Energy to hover for `minutes` at `power` W, Whr.
pub fn energy_hover(minutes: f64, power: f64) -> f64 {
    minutes / 60.0 * power
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reference_curve_passes_through_measurements() {
        let c = HoverCurve::reference();
        for (dl, eff) in REFERENCE_POINTS {
            assert_relative_eq!(c.efficiency(dl), eff, max_relative = 1e-9);
        }
        assert!(c.slope < 0.0);
    }

    #[test]
    fn least_squares_on_two_points_is_exact_line() {
        let fitted = HoverCurve::fit(&REFERENCE_POINTS).unwrap();
        let exact = HoverCurve::reference();
        assert_relative_eq!(fitted.slope, exact.slope, max_relative = 1e-9);
        assert_relative_eq!(fitted.intercept, exact.intercept, max_relative = 1e-9);
    }

    #[test]
    fn default_model_uses_fitted_curve() {
        let fitted = HoverCurve::fit(&REFERENCE_POINTS).unwrap();
        assert_eq!(HoverModel::default().curve, fitted);
        assert_relative_eq!(fitted.slope, -1.24875, max_relative = 1e-4);
        assert_relative_eq!(fitted.intercept, 10.57625, max_relative = 1e-4);
    }

    #[test]
    fn degenerate_fits_are_rejected() {
        assert!(HoverCurve::fit(&[(10.0, 1.0)]).is_none());
        assert!(HoverCurve::fit(&[(10.0, 1.0), (10.0, 2.0)]).is_none());
        assert!(HoverCurve::fit(&[(0.0, 1.0), (10.0, 2.0)]).is_none());
    }

    #[test]
    fn hover_power_falls_with_prop_diameter() {
        let model = HoverModel::default();
        let mut prev = f64::INFINITY;
        for k in 0..20 {
            let d = 0.1 + 0.05 * k as f64;
            let p = model.power_hover(24.95, d, 2).unwrap();
            assert!(p > 0.0 && p < prev, "d = {d}: {p} W");
            prev = p;
        }
    }

    #[test]
    fn hover_power_reference_value() {
        // 24.95 kg on two 0.765 m rotors
        let model = HoverModel::default();
        let dl = disk_loading(24.95, 0.765, 2);
        let expected = 24.95 / model.curve.efficiency(dl) * 1000.0;
        assert_relative_eq!(model.power_hover(24.95, 0.765, 2).unwrap(), expected, max_relative = 1e-12);
        assert!((expected - 3866.0).abs() < 5.0, "{expected}");
    }

    #[test]
    fn tiny_rotors_leave_the_curve() {
        let model = HoverModel::default();
        assert!(matches!(
            model.power_hover(24.95, 0.005, 2),
            Err(Infeasibility::HoverOutOfDomain { .. })
        ));
        assert!(matches!(
            model.power_hover(24.95, -0.1, 2),
            Err(Infeasibility::PropTooSmall { .. })
        ));
    }

    #[test]
    fn takeoff_energy_matches_leg_sum() {
        let model = HoverModel::default();
        let (p, s, rho) = (4000.0, 0.4, 1.18);
        let climb = 0.5 * rho * 1.1 * (1.2 * s) * 64.0;
        let expected = 2.0 * (120.0 / 4.0 / 3600.0) * (p + climb) + 2.0 * (120.0 / 3.0 / 3600.0) * p;
        assert_relative_eq!(model.energy_takeoff(p, s, rho), expected, max_relative = 1e-12);
    }

    #[test]
    fn hover_energy_is_power_times_hours() {
        assert_relative_eq!(energy_hover(5.0, 1200.0), 100.0, max_relative = 1e-12);
        assert_relative_eq!(energy_hover(0.0, 1200.0), 0.0);
    }
}
