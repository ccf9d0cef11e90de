use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Hollow circular tube (carbon spar)
// ---------------------------------------------------------------------------

/// Thin-walled circular tube cross-section.
///
/// Construction fails when the wall would meet or cross the centre line,
/// so the inner radius used by the section properties is never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeSection {
    pub diameter: f64,  // outer diameter, m
    pub thickness: f64, // wall thickness, m
}

impl TubeSection {
    pub fn new(diameter: f64, thickness: f64) -> Option<Self> {
        if diameter > 0.0 && thickness > 0.0 && 2.0 * thickness <= diameter {
            Some(Self { diameter, thickness })
        } else {
            None
        }
    }

    pub fn inner_diameter(&self) -> f64 {
        self.diameter - 2.0 * self.thickness
    }

    /// Second moment of area: I = pi/4 * (R^4 - r^4)
    pub fn second_moment_of_area(&self) -> f64 {
        let r_outer = self.diameter / 2.0;
        let r_inner = r_outer - self.thickness;
        PI / 4.0 * (r_outer.powi(4) - r_inner.powi(4))
    }

    /// Polar moment of area: J = pi/32 * (d^4 - (d - 2t)^4)
    pub fn polar_moment(&self) -> f64 {
        PI / 32.0 * (self.diameter.powi(4) - self.inner_diameter().powi(4))
    }

    /// Material cross-section area, m^2.
    pub fn area(&self) -> f64 {
        PI / 4.0 * (self.diameter.powi(2) - self.inner_diameter().powi(2))
    }
}

// ---------------------------------------------------------------------------
// Strains at the outer fibre
// ---------------------------------------------------------------------------

/// Shear strain from torque `m`: tau = M*(d/2)/J, gamma = tau/G
pub fn torsion_strain(m: f64, j: f64, diameter: f64, shear_modulus: f64) -> f64 {
    let tau = m * (diameter / 2.0) / j;
    tau / shear_modulus
}

/// Normal strain from bending moment `m`: sigma = M*(d/2)/I, eps = sigma/E
pub fn bending_strain(m: f64, modulus: f64, i: f64, diameter: f64) -> f64 {
    let sigma = m * (diameter / 2.0) / i;
    sigma / modulus
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solid_limit_matches_rod_formula() {
        // wall = radius -> solid rod, I = pi d^4 / 64, J = pi d^4 / 32
        let t = TubeSection::new(0.02, 0.01).unwrap();
        assert_relative_eq!(t.second_moment_of_area(), PI * 0.02_f64.powi(4) / 64.0, max_relative = 1e-12);
        assert_relative_eq!(t.polar_moment(), PI * 0.02_f64.powi(4) / 32.0, max_relative = 1e-12);
    }

    #[test]
    fn polar_moment_is_twice_bending_moment_of_area() {
        let t = TubeSection::new(0.035, 0.0015).unwrap();
        assert_relative_eq!(t.polar_moment(), 2.0 * t.second_moment_of_area(), max_relative = 1e-12);
    }

    #[test]
    fn overthick_wall_is_rejected() {
        assert!(TubeSection::new(0.004, 0.0025).is_none());
        assert!(TubeSection::new(0.0, 0.001).is_none());
        assert!(TubeSection::new(0.01, 0.0).is_none());
    }

    #[test]
    fn strains_scale_linearly_with_load() {
        let t = TubeSection::new(0.03, 0.002).unwrap();
        let i = t.second_moment_of_area();
        let j = t.polar_moment();
        let e1 = bending_strain(100.0, 228e9, i, t.diameter);
        let e2 = bending_strain(200.0, 228e9, i, t.diameter);
        assert_relative_eq!(e2, 2.0 * e1, max_relative = 1e-12);
        let g1 = torsion_strain(5.0, j, t.diameter, 10e9);
        assert_relative_eq!(g1, 5.0 * 0.015 / j / 10e9, max_relative = 1e-12);
    }
}
