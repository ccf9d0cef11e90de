// ---------------------------------------------------------------------------
// Cantilever beam mechanics (half wing, root clamped at the fuselage)
// ---------------------------------------------------------------------------
//
// All moments are maxima at the root and returned as magnitudes.

/// Tip point load `f` (N) on a beam of length `l`: M = |F| * L
pub fn max_moment_point_load(f: f64, l: f64) -> f64 {
    f.abs() * l
}

/// Uniform distributed load `w` (N/m): M = |w| * L^2 / 2
pub fn max_moment_uniform_load(w: f64, l: f64) -> f64 {
    w.abs() * l * l / 2.0
}

/// Triangular load peaking at the root with intensity `p` (N/m): M = |p| * L^2 / 6
pub fn max_moment_triangle_load(p: f64, l: f64) -> f64 {
    p.abs() * l * l / 6.0
}

/// Tip twist (degrees) from a torque `m` spread evenly along the span.
pub fn tip_twist_deg(m: f64, l: f64, j: f64, shear_modulus: f64) -> f64 {
    let mx = m / l;
    (mx * l / (j * shear_modulus)).to_degrees()
}

/// Tip deflection under a uniform load: delta = |w| * L^4 / (8 E I)
pub fn tip_deflection_uniform_load(w: f64, l: f64, modulus: f64, i: f64) -> f64 {
    w.abs() * l.powi(4) / (8.0 * modulus * i)
}
