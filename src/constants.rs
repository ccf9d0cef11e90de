// ---------------------------------------------------------------------------
// Physical and regulatory constants
// ---------------------------------------------------------------------------

pub const GRAVITY: f64 = 9.81; // m/s^2

/// Regulatory ceiling on take-off mass for small UAS (55 lb), kg.
pub const MAX_TAKEOFF_MASS: f64 = 24.95;
