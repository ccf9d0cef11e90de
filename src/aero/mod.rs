pub mod atmosphere;
pub mod drag;

pub use atmosphere::{dynamic_pressure, AirState};
pub use drag::{power_at_speed, total_drag, DragBreakdown, FlowRegime};
