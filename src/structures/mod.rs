pub mod beam;
pub mod section;
pub mod wing;

pub use section::TubeSection;
pub use wing::{Material, Planform, SizingRules, WingDesign, WingLoads, WingSizer, WingSizing};
