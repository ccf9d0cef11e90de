pub mod hover;

pub use hover::{energy_hover, HoverCurve, HoverModel, VerticalProfile};
