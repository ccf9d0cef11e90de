pub mod contour;
pub mod csv;
pub mod inputs;
pub mod json;
pub mod report;

pub use contour::{
    contour_levels, contour_segments, contour_sets, even_levels, finite_max, ContourSet,
    CONTOUR_FRACTIONS,
};
pub use inputs::{load_aircraft, load_inputs, read_inputs};
pub use report::{report_rows, write_report, ReportRow};
