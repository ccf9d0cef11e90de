use std::io::{self, Write};

use crate::design::aircraft::AircraftSpec;
use crate::design::optimum::OptimizationResult;

/// Margin applied to the clean-wing stall speed in the report.
const STALL_MARGIN: f64 = 1.2;

/// One labelled line of the design report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

impl ReportRow {
    fn new(label: &'static str, value: f64, unit: &'static str) -> Self {
        Self { label, value, unit }
    }
}

/// The sixteen report rows for an optimum, in display order.
pub fn report_rows(aircraft: &AircraftSpec, density: f64, best: &OptimizationResult) -> Vec<ReportRow> {
    let p = &best.design;
    let perf = &p.performance;
    let wing = &p.wing;
    vec![
        ReportRow::new("Flight radius", perf.distance_m / 1000.0 / 2.0, "km"),
        ReportRow::new("Hover time", perf.hover_duration_min, "min"),
        ReportRow::new("Total mass", aircraft.mass, "kg"),
        ReportRow::new("Total width", perf.overall_span, "m"),
        ReportRow::new("Aspect ratio", wing.aspect_ratio, ""),
        ReportRow::new("Wing area", wing.area, "m2"),
        ReportRow::new("Wing span", p.span, "m"),
        ReportRow::new("Chord", wing.chord, "m"),
        ReportRow::new("Spar", wing.spar_diameter * 1000.0, "mm"),
        ReportRow::new("Spar thickness", wing.wall_thickness * 1000.0, "mm"),
        ReportRow::new("Prop diameter", perf.prop_diameter, "m"),
        ReportRow::new("Span to prop ratio", p.span / perf.prop_diameter, ""),
        ReportRow::new("Air density", density, "kg/m3"),
        ReportRow::new("Cruise velocity", p.velocity, "m/s"),
        ReportRow::new("Stall velocity", STALL_MARGIN * aircraft.stall_speed(density, wing.area), "m/s"),
        ReportRow::new("Battery size", perf.battery_whr / 1000.0, "kWhr"),
    ]
}

/// Write the fixed-width design table.
pub fn write_report<W: Write>(
    writer: &mut W,
    aircraft: &AircraftSpec,
    density: f64,
    best: &OptimizationResult,
) -> io::Result<()> {
    writeln!(writer, "Tiltrotor details ({}):", best.objective.label())?;
    writeln!(writer, "{}", "-".repeat(39))?;
    for row in report_rows(aircraft, density, best) {
        writeln!(writer, "{:<23}{:^6.2}{:<10}", row.label, row.value, row.unit)?;
    }
    writeln!(writer, "{} near-optimal designs within 2 %", best.near_optimal.len())?;
    Ok(())
}
