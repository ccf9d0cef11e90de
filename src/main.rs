use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, Level};

use tiltrotor_design::aero::AirState;
use tiltrotor_design::design::aircraft::{default_velocity_axis, presets};
use tiltrotor_design::design::{Axis, CellOutcome, DesignGrid, DesignSweep, LayoutKind, MissionProfile};
use tiltrotor_design::io::json::{write_summary_file, RunSummary};
use tiltrotor_design::io::{self as dio, write_report};
use tiltrotor_design::{DesignError, Objective};

#[derive(Parser, Debug)]
#[command(name = "tiltrotor-design", version)]
#[command(about = "Sweep wing span against cruise speed and report the best tilt-rotor design")]
struct Args {
    /// Input sheet (`label,value` rows after a header); built-in preset if omitted
    #[arg(short, long)]
    inputs: Option<PathBuf>,

    /// Meaning of the second input row
    #[arg(long, value_enum, default_value = "overall-span")]
    layout: LayoutKind,

    /// Quantity to maximize
    #[arg(short, long, value_enum, default_value = "range")]
    objective: Objective,

    /// Wing span sweep, m
    #[arg(long, num_args = 3, value_names = ["MIN", "MAX", "STEP"])]
    spans: Option<Vec<f64>>,

    /// Cruise velocity sweep, m/s
    #[arg(long, num_args = 3, value_names = ["MIN", "MAX", "STEP"])]
    velocities: Option<Vec<f64>>,

    /// Minutes of hover kept in reserve [default: 5, or 0 for prop-diameter]
    #[arg(long)]
    hover_reserve: Option<f64>,

    /// Vertical take-off and landing cycles budgeted
    #[arg(long, default_value_t = 1)]
    takeoff_cycles: u32,

    /// Number of lift rotors
    #[arg(long, default_value_t = 2)]
    props: u32,

    /// Site pressure, Pa
    #[arg(long, default_value_t = 101_000.0)]
    pressure: f64,

    /// Site temperature, °C
    #[arg(long, default_value_t = 25.0)]
    temperature: f64,

    /// Write every grid cell to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON run summary to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn axis(name: &str, range: Option<&[f64]>, default: Axis) -> Result<Axis, DesignError> {
    match range {
        Some([min, max, step]) => Axis::arange(name, *min, *max, *step),
        Some(_) => Err(DesignError::invalid(name, "expected MIN MAX STEP")),
        None => Ok(default),
    }
}

fn run(args: &Args) -> Result<(), DesignError> {
    // -----------------------------------------------------------------------
    // Aircraft and grid
    // -----------------------------------------------------------------------
    let aircraft = match &args.inputs {
        Some(path) => dio::load_aircraft(path, args.layout)?,
        None => match args.layout {
            LayoutKind::OverallSpan => presets::tiltrotor()?,
            LayoutKind::PropDiameter => presets::heavy_lifter()?,
        },
    };
    let defaults = MissionProfile::for_layout(&aircraft.layout);
    let mission = MissionProfile {
        num_props: args.props,
        takeoff_cycles: args.takeoff_cycles,
        hover_reserve_min: args.hover_reserve.unwrap_or(defaults.hover_reserve_min),
    };
    let air = AirState::new(args.pressure, args.temperature)?;

    let spans = axis("span", args.spans.as_deref(), aircraft.layout.default_span_axis()?)?;
    let velocities = axis("velocity", args.velocities.as_deref(), default_velocity_axis()?)?;
    let grid = DesignGrid::new(spans, velocities);

    // -----------------------------------------------------------------------
    // Sweep
    // -----------------------------------------------------------------------
    let engine = DesignSweep::new(aircraft, mission)?.with_air(air);
    let result = engine.run(&grid);

    let mut rejected: BTreeMap<&str, usize> = BTreeMap::new();
    for cell in result.cells.iter() {
        if let CellOutcome::Infeasible(reason) = cell {
            *rejected.entry(reason.label()).or_default() += 1;
        }
    }
    for (reason, count) in &rejected {
        info!(reason, count, "infeasible cells");
    }

    if let Some(path) = &args.csv {
        tiltrotor_design::io::csv::write_grid_file(path, &result)?;
        info!(path = %path.display(), "grid written");
    }

    let best = result.optimum(args.objective)?;

    // -----------------------------------------------------------------------
    // Report
    // -----------------------------------------------------------------------
    println!();
    println!(
        "  {} {} x {} {} samples, {} feasible designs",
        grid.spans.len(),
        grid.spans.name(),
        grid.velocities.len(),
        grid.velocities.name(),
        result.feasible_count()
    );
    println!();
    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &engine.aircraft, result.density, &best)?;

    if let Some(path) = &args.json {
        write_summary_file(path, &RunSummary::new(&engine, &result, &best))?;
        info!(path = %path.display(), "summary written");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
