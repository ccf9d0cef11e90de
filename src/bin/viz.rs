use eframe::egui;
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points, Text};
use nalgebra::DMatrix;

use tiltrotor_design::design::{presets, sweep, DesignPoint, Objective, OptimizationResult, SweepResult};
use tiltrotor_design::io::{contour_levels, contour_sets, even_levels, finite_max, ContourSet, CONTOUR_FRACTIONS};

fn main() -> eframe::Result {
    let aircraft = match presets::tiltrotor() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let (result, best) = match sweep(aircraft, None, None, Objective::Range) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let longest_hover = match result.optimum(Objective::HoverTime) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let panels = vec![
        Panel::relative("Flight radius (km)", &result, &best, |p| p.performance.distance_m / 2000.0),
        Panel::relative("Hover time (min)", &result, &longest_hover, |p| p.performance.hover_duration_min),
        Panel::even("Wing loading (kg/m2)", &result, &best, |p| p.performance.wing_loading),
    ];

    let app = DesignViz { panels, best, feasible: result.feasible_count(), cells: result.grid.cell_count() };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1500.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native("Tilt-rotor Design Space", options, Box::new(|_| Ok(Box::new(app))))
}

// ---------------------------------------------------------------------------
// Contour panels
// ---------------------------------------------------------------------------

struct Panel {
    title: &'static str,
    contours: Vec<ContourSet>,
    marker: [f64; 2], // (span, velocity) of the design this panel optimizes
}

impl Panel {
    /// Levels at fixed fractions of the field maximum.
    fn relative(
        title: &'static str,
        result: &SweepResult,
        marked: &OptimizationResult,
        f: impl Fn(&DesignPoint) -> f64,
    ) -> Self {
        let field = result.field(f);
        let levels = finite_max(&field).map_or_else(Vec::new, |m| contour_levels(m, &CONTOUR_FRACTIONS));
        Self::build(title, result, marked, &field, &levels)
    }

    fn even(
        title: &'static str,
        result: &SweepResult,
        marked: &OptimizationResult,
        f: impl Fn(&DesignPoint) -> f64,
    ) -> Self {
        let field = result.field(f);
        let levels = even_levels(&field, 10);
        Self::build(title, result, marked, &field, &levels)
    }

    fn build(
        title: &'static str,
        result: &SweepResult,
        marked: &OptimizationResult,
        field: &DMatrix<f64>,
        levels: &[f64],
    ) -> Self {
        let contours = contour_sets(
            result.grid.spans.values(),
            result.grid.velocities.values(),
            field,
            levels,
        );
        let marker = [marked.design.span, marked.design.velocity];
        Self { title, contours, marker }
    }
}

struct DesignViz {
    panels: Vec<Panel>,
    best: OptimizationResult,
    feasible: usize,
    cells: usize,
}

impl eframe::App for DesignViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let d = &self.best.design;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Tilt-rotor design space");
            ui.label(format!(
                "Best: span {:.2} m at {:.1} m/s  |  radius {:.1} km  |  hover {:.1} min  |  {} of {} designs feasible",
                d.span,
                d.velocity,
                d.performance.distance_m / 2000.0,
                d.performance.hover_duration_min,
                self.feasible,
                self.cells,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let w = available.x / self.panels.len() as f32 - 8.0;
            let h = available.y - 24.0;

            ui.horizontal(|ui| {
                for panel in &self.panels {
                    ui.vertical(|ui| {
                        ui.label(panel.title);
                        Plot::new(panel.title)
                            .width(w)
                            .height(h)
                            .x_axis_label("Wing span (m)")
                            .y_axis_label("Velocity (m/s)")
                            .show(ui, |plot_ui| {
                                for set in &panel.contours {
                                    let name = format!("{:.1}", set.level);
                                    for seg in &set.segments {
                                        let points: PlotPoints = seg.iter().copied().collect();
                                        plot_ui.line(Line::new(name.clone(), points));
                                    }
                                    if let Some([x, y]) = set.label_anchor() {
                                        plot_ui.text(Text::new(name.clone(), PlotPoint::new(x, y), name.clone()));
                                    }
                                }
                                plot_ui.points(Points::new("optimum", vec![panel.marker]).radius(5.0));
                            });
                    });
                }
            });
        });
    }
}
