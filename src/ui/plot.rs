use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{
    GridInput, GridMark, Legend, Line, MarkerShape, Plot, PlotPoints, PlotUi, Points,
};

use crate::charts::{Chart, ChartData, ChartStatus};
use crate::color::ColorMap;
use crate::data::model::{AlgorithmSeries, DataPointSet, PrototypeSnapshot, SweepPoint};

/// Fixed y marks of the percent-optimal charts.
pub const PERCENT_TICKS: [f64; 6] = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0];

const DATA_COLOR: Color32 = Color32::GRAY;
const PROTOTYPE_COLOR: Color32 = Color32::RED;
const TRAJECTORY_COLOR: Color32 = Color32::LIGHT_BLUE;

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Render the selected chart, or its failure message.
pub fn chart_view(ui: &mut Ui, chart: Option<&Chart>) {
    let Some(chart) = chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No charts to show");
        });
        return;
    };

    ui.heading(&chart.title);
    ui.separator();

    let data = match &chart.status {
        ChartStatus::Ready(data) => data,
        ChartStatus::Failed(msg) => {
            ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
            return;
        }
    };

    match data {
        ChartData::Reward(series) => {
            summary_table(ui, series);
            reward_plot(ui, &chart.title, series);
        }
        ChartData::Optimality(series) => {
            summary_table(ui, series);
            optimality_plot(ui, &chart.title, series);
        }
        ChartData::FinalPlacement { points, prototypes } => {
            placement_plot(ui, &chart.title, points, prototypes);
        }
        ChartData::Trajectories {
            points,
            paths,
            last,
        } => {
            trajectory_plot(ui, &chart.title, points, paths, last);
        }
        ChartData::ErrorSweep(sweep) => {
            sweep_table(ui, sweep);
            sweep_plot(ui, &chart.title, sweep);
        }
    }
}

// ---------------------------------------------------------------------------
// Bandit charts
// ---------------------------------------------------------------------------

/// `[step, value]` pairs for a per-step track.
pub fn step_points(values: &[f64]) -> Vec<[f64; 2]> {
    values
        .iter()
        .enumerate()
        .map(|(t, &v)| [t as f64, v])
        .collect()
}

fn series_colors(series: &[AlgorithmSeries]) -> ColorMap {
    ColorMap::new(series.iter().map(|s| s.label.as_str()))
}

fn reward_plot(ui: &mut Ui, id: &str, series: &[AlgorithmSeries]) {
    let colors = series_colors(series);
    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label("Steps")
        .y_axis_label("Average Reward")
        .show(ui, |plot_ui| {
            for s in series {
                let line = Line::new(PlotPoints::from(step_points(&s.reward)))
                    .name(&s.label)
                    .color(colors.color_for(&s.label))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

fn percent_marks(_input: GridInput) -> Vec<GridMark> {
    PERCENT_TICKS
        .iter()
        .map(|&value| GridMark {
            value,
            step_size: 20.0,
        })
        .collect()
}

fn optimality_plot(ui: &mut Ui, id: &str, series: &[AlgorithmSeries]) {
    let colors = series_colors(series);
    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label("Steps")
        .y_axis_label("% Optimal action")
        .include_y(0.0)
        .include_y(100.0)
        .y_grid_spacer(percent_marks)
        .show(ui, |plot_ui| {
            for s in series {
                let line = Line::new(PlotPoints::from(step_points(&s.optimality_percent())))
                    .name(&s.label)
                    .color(colors.color_for(&s.label))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

/// Producer footer stats plus the last value of each curve.
fn summary_table(ui: &mut Ui, series: &[AlgorithmSeries]) {
    ui.push_id("run_summary", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(180.0))
            .columns(Column::auto().at_least(110.0), 4)
            .header(20.0, |mut header| {
                for title in [
                    "Algorithm",
                    "Mean total reward",
                    "Std. dev.",
                    "Final reward",
                    "Final % optimal",
                ] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for s in series {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(&s.label);
                        });
                        let (mean, sd) = match s.summary {
                            Some(sum) => (
                                format!("{:.3}", sum.mean_total_reward),
                                format!("{:.3}", sum.std_dev),
                            ),
                            None => ("–".to_string(), "–".to_string()),
                        };
                        row.col(|ui: &mut Ui| {
                            ui.label(mean);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(sd);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(last_value(&s.reward, 1.0));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(last_value(&s.optimality, 100.0));
                        });
                    });
                }
            });
    });
    ui.separator();
}

fn last_value(values: &[f64], scale: f64) -> String {
    values
        .last()
        .map(|v| format!("{:.3}", v * scale))
        .unwrap_or_else(|| "–".to_string())
}

// ---------------------------------------------------------------------------
// Quantization charts
// ---------------------------------------------------------------------------

fn draw_data_layer(plot_ui: &mut PlotUi, points: &DataPointSet) {
    plot_ui.points(
        Points::new(PlotPoints::from(points.points().to_vec()))
            .name("Data points")
            .shape(MarkerShape::Circle)
            .radius(2.5)
            .filled(true)
            .color(DATA_COLOR),
    );
}

fn draw_prototype_layer(plot_ui: &mut PlotUi, name: &str, snapshot: &PrototypeSnapshot) {
    plot_ui.points(
        Points::new(PlotPoints::from(snapshot.points().to_vec()))
            .name(name)
            .shape(MarkerShape::Diamond)
            .radius(6.0)
            .filled(true)
            .color(PROTOTYPE_COLOR),
    );
}

fn placement_plot(ui: &mut Ui, id: &str, points: &DataPointSet, prototypes: &PrototypeSnapshot) {
    Plot::new(id)
        .legend(Legend::default())
        .data_aspect(1.0)
        .x_axis_label("x")
        .y_axis_label("y")
        .show(ui, |plot_ui| {
            draw_data_layer(plot_ui, points);
            draw_prototype_layer(plot_ui, "Prototypes", prototypes);
        });
}

fn trajectory_plot(
    ui: &mut Ui,
    id: &str,
    points: &DataPointSet,
    paths: &[Vec<[f64; 2]>],
    last: &PrototypeSnapshot,
) {
    let starts: Vec<[f64; 2]> = paths.iter().filter_map(|p| p.first().copied()).collect();

    Plot::new(id)
        .legend(Legend::default())
        .data_aspect(1.0)
        .x_axis_label("x")
        .y_axis_label("y")
        .show(ui, |plot_ui| {
            draw_data_layer(plot_ui, points);
            // Same name for every path: the legend shows one entry for the layer.
            for path in paths {
                plot_ui.line(
                    Line::new(PlotPoints::from(path.clone()))
                        .name("Trajectory")
                        .color(TRAJECTORY_COLOR)
                        .width(1.0),
                );
            }
            plot_ui.points(
                Points::new(PlotPoints::from(starts))
                    .name("Initial prototypes")
                    .shape(MarkerShape::Cross)
                    .radius(5.0)
                    .color(TRAJECTORY_COLOR),
            );
            draw_prototype_layer(plot_ui, "Final prototypes", last);
        });
}

fn sweep_points(sweep: &[SweepPoint]) -> Vec<[f64; 2]> {
    sweep.iter().map(|p| [p.k as f64, p.error]).collect()
}

fn sweep_plot(ui: &mut Ui, id: &str, sweep: &[SweepPoint]) {
    let pts = sweep_points(sweep);
    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label("Number of prototypes (K)")
        .y_axis_label("Quantization error")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(pts.clone()))
                    .name("Quantization error")
                    .color(PROTOTYPE_COLOR)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(pts))
                    .name("Quantization error")
                    .shape(MarkerShape::Circle)
                    .radius(4.0)
                    .filled(true)
                    .color(PROTOTYPE_COLOR),
            );
        });
}

fn sweep_table(ui: &mut Ui, sweep: &[SweepPoint]) {
    ui.push_id("sweep_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(true)
            .max_scroll_height(160.0)
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(120.0))
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("K");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Quantization error");
                });
            })
            .body(|mut body| {
                for p in sweep {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(p.k.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{:.4}", p.error));
                        });
                    });
                }
            });
    });
    ui.separator();
}
