use std::fmt;

use crate::config::{PlotConfig, RegimeConfig};
use crate::data::bandit;
use crate::data::error::Result;
use crate::data::loader;
use crate::data::model::{AlgorithmSeries, DataPointSet, PrototypeSnapshot, SweepPoint};
use crate::data::quantization::QuantizationView;

// ---------------------------------------------------------------------------
// Chart descriptions handed to the renderer
// ---------------------------------------------------------------------------

/// Data for one chart, already shaped for drawing.
#[derive(Debug, Clone)]
pub enum ChartData {
    /// Average reward per step, one line per algorithm.
    Reward(Vec<AlgorithmSeries>),
    /// Optimal-action fraction per step, one line per algorithm.
    Optimality(Vec<AlgorithmSeries>),
    /// Final prototypes over the training data.
    FinalPlacement {
        points: DataPointSet,
        prototypes: PrototypeSnapshot,
    },
    /// Every prototype's path through training.
    Trajectories {
        points: DataPointSet,
        paths: Vec<Vec<[f64; 2]>>,
        last: PrototypeSnapshot,
    },
    /// Quantization error for each candidate prototype count.
    ErrorSweep(Vec<SweepPoint>),
}

#[derive(Debug, Clone)]
pub enum ChartStatus {
    Ready(ChartData),
    /// The pipeline feeding this chart aborted; the message names the input.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub status: ChartStatus,
}

impl Chart {
    fn ready(title: impl Into<String>, data: ChartData) -> Self {
        Chart {
            title: title.into(),
            status: ChartStatus::Ready(data),
        }
    }

    fn failed(title: impl Into<String>, message: &str) -> Self {
        Chart {
            title: title.into(),
            status: ChartStatus::Failed(message.to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, ChartStatus::Ready(_))
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = match &self.status {
            ChartStatus::Failed(msg) => return write!(f, "{}: FAILED: {msg}", self.title),
            ChartStatus::Ready(data) => data,
        };
        write!(f, "{}: ", self.title)?;
        match data {
            ChartData::Reward(series) | ChartData::Optimality(series) => {
                let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
                let steps = series.first().map_or(0, AlgorithmSeries::steps);
                write!(f, "{} series x {steps} steps [{}]", series.len(), labels.join(", "))
            }
            ChartData::FinalPlacement { points, prototypes } => {
                write!(f, "{} prototypes over {} points", prototypes.len(), points.len())
            }
            ChartData::Trajectories { paths, .. } => {
                let iterations = paths.first().map_or(0, Vec::len);
                write!(f, "{} trajectories x {iterations} iterations", paths.len())
            }
            ChartData::ErrorSweep(sweep) => write!(f, "{} prototype counts", sweep.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipelines: loader → aggregator, one failure per chart group
// ---------------------------------------------------------------------------

/// Run every pipeline the config describes.
///
/// A failing pipeline only marks its own charts as failed; the others are
/// still built.
pub fn build_charts(cfg: &PlotConfig) -> Vec<Chart> {
    let mut charts = Vec::new();

    for regime in &cfg.regimes {
        match regime_series(cfg, regime) {
            Ok(series) => {
                charts.push(Chart::ready(&regime.reward_title, ChartData::Reward(series.clone())));
                charts.push(Chart::ready(&regime.optimality_title, ChartData::Optimality(series)));
            }
            Err(e) => {
                log::error!("{} charts skipped: {e}", regime.name);
                let msg = e.to_string();
                charts.push(Chart::failed(&regime.reward_title, &msg));
                charts.push(Chart::failed(&regime.optimality_title, &msg));
            }
        }
    }

    charts.extend(quantization_charts(cfg));
    charts
}

/// Load one regime and pair its runs with labels.
pub fn regime_series(cfg: &PlotConfig, regime: &RegimeConfig) -> Result<Vec<AlgorithmSeries>> {
    let dir = cfg.regime_dir(regime);

    if regime.runs.is_empty() {
        let runs = loader::load_run_directory(&dir, &cfg.suffixes)?;
        return bandit::aggregate(&regime.name, &runs, &cfg.algorithms, cfg.layout);
    }

    let entries = regime
        .runs
        .iter()
        .map(|entry| {
            let run = loader::load_run_file(&dir.join(&entry.file))?;
            Ok((entry.label.clone(), run))
        })
        .collect::<Result<Vec<_>>>()?;
    bandit::aggregate_mapped(&regime.name, &entries, cfg.layout)
}

const FINAL_PLACEMENT_TITLE: &str = "Final prototype placement";
const TRAJECTORIES_TITLE: &str = "Prototype trajectories during training";
const SWEEP_TITLE: &str = "Quantization error by number of prototypes";

/// Placement and trajectory charts share the points and prototype files;
/// the sweep chart reads only the error file. Each group fails on its own.
fn quantization_charts(cfg: &PlotConfig) -> Vec<Chart> {
    let mut charts = match QuantizationView::load(&cfg.points_path(), &cfg.prototypes_path()) {
        Ok(view) => {
            let (last, points) = view.final_placement();
            vec![
                Chart::ready(
                    FINAL_PLACEMENT_TITLE,
                    ChartData::FinalPlacement {
                        points: points.clone(),
                        prototypes: last.clone(),
                    },
                ),
                Chart::ready(
                    TRAJECTORIES_TITLE,
                    ChartData::Trajectories {
                        points: view.points().clone(),
                        paths: view.trajectories(),
                        last: view.trajectory_set().last().clone(),
                    },
                ),
            ]
        }
        Err(e) => {
            log::error!("Prototype charts skipped: {e}");
            let msg = e.to_string();
            vec![
                Chart::failed(FINAL_PLACEMENT_TITLE, &msg),
                Chart::failed(TRAJECTORIES_TITLE, &msg),
            ]
        }
    };

    match loader::load_sweep(&cfg.error_path(), &cfg.quantization.candidate_counts) {
        Ok(sweep) => charts.push(Chart::ready(SWEEP_TITLE, ChartData::ErrorSweep(sweep))),
        Err(e) => {
            log::error!("Quantization error chart skipped: {e}");
            charts.push(Chart::failed(SWEEP_TITLE, &e.to_string()));
        }
    }
    charts
}
