use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ChartError, Result};

// ---------------------------------------------------------------------------
// RunMatrix – one loaded result file
// ---------------------------------------------------------------------------

/// Summary statistics the bandit producer writes as the final line of each
/// result file: mean and standard deviation of the per-run total reward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub mean_total_reward: f64,
    pub std_dev: f64,
}

impl RunSummary {
    /// Interpret a footer row. Rows with fewer than two cells carry no summary.
    pub fn from_footer(row: &[f64]) -> Option<Self> {
        match row {
            [mean, sd, ..] => Some(RunSummary {
                mean_total_reward: *mean,
                std_dev: *sd,
            }),
            _ => None,
        }
    }
}

/// Rectangular numeric contents of one result file, footer already removed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunMatrix {
    /// File the rows were read from.
    pub source: PathBuf,
    /// Data rows, all of the same width.
    pub rows: Vec<Vec<f64>>,
    /// Parsed footer, when the file had one.
    pub summary: Option<RunSummary>,
}

impl RunMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// File stem, used as the dataset name in messages and logs.
    pub fn name(&self) -> String {
        dataset_name(&self.source)
    }

    /// Columns become rows.
    pub fn transpose(&self) -> Vec<Vec<f64>> {
        transpose(&self.rows)
    }

    /// Split the matrix into metric tracks, each indexed by time step.
    pub fn tracks(&self, layout: TrackLayout) -> Vec<Vec<f64>> {
        match layout {
            TrackLayout::Columns => self.transpose(),
            TrackLayout::Rows => self.rows.clone(),
        }
    }
}

pub fn transpose(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let width = rows.first().map_or(0, Vec::len);
    (0..width)
        .map(|c| rows.iter().map(|row| row[c]).collect())
        .collect()
}

pub fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// TrackLayout – where the metric tracks sit inside a bandit file
// ---------------------------------------------------------------------------

/// Orientation of metric tracks in a bandit result file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackLayout {
    /// One line per time step, one column per metric (`reward,optimal`).
    #[default]
    Columns,
    /// One line per metric, one column per time step.
    Rows,
}

impl FromStr for TrackLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "columns" | "cols" => Ok(TrackLayout::Columns),
            "rows" => Ok(TrackLayout::Rows),
            other => Err(format!("unknown track layout '{other}' (expected columns or rows)")),
        }
    }
}

impl fmt::Display for TrackLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackLayout::Columns => write!(f, "columns"),
            TrackLayout::Rows => write!(f, "rows"),
        }
    }
}

// ---------------------------------------------------------------------------
// AlgorithmSeries – aggregated bandit curves for one label
// ---------------------------------------------------------------------------

/// Reward and optimality tracks attributed to one algorithm label.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmSeries {
    pub label: String,
    /// Average reward per time step.
    pub reward: Vec<f64>,
    /// Fraction of runs that picked the optimal arm, per time step, in [0,1].
    pub optimality: Vec<f64>,
    pub summary: Option<RunSummary>,
}

impl AlgorithmSeries {
    pub fn steps(&self) -> usize {
        self.reward.len()
    }

    /// Optimality on the 0–100 scale used for display.
    pub fn optimality_percent(&self) -> Vec<f64> {
        self.optimality.iter().map(|&v| to_percent(v)).collect()
    }
}

pub fn to_percent(fraction: f64) -> f64 {
    100.0 * fraction
}

// ---------------------------------------------------------------------------
// Quantization entities
// ---------------------------------------------------------------------------

/// Prototype positions at one training iteration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrototypeSnapshot(pub Vec<[f64; 2]>);

impl PrototypeSnapshot {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.0
    }
}

/// All recorded snapshots of one training run, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PrototypeTrajectorySet {
    snapshots: Vec<PrototypeSnapshot>,
}

impl PrototypeTrajectorySet {
    /// Validate that every snapshot reports the same prototype count.
    pub fn new(dataset: &str, snapshots: Vec<PrototypeSnapshot>) -> Result<Self> {
        let Some(first) = snapshots.first() else {
            return Err(ChartError::shape(dataset, "trajectory has no snapshots"));
        };
        let expected = first.len();
        if expected == 0 {
            return Err(ChartError::shape(dataset, "snapshot 0 has no prototypes"));
        }
        if let Some((i, snap)) = snapshots
            .iter()
            .enumerate()
            .find(|(_, s)| s.len() != expected)
        {
            return Err(ChartError::shape(
                dataset,
                format!(
                    "snapshot {i} has {} prototype(s), snapshot 0 has {expected}",
                    snap.len()
                ),
            ));
        }
        Ok(PrototypeTrajectorySet { snapshots })
    }

    pub fn snapshots(&self) -> &[PrototypeSnapshot] {
        &self.snapshots
    }

    /// Number of recorded iterations (T).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Prototypes per snapshot (P).
    pub fn n_prototypes(&self) -> usize {
        self.snapshots.first().map_or(0, PrototypeSnapshot::len)
    }

    pub fn last(&self) -> &PrototypeSnapshot {
        // `new` rejects empty sets.
        &self.snapshots[self.snapshots.len() - 1]
    }
}

/// The observations the quantizer was trained on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataPointSet {
    points: Vec<[f64; 2]>,
}

impl DataPointSet {
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        DataPointSet { points }
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Quantization error reported upstream for one prototype count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub k: usize,
    pub error: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> RunMatrix {
        RunMatrix {
            source: PathBuf::from("runs/eps.csv"),
            rows,
            summary: None,
        }
    }

    #[test]
    fn transpose_twice_restores_rows() {
        let m = matrix(vec![vec![0.1, 0.2], vec![0.3, 0.4], vec![0.5, 0.6]]);
        let once = m.transpose();
        assert_eq!(once, vec![vec![0.1, 0.3, 0.5], vec![0.2, 0.4, 0.6]]);
        assert_eq!(transpose(&once), m.rows);
    }

    #[test]
    fn tracks_follow_layout() {
        let m = matrix(vec![vec![1.0, 0.0], vec![2.0, 1.0]]);
        assert_eq!(m.tracks(TrackLayout::Columns), vec![vec![1.0, 2.0], vec![0.0, 1.0]]);
        assert_eq!(m.tracks(TrackLayout::Rows), m.rows);
        assert_eq!(m.name(), "eps");
    }

    #[test]
    fn footer_with_two_cells_is_a_summary() {
        assert_eq!(
            RunSummary::from_footer(&[1.5, 0.25]),
            Some(RunSummary {
                mean_total_reward: 1.5,
                std_dev: 0.25
            })
        );
        assert_eq!(RunSummary::from_footer(&[1.5]), None);
    }

    #[test]
    fn layout_parses_case_insensitively() {
        assert_eq!("Rows".parse::<TrackLayout>(), Ok(TrackLayout::Rows));
        assert_eq!("columns".parse::<TrackLayout>(), Ok(TrackLayout::Columns));
        assert!("diagonal".parse::<TrackLayout>().is_err());
    }

    #[test]
    fn trajectory_rejects_uneven_prototype_counts() {
        let snaps = vec![
            PrototypeSnapshot(vec![[0.0, 0.0], [1.0, 1.0]]),
            PrototypeSnapshot(vec![[0.0, 0.0]]),
        ];
        let err = PrototypeTrajectorySet::new("prototypes", snaps).unwrap_err();
        assert!(matches!(err, ChartError::Shape { .. }));
        assert!(err.to_string().contains("snapshot 1"));
    }

    #[test]
    fn trajectory_rejects_empty_set() {
        assert!(matches!(
            PrototypeTrajectorySet::new("prototypes", Vec::new()),
            Err(ChartError::Shape { .. })
        ));
    }

    #[test]
    fn percent_scale_stays_in_range() {
        let series = AlgorithmSeries {
            label: "A".into(),
            reward: vec![0.0, 1.0, 2.0],
            optimality: vec![0.0, 0.5, 1.0],
            summary: None,
        };
        let pct = series.optimality_percent();
        assert_eq!(pct, vec![0.0, 50.0, 100.0]);
        assert!(pct.iter().all(|v| (0.0..=100.0).contains(v)));
        assert_eq!(series.steps(), 3);
    }
}
