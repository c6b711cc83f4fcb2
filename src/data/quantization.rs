use std::path::Path;

use super::error::Result;
use super::loader;
use super::model::{DataPointSet, PrototypeSnapshot, PrototypeTrajectorySet};

// ---------------------------------------------------------------------------
// QuantizationView – read-only views over one prototype-learning run
// ---------------------------------------------------------------------------

/// Training data and recorded prototype snapshots.
///
/// The error sweep is read on its own with [`loader::load_sweep`]; it shares
/// no input with these views.
#[derive(Debug, Clone)]
pub struct QuantizationView {
    points: DataPointSet,
    trajectory: PrototypeTrajectorySet,
}

impl QuantizationView {
    pub fn new(points: DataPointSet, trajectory: PrototypeTrajectorySet) -> Self {
        QuantizationView { points, trajectory }
    }

    /// Read the data points and prototype snapshots of one run.
    pub fn load(points_path: &Path, trajectory_path: &Path) -> Result<Self> {
        let points = loader::load_points(points_path)?;
        let trajectory = loader::load_trajectory(trajectory_path)?;
        log::info!(
            "Loaded {} data point(s), {} snapshot(s) of {} prototype(s)",
            points.len(),
            trajectory.len(),
            trajectory.n_prototypes()
        );
        Ok(QuantizationView::new(points, trajectory))
    }

    pub fn points(&self) -> &DataPointSet {
        &self.points
    }

    pub fn trajectory_set(&self) -> &PrototypeTrajectorySet {
        &self.trajectory
    }

    /// Final prototype placement next to the full training data.
    pub fn final_placement(&self) -> (&PrototypeSnapshot, &DataPointSet) {
        (self.trajectory.last(), &self.points)
    }

    /// Path of prototype `j` through every snapshot.
    pub fn trajectory(&self, j: usize) -> Option<Vec<[f64; 2]>> {
        if j >= self.trajectory.n_prototypes() {
            return None;
        }
        Some(
            self.trajectory
                .snapshots()
                .iter()
                .map(|snap| snap.points()[j])
                .collect(),
        )
    }

    /// One path per prototype, each as long as the snapshot count.
    pub fn trajectories(&self) -> Vec<Vec<[f64; 2]>> {
        (0..self.trajectory.n_prototypes())
            .filter_map(|j| self.trajectory(j))
            .collect()
    }
}
