use std::path::PathBuf;

use crate::charts::{Chart, ChartStatus};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Every chart the pipelines produced, failed ones included.
    pub charts: Vec<Chart>,

    /// Index into `charts` of the chart in the central panel.
    pub selected: usize,

    /// Directory the data was read from, shown in the top bar.
    pub data_root: PathBuf,
}

impl AppState {
    pub fn new(charts: Vec<Chart>, data_root: PathBuf) -> Self {
        // Open on the first chart that rendered.
        let selected = charts.iter().position(Chart::is_ready).unwrap_or(0);
        Self {
            charts,
            selected,
            data_root,
        }
    }

    pub fn selected_chart(&self) -> Option<&Chart> {
        self.charts.get(self.selected)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.charts.len() {
            self.selected = index;
        }
    }

    pub fn failed_count(&self) -> usize {
        self.charts
            .iter()
            .filter(|c| matches!(c.status, ChartStatus::Failed(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::build_charts;
    use crate::config::PlotConfig;
    use crate::data::fixtures::{scratch_dir, write_file};

    #[test]
    fn opens_on_first_ready_chart() {
        let root = scratch_dir("state_first_ready");
        for i in 0..4 {
            write_file(&root, &format!("Bernoulli/{i}.csv"), "1,0.5\n2,0.75\n9,9\n");
        }
        let cfg = PlotConfig {
            data_root: root.clone(),
            ..PlotConfig::default()
        };

        let mut state = AppState::new(build_charts(&cfg), root);
        // Gaussian is absent, so its two charts failed.
        assert_eq!(state.selected, 2);
        assert_eq!(state.failed_count(), 5);
        assert!(state.selected_chart().unwrap().is_ready());

        state.select(99);
        assert_eq!(state.selected, 2);
        state.select(0);
        assert!(!state.selected_chart().unwrap().is_ready());
    }
}
