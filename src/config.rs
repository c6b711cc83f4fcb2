use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::TrackLayout;

// ---------------------------------------------------------------------------
// Bandit regimes
// ---------------------------------------------------------------------------

/// Explicit pairing of a display label with one result file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunEntry {
    pub label: String,
    /// Relative to the regime directory unless absolute.
    pub file: PathBuf,
}

/// One reward-distribution regime: a directory of per-algorithm result files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegimeConfig {
    pub name: String,
    /// Relative to the data root unless absolute.
    pub directory: PathBuf,
    pub reward_title: String,
    pub optimality_title: String,
    /// When non-empty, replaces positional pairing of listed files with labels.
    #[serde(default)]
    pub runs: Vec<RunEntry>,
}

impl RegimeConfig {
    fn armed_bandit(name: &str) -> Self {
        Self {
            name: name.to_string(),
            directory: PathBuf::from(name),
            reward_title: format!("Average reward in {name} 10-armed bandit problem"),
            optimality_title: format!(
                "Percentage of optimal actions in {name} 10-armed bandit problem"
            ),
            runs: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Quantization run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuantizationConfig {
    #[serde(default = "QuantizationConfig::default_directory")]
    pub directory: PathBuf,
    #[serde(default = "QuantizationConfig::default_points_file")]
    pub points_file: PathBuf,
    #[serde(default = "QuantizationConfig::default_prototypes_file")]
    pub prototypes_file: PathBuf,
    #[serde(default = "QuantizationConfig::default_error_file")]
    pub error_file: PathBuf,
    /// Prototype counts the error sweep was run over, in order.
    #[serde(default = "QuantizationConfig::default_candidate_counts")]
    pub candidate_counts: Vec<usize>,
}

impl QuantizationConfig {
    fn default_directory() -> PathBuf {
        PathBuf::from("Quantization")
    }
    fn default_points_file() -> PathBuf {
        PathBuf::from("data.csv")
    }
    fn default_prototypes_file() -> PathBuf {
        PathBuf::from("prototypes.csv")
    }
    fn default_error_file() -> PathBuf {
        PathBuf::from("error.csv")
    }
    fn default_candidate_counts() -> Vec<usize> {
        (1..=10).collect()
    }
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        Self {
            directory: Self::default_directory(),
            points_file: Self::default_points_file(),
            prototypes_file: Self::default_prototypes_file(),
            error_file: Self::default_error_file(),
            candidate_counts: Self::default_candidate_counts(),
        }
    }
}

// ---------------------------------------------------------------------------
// PlotConfig – everything the pipelines need, passed explicitly
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotConfig {
    /// Directory the regime and quantization paths are resolved against.
    #[serde(default = "PlotConfig::default_data_root")]
    pub data_root: PathBuf,
    /// Display labels, in the order result files are paired with them.
    #[serde(default = "PlotConfig::default_algorithms")]
    pub algorithms: Vec<String>,
    /// Recognized result-file extensions.
    #[serde(default = "PlotConfig::default_suffixes")]
    pub suffixes: Vec<String>,
    #[serde(default)]
    pub layout: TrackLayout,
    #[serde(default = "PlotConfig::default_regimes")]
    pub regimes: Vec<RegimeConfig>,
    #[serde(default)]
    pub quantization: QuantizationConfig,
}

impl PlotConfig {
    fn default_data_root() -> PathBuf {
        PathBuf::from(".")
    }
    fn default_algorithms() -> Vec<String> {
        [
            "Epsilon Greedy",
            "Pursuit Method",
            "Reinforcement Comparison",
            "Stochastic Gradient Descent",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
    fn default_suffixes() -> Vec<String> {
        vec!["csv".to_string()]
    }
    fn default_regimes() -> Vec<RegimeConfig> {
        vec![
            RegimeConfig::armed_bandit("Gaussian"),
            RegimeConfig::armed_bandit("Bernoulli"),
        ]
    }

    /// Read a JSON config; absent fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: PlotConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn regime_dir(&self, regime: &RegimeConfig) -> PathBuf {
        self.data_root.join(&regime.directory)
    }

    pub fn quantization_dir(&self) -> PathBuf {
        self.data_root.join(&self.quantization.directory)
    }

    pub fn points_path(&self) -> PathBuf {
        self.quantization_dir().join(&self.quantization.points_file)
    }

    pub fn prototypes_path(&self) -> PathBuf {
        self.quantization_dir().join(&self.quantization.prototypes_file)
    }

    pub fn error_path(&self) -> PathBuf {
        self.quantization_dir().join(&self.quantization.error_file)
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            data_root: Self::default_data_root(),
            algorithms: Self::default_algorithms(),
            suffixes: Self::default_suffixes(),
            layout: TrackLayout::default(),
            regimes: Self::default_regimes(),
            quantization: QuantizationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{scratch_dir, write_file};

    #[test]
    fn defaults_describe_both_regimes() {
        let cfg = PlotConfig::default();
        assert_eq!(cfg.algorithms.len(), 4);
        assert_eq!(cfg.algorithms[0], "Epsilon Greedy");
        assert_eq!(cfg.regimes.len(), 2);
        assert_eq!(cfg.regimes[0].name, "Gaussian");
        assert_eq!(
            cfg.regimes[1].reward_title,
            "Average reward in Bernoulli 10-armed bandit problem"
        );
        assert_eq!(cfg.layout, TrackLayout::Columns);
        assert_eq!(cfg.quantization.candidate_counts, (1..=10).collect::<Vec<_>>());
        assert_eq!(cfg.points_path(), Path::new("./Quantization/data.csv"));
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let dir = scratch_dir("config_partial");
        let path = write_file(
            &dir,
            "plots.json",
            r#"{
                "data_root": "/data/bandit",
                "layout": "rows",
                "quantization": { "candidate_counts": [2, 4, 8] }
            }"#,
        );

        let cfg = PlotConfig::load(&path).unwrap();
        assert_eq!(cfg.data_root, PathBuf::from("/data/bandit"));
        assert_eq!(cfg.layout, TrackLayout::Rows);
        assert_eq!(cfg.quantization.candidate_counts, vec![2, 4, 8]);
        assert_eq!(cfg.quantization.points_file, PathBuf::from("data.csv"));
        assert_eq!(cfg.algorithms, PlotConfig::default().algorithms);
        assert_eq!(
            cfg.regime_dir(&cfg.regimes[0]),
            PathBuf::from("/data/bandit/Gaussian")
        );
    }

    #[test]
    fn explicit_run_mapping_parses() {
        let dir = scratch_dir("config_runs");
        let path = write_file(
            &dir,
            "plots.json",
            r#"{
                "regimes": [{
                    "name": "Gaussian",
                    "directory": "gauss",
                    "reward_title": "Reward",
                    "optimality_title": "Optimal",
                    "runs": [
                        { "label": "Epsilon Greedy", "file": "eps.csv" },
                        { "label": "Pursuit Method", "file": "pursuit.csv" }
                    ]
                }]
            }"#,
        );

        let cfg = PlotConfig::load(&path).unwrap();
        assert_eq!(cfg.regimes.len(), 1);
        assert_eq!(cfg.regimes[0].runs[1].label, "Pursuit Method");
        assert_eq!(cfg.regimes[0].runs[1].file, PathBuf::from("pursuit.csv"));
    }

    #[test]
    fn malformed_json_reports_the_path() {
        let dir = scratch_dir("config_bad");
        let path = write_file(&dir, "plots.json", "{ not json");
        let err = PlotConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("plots.json"));
    }
}
