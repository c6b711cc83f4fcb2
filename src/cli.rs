use std::path::PathBuf;

use clap::Parser;

use crate::data::model::TrackLayout;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Directory holding the Gaussian/, Bernoulli/ and Quantization/ results
    #[arg(value_name = "DATA_ROOT")]
    pub data_root: Option<PathBuf>,

    /// Path to a JSON config (labels, directories, explicit file mapping)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Track orientation in bandit files: columns (one line per step) or rows
    #[arg(long)]
    pub layout: Option<TrackLayout>,

    /// Run the pipelines and print a summary instead of opening a window
    #[arg(long, default_value_t = false)]
    pub nogui: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "rusty-bandit",
            "results",
            "--layout",
            "rows",
            "--nogui",
        ])
        .unwrap();
        assert_eq!(args.data_root, Some(PathBuf::from("results")));
        assert_eq!(args.layout, Some(TrackLayout::Rows));
        assert!(args.nogui);
        assert!(args.config.is_none());
    }

    #[test]
    fn rejects_unknown_layout() {
        assert!(Args::try_parse_from(["rusty-bandit", "--layout", "diagonal"]).is_err());
    }
}
