mod app;
mod charts;
mod cli;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use app::ChartViewerApp;
use cli::Args;
use config::PlotConfig;
use state::AppState;

/// Merge the config file (if any) with command-line overrides.
fn resolve_config(args: &Args) -> Result<PlotConfig> {
    let mut cfg = match &args.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    if let Some(root) = &args.data_root {
        cfg.data_root = root.clone();
    }
    if let Some(layout) = args.layout {
        cfg.layout = layout;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = resolve_config(&args)?;
    log::info!(
        "Reading results from {} ({} layout)",
        cfg.data_root.display(),
        cfg.layout
    );

    let charts = charts::build_charts(&cfg);

    if args.nogui {
        for chart in &charts {
            println!("{chart}");
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(charts, cfg.data_root.clone());
    eframe::run_native(
        "Rusty Bandit – Experiment Charts",
        options,
        Box::new(|_cc| Ok(Box::new(ChartViewerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
