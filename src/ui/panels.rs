use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – chart list
// ---------------------------------------------------------------------------

/// Render the list of charts; failed ones are shown in red.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Charts");
    ui.separator();

    if state.charts.is_empty() {
        ui.label("No charts configured.");
        return;
    }

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, chart) in state.charts.iter().enumerate() {
                let mut text = RichText::new(&chart.title);
                if !chart.is_ready() {
                    text = text.color(Color32::RED);
                }
                if ui.selectable_label(state.selected == i, text).clicked() {
                    clicked = Some(i);
                }
            }
        });

    if let Some(i) = clicked {
        state.select(i);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!("Data: {}", state.data_root.display()));
        ui.separator();
        ui.label(format!("{} chart(s)", state.charts.len()));

        let failed = state.failed_count();
        if failed > 0 {
            ui.separator();
            ui.label(RichText::new(format!("{failed} failed to load")).color(Color32::RED));
        }
    });
}
