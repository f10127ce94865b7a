//! Status-Bar am unteren Bildschirmrand.

use crate::app::AppState;

/// Rendert die Status-Bar.
pub fn render_status_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if state.world.is_some() {
                ui.label(format!(
                    "Raeume: {} | Verbindungen: {}",
                    state.room_count(),
                    state.connection_count()
                ));
            } else {
                ui.label("Keine Welt geladen");
            }

            ui.separator();

            ui.label(format!(
                "Zoom: {:.2}x | Position: ({:.1}, {:.1})",
                state.camera.zoom, state.camera.position.x, state.camera.position.y
            ));

            if !state.load_report.is_empty() {
                ui.separator();
                ui.colored_label(
                    egui::Color32::YELLOW,
                    format!("Ladefehler: {}", state.load_report.len()),
                );
            }

            if let Some(address) = &state.selected_connection {
                ui.separator();
                ui.label(format!("Selektiert: {}", address.key));
            }
        });
    });
}
