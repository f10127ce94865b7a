//! Top-Menue (Datei, Ansicht, Layer).

use crate::app::{AppIntent, AppState};

/// Rendert die Menue-Leiste.
pub fn render_menu(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("Datei", |ui| {
                if ui.button("Welt oeffnen...").clicked() {
                    events.push(AppIntent::OpenWorldRequested);
                    ui.close();
                }

                ui.separator();

                let has_world = state.world.is_some();

                if ui
                    .add_enabled(has_world, egui::Button::new("Karte laden..."))
                    .clicked()
                {
                    events.push(AppIntent::LoadStateRequested);
                    ui.close();
                }

                if ui
                    .add_enabled(has_world, egui::Button::new("Karte speichern"))
                    .clicked()
                {
                    events.push(AppIntent::SaveStateRequested);
                    ui.close();
                }

                ui.separator();

                if ui.button("Beenden").clicked() {
                    events.push(AppIntent::ExitRequested);
                    ui.close();
                }
            });

            ui.menu_button("Ansicht", |ui| {
                if ui.button("Hineinzoomen (+)").clicked() {
                    events.push(AppIntent::ZoomInRequested);
                    ui.close();
                }
                if ui.button("Herauszoomen (-)").clicked() {
                    events.push(AppIntent::ZoomOutRequested);
                    ui.close();
                }
                if ui.button("Kamera zuruecksetzen").clicked() {
                    events.push(AppIntent::ResetCameraRequested);
                    ui.close();
                }

                ui.separator();

                if ui.button("Optionen...").clicked() {
                    events.push(AppIntent::OptionsDialogToggled);
                    ui.close();
                }
            });

            ui.menu_button("Layer", |ui| {
                if ui.button("Alle einblenden").clicked() {
                    events.push(AppIntent::ShowAllLayersRequested);
                    ui.close();
                }
                if ui.button("Alle ausblenden").clicked() {
                    events.push(AppIntent::HideAllLayersRequested);
                    ui.close();
                }
            });
        });
    });

    events
}
