//! Optionen-Dialog fuer Linienstaerken, Farben und Kamera-Schritte.

use crate::app::{AppIntent, AppState};

/// Zeigt den Options-Dialog und gibt erzeugte Events zurueck.
pub fn show_options_dialog(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    if !state.show_options_dialog {
        return events;
    }

    // Arbeitskopie der Optionen fuer Live-Bearbeitung
    let mut opts = state.options.clone();
    let mut changed = false;

    egui::Window::new("Optionen")
        .collapsible(true)
        .resizable(false)
        .default_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            // ── Verbindungen ────────────────────────────────────
            ui.collapsing("Verbindungen", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Linienstaerke (px):");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut opts.connection_thickness_px)
                                .range(0.5..=10.0)
                                .speed(0.1),
                        )
                        .changed();
                });
                ui.horizontal(|ui| {
                    ui.label("Schatten-Zusatzbreite (px):");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut opts.shadow_extra_px)
                                .range(0.0..=10.0)
                                .speed(0.1),
                        )
                        .changed();
                });
                changed |= ui.checkbox(&mut opts.show_guides, "Guide-Linien zeigen").changed();
            });

            // ── Selektion ───────────────────────────────────────
            ui.collapsing("Selektion", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Pick-Radius (px):");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut opts.selection_pick_radius_px)
                                .range(4.0..=50.0)
                                .speed(0.5),
                        )
                        .changed();
                });
            });

            // ── Kamera ──────────────────────────────────────────
            ui.collapsing("Kamera", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Zoom-Schritt:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut opts.camera_zoom_step)
                                .range(1.01..=2.0)
                                .speed(0.01),
                        )
                        .changed();
                });
                ui.horizontal(|ui| {
                    ui.label("Scroll-Zoom-Schritt:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut opts.camera_scroll_zoom_step)
                                .range(1.01..=2.0)
                                .speed(0.01),
                        )
                        .changed();
                });
            });

            ui.separator();
            if ui.button("Schliessen").clicked() {
                events.push(AppIntent::OptionsDialogToggled);
            }
        });

    if changed {
        events.push(AppIntent::OptionsChanged { options: opts });
    }

    events
}
