//! Seitenpanel mit den Layer-Sichtbarkeits-Schaltern.

use crate::app::{AppIntent, AppState};

/// Rendert das Layer-Panel am rechten Rand.
pub fn render_layers_panel(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::SidePanel::right("layers_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Layer");
            ui.separator();

            for layer in &state.layers {
                let mut visible = layer.visible;
                let label = if layer.special {
                    format!("{} *", layer.name)
                } else {
                    layer.name.clone()
                };

                if ui.checkbox(&mut visible, label).changed() {
                    events.push(AppIntent::LayerToggled {
                        id: layer.id.clone(),
                    });
                }
            }

            ui.separator();
            ui.small("* System-Layer: von Alle-ein/aus ausgenommen");
        });

    events
}
