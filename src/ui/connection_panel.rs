//! Konfigurations-Panel der selektierten Verbindung.

use crate::app::{AppIntent, AppState};
use crate::core::ConnectionKind;

/// Rendert das Panel fuer die selektierte Verbindung.
///
/// Zeigt den stabilen Key, die Verbindungsart und den Schalter fuer den
/// Weiss-zu-Rot-Abschluss.
pub fn render_connection_panel(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    let Some(address) = &state.selected_connection else {
        return events;
    };
    let Some(connection) = state
        .world
        .as_ref()
        .and_then(|world| world.connection(address))
    else {
        return events;
    };

    egui::Window::new("Verbindung")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_BOTTOM, [8.0, -8.0])
        .show(ctx, |ui| {
            ui.label(&address.key);
            ui.label(match connection.kind {
                ConnectionKind::ExitToExit => "Art: Exit-zu-Exit",
                ConnectionKind::InRoomShortcut => "Art: Kurzweg",
                ConnectionKind::RegionLink => "Art: Regions-Uebergang",
            });
            ui.label(format!("Punkte: {}", connection.points.len()));

            ui.separator();

            let mut white_to_red = connection.allow_white_to_red;
            if ui
                .checkbox(&mut white_to_red, "Weiss-Rot-Abschluss erlauben")
                .changed()
            {
                events.push(AppIntent::WhiteToRedToggled {
                    value: white_to_red,
                });
            }
        });

    events
}
