//! Native Datei-Dialoge (rfd).

use crate::app::{AppIntent, AppState};

/// Verarbeitet ausstehende Datei-Dialoge und gibt AppIntents zurueck.
pub fn handle_file_dialogs(state: &mut AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    // Welt-Datei oeffnen
    if state.show_open_world_dialog {
        state.show_open_world_dialog = false;

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Welt-Datei", &["json"])
            .pick_file()
        {
            events.push(AppIntent::WorldFileSelected { path });
        }
    }

    // Verbindungszustand laden
    if state.show_open_state_dialog {
        state.show_open_state_dialog = false;

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Karten-Zustand", &["json"])
            .pick_file()
        {
            events.push(AppIntent::StateFileSelected { path });
        }
    }

    // Verbindungszustand speichern
    if state.show_save_state_dialog {
        state.show_save_state_dialog = false;

        let default_name = state
            .state_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("map_state.json");

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Karten-Zustand", &["json"])
            .set_file_name(default_name)
            .save_file()
        {
            events.push(AppIntent::SaveStatePathSelected { path });
        }
    }

    events
}
