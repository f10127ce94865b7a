//! Application Controller fuer zentrale Event-Verarbeitung.

use glam::Vec2;

use super::{editing, layers, AppIntent, AppState};
use crate::json;
use crate::shared::EditorOptions;

/// Orchestriert UI-Events und Use-Cases auf dem AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        match intent {
            // === Datei-I/O ===
            AppIntent::OpenWorldRequested => state.show_open_world_dialog = true,
            AppIntent::WorldFileSelected { path } => self.load_world(state, path)?,
            AppIntent::LoadStateRequested => state.show_open_state_dialog = true,
            AppIntent::StateFileSelected { path } => {
                if let Some(world) = state.world.as_mut() {
                    json::read_state_file(world, &path)?;
                    state.state_path = Some(path);
                    state.rebuild_point_index();
                } else {
                    log::warn!("Zustand laden ohne geladene Welt ignoriert");
                }
            }
            AppIntent::SaveStateRequested => match state.state_path.clone() {
                Some(path) => self.save_state(state, path)?,
                None => state.show_save_state_dialog = true,
            },
            AppIntent::SaveStatePathSelected { path } => self.save_state(state, path)?,
            AppIntent::ExitRequested => state.should_exit = true,

            // === Kamera & Viewport ===
            AppIntent::ViewportResized { size } => state.viewport_size = size,
            AppIntent::CameraPan { delta } => state.camera.pan(delta),
            AppIntent::CameraZoom {
                factor,
                focus_world,
            } => match focus_world {
                Some(focus) => state.camera.zoom_towards(factor, focus),
                None => state.camera.zoom_by(factor),
            },
            AppIntent::ZoomInRequested => state.camera.zoom_by(state.options.camera_zoom_step),
            AppIntent::ZoomOutRequested => {
                state.camera.zoom_by(1.0 / state.options.camera_zoom_step)
            }
            AppIntent::ResetCameraRequested => {
                let center = state
                    .world
                    .as_ref()
                    .map(world_center)
                    .unwrap_or(Vec2::ZERO);
                state.camera.look_at(center);
                state.camera.zoom = 1.0;
            }

            // === Layer ===
            AppIntent::LayerToggled { id } => {
                if !layers::toggle_layer(&mut state.layers, &id) {
                    log::warn!("Unbekannter Layer: {}", id);
                }
                sync_hidden_layers(state);
            }
            AppIntent::ShowAllLayersRequested => {
                layers::show_all(&mut state.layers);
                sync_hidden_layers(state);
            }
            AppIntent::HideAllLayersRequested => {
                layers::hide_all(&mut state.layers);
                sync_hidden_layers(state);
            }

            // === Punkt-Bearbeitung ===
            AppIntent::ConnectionPickRequested { world_pos } => {
                editing::pick_connection(state, world_pos)
            }
            AppIntent::PointAddRequested { world_pos } => editing::add_point(state, world_pos),
            AppIntent::PointGrabRequested { world_pos } => editing::grab_point(state, world_pos),
            AppIntent::PointMoveRequested { world_pos } => {
                editing::move_dragged_point(state, world_pos)
            }
            AppIntent::PointReleased => editing::release_point(state),
            AppIntent::PointRemoveRequested { world_pos } => {
                editing::remove_point(state, world_pos)
            }

            // === Verbindungs-Optionen ===
            AppIntent::WhiteToRedToggled { value } => {
                let address = state.selected_connection.clone();
                let connection = address.as_ref().zip(state.world.as_mut()).and_then(
                    |(address, world)| world.connection_mut(address),
                );
                match connection {
                    Some(connection) => connection.allow_white_to_red = value,
                    None => log::warn!("Weiss-zu-Rot-Umschaltung ohne selektierte Verbindung"),
                }
            }

            // === Optionen ===
            AppIntent::OptionsDialogToggled => {
                state.show_options_dialog = !state.show_options_dialog
            }
            AppIntent::OptionsChanged { options } => self.apply_options(state, options),
        }

        Ok(())
    }

    /// Laedt eine Welt-Datei und setzt den abhaengigen Zustand zurueck.
    fn load_world(&self, state: &mut AppState, path: std::path::PathBuf) -> anyhow::Result<()> {
        let (world, report) = json::load_world_file(&path)?;

        state.camera.look_at(world_center(&world));
        state.world = Some(world);
        state.load_report = report;
        state.world_path = Some(path);
        state.state_path = None;
        state.selected_connection = None;
        state.dragged_point = None;
        state.rebuild_point_index();

        Ok(())
    }

    /// Speichert den Verbindungszustand.
    fn save_state(&self, state: &mut AppState, path: std::path::PathBuf) -> anyhow::Result<()> {
        match state.world.as_mut() {
            Some(world) => {
                json::write_state_file(world, &path)?;
                state.state_path = Some(path);
            }
            None => log::warn!("Zustand speichern ohne geladene Welt ignoriert"),
        }
        Ok(())
    }

    /// Uebernimmt geaenderte Optionen und persistiert sie.
    fn apply_options(&self, state: &mut AppState, options: EditorOptions) {
        state.options = options;
        if let Err(error) = state.options.save_to_file(&EditorOptions::config_path()) {
            log::warn!("Optionen konnten nicht gespeichert werden: {:#}", error);
        }
    }
}

/// Haelt `options.hidden_layers` mit dem Layer-Stapel synchron,
/// damit die Sichtbarkeit beim naechsten Start wiederhergestellt wird.
fn sync_hidden_layers(state: &mut AppState) {
    state.options.hidden_layers = state
        .layers
        .iter()
        .filter(|l| !l.visible)
        .map(|l| l.id.clone())
        .collect();
}

/// Mittelpunkt aller Raeume (fuer Kamera-Reset und initiale Ausrichtung).
fn world_center(world: &crate::core::World) -> Vec2 {
    let mut sum = Vec2::ZERO;
    let mut count = 0usize;
    for (_, room) in world.rooms.iter() {
        sum += room.center();
        count += 1;
    }
    if count == 0 {
        Vec2::ZERO
    } else {
        sum / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_intents_schalten_sichtbarkeit() {
        let mut controller = AppController::new();
        let mut state = AppState::new();

        controller
            .handle_intent(
                &mut state,
                AppIntent::LayerToggled {
                    id: "rooms".to_string(),
                },
            )
            .expect("Intent darf nicht fehlschlagen");

        let rooms = state
            .layers
            .iter()
            .find(|l| l.id == "rooms")
            .expect("rooms-Layer erwartet");
        assert!(!rooms.visible);
    }

    #[test]
    fn hide_all_intent_verschont_verbindungs_layer() {
        let mut controller = AppController::new();
        let mut state = AppState::new();

        controller
            .handle_intent(&mut state, AppIntent::HideAllLayersRequested)
            .expect("Intent darf nicht fehlschlagen");

        assert!(state
            .layers
            .iter()
            .filter(|l| l.special)
            .all(|l| l.visible));
    }

    #[test]
    fn zoom_intents_respektieren_schrittweite() {
        let mut controller = AppController::new();
        let mut state = AppState::new();
        let step = state.options.camera_zoom_step;

        controller
            .handle_intent(&mut state, AppIntent::ZoomInRequested)
            .expect("Intent darf nicht fehlschlagen");

        assert!((state.camera.zoom - step).abs() < 1e-6);
    }

    #[test]
    fn exit_intent_setzt_flag() {
        let mut controller = AppController::new();
        let mut state = AppState::new();

        controller
            .handle_intent(&mut state, AppIntent::ExitRequested)
            .expect("Intent darf nicht fehlschlagen");

        assert!(state.should_exit);
    }
}
