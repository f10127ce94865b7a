//! Viewport-Input: Pan, Zoom, Punkt-Drag und Klick-Selektion.

use glam::Vec2;

use crate::app::AppIntent;
use crate::core::Camera2D;
use crate::shared::EditorOptions;

/// Sammelt Viewport-Eingaben und setzt sie in AppIntents um.
///
/// Belegung: Primaertaste greift/zieht Punkte und selektiert per Klick,
/// Doppelklick fuegt einen Punkt ein, Mitteltaste entfernt einen Punkt,
/// Sekundaertaste schwenkt die Kamera, Mausrad zoomt auf den Cursor.
#[derive(Default)]
pub struct InputState;

impl InputState {
    /// Erstellt einen neuen Input-State.
    pub fn new() -> Self {
        Self
    }

    /// Wertet die Eingaben eines Frames fuer den Viewport aus.
    pub fn collect_viewport_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        viewport: egui::Rect,
        camera: &Camera2D,
        options: &EditorOptions,
    ) -> Vec<AppIntent> {
        let mut events = Vec::new();
        let viewport_size = Vec2::new(viewport.width(), viewport.height());

        let to_world = |pos: egui::Pos2| {
            camera.screen_to_world(
                Vec2::new(pos.x - viewport.min.x, pos.y - viewport.min.y),
                viewport_size,
            )
        };

        // Mausrad: Zoom auf den Cursor
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            if let Some(pos) = response.hover_pos() {
                let factor = if scroll > 0.0 {
                    options.camera_scroll_zoom_step
                } else {
                    1.0 / options.camera_scroll_zoom_step
                };
                events.push(AppIntent::CameraZoom {
                    factor,
                    focus_world: Some(to_world(pos)),
                });
            }
        }

        // Primaertaste: Punkt greifen / ziehen / loslassen
        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(AppIntent::PointGrabRequested {
                    world_pos: to_world(pos),
                });
            }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(AppIntent::PointMoveRequested {
                    world_pos: to_world(pos),
                });
            }
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            events.push(AppIntent::PointReleased);
        }

        // Sekundaertaste: Kamera-Pan (Welt bewegt sich mit dem Cursor)
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            events.push(AppIntent::CameraPan {
                delta: Vec2::new(-delta.x, -delta.y) * camera.world_per_pixel(),
            });
        }

        // Klicks
        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(AppIntent::PointAddRequested {
                    world_pos: to_world(pos),
                });
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(AppIntent::ConnectionPickRequested {
                    world_pos: to_world(pos),
                });
            }
        }

        if response.clicked_by(egui::PointerButton::Middle) {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(AppIntent::PointRemoveRequested {
                    world_pos: to_world(pos),
                });
            }
        }

        events
    }
}
