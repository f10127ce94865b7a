//! Application State — zentrale Datenhaltung.

use std::path::PathBuf;

use crate::core::{Camera2D, ConnectionAddress, Layer, LoadReport, PointIndex, World};
use crate::shared::EditorOptions;

/// Hauptzustand der Anwendung.
pub struct AppState {
    /// Aktuell geladene Welt (None = keine Datei geladen)
    pub world: Option<World>,
    /// Layer-Stapel in Zeichenreihenfolge
    pub layers: Vec<Layer>,
    /// Kamera
    pub camera: Camera2D,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Ladefehler des letzten Weltaufbaus
    pub load_report: LoadReport,
    /// Spatial-Index ueber allen Verbindungspunkten (fuer Picking)
    pub point_index: PointIndex,
    /// Aktuell selektierte Verbindung (fuer das Konfigurations-Panel)
    pub selected_connection: Option<ConnectionAddress>,
    /// Punkt im Drag-Zustand: (Verbindung, Punkt-Index)
    pub dragged_point: Option<(ConnectionAddress, usize)>,
    /// Aktuelle Viewport-Groesse in Pixeln
    pub viewport_size: [f32; 2],
    /// Pfad der geladenen Welt-Datei
    pub world_path: Option<PathBuf>,
    /// Pfad der zuletzt benutzten Zustandsdatei
    pub state_path: Option<PathBuf>,
    /// Ob der Options-Dialog angezeigt wird
    pub show_options_dialog: bool,
    /// Welt-Datei-Dialog anstehend
    pub show_open_world_dialog: bool,
    /// Zustand-Laden-Dialog anstehend
    pub show_open_state_dialog: bool,
    /// Zustand-Speichern-Dialog anstehend
    pub show_save_state_dialog: bool,
    /// Signalisiert dem Host (eframe), die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State.
    pub fn new() -> Self {
        let options = EditorOptions::default();
        let layers = super::layers::default_layers(&options);

        Self {
            world: None,
            layers,
            camera: Camera2D::new(),
            options,
            load_report: LoadReport::new(),
            point_index: PointIndex::empty(),
            selected_connection: None,
            dragged_point: None,
            viewport_size: [0.0, 0.0],
            world_path: None,
            state_path: None,
            show_options_dialog: false,
            show_open_world_dialog: false,
            show_open_state_dialog: false,
            show_save_state_dialog: false,
            should_exit: false,
        }
    }

    /// Gibt die Anzahl der Raeume zurueck (fuer UI-Anzeige).
    pub fn room_count(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.room_count())
    }

    /// Gibt die Anzahl der Verbindungen zurueck (fuer UI-Anzeige).
    pub fn connection_count(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.connection_count())
    }

    /// Baut den Punkt-Index aus der aktuellen Welt neu auf.
    pub fn rebuild_point_index(&mut self) {
        self.point_index = match &self.world {
            Some(world) => PointIndex::from_world(world),
            None => PointIndex::empty(),
        };
    }

    /// Viewport-Groesse als Vektor.
    pub fn viewport_vec(&self) -> glam::Vec2 {
        glam::Vec2::new(self.viewport_size[0], self.viewport_size[1])
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
