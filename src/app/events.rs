//! AppIntent-Enum fuer den UI→Controller-Datenfluss.
//!
//! Intents sind Eingaben aus UI/System ohne direkte Mutationslogik;
//! der `AppController` setzt sie in Zustandsaenderungen um.

use std::path::PathBuf;

use crate::shared::EditorOptions;

/// Eingabe-Ereignisse der Anwendung.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Welt-Datei oeffnen (zeigt Dateidialog)
    OpenWorldRequested,
    /// Welt-Datei wurde gewaehlt
    WorldFileSelected {
        /// Pfad der Welt-Datei
        path: PathBuf,
    },
    /// Verbindungszustand laden (zeigt Dateidialog)
    LoadStateRequested,
    /// Zustandsdatei wurde gewaehlt
    StateFileSelected {
        /// Pfad der Zustandsdatei
        path: PathBuf,
    },
    /// Verbindungszustand speichern (unter aktuellem Pfad oder mit Dialog)
    SaveStateRequested,
    /// Speicherpfad wurde gewaehlt
    SaveStatePathSelected {
        /// Zielpfad
        path: PathBuf,
    },
    /// Anwendung beenden
    ExitRequested,

    /// Viewport-Groesse hat sich geaendert
    ViewportResized {
        /// Neue Groesse in Pixeln
        size: [f32; 2],
    },
    /// Kamera um Delta verschieben (Welt-Einheiten)
    CameraPan {
        /// Verschiebung
        delta: glam::Vec2,
    },
    /// Kamera zoomen (optional auf einen Fokuspunkt)
    CameraZoom {
        /// Zoom-Faktor
        factor: f32,
        /// Fokuspunkt in Weltkoordinaten
        focus_world: Option<glam::Vec2>,
    },
    /// Stufenweise hineinzoomen
    ZoomInRequested,
    /// Stufenweise herauszoomen
    ZoomOutRequested,
    /// Kamera auf die Weltmitte zuruecksetzen
    ResetCameraRequested,

    /// Sichtbarkeit eines Layers umschalten
    LayerToggled {
        /// Layer-Id
        id: String,
    },
    /// Alle Layer einblenden (System-Layer ausgenommen)
    ShowAllLayersRequested,
    /// Alle Layer ausblenden (System-Layer ausgenommen)
    HideAllLayersRequested,

    /// Verbindung unter dem Cursor selektieren
    ConnectionPickRequested {
        /// Weltposition des Klicks
        world_pos: glam::Vec2,
    },
    /// Punkt an der Weltposition in die selektierte Verbindung einfuegen
    PointAddRequested {
        /// Einfuegeposition
        world_pos: glam::Vec2,
    },
    /// Punkt unter dem Cursor greifen (Drag-Beginn)
    PointGrabRequested {
        /// Weltposition des Klicks
        world_pos: glam::Vec2,
    },
    /// Gegriffenen Punkt verschieben
    PointMoveRequested {
        /// Neue Weltposition
        world_pos: glam::Vec2,
    },
    /// Drag abgeschlossen
    PointReleased,
    /// Punkt unter dem Cursor entfernen
    PointRemoveRequested {
        /// Weltposition des Klicks
        world_pos: glam::Vec2,
    },

    /// Weiss-zu-Rot-Option der selektierten Verbindung setzen
    WhiteToRedToggled {
        /// Neuer Wert
        value: bool,
    },
    /// Options-Dialog ein-/ausblenden
    OptionsDialogToggled,
    /// Geaenderte Optionen uebernehmen und speichern
    OptionsChanged {
        /// Neue Optionen
        options: EditorOptions,
    },
}
