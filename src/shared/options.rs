//! Zentrale Konfiguration fuer den Region-Map-Editor.
//!
//! `EditorOptions` enthaelt alle zur Laufzeit aenderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Verbindungs-Rendering ──────────────────────────────────────────

/// Linienstaerke der Verbindungen in Screen-Pixeln.
pub const CONNECTION_THICKNESS_PX: f32 = 2.0;
/// Zusaetzliche Breite des Schattenpasses.
pub const SHADOW_EXTRA_PX: f32 = 2.0;
/// Farbe des Schattenpasses (RGBA).
pub const SHADOW_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.47];
/// Kantenlaenge der Guide-Punktmarker in Pixeln.
pub const GUIDE_POINT_SIZE_PX: f32 = 4.0;

// ── Selektion ──────────────────────────────────────────────────────

/// Pick-Radius fuer Punkt-Selektion in Screen-Pixeln.
pub const SELECTION_PICK_RADIUS_PX: f32 = 12.0;

// ── Kamera ─────────────────────────────────────────────────────────

/// Zoom-Schritt bei stufenweisem Zoom (Menue-Buttons / Shortcuts).
pub const CAMERA_ZOOM_STEP: f32 = 1.2;
/// Zoom-Schritt bei Mausrad-Scroll.
pub const CAMERA_SCROLL_ZOOM_STEP: f32 = 1.1;

/// Alle zur Laufzeit aenderbaren Editor-Optionen.
/// Wird als `region_map_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Verbindungen ────────────────────────────────────────────
    /// Linienstaerke der Verbindungen in Pixeln
    pub connection_thickness_px: f32,
    /// Zusaetzliche Breite des Schattenpasses
    pub shadow_extra_px: f32,
    /// Farbe des Schattenpasses
    pub shadow_color: [f32; 4],
    /// Kantenlaenge der Guide-Punktmarker
    pub guide_point_size_px: f32,
    /// Guide-Linien zeichnen (Editor-Hilfslinien)
    #[serde(default)]
    pub show_guides: bool,

    // ── Selektion ───────────────────────────────────────────────
    /// Pick-Radius fuer Punkt-Selektion in Screen-Pixeln
    pub selection_pick_radius_px: f32,

    // ── Kamera ──────────────────────────────────────────────────
    /// Zoom-Schritt bei Menue-Buttons / Shortcuts
    pub camera_zoom_step: f32,
    /// Zoom-Schritt bei Mausrad-Scroll
    pub camera_scroll_zoom_step: f32,

    // ── Layer ───────────────────────────────────────────────────
    /// Ids der beim Start ausgeblendeten Layer
    #[serde(default)]
    pub hidden_layers: Vec<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            connection_thickness_px: CONNECTION_THICKNESS_PX,
            shadow_extra_px: SHADOW_EXTRA_PX,
            shadow_color: SHADOW_COLOR,
            guide_point_size_px: GUIDE_POINT_SIZE_PX,
            show_guides: false,

            selection_pick_radius_px: SELECTION_PICK_RADIUS_PX,

            camera_zoom_step: CAMERA_ZOOM_STEP,
            camera_scroll_zoom_step: CAMERA_SCROLL_ZOOM_STEP,

            hidden_layers: Vec::new(),
        }
    }
}

impl EditorOptions {
    /// Laedt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("region_map_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("region_map_editor.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_entsprechen_den_konstanten() {
        let opts = EditorOptions::default();
        assert_eq!(opts.connection_thickness_px, CONNECTION_THICKNESS_PX);
        assert_eq!(opts.shadow_color, SHADOW_COLOR);
        assert!(opts.hidden_layers.is_empty());
    }

    #[test]
    fn toml_roundtrip_erhaelt_werte() {
        let mut opts = EditorOptions::default();
        opts.show_guides = true;
        opts.hidden_layers = vec!["grid".to_string()];

        let text = toml::to_string_pretty(&opts).expect("TOML-Serialisierung erwartet");
        let back: EditorOptions = toml::from_str(&text).expect("TOML-Parse erwartet");

        assert!(back.show_guides);
        assert_eq!(back.hidden_layers, vec!["grid".to_string()]);
    }
}
