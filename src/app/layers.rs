//! Aufbau und Verwaltung des Layer-Stapels.

use crate::core::{Layer, LayerKind};
use crate::shared::EditorOptions;

/// Baut den Standard-Layer-Stapel in Zeichenreihenfolge auf.
///
/// Raster zuunterst, dann Raeume, dann die beiden Verbindungs-Layer.
/// In den Optionen ausgeblendete Layer starten unsichtbar.
pub fn default_layers(options: &EditorOptions) -> Vec<Layer> {
    let mut layers = vec![
        Layer::grid(),
        Layer::new("rooms", "Raeume", LayerKind::Generic, false, true),
        Layer::connections(false, true),
        Layer::connections(true, true),
    ];

    for layer in &mut layers {
        if options.hidden_layers.contains(&layer.id) {
            layer.visible = false;
        }
    }

    layers
}

/// Schaltet die Sichtbarkeit eines Layers um. `true` bei Erfolg.
pub fn toggle_layer(layers: &mut [Layer], id: &str) -> bool {
    match layers.iter_mut().find(|l| l.id == id) {
        Some(layer) => {
            layer.visible = !layer.visible;
            true
        }
        None => false,
    }
}

/// Blendet alle Layer ein. System-Layer sind ausgenommen.
pub fn show_all(layers: &mut [Layer]) {
    for layer in layers.iter_mut().filter(|l| !l.special) {
        layer.visible = true;
    }
}

/// Blendet alle Layer aus. System-Layer sind ausgenommen.
pub fn hide_all(layers: &mut [Layer]) {
    for layer in layers.iter_mut().filter(|l| !l.special) {
        layer.visible = false;
    }
}

/// Setzt jeden Layer auf seine Standard-Sichtbarkeit zurueck.
pub fn reset_visibility(layers: &mut [Layer]) {
    for layer in layers.iter_mut() {
        layer.visible = layer.default_visibility;
    }
}
