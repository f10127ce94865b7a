//! Persistenz des Verbindungszustands: eine JSON-Datei, ein Objekt,
//! ein Eintrag pro Verbindung unter ihrem stabilen Key.

use anyhow::Context;
use serde_json::Value;
use std::path::Path;

use crate::core::World;

/// Serialisiert den Zustand aller Verbindungen der Welt.
///
/// Ergebnis: `{ "<JsonKey>": { "points": [...], "whiteToRed": bool }, ... }`.
/// Der Anker-Abgleich laeuft pro Verbindung vor dem Schreiben.
pub fn save_map_state(world: &mut World) -> Value {
    let World {
        rooms,
        regions,
        global_connections,
        ..
    } = world;

    let mut state = serde_json::Map::new();

    for region in regions.iter_mut() {
        for (key, connection) in region.connections.iter_mut() {
            state.insert(key.clone(), connection.save_json(rooms));
        }
    }
    for (key, connection) in global_connections.iter_mut() {
        state.insert(key.clone(), connection.save_json(rooms));
    }

    Value::Object(state)
}

/// Spielt gespeicherten Verbindungszustand in die Welt zurueck.
///
/// Eintraege ohne zugehoerige Verbindung werden mit Warnung uebersprungen
/// (die Welt kann sich seit dem Speichern veraendert haben); fehlerhafte
/// Werte fallen in `Connection::load_json` still durch.
pub fn load_map_state(world: &mut World, state: &Value) {
    let Value::Object(entries) = state else {
        log::warn!("Verbindungszustand hat kein JSON-Objekt auf oberster Ebene");
        return;
    };

    let World {
        rooms,
        regions,
        global_connections,
        ..
    } = world;

    let mut applied = 0usize;
    for (key, value) in entries {
        let connection = regions
            .iter_mut()
            .find_map(|region| region.connections.get_mut(key))
            .or_else(|| global_connections.get_mut(key));

        match connection {
            Some(connection) => {
                connection.load_json(rooms, value);
                applied += 1;
            }
            None => log::warn!("Gespeicherter Zustand fuer unbekannte Verbindung: {}", key),
        }
    }

    log::info!(
        "Verbindungszustand geladen: {} von {} Eintraegen angewendet",
        applied,
        entries.len()
    );
}

/// Schreibt den Verbindungszustand als JSON-Datei.
pub fn write_state_file(world: &mut World, path: &Path) -> anyhow::Result<()> {
    let state = save_map_state(world);
    let text = serde_json::to_string_pretty(&state)?;
    std::fs::write(path, text)
        .with_context(|| format!("Zustand konnte nicht geschrieben werden: {}", path.display()))?;
    log::info!("Verbindungszustand gespeichert nach: {}", path.display());
    Ok(())
}

/// Liest eine Zustandsdatei und spielt sie in die Welt zurueck.
pub fn read_state_file(world: &mut World, path: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Zustand konnte nicht gelesen werden: {}", path.display()))?;
    let state: Value = serde_json::from_str(&text)
        .with_context(|| format!("Zustand ist kein gueltiges JSON: {}", path.display()))?;
    load_map_state(world, &state);
    Ok(())
}
