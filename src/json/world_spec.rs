//! Welt-Eingabeformat: Regionen, Raeume, Exits und Uebergaenge als JSON.
//!
//! Aus einer `WorldSpec` entsteht die Welt in zwei Schritten: erst alle
//! Raeume registrieren (Namen → Handles), dann Verknuepfungen aufloesen und
//! den Verbindungsaufbau anstossen. Strukturfehler degradieren und landen
//! im `LoadReport`, der Aufbau laeuft immer vollstaendig durch.

use anyhow::Context;
use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::core::{
    ExitLink, LoadReport, Region, Room, RoomId, Shortcut, Subregion, World,
};

/// Wurzel des Welt-Eingabeformats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSpec {
    /// Alle Regionen
    pub regions: Vec<RegionSpec>,
    /// Regions-Uebergaenge (Raumnamen-Paare)
    #[serde(default)]
    pub region_links: Vec<RegionLinkSpec>,
}

/// Eine Region mit ihren Raeumen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSpec {
    /// Kuerzel (z.B. "SU")
    pub id: String,
    /// Anzeigename
    pub name: String,
    /// Subregionen mit Hintergrundfarben
    #[serde(default)]
    pub subregions: Vec<SubregionSpec>,
    /// Raeume der Region
    pub rooms: Vec<RoomSpec>,
}

/// Subregion mit Hintergrundfarbe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubregionSpec {
    /// Name
    pub name: String,
    /// Hintergrundfarbe (RGBA)
    pub background_color: [f32; 4],
}

/// Ein Raum des Eingabeformats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSpec {
    /// Eindeutiger Name
    pub name: String,
    /// Weltposition (x, y)
    pub position: [f32; 2],
    /// Groesse (Breite, Hoehe)
    pub size: [f32; 2],
    /// Exit-Ankerpunkte (lokale Tile-Koordinaten)
    #[serde(default)]
    pub exits: Vec<[i32; 2]>,
    /// Pro Exit: Verknuepfung zum Partner-Raum (null = unverbunden)
    #[serde(default)]
    pub exit_links: Vec<Option<ExitLinkSpec>>,
    /// Kurzwege innerhalb des Raums
    #[serde(default)]
    pub shortcuts: Vec<ShortcutSpec>,
    /// Richtungs-Karte der Shortcut-Tiles
    #[serde(default)]
    pub shortcut_tiles: Vec<ShortcutTileSpec>,
    /// Gate-Raum
    #[serde(default)]
    pub is_gate: bool,
    /// Name der Subregion
    #[serde(default)]
    pub subregion: Option<String>,
}

/// Exit-Verknuepfung per Raumname.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitLinkSpec {
    /// Exit-Index im Quellraum
    pub exit: i32,
    /// Zielraum-Name (null = fehlt)
    pub target: Option<String>,
    /// Exit-Index im Zielraum
    pub target_exit: i32,
}

/// Kurzweg (Eingang → Ziel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortcutSpec {
    /// Eingangs-Tile
    pub entrance: [i32; 2],
    /// Ziel-Tile
    pub target: [i32; 2],
}

/// Ein Eintrag der Shortcut-Richtungskarte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortcutTileSpec {
    /// Tile-Koordinate
    pub tile: [i32; 2],
    /// Schrittrichtung
    pub dir: [i32; 2],
}

/// Regions-Uebergang per Raumnamen-Paar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionLinkSpec {
    /// Quellraum-Name
    pub from: String,
    /// Zielraum-Name
    pub to: String,
}

/// Parst eine WorldSpec aus JSON-Text.
pub fn parse_world_spec(text: &str) -> anyhow::Result<WorldSpec> {
    serde_json::from_str(text).context("Welt-Datei ist keine gueltige WorldSpec")
}

/// Baut die Welt aus einer Spezifikation auf.
///
/// Unbekannte Raumnamen in Verknuepfungen ergeben `target: None` und damit
/// spaeter einen `MissingRoom`-Eintrag im Report; unbekannte Namen in
/// Regions-Uebergaengen werden mit Warnung uebersprungen.
pub fn build_world(spec: &WorldSpec, report: &mut LoadReport) -> World {
    let mut world = World::new();

    // Schritt 1: Raeume registrieren, Namen → Handles
    let mut by_name: HashMap<String, RoomId> = HashMap::new();

    for region_spec in &spec.regions {
        let mut region = Region::new(region_spec.id.clone(), region_spec.name.clone());
        region.subregions = region_spec
            .subregions
            .iter()
            .map(|s| Subregion::new(s.name.clone(), s.background_color))
            .collect();

        for room_spec in &region_spec.rooms {
            let mut room = Room::new(
                room_spec.name.clone(),
                Vec2::from_array(room_spec.position),
                Vec2::from_array(room_spec.size),
            );
            room.exits = room_spec.exits.iter().map(|e| IVec2::from_array(*e)).collect();
            room.shortcuts = room_spec
                .shortcuts
                .iter()
                .map(|s| Shortcut {
                    entrance: IVec2::from_array(s.entrance),
                    target: IVec2::from_array(s.target),
                })
                .collect();
            room.shortcut_dirs = room_spec
                .shortcut_tiles
                .iter()
                .map(|t| (IVec2::from_array(t.tile), IVec2::from_array(t.dir)))
                .collect();
            room.is_gate = room_spec.is_gate;

            if let Some(subregion_name) = &room_spec.subregion {
                room.subregion = subregion_name.clone();
                if let Some(subregion) = region
                    .subregions
                    .iter()
                    .find(|s| &s.name == subregion_name)
                {
                    room.background_color = subregion.background_color;
                } else {
                    log::warn!(
                        "Raum {} verweist auf unbekannte Subregion {}",
                        room_spec.name,
                        subregion_name
                    );
                }
            }

            let id = world.rooms.insert(room);
            if by_name.insert(room_spec.name.clone(), id).is_some() {
                log::warn!("Doppelter Raumname: {}", room_spec.name);
            }
            region.rooms.push(id);
        }

        world.regions.push(region);
    }

    // Schritt 2: Exit-Verknuepfungen aufloesen
    for region_spec in &spec.regions {
        for room_spec in &region_spec.rooms {
            let Some(&room_id) = by_name.get(&room_spec.name) else {
                continue;
            };
            let links: Vec<Option<ExitLink>> = room_spec
                .exit_links
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|link| ExitLink {
                        exit: link.exit,
                        target: link.target.as_deref().and_then(|name| by_name.get(name).copied()),
                        target_exit: link.target_exit,
                    })
                })
                .collect();
            world.rooms[room_id].exit_links = links;
        }
    }

    // Schritt 3: Regions-Uebergaenge aufloesen
    for link in &spec.region_links {
        match (by_name.get(&link.from), by_name.get(&link.to)) {
            (Some(&from), Some(&to)) => world.region_link_pairs.push((from, to)),
            _ => log::warn!(
                "Regions-Uebergang {} → {} verweist auf unbekannte Raeume",
                link.from,
                link.to
            ),
        }
    }

    world.build_connections(report);
    world
}

/// Laedt eine Welt-Datei von Platte.
pub fn load_world_file(path: &Path) -> anyhow::Result<(World, LoadReport)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Welt-Datei konnte nicht gelesen werden: {}", path.display()))?;
    let spec = parse_world_spec(&text)?;

    let mut report = LoadReport::new();
    let world = build_world(&spec, &mut report);
    report.log_all();

    log::info!(
        "Welt geladen: {} Regionen, {} Raeume, {} Verbindungen",
        world.regions.len(),
        world.room_count(),
        world.connection_count()
    );

    Ok((world, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_spec() -> WorldSpec {
        parse_world_spec(
            r#"{
                "regions": [
                    {
                        "id": "SU",
                        "name": "Outskirts",
                        "subregions": [
                            { "name": "Sump", "background_color": [0.2, 0.3, 0.4, 1.0] }
                        ],
                        "rooms": [
                            {
                                "name": "SU_C04",
                                "position": [0.0, 0.0],
                                "size": [20.0, 10.0],
                                "exits": [[0, 5], [19, 5]],
                                "exit_links": [
                                    null,
                                    { "exit": 1, "target": "SU_C01", "target_exit": 0 }
                                ],
                                "subregion": "Sump"
                            },
                            {
                                "name": "SU_C01",
                                "position": [100.0, 0.0],
                                "size": [20.0, 10.0],
                                "exits": [[0, 5]]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .expect("Spec muss parsen")
    }

    #[test]
    fn build_world_erzeugt_regionen_und_verbindungen() {
        let spec = minimal_spec();
        let mut report = LoadReport::new();

        let world = build_world(&spec, &mut report);

        assert!(report.is_empty());
        assert_eq!(world.regions.len(), 1);
        assert_eq!(world.room_count(), 2);
        assert!(world.regions[0].connections.get("SU_C04~SU_C01").is_some());
    }

    #[test]
    fn subregion_farbe_wird_auf_den_raum_uebernommen() {
        let spec = minimal_spec();
        let mut report = LoadReport::new();

        let world = build_world(&spec, &mut report);
        let id = world.rooms.find_by_name("SU_C04").expect("Raum erwartet");

        assert_eq!(world.rooms[id].background_color, [0.2, 0.3, 0.4, 1.0]);
        assert_eq!(world.rooms[id].subregion, "Sump");
    }

    #[test]
    fn unbekannter_zielraum_landet_im_report() {
        let mut spec = minimal_spec();
        spec.regions[0].rooms[1].exit_links = vec![Some(ExitLinkSpec {
            exit: 0,
            target: Some("SU_XXX".to_string()),
            target_exit: 0,
        })];
        let mut report = LoadReport::new();

        let world = build_world(&spec, &mut report);

        assert_eq!(report.len(), 1);
        // Die andere Verbindung existiert trotzdem
        assert_eq!(world.connection_count(), 1);
    }

    #[test]
    fn region_links_bauen_globale_verbindungen() {
        let mut spec = minimal_spec();
        spec.region_links.push(RegionLinkSpec {
            from: "SU_C04".to_string(),
            to: "SU_C01".to_string(),
        });
        let mut report = LoadReport::new();

        let world = build_world(&spec, &mut report);

        assert_eq!(world.global_connections.len(), 1);
        let (_, link) = world
            .global_connections
            .iter()
            .next()
            .expect("globale Verbindung erwartet");
        assert_eq!(link.points.len(), 2);
    }
}
