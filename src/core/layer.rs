//! Layer-Kompositing: benannte, schaltbare Zeichenpassen ueber der Welt.
//!
//! Statt einer offenen Vererbungshierarchie gibt es eine geschlossene
//! Varianten-Aufzaehlung (`LayerKind`); jeder Layer beantwortet die drei
//! Passen Schatten/Zeichnen/Guides ueber ein Dispatch auf seine Variante.

use glam::Vec2;

use super::connection::ObjectPredicate;
use super::world::World;
use crate::render::{Renderer, Rgba};
use crate::shared::EditorOptions;

// ── Grid-Konstanten ─────────────────────────────────────────────────────

/// Kleinste Rasterzelle in Welteinheiten.
const GRID_SIZE: i32 = 4;
/// Jede n-te Linie ist dick.
const GRID_THICK_INTERVAL: i32 = 4;
/// Breite dicker Rasterlinien (px).
const GRID_THICK_WIDTH: f32 = 3.0;
/// Breite duenner Rasterlinien (px).
const GRID_THIN_WIDTH: f32 = 1.0;
/// Obergrenze an Rasterlinien pro Achse (Schutz bei extremem Zoom).
const GRID_MAX_LINES: i32 = 500;
/// Farbe dicker Rasterlinien.
const GRID_COLOR_THICK: Rgba = [0.5, 0.5, 0.5, 0.4];
/// Farbe duenner Rasterlinien.
const GRID_COLOR_THIN: Rgba = [0.5, 0.5, 0.5, 0.15];
/// Toleranzrand beim Klemmen der Linien auf den Bildschirm (px).
const GRID_CLAMP_MARGIN: f32 = 50.0;

/// Schattenversatz fuer Raum-Rechtecke (px).
const ROOM_SHADOW_OFFSET: f32 = 3.0;
/// Schattenfarbe fuer Raum-Rechtecke.
const ROOM_SHADOW_COLOR: Rgba = [0.0, 0.0, 0.0, 0.35];

/// Variante eines Layers. Geschlossene Aufzaehlung statt Subklassen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Zeichnet alle Weltobjekte (Raeume), optional praedikat-gefiltert
    Generic,
    /// Zeichnet genau eine Verbindungsklasse ueber alle Regionen
    Connections {
        /// `true`: nur Kurzwege; `false`: alle anderen Klassen plus global
        in_room: bool,
    },
    /// Rein visuelles Raster hinter der Karte
    Grid,
}

/// Ein benannter, schaltbarer Zeichenpass.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Stabiler Bezeichner (fuer Persistenz und Lookup)
    pub id: String,
    /// Anzeigename
    pub name: String,
    /// Variante
    pub kind: LayerKind,
    /// System-Layer: von Alle-ein/ausblenden ausgenommen
    pub special: bool,
    /// Aktuelle Sichtbarkeit
    pub visible: bool,
    /// Standard-Sichtbarkeit
    pub default_visibility: bool,
}

impl Layer {
    /// Erstellt einen Layer; Sichtbarkeit startet auf dem Standardwert.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: LayerKind,
        special: bool,
        default_visibility: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            special,
            visible: default_visibility,
            default_visibility,
        }
    }

    /// Einer der beiden Verbindungs-Layer. Beide sind System-Layer.
    pub fn connections(in_room: bool, default_visibility: bool) -> Self {
        if in_room {
            Self::new(
                "inroomconnections",
                "Kurzwege",
                LayerKind::Connections { in_room: true },
                true,
                default_visibility,
            )
        } else {
            Self::new(
                "connections",
                "Verbindungen",
                LayerKind::Connections { in_room: false },
                true,
                default_visibility,
            )
        }
    }

    /// Der Raster-Layer.
    pub fn grid() -> Self {
        Self::new("grid", "Raster", LayerKind::Grid, true, true)
    }

    // ── Passen ─────────────────────────────────────────────────────────

    /// Schattenpass.
    pub fn draw_shade(
        &self,
        world: &World,
        options: &EditorOptions,
        renderer: &mut dyn Renderer,
        predicate: Option<&ObjectPredicate<'_>>,
    ) {
        match self.kind {
            LayerKind::Generic => {
                for (id, room) in world.rooms.iter() {
                    if !room.active || !accepts_room(predicate, world, id) {
                        continue;
                    }
                    let offset = Vec2::splat(ROOM_SHADOW_OFFSET);
                    let min = renderer.transform(room.world_position) + offset;
                    let max = renderer.transform(room.world_position + room.size) + offset;
                    renderer.draw_rect(min, max, ROOM_SHADOW_COLOR);
                }
            }
            LayerKind::Connections { in_room } => {
                for region in &world.regions {
                    region.connections.draw_shadows(
                        &world.rooms,
                        options,
                        renderer,
                        !in_room,
                        in_room,
                        predicate,
                    );
                }

                if !in_room {
                    world.global_connections.draw_shadows(
                        &world.rooms,
                        options,
                        renderer,
                        true,
                        false,
                        predicate,
                    );
                }
            }
            LayerKind::Grid => {}
        }
    }

    /// Hauptpass.
    pub fn draw(
        &self,
        world: &World,
        options: &EditorOptions,
        renderer: &mut dyn Renderer,
        predicate: Option<&ObjectPredicate<'_>>,
    ) {
        match self.kind {
            LayerKind::Generic => {
                for (id, room) in world.rooms.iter() {
                    if !room.active || !accepts_room(predicate, world, id) {
                        continue;
                    }
                    let min = renderer.transform(room.world_position);
                    let max = renderer.transform(room.world_position + room.size);
                    renderer.draw_rect(min, max, room.background_color);
                }
            }
            LayerKind::Connections { in_room } => {
                // Doppelpass pro Region: einmal vorwaerts, einmal rueckwaerts,
                // fuer korrekte Schichtung entlang des Pfads
                for region in &world.regions {
                    region.connections.draw_connections(
                        &world.rooms,
                        options,
                        renderer,
                        true,
                        !in_room,
                        in_room,
                        predicate,
                    );
                    region.connections.draw_connections(
                        &world.rooms,
                        options,
                        renderer,
                        false,
                        !in_room,
                        in_room,
                        predicate,
                    );
                }

                if !in_room {
                    world.global_connections.draw_connections(
                        &world.rooms,
                        options,
                        renderer,
                        true,
                        true,
                        false,
                        predicate,
                    );
                    world.global_connections.draw_connections(
                        &world.rooms,
                        options,
                        renderer,
                        false,
                        true,
                        false,
                        predicate,
                    );
                }
            }
            LayerKind::Grid => {
                if !self.visible {
                    return;
                }
                // Fehler im Raster duerfen den Frame nie abbrechen
                if let Err(error) = draw_grid(renderer) {
                    log::warn!("Raster-Zeichnung fehlgeschlagen: {:#}", error);
                }
            }
        }
    }

    /// Guide-Pass (nur Editor-Hilfslinien, kein Praedikat).
    pub fn draw_guides(
        &self,
        world: &World,
        options: &EditorOptions,
        renderer: &mut dyn Renderer,
    ) {
        match self.kind {
            LayerKind::Generic | LayerKind::Grid => {}
            LayerKind::Connections { in_room } => {
                for region in &world.regions {
                    region.connections.draw_guides(
                        &world.rooms,
                        options,
                        renderer,
                        !in_room,
                        in_room,
                    );
                }

                if !in_room {
                    world
                        .global_connections
                        .draw_guides(&world.rooms, options, renderer, true, false);
                }
            }
        }
    }
}

/// Zeichnet alle sichtbaren Layer in Reihenfolge: pro Layer erst Schatten,
/// dann Hauptpass, optional Guides.
pub fn draw_layers(
    layers: &[Layer],
    world: &World,
    options: &EditorOptions,
    renderer: &mut dyn Renderer,
    predicate: Option<&ObjectPredicate<'_>>,
) {
    for layer in layers {
        if !layer.visible {
            continue;
        }
        layer.draw_shade(world, options, renderer, predicate);
        layer.draw(world, options, renderer, predicate);
        if options.show_guides {
            layer.draw_guides(world, options, renderer);
        }
    }
}

/// Wertet das Praedikat fuer einen Raum aus (fehlendes Praedikat = Treffer).
fn accepts_room(
    predicate: Option<&ObjectPredicate<'_>>,
    world: &World,
    id: super::room::RoomId,
) -> bool {
    match predicate {
        Some(p) => p(&super::connection::MapObjectRef::Room(id, &world.rooms[id])),
        None => true,
    }
}

/// Zeichnet das Hintergrund-Raster in Weltkoordinaten.
///
/// Begrenzt die Linienzahl und klemmt jede Linie auf den Bildschirmbereich.
/// Nicht-finite Transformationsergebnisse gelten als Fehler und werden vom
/// Aufrufer geloggt statt propagiert.
fn draw_grid(renderer: &mut dyn Renderer) -> anyhow::Result<()> {
    let screen = renderer.size();
    if screen.x <= 0.0 || screen.y <= 0.0 {
        return Ok(());
    }

    let mut top_left = renderer.inverse_transform(Vec2::ZERO);
    let mut bottom_right = renderer.inverse_transform(screen);
    if !top_left.is_finite() || !bottom_right.is_finite() {
        anyhow::bail!("Raster-Transformation lieferte nicht-finite Weltkoordinaten");
    }

    // Rand, damit Linien ueber die Bildschirmkanten hinausreichen
    let padding = (GRID_SIZE * 4) as f32;
    top_left -= Vec2::splat(padding);
    bottom_right += Vec2::splat(padding);

    let start_x = (top_left.x as i32 / GRID_SIZE) * GRID_SIZE;
    let end_x = (bottom_right.x as i32 / GRID_SIZE + 1) * GRID_SIZE;
    let start_y = (top_left.y as i32 / GRID_SIZE) * GRID_SIZE;
    let end_y = (bottom_right.y as i32 / GRID_SIZE + 1) * GRID_SIZE;

    if (end_x - start_x) / GRID_SIZE > GRID_MAX_LINES
        || (end_y - start_y) / GRID_SIZE > GRID_MAX_LINES
    {
        return Ok(());
    }

    let mut x = start_x;
    while x <= end_x {
        let screen_start = renderer.transform(Vec2::new(x as f32, start_y as f32));
        let screen_end = renderer.transform(Vec2::new(x as f32, end_y as f32));

        let thick = (x / GRID_SIZE) % GRID_THICK_INTERVAL == 0;
        if screen_start.x >= -GRID_CLAMP_MARGIN && screen_start.x <= screen.x + GRID_CLAMP_MARGIN {
            renderer.draw_line(
                Vec2::new(screen_start.x, screen_start.y.max(-GRID_CLAMP_MARGIN)),
                Vec2::new(
                    screen_start.x,
                    screen_end.y.min(screen.y + GRID_CLAMP_MARGIN),
                ),
                if thick { GRID_COLOR_THICK } else { GRID_COLOR_THIN },
                if thick { GRID_THICK_WIDTH } else { GRID_THIN_WIDTH },
            );
        }
        x += GRID_SIZE;
    }

    let mut y = start_y;
    while y <= end_y {
        let screen_start = renderer.transform(Vec2::new(start_x as f32, y as f32));
        let screen_end = renderer.transform(Vec2::new(end_x as f32, y as f32));

        let thick = (y / GRID_SIZE) % GRID_THICK_INTERVAL == 0;
        if screen_start.y >= -GRID_CLAMP_MARGIN && screen_start.y <= screen.y + GRID_CLAMP_MARGIN {
            renderer.draw_line(
                Vec2::new(screen_start.x.max(-GRID_CLAMP_MARGIN), screen_start.y),
                Vec2::new(
                    screen_end.x.min(screen.x + GRID_CLAMP_MARGIN),
                    screen_start.y,
                ),
                if thick { GRID_COLOR_THICK } else { GRID_COLOR_THIN },
                if thick { GRID_THICK_WIDTH } else { GRID_THIN_WIDTH },
            );
        }
        y += GRID_SIZE;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbindungs_layer_sind_system_layer() {
        let normal = Layer::connections(false, true);
        let in_room = Layer::connections(true, false);

        assert_eq!(normal.id, "connections");
        assert_eq!(in_room.id, "inroomconnections");
        assert!(normal.special && in_room.special);
        assert!(normal.visible);
        assert!(!in_room.visible);
    }

    #[test]
    fn sichtbarkeit_startet_auf_standardwert() {
        let layer = Layer::new("test", "Test", LayerKind::Generic, false, false);
        assert!(!layer.visible);
        assert!(!layer.default_visibility);
    }
}
