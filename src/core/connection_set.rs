//! Verbindungs-Container mit Schatten-, Haupt- und Guide-Zeichenpassen.
//!
//! Jede Region besitzt einen `ConnectionSet`; regions-uebergreifende
//! Verbindungen liegen in einem globalen Set. Die Zeichenpassen filtern nach
//! Verbindungsklasse (Kurzweg vs. alles andere) und optionalem Praedikat.

use glam::Vec2;
use indexmap::IndexMap;

use super::connection::{Connection, ConnectionKind, ObjectPredicate, GUIDE_COLOR};
use super::room::RoomRegistry;
use crate::render::{lerp_rgba, Renderer, Rgba};
use crate::shared::EditorOptions;

/// Rot-Anteil des Weiss-zu-Rot-Abschlusses am Zielende.
const TERMINAL_RED: Rgba = [1.0, 0.1, 0.1, 1.0];
/// Mischfaktor des Abschluss-Segments Richtung Rot.
const TERMINAL_BLEND: f32 = 0.65;
/// Culling-Rand in Screen-Pixeln.
const CULL_MARGIN_PX: f32 = 32.0;

/// Geordneter Container fuer Verbindungen, adressiert ueber den JSON-Key.
#[derive(Debug, Clone, Default)]
pub struct ConnectionSet {
    connections: IndexMap<String, Connection>,
}

impl ConnectionSet {
    /// Erstellt einen leeren Container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fuegt eine Verbindung unter ihrem JSON-Key ein.
    /// Eine bestehende Verbindung mit gleichem Key wird ersetzt.
    pub fn insert(&mut self, rooms: &RoomRegistry, connection: Connection) -> String {
        let key = connection.json_key(rooms);
        self.connections.insert(key.clone(), connection);
        key
    }

    /// Verbindung per Key.
    pub fn get(&self, key: &str) -> Option<&Connection> {
        self.connections.get(key)
    }

    /// Mutabler Zugriff per Key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Connection> {
        self.connections.get_mut(key)
    }

    /// Anzahl enthaltener Verbindungen.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// `true` wenn der Container leer ist.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Entfernt alle Verbindungen.
    pub fn clear(&mut self) {
        self.connections.clear();
    }

    /// Iteriert ueber (Key, Verbindung) in Einfuege-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Connection)> {
        self.connections.iter()
    }

    /// Iteriert mutabel ueber (Key, Verbindung).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Connection)> {
        self.connections.iter_mut()
    }

    // ── Zeichenpassen ──────────────────────────────────────────────────

    /// Schattenpass: breitere, dunkle Linien hinter den Verbindungen.
    pub fn draw_shadows(
        &self,
        rooms: &RoomRegistry,
        options: &EditorOptions,
        renderer: &mut dyn Renderer,
        draw_normal: bool,
        draw_in_room: bool,
        predicate: Option<&ObjectPredicate<'_>>,
    ) {
        let thickness = options.connection_thickness_px + options.shadow_extra_px;
        let mut polyline = Vec::new();

        for connection in self.drawable(rooms, draw_normal, draw_in_room, predicate) {
            build_polyline(rooms, connection, &mut polyline);
            for segment in polyline.windows(2) {
                draw_segment(
                    renderer,
                    segment[0],
                    segment[1],
                    options.shadow_color,
                    thickness,
                );
            }
        }
    }

    /// Hauptpass: Segmente in Vorwaerts- oder Rueckwaertsreihenfolge.
    ///
    /// Der Vorwaertspass zeichnet das Abschluss-Segment am Zielende rot
    /// eingefaerbt (sofern die Verbindung das erlaubt); der Rueckwaertspass
    /// zeichnet in Gegenrichtung ohne Abschlussbehandlung und stellt damit
    /// die Schichtung entlang des Pfads wieder her.
    pub fn draw_connections(
        &self,
        rooms: &RoomRegistry,
        options: &EditorOptions,
        renderer: &mut dyn Renderer,
        forward: bool,
        draw_normal: bool,
        draw_in_room: bool,
        predicate: Option<&ObjectPredicate<'_>>,
    ) {
        let thickness = options.connection_thickness_px;
        let mut polyline = Vec::new();

        for connection in self.drawable(rooms, draw_normal, draw_in_room, predicate) {
            build_polyline(rooms, connection, &mut polyline);
            if polyline.len() < 2 {
                continue;
            }

            let color = connection.color(rooms);
            let last_segment = polyline.len() - 2;

            if forward {
                for (i, segment) in polyline.windows(2).enumerate() {
                    let segment_color = if i == last_segment && connection.allow_white_to_red {
                        lerp_rgba(color, TERMINAL_RED, TERMINAL_BLEND)
                    } else {
                        color
                    };
                    draw_segment(renderer, segment[0], segment[1], segment_color, thickness);
                }
            } else {
                for segment in polyline.windows(2).rev() {
                    draw_segment(renderer, segment[1], segment[0], color, thickness);
                }
            }
        }
    }

    /// Guide-Pass: Magenta-Hilfslinien und Punktmarker (nur Editor).
    pub fn draw_guides(
        &self,
        rooms: &RoomRegistry,
        options: &EditorOptions,
        renderer: &mut dyn Renderer,
        draw_normal: bool,
        draw_in_room: bool,
    ) {
        let marker = options.guide_point_size_px / 2.0;
        let mut polyline = Vec::new();

        for connection in self.drawable(rooms, draw_normal, draw_in_room, None) {
            build_polyline(rooms, connection, &mut polyline);
            for segment in polyline.windows(2) {
                draw_segment(renderer, segment[0], segment[1], GUIDE_COLOR, 1.0);
            }

            for point in &connection.points {
                let screen = renderer.transform(point.world_position(rooms));
                renderer.draw_rect(
                    screen - Vec2::splat(marker),
                    screen + Vec2::splat(marker),
                    GUIDE_COLOR,
                );
            }
        }
    }

    /// Filtert zeichenbare Verbindungen nach Klasse, Aktivitaet und Praedikat.
    fn drawable<'a>(
        &'a self,
        rooms: &'a RoomRegistry,
        draw_normal: bool,
        draw_in_room: bool,
        predicate: Option<&'a ObjectPredicate<'a>>,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.values().filter(move |connection| {
            let in_room = connection.kind == ConnectionKind::InRoomShortcut;
            if in_room && !draw_in_room {
                return false;
            }
            if !in_room && !draw_normal {
                return false;
            }
            if !connection.is_active(rooms) {
                return false;
            }
            match predicate {
                Some(p) => connection.matches_predicate(rooms, p),
                None => true,
            }
        })
    }
}

/// Baut die Welt-Punktfolge einer Verbindung in den Scratch-Puffer.
///
/// Exit-zu-Exit-Verbindungen werden von den Anker-Exits eingerahmt;
/// Kurzwege und Regions-Uebergaenge bestehen nur aus ihren Punkten
/// (der getracete Pfad bzw. die Heuristik-Anker enthalten die Enden schon).
fn build_polyline(rooms: &RoomRegistry, connection: &Connection, out: &mut Vec<Vec2>) {
    out.clear();

    if connection.kind == ConnectionKind::ExitToExit {
        out.push(connection.source_anchor_world(rooms));
    }
    out.extend(
        connection
            .points
            .iter()
            .map(|point| point.world_position(rooms)),
    );
    if connection.kind == ConnectionKind::ExitToExit {
        out.push(connection.destination_anchor_world(rooms));
    }
}

/// Zeichnet ein Segment, sofern es den sichtbaren Bereich beruehren kann.
fn draw_segment(renderer: &mut dyn Renderer, from: Vec2, to: Vec2, color: Rgba, thickness: f32) {
    let a = renderer.transform(from);
    let b = renderer.transform(to);

    if segment_outside_screen(a, b, renderer.size()) {
        return;
    }

    renderer.draw_line(a, b, color, thickness);
}

/// Konservativer Culling-Test: beide Endpunkte jenseits derselben
/// Bildschirmkante (inklusive Rand).
fn segment_outside_screen(a: Vec2, b: Vec2, screen: Vec2) -> bool {
    (a.x < -CULL_MARGIN_PX && b.x < -CULL_MARGIN_PX)
        || (a.y < -CULL_MARGIN_PX && b.y < -CULL_MARGIN_PX)
        || (a.x > screen.x + CULL_MARGIN_PX && b.x > screen.x + CULL_MARGIN_PX)
        || (a.y > screen.y + CULL_MARGIN_PX && b.y > screen.y + CULL_MARGIN_PX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn culling_verwirft_nur_segmente_jenseits_derselben_kante() {
        let screen = Vec2::new(800.0, 600.0);

        assert!(segment_outside_screen(
            Vec2::new(-100.0, 10.0),
            Vec2::new(-50.0, 500.0),
            screen
        ));
        // Segment quer ueber den Bildschirm: beide Endpunkte draussen,
        // aber an verschiedenen Kanten
        assert!(!segment_outside_screen(
            Vec2::new(-100.0, 300.0),
            Vec2::new(900.0, 300.0),
            screen
        ));
        assert!(!segment_outside_screen(
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 20.0),
            screen
        ));
    }
}
