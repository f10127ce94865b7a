//! Verbindungen zwischen Raeumen: Konstruktion, Punktgeometrie, Persistenz.
//!
//! Eine `Connection` besitzt eine geordnete Punktfolge zwischen zwei
//! Anker-Exits. Drei Konstruktionsarten: Kurzweg innerhalb eines Raums
//! (getraced), Regions-Uebergang (zwei heuristische Ankerpunkte) und
//! gewoehnliche Exit-zu-Exit-Verbindung (validiert gegen die Exit-Arrays).

use glam::{IVec2, Vec2};
use serde_json::{json, Value};

use super::load_report::ConnectionError;
use super::room::{ExitLink, Room, RoomId, RoomRegistry, Shortcut};
use crate::render::{lerp_rgba, Rgba};

/// Guide-Linien-Farbe (Magenta).
pub const GUIDE_COLOR: Rgba = [1.0, 0.0, 1.0, 1.0];

/// Weiss als Basisfarbe aller Verbindungen.
const CONNECTION_BASE_COLOR: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Art einer Verbindung. Bestimmt die Anker-Zuordnung der Punkte
/// und die Darstellung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionKind {
    /// Gewoehnliche Verbindung zwischen zwei Exits verschiedener Raeume
    #[default]
    ExitToExit,
    /// Kurzweg vollstaendig innerhalb eines Raums (Source == Destination)
    InRoomShortcut,
    /// Uebergang zwischen zwei Top-Level-Regionen
    RegionLink,
}

/// Anker eines Verbindungspunkts: Weltkoordinaten oder lokales
/// Koordinatensystem eines Raums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointAnchor {
    /// Punkt liegt direkt in Weltkoordinaten
    World,
    /// Punkt liegt im lokalen Raum-Koordinatensystem
    Room(RoomId),
}

/// Ein einzelner Punkt einer Verbindung.
#[derive(Debug, Clone)]
pub struct ConnectionPoint {
    /// Bezugssystem des Punkts
    pub anchor: PointAnchor,
    /// Position relativ zum Anker
    pub local_position: Vec2,
}

impl ConnectionPoint {
    /// Erstellt einen welt-verankerten Punkt.
    pub fn world_anchored(position: Vec2) -> Self {
        Self {
            anchor: PointAnchor::World,
            local_position: position,
        }
    }

    /// Erstellt einen raum-verankerten Punkt.
    pub fn room_anchored(room: RoomId, local_position: Vec2) -> Self {
        Self {
            anchor: PointAnchor::Room(room),
            local_position,
        }
    }

    /// Weltposition: Anker-Transformation + lokale Position.
    ///
    /// Invariante: die Weltposition ist jederzeit aus (Anker, lokale Position)
    /// rekonstruierbar.
    pub fn world_position(&self, rooms: &RoomRegistry) -> Vec2 {
        match self.anchor {
            PointAnchor::World => self.local_position,
            PointAnchor::Room(id) => match rooms.get(id) {
                Some(room) => room.world_position + self.local_position,
                None => self.local_position,
            },
        }
    }

    /// Setzt die lokale Position so, dass die Weltposition `world` ergibt.
    pub fn set_world_position(&mut self, rooms: &RoomRegistry, world: Vec2) {
        match self.anchor {
            PointAnchor::World => self.local_position = world,
            PointAnchor::Room(id) => match rooms.get(id) {
                Some(room) => self.local_position = world - room.world_position,
                None => self.local_position = world,
            },
        }
    }

    /// Serialisiert die lokale Position als JSON-Objekt.
    pub fn save_json(&self) -> Value {
        json!({ "x": self.local_position.x, "y": self.local_position.y })
    }

    /// Laedt die lokale Position aus einem JSON-Objekt.
    /// Unbekannte Formen werden stillschweigend ignoriert.
    pub fn load_json(&mut self, value: &Value) {
        let x = value.get("x").and_then(Value::as_f64);
        let y = value.get("y").and_then(Value::as_f64);
        if let (Some(x), Some(y)) = (x, y) {
            self.local_position = Vec2::new(x as f32, y as f32);
        }
    }
}

/// Referenz auf ein filterbares Kartenobjekt (fuer Praedikat-Suche
/// und Layer-Filter).
pub enum MapObjectRef<'a> {
    /// Ein Raum
    Room(RoomId, &'a Room),
    /// Ein Verbindungspunkt
    Point(&'a ConnectionPoint),
}

/// Praedikat ueber Kartenobjekte.
pub type ObjectPredicate<'a> = dyn Fn(&MapObjectRef<'_>) -> bool + 'a;

/// Eine Verbindung zwischen zwei Raeumen (oder innerhalb eines Raums).
#[derive(Debug, Clone)]
pub struct Connection {
    /// Quellraum
    pub source: RoomId,
    /// Zielraum (== Quellraum bei Kurzwegen)
    pub destination: RoomId,
    /// Anker-Exit im Quellraum (lokale Tile-Koordinaten)
    pub source_point: IVec2,
    /// Anker-Exit im Zielraum (lokale Tile-Koordinaten)
    pub destination_point: IVec2,
    /// Verbindungsart
    pub kind: ConnectionKind,
    /// Weiss-zu-Rot-Abschluss am Zielende erlauben
    pub allow_white_to_red: bool,
    /// Geordnete Punktfolge zwischen den Ankern
    pub points: Vec<ConnectionPoint>,
}

impl Connection {
    /// Konstruiert einen Kurzweg innerhalb eines Raums.
    ///
    /// Der Pfad wird ueber `Room::trace_shortcut` in den uebergebenen
    /// Scratch-Puffer getraced; der Puffer wird vorher geleert und kann vom
    /// Aufrufer ueber viele Konstruktionen wiederverwendet werden. Jeder
    /// getracete Punkt wird raum-verankert uebernommen.
    pub fn in_room_shortcut(
        rooms: &RoomRegistry,
        room_id: RoomId,
        shortcut: Shortcut,
        scratch: &mut Vec<IVec2>,
    ) -> Self {
        scratch.clear();

        let room = &rooms[room_id];
        room.trace_shortcut(shortcut.entrance, scratch);

        let points = scratch
            .iter()
            .map(|p| ConnectionPoint::room_anchored(room_id, p.as_vec2()))
            .collect();

        Self {
            source: room_id,
            destination: room_id,
            source_point: shortcut.entrance,
            destination_point: shortcut.target,
            kind: ConnectionKind::InRoomShortcut,
            allow_white_to_red: true,
            points,
        }
    }

    /// Konstruiert einen Regions-Uebergang zwischen zwei Raeumen.
    ///
    /// Es entstehen genau zwei Punkte: der erste am Quellraum, der zweite am
    /// Zielraum, jeweils an der heuristisch bestimmten Austrittsposition.
    pub fn region_link(rooms: &RoomRegistry, source: RoomId, destination: RoomId) -> Self {
        let points = vec![
            ConnectionPoint::room_anchored(source, Self::region_exit_position(&rooms[source])),
            ConnectionPoint::room_anchored(
                destination,
                Self::region_exit_position(&rooms[destination]),
            ),
        ];

        Self {
            source,
            destination,
            source_point: IVec2::ZERO,
            destination_point: IVec2::ZERO,
            kind: ConnectionKind::RegionLink,
            allow_white_to_red: true,
            points,
        }
    }

    /// Heuristische Austrittsposition eines Raums fuer Regions-Uebergaenge.
    ///
    /// Gates haben genau einen Exit innerhalb und einen ausserhalb der Region;
    /// der unverbundene Exit-Slot ist der Uebergang nach draussen. Faellt die
    /// Suche durch (kein Gate, kein freier Slot, Slot-Index ohne Exit), gilt
    /// der Raum-Mittelpunkt.
    pub fn region_exit_position(room: &Room) -> Vec2 {
        if room.is_gate && room.exits.len() >= 2 {
            for (i, link) in room.exit_links.iter().enumerate() {
                if link.is_none() && i < room.exits.len() {
                    return room.exits[i].as_vec2();
                }
            }
        }
        room.world_position + room.size / 2.0
    }

    /// Konstruiert eine gewoehnliche Exit-zu-Exit-Verbindung.
    ///
    /// Validierung in fester Reihenfolge, erster Fehler gewinnt:
    /// fehlender Raum, Quell-Exit ausserhalb, Ziel-Exit ausserhalb.
    /// Fehler sind nicht fatal — der Aufrufer sammelt sie im `LoadReport`.
    pub fn from_exit_link(
        rooms: &RoomRegistry,
        source: Option<RoomId>,
        link: &ExitLink,
    ) -> Result<Self, ConnectionError> {
        let room_name = |id: Option<RoomId>| {
            id.and_then(|id| rooms.get(id))
                .map_or_else(|| "NONE".to_string(), |r| r.name.clone())
        };

        let (Some(source_id), Some(target_id)) = (source, link.target) else {
            return Err(ConnectionError::MissingRoom {
                source: room_name(source),
                target: room_name(link.target),
            });
        };

        let source_room = &rooms[source_id];
        if link.exit < 0 || link.exit as usize >= source_room.exits.len() {
            return Err(ConnectionError::SourceExitOutOfRange {
                room: source_room.name.clone(),
                exit: link.exit,
                exit_count: source_room.exits.len(),
            });
        }

        let target_room = &rooms[target_id];
        if link.target_exit < 0 || link.target_exit as usize >= target_room.exits.len() {
            return Err(ConnectionError::TargetExitOutOfRange {
                room: target_room.name.clone(),
                exit: link.target_exit,
                exit_count: target_room.exits.len(),
            });
        }

        Ok(Self {
            source: source_id,
            destination: target_id,
            source_point: source_room.exits[link.exit as usize],
            destination_point: target_room.exits[link.target_exit as usize],
            kind: ConnectionKind::ExitToExit,
            allow_white_to_red: true,
            points: Vec::new(),
        })
    }

    // ── Abgeleitete Eigenschaften ───────────────────────────────────────

    /// Stabiler Schluessel fuer Lookup und JSON-Persistenz.
    ///
    /// Kurzwege werden ueber die Eingangs-Koordinate adressiert (Quelle ==
    /// Ziel), alle anderen ueber das Namenspaar.
    pub fn json_key(&self, rooms: &RoomRegistry) -> String {
        if self.kind == ConnectionKind::InRoomShortcut {
            format!(
                "#{}~{}~{}",
                rooms[self.source].name, self.source_point.x, self.source_point.y
            )
        } else {
            format!(
                "{}~{}",
                rooms[self.source].name, rooms[self.destination].name
            )
        }
    }

    /// Darstellungsfarbe: Kurzwege mischen die Subregion-Hintergrundfarbe
    /// des Raums ein, alles andere bleibt weiss.
    pub fn color(&self, rooms: &RoomRegistry) -> Rgba {
        if self.kind == ConnectionKind::InRoomShortcut {
            lerp_rgba(
                CONNECTION_BASE_COLOR,
                rooms[self.source].background_color,
                0.3,
            )
        } else {
            CONNECTION_BASE_COLOR
        }
    }

    /// Zeichenbar nur wenn beide Endraeume aktiv sind; Kurzwege zusaetzlich
    /// nur wenn der Raum sie zeichnen will.
    pub fn is_active(&self, rooms: &RoomRegistry) -> bool {
        rooms[self.source].active
            && rooms[self.destination].active
            && (self.kind != ConnectionKind::InRoomShortcut
                || rooms[self.source].draw_in_room_shortcuts)
    }

    /// Weltposition des Quell-Ankers.
    pub fn source_anchor_world(&self, rooms: &RoomRegistry) -> Vec2 {
        rooms[self.source].world_position + self.source_point.as_vec2()
    }

    /// Weltposition des Ziel-Ankers.
    pub fn destination_anchor_world(&self, rooms: &RoomRegistry) -> Vec2 {
        rooms[self.destination].world_position + self.destination_point.as_vec2()
    }

    /// Prueft Quelle, Ziel und alle Punkte gegen das Praedikat
    /// (in dieser Reihenfolge, mit Kurzschluss beim ersten Treffer).
    pub fn matches_predicate(&self, rooms: &RoomRegistry, predicate: &ObjectPredicate<'_>) -> bool {
        if predicate(&MapObjectRef::Room(self.source, &rooms[self.source]))
            || predicate(&MapObjectRef::Room(self.destination, &rooms[self.destination]))
        {
            return true;
        }

        self.points
            .iter()
            .any(|point| predicate(&MapObjectRef::Point(point)))
    }

    /// Welt-Punktfolge des Pfads: Exit-zu-Exit-Verbindungen werden von den
    /// Anker-Exits eingerahmt, Kurzwege und Uebergaenge bestehen nur aus
    /// ihren Punkten.
    fn path_nodes(&self, rooms: &RoomRegistry) -> Vec<Vec2> {
        let framed = self.kind == ConnectionKind::ExitToExit;

        let mut nodes: Vec<Vec2> = Vec::with_capacity(self.points.len() + 2);
        if framed {
            nodes.push(self.source_anchor_world(rooms));
        }
        nodes.extend(self.points.iter().map(|p| p.world_position(rooms)));
        if framed {
            nodes.push(self.destination_anchor_world(rooms));
        }
        nodes
    }

    /// Kuerzester Abstand einer Weltposition zum Pfad der Verbindung.
    /// `None` bei leerem Pfad.
    pub fn distance_to_path(&self, rooms: &RoomRegistry, world_pos: Vec2) -> Option<f32> {
        let nodes = self.path_nodes(rooms);
        match nodes.len() {
            0 => None,
            1 => Some(world_pos.distance(nodes[0])),
            _ => nodes
                .windows(2)
                .map(|segment| distance_to_segment(world_pos, segment[0], segment[1]))
                .min_by(f32::total_cmp),
        }
    }

    /// Fuegt einen Punkt an der naechstgelegenen Stelle des Pfads ein und
    /// gibt den Einfuege-Index zurueck.
    ///
    /// Der Punkt entsteht welt-verankert; der anschliessende Anker-Abgleich
    /// haengt ihn an den erwarteten Raum, ohne die Weltposition zu aendern.
    pub fn insert_point_at(&mut self, rooms: &RoomRegistry, world_pos: Vec2) -> usize {
        let framed = self.kind == ConnectionKind::ExitToExit;
        let nodes = self.path_nodes(rooms);

        let index = if nodes.len() < 2 {
            self.points.len()
        } else {
            let mut best_segment = 0usize;
            let mut best_distance = f32::MAX;
            for (i, segment) in nodes.windows(2).enumerate() {
                let distance = distance_to_segment(world_pos, segment[0], segment[1]);
                if distance < best_distance {
                    best_distance = distance;
                    best_segment = i;
                }
            }
            // Segment-Index → Punktlisten-Index (ohne fuehrenden Anker +1)
            if framed {
                best_segment
            } else {
                best_segment + 1
            }
        };

        self.points
            .insert(index, ConnectionPoint::world_anchored(world_pos));
        self.ensure_point_anchors(rooms);
        index
    }

    // ── Anker-Abgleich ─────────────────────────────────────────────────

    /// Erwarteter Anker-Raum eines Punkts nach Position und Verbindungsart.
    fn expected_anchor(&self, index: usize, total: usize) -> RoomId {
        match self.kind {
            ConnectionKind::InRoomShortcut => self.source,
            ConnectionKind::RegionLink => {
                if total > 0 && index == total - 1 {
                    self.destination
                } else {
                    self.source
                }
            }
            ConnectionKind::ExitToExit => self.source,
        }
    }

    /// Gleicht die Anker aller Punkte mit der Erwartung ab.
    ///
    /// Ein Anker-Tausch ist visuell transparent: die Weltposition wird vor
    /// dem Tausch festgehalten und die lokale Position danach gegen den neuen
    /// Anker neu berechnet. Idempotent.
    pub fn ensure_point_anchors(&mut self, rooms: &RoomRegistry) {
        let total = self.points.len();
        for index in 0..total {
            let expected = self.expected_anchor(index, total);
            let point = &mut self.points[index];
            if point.anchor == PointAnchor::Room(expected) {
                continue;
            }

            let world = point.world_position(rooms);
            point.anchor = PointAnchor::Room(expected);
            point.set_world_position(rooms, world);
        }
    }

    // ── Persistenz ─────────────────────────────────────────────────────

    /// Serialisiert die Verbindung in die Objekt-Form
    /// `{ "points": [...], "whiteToRed": bool }`.
    ///
    /// Vor dem Schreiben werden die Punkt-Anker abgeglichen, damit die Datei
    /// die aktuelle Zuordnung widerspiegelt. Die kompakte Zaehler-Form wird
    /// nie geschrieben, nur gelesen.
    pub fn save_json(&mut self, rooms: &RoomRegistry) -> Value {
        self.ensure_point_anchors(rooms);

        json!({
            "points": self.points.iter().map(ConnectionPoint::save_json).collect::<Vec<_>>(),
            "whiteToRed": self.allow_white_to_red,
        })
    }

    /// Laedt gespeicherte Punktdaten. Drei akzeptierte Formen:
    ///
    /// - Ganzzahl `N`: N gleichverteilte Punkte linear zwischen den
    ///   Welt-Ankern interpoliert (Legacy-Form; `0` laesst die beim
    ///   Konstruieren erzeugten Punkte unveraendert)
    /// - Array von Punkt-Objekten: explizite Positionen
    /// - Objekt mit `points`-Array plus `whiteToRed`-Option
    ///
    /// Unbekannte Formen fallen ohne Punktaufbau durch.
    pub fn load_json(&mut self, rooms: &RoomRegistry, value: &Value) {
        match value {
            Value::Number(number) => {
                let Some(point_count) = number.as_i64() else {
                    return;
                };
                if point_count <= 0 {
                    return;
                }

                let start = self.source_anchor_world(rooms);
                let end = self.destination_anchor_world(rooms);

                self.points.clear();
                let step = 1.0 / (point_count as f32 + 1.0);
                for i in 1..=point_count {
                    let t = step * i as f32;
                    self.points
                        .push(ConnectionPoint::world_anchored(start.lerp(end, t)));
                }
            }
            Value::Array(entries) => self.load_point_array(rooms, entries),
            Value::Object(object) => {
                if let Some(Value::Array(entries)) = object.get("points") {
                    self.load_point_array(rooms, entries);
                }
                if let Some(white_to_red) = object.get("whiteToRed").and_then(Value::as_bool) {
                    self.allow_white_to_red = white_to_red;
                }
            }
            _ => {}
        }
    }

    /// Laedt ein explizites Punkt-Array. Null-Eintraege werden uebersprungen
    /// und die Indizes kompaktiert, damit der positionsbasierte Anker-Abgleich
    /// weiter stimmt.
    fn load_point_array(&mut self, rooms: &RoomRegistry, entries: &[Value]) {
        self.points.clear();

        let valid: Vec<&Value> = entries.iter().filter(|v| !v.is_null()).collect();

        for (index, entry) in valid.iter().enumerate() {
            let expected = self.expected_anchor(index, valid.len());
            let mut point = ConnectionPoint::room_anchored(expected, Vec2::ZERO);
            point.load_json(entry);
            self.points.push(point);
        }

        self.ensure_point_anchors(rooms);
    }
}

/// Kuerzester Abstand eines Punkts zu einem Liniensegment.
fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq <= f32::EPSILON {
        return point.distance(a);
    }

    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
