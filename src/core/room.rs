//! Raum-Datenmodell: Exits, Exit-Verknuepfungen, Kurzwege und Shortcut-Tracing.

use glam::{IVec2, Vec2};
use std::collections::HashMap;

use crate::render::Rgba;

/// Obergrenze fuer Trace-Schritte pro Kurzweg (Zyklen-Schutz).
pub const SHORTCUT_TRACE_STEP_LIMIT: usize = 4096;

/// Handle auf einen Raum in der Raum-Registry der Welt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(pub u32);

impl RoomId {
    /// Index in die Registry.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kurzweg innerhalb eines Raums (Eingang → Ziel, beides lokale Tile-Koordinaten).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    /// Eingangs-Tile des Kurzwegs
    pub entrance: IVec2,
    /// Ziel-Tile des Kurzwegs
    pub target: IVec2,
}

/// Exit-Verknuepfung eines Raums zu einem Partner-Raum derselben Region.
///
/// `exit` und `target_exit` sind bewusst vorzeichenbehaftet: die Rohdaten
/// koennen ungueltige (negative) Indizes enthalten, die erst bei der
/// Verbindungs-Konstruktion validiert werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitLink {
    /// Exit-Index im Quellraum
    pub exit: i32,
    /// Zielraum (None = Zielraum fehlt in den Rohdaten)
    pub target: Option<RoomId>,
    /// Exit-Index im Zielraum
    pub target_exit: i32,
}

/// Ein Raum der Welt: Position, Exits, Kurzwege, Gate-Eigenschaft.
#[derive(Debug, Clone)]
pub struct Room {
    /// Eindeutiger Raumname (z.B. "SU_C04")
    pub name: String,
    /// Weltposition der linken oberen Raumecke
    pub world_position: Vec2,
    /// Raumgroesse in Welteinheiten
    pub size: Vec2,
    /// Exit-Ankerpunkte in lokalen Tile-Koordinaten, index-adressiert
    pub exits: Vec<IVec2>,
    /// Pro Exit: Verknuepfung zu einem Raum derselben Region (None = unverbunden)
    pub exit_links: Vec<Option<ExitLink>>,
    /// Kurzwege innerhalb des Raums
    pub shortcuts: Vec<Shortcut>,
    /// Richtungs-Karte der Shortcut-Tiles: Tile → Schrittrichtung
    pub shortcut_dirs: HashMap<IVec2, IVec2>,
    /// Gate-Raum (genau ein Exit innerhalb, einer ausserhalb der Region)
    pub is_gate: bool,
    /// Sichtbar/aktiv im Editor
    pub active: bool,
    /// Kurzwege dieses Raums zeichnen
    pub draw_in_room_shortcuts: bool,
    /// Name der Subregion (leer = Haupt-Subregion)
    pub subregion: String,
    /// Hintergrundfarbe der Subregion (kosmetisch)
    pub background_color: Rgba,
}

impl Room {
    /// Erstellt einen Raum ohne Exits und Kurzwege.
    pub fn new(name: impl Into<String>, world_position: Vec2, size: Vec2) -> Self {
        Self {
            name: name.into(),
            world_position,
            size,
            exits: Vec::new(),
            exit_links: Vec::new(),
            shortcuts: Vec::new(),
            shortcut_dirs: HashMap::new(),
            is_gate: false,
            active: true,
            draw_in_room_shortcuts: true,
            subregion: String::new(),
            background_color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    /// Geometrischer Mittelpunkt des Raums in Weltkoordinaten.
    pub fn center(&self) -> Vec2 {
        self.world_position + self.size / 2.0
    }

    /// Weltposition eines Exits (Raumposition + lokaler Ankerpunkt).
    pub fn exit_world_position(&self, exit: usize) -> Option<Vec2> {
        self.exits
            .get(exit)
            .map(|p| self.world_position + p.as_vec2())
    }

    /// Verfolgt einen Kurzweg ab `entrance` und haengt jedes besuchte Tile an
    /// den Puffer an.
    ///
    /// Der Puffer gehoert dem Aufrufer und wird hier NICHT geleert — so kann
    /// derselbe Puffer ueber viele Trace-Aufrufe wiederverwendet werden, ohne
    /// pro Aufruf zu allokieren. Der Lauf endet am ersten Tile ohne
    /// Richtungseintrag (dem Ziel) oder am Schritt-Limit.
    pub fn trace_shortcut(&self, entrance: IVec2, out: &mut Vec<IVec2>) {
        let mut current = entrance;
        let mut steps = 0usize;

        while let Some(&dir) = self.shortcut_dirs.get(&current) {
            out.push(current);
            current += dir;
            steps += 1;
            if steps >= SHORTCUT_TRACE_STEP_LIMIT {
                log::warn!(
                    "Shortcut-Trace in {} bei {:?} nach {} Schritten abgebrochen",
                    self.name,
                    entrance,
                    steps
                );
                return;
            }
        }

        // Ziel-Tile (erstes Tile ohne Richtungseintrag) gehoert zum Pfad
        out.push(current);
    }
}

/// Registry aller Raeume der Welt. `RoomId` ist ein Index in diese Registry;
/// Raeume werden nie einzeln entfernt, nur mit der Welt als Ganzes verworfen.
#[derive(Debug, Clone, Default)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

impl RoomRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fuegt einen Raum hinzu und gibt sein Handle zurueck.
    pub fn insert(&mut self, room: Room) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(room);
        id
    }

    /// Anzahl registrierter Raeume.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// `true` wenn keine Raeume registriert sind.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Raum per Handle (None bei fremdem Handle).
    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    /// Mutabler Zugriff per Handle.
    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.index())
    }

    /// Sucht einen Raum ueber seinen Namen.
    pub fn find_by_name(&self, name: &str) -> Option<RoomId> {
        self.rooms
            .iter()
            .position(|r| r.name == name)
            .map(|i| RoomId(i as u32))
    }

    /// Iteriert ueber alle Raeume mit ihren Handles.
    pub fn iter(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(i, room)| (RoomId(i as u32), room))
    }
}

impl std::ops::Index<RoomId> for RoomRegistry {
    type Output = Room;

    fn index(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }
}

impl std::ops::IndexMut<RoomId> for RoomRegistry {
    fn index_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.index()]
    }
}
