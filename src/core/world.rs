//! Die Welt: Raum-Registry, Regionen und globale (regions-uebergreifende)
//! Verbindungen, plus der Verbindungsaufbau aus den Raum-Metadaten.

use glam::IVec2;

use super::connection::Connection;
use super::connection_set::ConnectionSet;
use super::load_report::LoadReport;
use super::region::Region;
use super::room::{RoomId, RoomRegistry};

/// Adressiert einen Verbindungs-Container der Welt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetRef {
    /// Verbindungs-Set einer Region (Index in `World::regions`)
    Region(usize),
    /// Das globale Set fuer Regions-Uebergaenge
    Global,
}

/// Vollstaendige Adresse einer Verbindung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionAddress {
    /// Container
    pub set: SetRef,
    /// JSON-Key innerhalb des Containers
    pub key: String,
}

/// Container fuer die gesamte geladene Welt.
#[derive(Debug, Clone, Default)]
pub struct World {
    /// Alle Raeume, regionsuebergreifend
    pub rooms: RoomRegistry,
    /// Alle Regionen
    pub regions: Vec<Region>,
    /// Regions-Uebergangspaare (Quelle, Ziel) fuer den Verbindungsaufbau
    pub region_link_pairs: Vec<(RoomId, RoomId)>,
    /// Verbindungen, die keiner einzelnen Region gehoeren
    pub global_connections: ConnectionSet,
}

impl World {
    /// Erstellt eine leere Welt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut alle Verbindungen aus den Raum-Metadaten neu auf.
    ///
    /// Drei Quellen, in dieser Reihenfolge pro Region: Exit-Verknuepfungen
    /// (validiert, Fehler landen im Report), Kurzwege (getraced ueber einen
    /// gemeinsamen Scratch-Puffer). Danach die Regions-Uebergaenge ins
    /// globale Set. Bestehende Verbindungen werden komplett verworfen —
    /// Verbindungen werden nie einzeln zerstoert, nur als Ganzes neu erzeugt.
    pub fn build_connections(&mut self, report: &mut LoadReport) {
        let mut scratch: Vec<IVec2> = Vec::new();

        for region in &mut self.regions {
            region.connections.clear();

            for &room_id in &region.rooms {
                let links: Vec<_> = self.rooms[room_id].exit_links.iter().flatten().copied().collect();
                for link in links {
                    match Connection::from_exit_link(&self.rooms, Some(room_id), &link) {
                        Ok(connection) => {
                            region.connections.insert(&self.rooms, connection);
                        }
                        Err(error) => report.push(error),
                    }
                }

                let shortcuts = self.rooms[room_id].shortcuts.clone();
                for shortcut in shortcuts {
                    let connection =
                        Connection::in_room_shortcut(&self.rooms, room_id, shortcut, &mut scratch);
                    region.connections.insert(&self.rooms, connection);
                }
            }
        }

        self.global_connections.clear();
        for &(source, destination) in &self.region_link_pairs {
            let connection = Connection::region_link(&self.rooms, source, destination);
            self.global_connections.insert(&self.rooms, connection);
        }

        log::info!(
            "Verbindungsaufbau abgeschlossen: {} Verbindungen, {} Fehler",
            self.connection_count(),
            report.len()
        );
    }

    /// Gesamtzahl aller Verbindungen (Regionen + global).
    pub fn connection_count(&self) -> usize {
        self.regions
            .iter()
            .map(|r| r.connections.len())
            .sum::<usize>()
            + self.global_connections.len()
    }

    /// Anzahl aller Raeume.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Verbindungs-Container per Referenz.
    pub fn set(&self, set: SetRef) -> Option<&ConnectionSet> {
        match set {
            SetRef::Region(index) => self.regions.get(index).map(|r| &r.connections),
            SetRef::Global => Some(&self.global_connections),
        }
    }

    /// Verbindungs-Container mutabel.
    pub fn set_mut(&mut self, set: SetRef) -> Option<&mut ConnectionSet> {
        match set {
            SetRef::Region(index) => self.regions.get_mut(index).map(|r| &mut r.connections),
            SetRef::Global => Some(&mut self.global_connections),
        }
    }

    /// Verbindung ueber ihre Adresse.
    pub fn connection(&self, address: &ConnectionAddress) -> Option<&Connection> {
        self.set(address.set)?.get(&address.key)
    }

    /// Verbindung mutabel ueber ihre Adresse.
    pub fn connection_mut(&mut self, address: &ConnectionAddress) -> Option<&mut Connection> {
        self.set_mut(address.set)?.get_mut(&address.key)
    }

    /// Sucht eine Verbindung ueber ihren JSON-Key (erst Regionen, dann global).
    pub fn find_connection(&self, key: &str) -> Option<ConnectionAddress> {
        for (index, region) in self.regions.iter().enumerate() {
            if region.connections.get(key).is_some() {
                return Some(ConnectionAddress {
                    set: SetRef::Region(index),
                    key: key.to_string(),
                });
            }
        }
        if self.global_connections.get(key).is_some() {
            return Some(ConnectionAddress {
                set: SetRef::Global,
                key: key.to_string(),
            });
        }
        None
    }

    // ── Punkt-Edits ────────────────────────────────────────────────────

    /// Verschiebt einen Punkt auf eine neue Weltposition (Anker bleibt).
    pub fn move_point(
        &mut self,
        address: &ConnectionAddress,
        point_index: usize,
        world_pos: glam::Vec2,
    ) -> bool {
        let World {
            rooms,
            regions,
            global_connections,
            ..
        } = self;

        let set = match address.set {
            SetRef::Region(index) => regions.get_mut(index).map(|r| &mut r.connections),
            SetRef::Global => Some(&mut *global_connections),
        };
        let Some(point) = set
            .and_then(|s| s.get_mut(&address.key))
            .and_then(|c| c.points.get_mut(point_index))
        else {
            return false;
        };

        point.set_world_position(rooms, world_pos);
        true
    }

    /// Fuegt einen Punkt in die adressierte Verbindung ein.
    /// Gibt den Einfuege-Index zurueck.
    pub fn insert_point(
        &mut self,
        address: &ConnectionAddress,
        world_pos: glam::Vec2,
    ) -> Option<usize> {
        let World {
            rooms,
            regions,
            global_connections,
            ..
        } = self;

        let set = match address.set {
            SetRef::Region(index) => regions.get_mut(index).map(|r| &mut r.connections),
            SetRef::Global => Some(&mut *global_connections),
        };

        set.and_then(|s| s.get_mut(&address.key))
            .map(|connection| connection.insert_point_at(rooms, world_pos))
    }

    /// Entfernt einen Punkt aus der adressierten Verbindung.
    pub fn remove_point(&mut self, address: &ConnectionAddress, point_index: usize) -> bool {
        let Some(connection) = self.connection_mut(address) else {
            return false;
        };
        if point_index >= connection.points.len() {
            return false;
        }

        connection.points.remove(point_index);
        true
    }

    /// Iteriert ueber alle Verbindungs-Container mit ihren Referenzen.
    pub fn sets(&self) -> impl Iterator<Item = (SetRef, &ConnectionSet)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| (SetRef::Region(i), &r.connections))
            .chain(std::iter::once((SetRef::Global, &self.global_connections)))
    }

    /// Iteriert mutabel ueber alle Verbindungs-Container.
    pub fn sets_mut(&mut self) -> impl Iterator<Item = (SetRef, &mut ConnectionSet)> {
        self.regions
            .iter_mut()
            .enumerate()
            .map(|(i, r)| (SetRef::Region(i), &mut r.connections))
            .chain(std::iter::once((SetRef::Global, &mut self.global_connections)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::room::{ExitLink, Room, Shortcut};
    use glam::Vec2;

    fn world_with_two_rooms() -> (World, RoomId, RoomId) {
        let mut world = World::new();

        let mut a = Room::new("SU_C04", Vec2::new(0.0, 0.0), Vec2::new(20.0, 10.0));
        a.exits = vec![IVec2::new(0, 5), IVec2::new(19, 5)];
        let mut b = Room::new("SU_C01", Vec2::new(100.0, 0.0), Vec2::new(20.0, 10.0));
        b.exits = vec![IVec2::new(0, 5)];

        let a_id = world.rooms.insert(a);
        let b_id = world.rooms.insert(b);

        world.rooms[a_id].exit_links = vec![
            None,
            Some(ExitLink {
                exit: 1,
                target: Some(b_id),
                target_exit: 0,
            }),
        ];

        let mut region = Region::new("SU", "Outskirts");
        region.rooms = vec![a_id, b_id];
        world.regions.push(region);

        (world, a_id, b_id)
    }

    #[test]
    fn build_connections_erzeugt_exit_verbindung() {
        let (mut world, _, _) = world_with_two_rooms();
        let mut report = LoadReport::new();

        world.build_connections(&mut report);

        assert!(report.is_empty());
        assert_eq!(world.connection_count(), 1);
        assert!(world.regions[0].connections.get("SU_C04~SU_C01").is_some());
    }

    #[test]
    fn build_connections_sammelt_fehler_und_laeuft_weiter() {
        let (mut world, a_id, b_id) = world_with_two_rooms();
        // Zusaetzlicher Link mit ungueltigem Exit-Index
        world.rooms[a_id].exit_links.push(Some(ExitLink {
            exit: 7,
            target: Some(b_id),
            target_exit: 0,
        }));
        let mut report = LoadReport::new();

        world.build_connections(&mut report);

        assert_eq!(report.len(), 1);
        // Die gueltige Verbindung ist trotzdem entstanden
        assert_eq!(world.connection_count(), 1);
    }

    #[test]
    fn build_connections_ist_wiederholbar() {
        let (mut world, a_id, _) = world_with_two_rooms();
        world.rooms[a_id].shortcuts.push(Shortcut {
            entrance: IVec2::new(2, 2),
            target: IVec2::new(2, 2),
        });
        let mut report = LoadReport::new();

        world.build_connections(&mut report);
        let first_count = world.connection_count();
        world.build_connections(&mut report);

        assert_eq!(world.connection_count(), first_count);
    }

    #[test]
    fn find_connection_durchsucht_regionen_und_global() {
        let (mut world, a_id, b_id) = world_with_two_rooms();
        world.region_link_pairs.push((a_id, b_id));
        let mut report = LoadReport::new();
        world.build_connections(&mut report);

        let regional = world
            .find_connection("SU_C04~SU_C01")
            .expect("regionale Verbindung erwartet");
        assert_eq!(regional.set, SetRef::Region(0));

        // Der Regions-Uebergang traegt denselben Namens-Key, liegt aber
        // im globalen Set — die Region gewinnt bei der Suche.
        assert!(world
            .set(SetRef::Global)
            .map(|s| s.len() == 1)
            .unwrap_or(false));
    }
}
