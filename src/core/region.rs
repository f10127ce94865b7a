//! Regionen und Subregionen der Welt.

use super::connection_set::ConnectionSet;
use super::room::RoomId;
use crate::render::Rgba;

/// Benannte Subregion mit Hintergrundfarbe (kosmetisch).
#[derive(Debug, Clone)]
pub struct Subregion {
    /// Anzeigename (leer = Haupt-Subregion)
    pub name: String,
    /// Hintergrundfarbe
    pub background_color: Rgba,
}

impl Subregion {
    /// Erstellt eine Subregion.
    pub fn new(name: impl Into<String>, background_color: Rgba) -> Self {
        Self {
            name: name.into(),
            background_color,
        }
    }
}

/// Eine Top-Level-Region: Raeume, deren Verbindungen und Subregionen.
#[derive(Debug, Clone)]
pub struct Region {
    /// Kuerzel der Region (z.B. "SU")
    pub id: String,
    /// Anzeigename
    pub name: String,
    /// Raeume dieser Region (Handles in die Welt-Registry)
    pub rooms: Vec<RoomId>,
    /// Verbindungen innerhalb dieser Region
    pub connections: ConnectionSet,
    /// Subregionen (kosmetisch)
    pub subregions: Vec<Subregion>,
}

impl Region {
    /// Erstellt eine leere Region.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rooms: Vec::new(),
            connections: ConnectionSet::new(),
            subregions: Vec::new(),
        }
    }
}
