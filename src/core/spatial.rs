//! Spatial-Index (KD-Tree) fuer schnelle Verbindungspunkt-Abfragen.

use glam::Vec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::world::{ConnectionAddress, World};

/// Ergebnis einer Distanzabfrage gegen den Punkt-Index.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMatch {
    /// Adresse der Verbindung
    pub address: ConnectionAddress,
    /// Index des Punkts in deren Punktliste
    pub point_index: usize,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f32,
}

/// Read-only Spatial-Index ueber allen Verbindungspunkten der Welt.
///
/// Wird nach jeder Punktmutation neu aufgebaut; Abfragen zwischen Aufbau und
/// naechster Mutation sind konsistent.
#[derive(Debug, Clone)]
pub struct PointIndex {
    tree: KdTree<f64, 2>,
    entries: Vec<(ConnectionAddress, usize)>,
}

impl PointIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            entries: Vec::new(),
        }
    }

    /// Baut einen neuen Index ueber alle Punkte aller Verbindungs-Container.
    pub fn from_world(world: &World) -> Self {
        let mut entries = Vec::new();
        let mut positions: Vec<[f64; 2]> = Vec::new();

        for (set_ref, set) in world.sets() {
            for (key, connection) in set.iter() {
                for (point_index, point) in connection.points.iter().enumerate() {
                    let world_pos = point.world_position(&world.rooms);
                    positions.push([world_pos.x as f64, world_pos.y as f64]);
                    entries.push((
                        ConnectionAddress {
                            set: set_ref,
                            key: key.clone(),
                        },
                        point_index,
                    ));
                }
            }
        }

        Self {
            tree: (&positions).into(),
            entries,
        }
    }

    /// Anzahl indexierter Punkte.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` wenn keine Punkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Findet den naechsten Punkt zur Weltposition.
    pub fn nearest(&self, query: Vec2) -> Option<PointMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        let (address, point_index) = self.entries.get(result.item as usize)?.clone();

        Some(PointMatch {
            address,
            point_index,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Findet alle Punkte innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: Vec2, radius: f32) -> Vec<PointMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x as f64, query.y as f64], (radius * radius) as f64)
            .into_iter()
            .filter_map(|entry| {
                let (address, point_index) = self.entries.get(entry.item as usize)?.clone();
                Some(PointMatch {
                    address,
                    point_index,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}

impl Default for PointIndex {
    fn default() -> Self {
        Self::empty()
    }
}
