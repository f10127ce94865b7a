//! Use-Cases fuer interaktive Punkt-Bearbeitung (Picken, Greifen,
//! Verschieben, Einfuegen, Entfernen).
//!
//! Jede Mutation baut anschliessend den Punkt-Index neu auf, damit das
//! naechste Picking konsistent ist.

use glam::Vec2;

use super::state::AppState;
use crate::core::PointMatch;

/// Pick-Radius in Welteinheiten aus Optionen und aktuellem Zoom.
pub fn pick_radius_world(state: &AppState) -> f32 {
    state
        .camera
        .pick_radius_world(state.options.selection_pick_radius_px)
}

/// Naechster Verbindungspunkt innerhalb des Pick-Radius.
pub fn pick_point(state: &AppState, world_pos: Vec2) -> Option<PointMatch> {
    let radius = pick_radius_world(state);
    let hit = state.point_index.nearest(world_pos)?;
    (hit.distance <= radius).then_some(hit)
}

/// Selektiert die Verbindung, deren Pfad dem Cursor am naechsten liegt.
///
/// Distanz gegen den gesamten Pfad, nicht nur gegen Punkte — so sind auch
/// Verbindungen ohne Zwischenpunkte selektierbar.
pub fn pick_connection(state: &mut AppState, world_pos: Vec2) {
    let radius = pick_radius_world(state);
    let Some(world) = state.world.as_ref() else {
        state.selected_connection = None;
        return;
    };

    let mut best: Option<(f32, crate::core::ConnectionAddress)> = None;
    for (set_ref, set) in world.sets() {
        for (key, connection) in set.iter() {
            if !connection.is_active(&world.rooms) {
                continue;
            }
            let Some(distance) = connection.distance_to_path(&world.rooms, world_pos) else {
                continue;
            };
            if distance <= radius && best.as_ref().map_or(true, |(d, _)| distance < *d) {
                best = Some((
                    distance,
                    crate::core::ConnectionAddress {
                        set: set_ref,
                        key: key.clone(),
                    },
                ));
            }
        }
    }

    state.selected_connection = best.map(|(_, address)| address);
}

/// Beginnt einen Punkt-Drag, falls ein Punkt im Radius liegt.
pub fn grab_point(state: &mut AppState, world_pos: Vec2) {
    if let Some(hit) = pick_point(state, world_pos) {
        state.selected_connection = Some(hit.address.clone());
        state.dragged_point = Some((hit.address, hit.point_index));
    }
}

/// Verschiebt den gegriffenen Punkt auf die Weltposition.
///
/// Der Index wird erst beim Loslassen neu aufgebaut; waehrend des Drags
/// bleibt das Picking auf dem Stand vor dem Drag.
pub fn move_dragged_point(state: &mut AppState, world_pos: Vec2) {
    let Some((address, point_index)) = state.dragged_point.clone() else {
        return;
    };
    let Some(world) = state.world.as_mut() else {
        return;
    };

    if !world.move_point(&address, point_index, world_pos) {
        log::warn!("Drag auf verschwundenen Punkt: {} #{}", address.key, point_index);
        state.dragged_point = None;
    }
}

/// Beendet einen Punkt-Drag und aktualisiert den Punkt-Index.
pub fn release_point(state: &mut AppState) {
    if state.dragged_point.take().is_some() {
        state.rebuild_point_index();
    }
}

/// Fuegt einen Punkt in die selektierte Verbindung ein.
pub fn add_point(state: &mut AppState, world_pos: Vec2) {
    let Some(address) = state.selected_connection.clone() else {
        return;
    };
    let Some(world) = state.world.as_mut() else {
        return;
    };

    if world.insert_point(&address, world_pos).is_some() {
        state.rebuild_point_index();
    }
}

/// Entfernt den Punkt unter dem Cursor.
pub fn remove_point(state: &mut AppState, world_pos: Vec2) {
    let Some(hit) = pick_point(state, world_pos) else {
        return;
    };
    let Some(world) = state.world.as_mut() else {
        return;
    };

    if world.remove_point(&hit.address, hit.point_index) {
        state.rebuild_point_index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExitLink, LoadReport, Region, Room, SetRef, World};
    use glam::IVec2;

    fn state_with_world() -> AppState {
        let mut world = World::new();
        let mut a = Room::new("A", Vec2::ZERO, Vec2::new(20.0, 10.0));
        a.exits = vec![IVec2::new(19, 5)];
        let mut b = Room::new("B", Vec2::new(100.0, 0.0), Vec2::new(20.0, 10.0));
        b.exits = vec![IVec2::new(0, 5)];
        let a_id = world.rooms.insert(a);
        let b_id = world.rooms.insert(b);
        world.rooms[a_id].exit_links = vec![Some(ExitLink {
            exit: 0,
            target: Some(b_id),
            target_exit: 0,
        })];

        let mut region = Region::new("R", "Region");
        region.rooms = vec![a_id, b_id];
        world.regions.push(region);

        let mut report = LoadReport::new();
        world.build_connections(&mut report);

        let mut state = AppState::new();
        state.world = Some(world);
        state.selected_connection = state.world.as_ref().unwrap().find_connection("A~B");
        state.rebuild_point_index();
        state
    }

    #[test]
    fn add_und_remove_point_pflegen_den_index() {
        let mut state = state_with_world();
        assert_eq!(state.point_index.len(), 0);

        add_point(&mut state, Vec2::new(60.0, 5.0));
        assert_eq!(state.point_index.len(), 1);

        remove_point(&mut state, Vec2::new(60.0, 5.0));
        assert_eq!(state.point_index.len(), 0);
    }

    #[test]
    fn grab_move_release_verschiebt_den_punkt() {
        let mut state = state_with_world();
        add_point(&mut state, Vec2::new(60.0, 5.0));

        grab_point(&mut state, Vec2::new(60.0, 5.0));
        assert!(state.dragged_point.is_some());

        move_dragged_point(&mut state, Vec2::new(70.0, 20.0));
        release_point(&mut state);
        assert!(state.dragged_point.is_none());

        let hit = state
            .point_index
            .nearest(Vec2::new(70.0, 20.0))
            .expect("Punkt erwartet");
        assert!(hit.distance < 0.01);
        assert_eq!(hit.address.set, SetRef::Region(0));
    }

    #[test]
    fn pick_connection_trifft_auch_punktlose_verbindungen() {
        let mut state = state_with_world();
        state.selected_connection = None;

        // A~B hat keine Zwischenpunkte; Klick auf die Linie selektiert trotzdem
        pick_connection(&mut state, Vec2::new(60.0, 8.0));
        assert_eq!(
            state.selected_connection.as_ref().map(|a| a.key.as_str()),
            Some("A~B")
        );

        pick_connection(&mut state, Vec2::new(60.0, 100.0));
        assert!(state.selected_connection.is_none());
    }

    #[test]
    fn pick_ausserhalb_des_radius_trifft_nichts() {
        let mut state = state_with_world();
        add_point(&mut state, Vec2::new(60.0, 5.0));

        // Standard-Radius: 12 px bei Zoom 1.0 → 12 Welteinheiten
        assert!(pick_point(&state, Vec2::new(60.0, 30.0)).is_none());
        assert!(pick_point(&state, Vec2::new(60.0, 10.0)).is_some());
    }
}
