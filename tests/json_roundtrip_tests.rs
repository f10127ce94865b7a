//! Integrationstests fuer die Verbindungs-Persistenz:
//! - drei akzeptierte JSON-Formen (Zaehler, Array, Objekt)
//! - Roundtrip-Treue der Weltpositionen
//! - Anker-Abgleich beim Laden und nach Raum-Verschiebung

use approx::assert_relative_eq;
use glam::{IVec2, Vec2};
use region_map_editor::{
    load_map_state, save_map_state, ExitLink, LoadReport, PointAnchor, Region, Room, World,
};
use serde_json::json;

/// Welt mit einer Exit-Verbindung von (0,0)-Anker zu (100,0)-Anker.
fn straight_world() -> World {
    let mut world = World::new();

    let mut a = Room::new("A", Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    a.exits = vec![IVec2::new(0, 0)];
    let mut b = Room::new("B", Vec2::new(100.0, 0.0), Vec2::new(10.0, 10.0));
    b.exits = vec![IVec2::new(0, 0)];

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
    world
}

fn point_worlds(world: &World, key: &str) -> Vec<Vec2> {
    let address = world.find_connection(key).expect("Verbindung erwartet");
    let connection = world.connection(&address).expect("Verbindung erwartet");
    connection
        .points
        .iter()
        .map(|p| p.world_position(&world.rooms))
        .collect()
}

#[test]
fn legacy_zaehler_interpoliert_gleichverteilt() {
    let mut world = straight_world();

    load_map_state(&mut world, &json!({ "A~B": 3 }));

    let points = point_worlds(&world, "A~B");
    assert_eq!(points.len(), 3);
    assert_relative_eq!(points[0].x, 25.0, epsilon = 1e-4);
    assert_relative_eq!(points[1].x, 50.0, epsilon = 1e-4);
    assert_relative_eq!(points[2].x, 75.0, epsilon = 1e-4);
    for point in &points {
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-4);
    }
}

#[test]
fn legacy_zaehler_null_laesst_punkte_unveraendert() {
    let mut world = straight_world();
    load_map_state(&mut world, &json!({ "A~B": 2 }));
    assert_eq!(point_worlds(&world, "A~B").len(), 2);

    // "0" baut nichts neu auf und loescht auch nichts
    load_map_state(&mut world, &json!({ "A~B": 0 }));
    assert_eq!(point_worlds(&world, "A~B").len(), 2);
}

#[test]
fn explizites_array_wird_gegen_erwartete_anker_geladen() {
    let mut world = straight_world();

    load_map_state(
        &mut world,
        &json!({ "A~B": [ { "x": 30.0, "y": 5.0 }, { "x": 60.0, "y": -5.0 } ] }),
    );

    let address = world.find_connection("A~B").expect("Verbindung erwartet");
    let connection = world.connection(&address).expect("Verbindung erwartet");
    let a_id = world.rooms.find_by_name("A").expect("Raum erwartet");

    // Exit-zu-Exit: alle Punkte gehoeren dem Quellraum
    assert!(connection
        .points
        .iter()
        .all(|p| p.anchor == PointAnchor::Room(a_id)));
    // Raum A liegt im Ursprung, lokale == Welt-Position
    let points = point_worlds(&world, "A~B");
    assert_relative_eq!(points[0].x, 30.0, epsilon = 1e-4);
    assert_relative_eq!(points[1].y, -5.0, epsilon = 1e-4);
}

#[test]
fn null_eintraege_im_array_werden_kompaktiert() {
    let mut world = straight_world();

    load_map_state(
        &mut world,
        &json!({ "A~B": [ null, { "x": 40.0, "y": 0.0 }, null, { "x": 70.0, "y": 0.0 } ] }),
    );

    let points = point_worlds(&world, "A~B");
    assert_eq!(points.len(), 2);
    assert_relative_eq!(points[0].x, 40.0, epsilon = 1e-4);
    assert_relative_eq!(points[1].x, 70.0, epsilon = 1e-4);
}

#[test]
fn objekt_form_laedt_punkte_und_option() {
    let mut world = straight_world();

    load_map_state(
        &mut world,
        &json!({ "A~B": {
            "points": [ { "x": 50.0, "y": 10.0 } ],
            "whiteToRed": false
        } }),
    );

    let address = world.find_connection("A~B").expect("Verbindung erwartet");
    let connection = world.connection(&address).expect("Verbindung erwartet");
    assert_eq!(connection.points.len(), 1);
    assert!(!connection.allow_white_to_red);
}

#[test]
fn unbekannte_form_faellt_still_durch() {
    let mut world = straight_world();

    load_map_state(&mut world, &json!({ "A~B": "kaputt" }));

    let address = world.find_connection("A~B").expect("Verbindung erwartet");
    let connection = world.connection(&address).expect("Verbindung erwartet");
    assert!(connection.points.is_empty());
    assert!(connection.allow_white_to_red);
}

#[test]
fn roundtrip_erhaelt_weltpositionen_aller_formen() {
    for saved in [
        json!({ "A~B": 3 }),
        json!({ "A~B": [ { "x": 10.0, "y": 3.0 }, { "x": 90.0, "y": -3.0 } ] }),
        json!({ "A~B": { "points": [ { "x": 42.0, "y": 7.0 } ], "whiteToRed": false } }),
    ] {
        let mut world = straight_world();
        load_map_state(&mut world, &saved);
        let before = point_worlds(&world, "A~B");

        let state = save_map_state(&mut world);

        let mut reloaded = straight_world();
        load_map_state(&mut reloaded, &state);
        let after = point_worlds(&reloaded, "A~B");

        assert_eq!(before.len(), after.len(), "Form: {}", saved);
        for (b, a) in before.iter().zip(after.iter()) {
            assert_relative_eq!(b.x, a.x, epsilon = 1e-3);
            assert_relative_eq!(b.y, a.y, epsilon = 1e-3);
        }
    }
}

#[test]
fn speichern_emittiert_immer_die_objekt_form() {
    let mut world = straight_world();
    load_map_state(&mut world, &json!({ "A~B": 2 }));

    let state = save_map_state(&mut world);
    let entry = state.get("A~B").expect("Eintrag erwartet");

    // Nie die kompakte Zaehler-Form
    assert!(entry.is_object());
    assert!(entry.get("points").is_some());
    assert!(entry.get("whiteToRed").is_some());
}

#[test]
fn raum_verschiebung_nimmt_verankerte_punkte_mit() {
    let mut world = straight_world();
    load_map_state(
        &mut world,
        &json!({ "A~B": [ { "x": 30.0, "y": 0.0 } ] }),
    );
    // Speichern erzwingt den Anker-Abgleich (Punkt haengt an Raum A)
    let _ = save_map_state(&mut world);

    let a_id = world.rooms.find_by_name("A").expect("Raum erwartet");
    world.rooms[a_id].world_position += Vec2::new(0.0, 50.0);

    let points = point_worlds(&world, "A~B");
    assert_relative_eq!(points[0].x, 30.0, epsilon = 1e-4);
    assert_relative_eq!(points[0].y, 50.0, epsilon = 1e-4);
}

#[test]
fn doppeltes_speichern_ist_stabil() {
    let mut world = straight_world();
    load_map_state(
        &mut world,
        &json!({ "A~B": [ { "x": 25.0, "y": 1.0 }, { "x": 75.0, "y": -1.0 } ] }),
    );

    let first = save_map_state(&mut world);
    let second = save_map_state(&mut world);

    assert_eq!(first, second);
}
