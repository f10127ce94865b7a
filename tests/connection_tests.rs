//! Integrationstests fuer den Verbindungsaufbau:
//! - drei Konstruktionsarten
//! - Validierung mit Fehlersammlung
//! - Gate-Heuristik fuer Regions-Uebergaenge
//! - Praedikat-Suche

use glam::{IVec2, Vec2};
use region_map_editor::{
    Connection, ConnectionError, ConnectionKind, ExitLink, LoadReport, MapObjectRef, PointAnchor,
    Region, Room, Shortcut, World,
};
use std::cell::RefCell;

/// Baut eine Welt mit zwei verbundenen Raeumen (SU_C04 Exit 1 → SU_C01 Exit 0).
fn outskirts_world() -> World {
    let mut world = World::new();

    let mut c04 = Room::new("SU_C04", Vec2::new(0.0, 0.0), Vec2::new(30.0, 20.0));
    c04.exits = vec![IVec2::new(0, 10), IVec2::new(29, 10), IVec2::new(15, 0)];
    let mut c01 = Room::new("SU_C01", Vec2::new(100.0, 0.0), Vec2::new(30.0, 20.0));
    c01.exits = vec![IVec2::new(0, 10)];

    let c04_id = world.rooms.insert(c04);
    let c01_id = world.rooms.insert(c01);

    world.rooms[c04_id].exit_links = vec![
        None,
        Some(ExitLink {
            exit: 1,
            target: Some(c01_id),
            target_exit: 0,
        }),
        None,
    ];

    let mut region = Region::new("SU", "Outskirts");
    region.rooms = vec![c04_id, c01_id];
    world.regions.push(region);

    world
}

#[test]
fn exit_verbindung_setzt_anker_und_key() {
    let mut world = outskirts_world();
    let mut report = LoadReport::new();

    world.build_connections(&mut report);

    assert!(report.is_empty());
    let connection = world.regions[0]
        .connections
        .get("SU_C04~SU_C01")
        .expect("Verbindung SU_C04~SU_C01 erwartet");

    assert_eq!(connection.kind, ConnectionKind::ExitToExit);
    assert_eq!(connection.source_point, IVec2::new(29, 10));
    assert_eq!(connection.destination_point, IVec2::new(0, 10));
    assert_eq!(
        connection.source_anchor_world(&world.rooms),
        Vec2::new(29.0, 10.0)
    );
    assert_eq!(
        connection.destination_anchor_world(&world.rooms),
        Vec2::new(100.0, 10.0)
    );
}

#[test]
fn exit_index_ausserhalb_ergibt_fehler_statt_verbindung() {
    let mut world = outskirts_world();
    let c04 = world.rooms.find_by_name("SU_C04").expect("Raum erwartet");
    let c01 = world.rooms.find_by_name("SU_C01").expect("Raum erwartet");

    // Exit 5 auf einem Raum mit 3 Exits
    world.rooms[c04].exit_links = vec![Some(ExitLink {
        exit: 5,
        target: Some(c01),
        target_exit: 0,
    })];

    let mut report = LoadReport::new();
    world.build_connections(&mut report);

    assert_eq!(report.len(), 1);
    assert!(matches!(
        report.iter().next(),
        Some(ConnectionError::SourceExitOutOfRange { exit: 5, .. })
    ));
    assert_eq!(world.connection_count(), 0);
}

#[test]
fn fehlender_zielraum_wird_gemeldet() {
    let world = outskirts_world();
    let c04 = world.rooms.find_by_name("SU_C04").expect("Raum erwartet");

    let result = Connection::from_exit_link(
        &world.rooms,
        Some(c04),
        &ExitLink {
            exit: 1,
            target: None,
            target_exit: 0,
        },
    );

    let error = result.expect_err("MissingRoom erwartet");
    assert!(error.to_string().contains("NONE"));
}

#[test]
fn kurzweg_hat_gleichen_quell_und_zielraum() {
    let mut world = outskirts_world();
    let c04 = world.rooms.find_by_name("SU_C04").expect("Raum erwartet");

    // Trace-Pfad: (5,5) → (6,5) → (7,5)
    world.rooms[c04]
        .shortcut_dirs
        .insert(IVec2::new(5, 5), IVec2::new(1, 0));
    world.rooms[c04]
        .shortcut_dirs
        .insert(IVec2::new(6, 5), IVec2::new(1, 0));
    world.rooms[c04].shortcuts.push(Shortcut {
        entrance: IVec2::new(5, 5),
        target: IVec2::new(7, 5),
    });

    let mut report = LoadReport::new();
    world.build_connections(&mut report);

    let shortcut = world.regions[0]
        .connections
        .get("#SU_C04~5~5")
        .expect("Kurzweg unter #SU_C04~5~5 erwartet");

    assert_eq!(shortcut.source, shortcut.destination);
    assert_eq!(shortcut.points.len(), 3);
    assert!(shortcut
        .points
        .iter()
        .all(|p| p.anchor == PointAnchor::Room(c04)));
}

#[test]
fn regions_uebergang_verankert_ersten_und_letzten_punkt() {
    let mut world = outskirts_world();
    let c04 = world.rooms.find_by_name("SU_C04").expect("Raum erwartet");
    let c01 = world.rooms.find_by_name("SU_C01").expect("Raum erwartet");
    world.region_link_pairs.push((c04, c01));

    let mut report = LoadReport::new();
    world.build_connections(&mut report);

    let link = world
        .global_connections
        .get("SU_C04~SU_C01")
        .expect("globaler Uebergang erwartet");

    assert_eq!(link.kind, ConnectionKind::RegionLink);
    assert_eq!(link.points.len(), 2);
    assert_eq!(link.points[0].anchor, PointAnchor::Room(c04));
    assert_eq!(link.points[1].anchor, PointAnchor::Room(c01));
}

#[test]
fn gate_heuristik_nimmt_den_unverbundenen_exit() {
    let mut gate = Room::new("GATE_SU_HI", Vec2::new(50.0, 50.0), Vec2::new(40.0, 20.0));
    gate.is_gate = true;
    // Exits: [L, R]
    gate.exits = vec![IVec2::new(0, 10), IVec2::new(39, 10)];
    // Slot 0 unverbunden, Slot 1 verbunden → L ist der Uebergang
    gate.exit_links = vec![
        None,
        Some(ExitLink {
            exit: 1,
            target: None,
            target_exit: 0,
        }),
    ];

    assert_eq!(
        Connection::region_exit_position(&gate),
        Vec2::new(0.0, 10.0)
    );
}

#[test]
fn gate_ohne_freien_slot_nutzt_den_mittelpunkt() {
    let mut gate = Room::new("GATE_VOLL", Vec2::new(50.0, 50.0), Vec2::new(40.0, 20.0));
    gate.is_gate = true;
    gate.exits = vec![IVec2::new(0, 10), IVec2::new(39, 10)];
    let dummy = ExitLink {
        exit: 0,
        target: None,
        target_exit: 0,
    };
    gate.exit_links = vec![Some(dummy), Some(dummy)];

    // WorldPosition + Size/2
    assert_eq!(
        Connection::region_exit_position(&gate),
        Vec2::new(70.0, 60.0)
    );
}

#[test]
fn praedikat_prueft_quelle_und_ziel_vor_den_punkten() {
    let mut world = outskirts_world();
    let c04 = world.rooms.find_by_name("SU_C04").expect("Raum erwartet");
    let c01 = world.rooms.find_by_name("SU_C01").expect("Raum erwartet");
    world.region_link_pairs.push((c04, c01));
    let mut report = LoadReport::new();
    world.build_connections(&mut report);

    let link = world
        .global_connections
        .get("SU_C04~SU_C01")
        .expect("Uebergang erwartet");

    // Protokolliert die Pruefreihenfolge
    let order: RefCell<Vec<&'static str>> = RefCell::new(Vec::new());
    let predicate = |object: &MapObjectRef<'_>| -> bool {
        match object {
            MapObjectRef::Room(_, room) => {
                order.borrow_mut().push("room");
                room.name == "SU_C01"
            }
            MapObjectRef::Point(_) => {
                order.borrow_mut().push("point");
                false
            }
        }
    };

    assert!(link.matches_predicate(&world.rooms, &predicate));
    // Quelle (kein Treffer), dann Ziel (Treffer) — Punkte nie erreicht
    assert_eq!(*order.borrow(), vec!["room", "room"]);

    // Praedikat ohne Treffer prueft danach alle Punkte
    order.borrow_mut().clear();
    let never = |object: &MapObjectRef<'_>| -> bool {
        match object {
            MapObjectRef::Room(..) => {
                order.borrow_mut().push("room");
                false
            }
            MapObjectRef::Point(_) => {
                order.borrow_mut().push("point");
                false
            }
        }
    };
    assert!(!link.matches_predicate(&world.rooms, &never));
    assert_eq!(*order.borrow(), vec!["room", "room", "point", "point"]);
}

#[test]
fn punkt_treffer_beendet_die_suche() {
    let mut world = outskirts_world();
    let c04 = world.rooms.find_by_name("SU_C04").expect("Raum erwartet");
    let c01 = world.rooms.find_by_name("SU_C01").expect("Raum erwartet");
    world.region_link_pairs.push((c04, c01));
    let mut report = LoadReport::new();
    world.build_connections(&mut report);

    let link = world
        .global_connections
        .get("SU_C04~SU_C01")
        .expect("Uebergang erwartet");

    let point_calls = RefCell::new(0usize);
    let first_point = |object: &MapObjectRef<'_>| -> bool {
        match object {
            MapObjectRef::Room(..) => false,
            MapObjectRef::Point(_) => {
                *point_calls.borrow_mut() += 1;
                true
            }
        }
    };

    assert!(link.matches_predicate(&world.rooms, &first_point));
    assert_eq!(*point_calls.borrow(), 1);
}
