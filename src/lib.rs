//! Region-Map-Editor Library.
//! Core-Funktionalitaet als Library exportiert fuer Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod json;
pub mod render;
pub mod shared;
pub mod ui;

pub use app::{AppController, AppIntent, AppState};
pub use core::{
    Camera2D, Connection, ConnectionAddress, ConnectionError, ConnectionKind, ConnectionPoint,
    ConnectionSet, Layer, LayerKind, LoadReport, MapObjectRef, PointAnchor, PointIndex, Region,
    Room, RoomId, RoomRegistry, SetRef, Shortcut, Subregion, World,
};
pub use core::{draw_layers, ExitLink, PointMatch};
pub use json::{
    build_world, load_map_state, load_world_file, parse_world_spec, save_map_state, WorldSpec,
};
pub use render::{PainterRenderer, RecordingRenderer, Renderer, Rgba};
pub use shared::EditorOptions;
