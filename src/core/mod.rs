//! Core-Domaenentypen: Raeume, Regionen, Verbindungen, Layer, Kamera,
//! Spatial-Index.

pub mod camera;
pub mod connection;
pub mod connection_set;
pub mod layer;
pub mod load_report;
pub mod region;
pub mod room;
pub mod spatial;
pub mod world;

pub use camera::Camera2D;
pub use connection::{
    Connection, ConnectionKind, ConnectionPoint, MapObjectRef, ObjectPredicate, PointAnchor,
    GUIDE_COLOR,
};
pub use connection_set::ConnectionSet;
pub use layer::{draw_layers, Layer, LayerKind};
pub use load_report::{ConnectionError, LoadReport};
pub use region::{Region, Subregion};
pub use room::{ExitLink, Room, RoomId, RoomRegistry, Shortcut};
pub use spatial::{PointIndex, PointMatch};
pub use world::{ConnectionAddress, SetRef, World};
