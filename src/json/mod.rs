//! JSON-Persistenz: Welt-Eingabeformat und Verbindungszustand.

pub mod state;
pub mod world_spec;

pub use state::{load_map_state, read_state_file, save_map_state, write_state_file};
pub use world_spec::{
    build_world, load_world_file, parse_world_spec, ExitLinkSpec, RegionLinkSpec, RegionSpec,
    RoomSpec, ShortcutSpec, ShortcutTileSpec, SubregionSpec, WorldSpec,
};
