//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod controller;
pub mod editing;
pub mod events;
pub mod layers;
pub mod state;

pub use controller::AppController;
pub use events::AppIntent;
pub use state::AppState;
