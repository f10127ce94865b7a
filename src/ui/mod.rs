//! UI-Komponenten: Menue, Panels, Input-Handling, Dialoge.

pub mod connection_panel;
pub mod dialogs;
pub mod input;
pub mod layers_panel;
pub mod menu;
pub mod options_dialog;
pub mod status;

pub use connection_panel::render_connection_panel;
pub use dialogs::handle_file_dialogs;
pub use input::InputState;
pub use layers_panel::render_layers_panel;
pub use menu::render_menu;
pub use options_dialog::show_options_dialog;
pub use status::render_status_bar;
