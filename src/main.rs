//! Region-Map-Editor.
//!
//! Interaktiver Karten-Editor fuer Regions-Weltdaten: Raeume anordnen,
//! Verbindungen und Regions-Uebergaenge visuell kuratieren.

use eframe::egui;
use region_map_editor::render::PainterRenderer;
use region_map_editor::{draw_layers, ui, AppController, AppIntent, AppState, EditorOptions};

fn main() -> Result<(), eframe::Error> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Region-Map-Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Region-Map-Editor"),
        multisampling: 4,
        ..Default::default()
    };

    eframe::run_native(
        "Region-Map-Editor",
        options,
        Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
    )
}

/// Haupt-Anwendungsstruktur.
struct EditorApp {
    state: AppState,
    controller: AppController,
    input: ui::InputState,
}

impl EditorApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = EditorOptions::config_path();
        let editor_options = EditorOptions::load_from_file(&config_path);

        let mut state = AppState::new();
        state.layers = region_map_editor::app::layers::default_layers(&editor_options);
        state.options = editor_options;

        Self {
            state,
            controller: AppController::new(),
            input: ui::InputState::new(),
        }
    }

    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();

        ui::render_status_bar(ctx, &self.state);
        events.extend(ui::render_menu(ctx, &self.state));
        events.extend(ui::render_layers_panel(ctx, &self.state));
        events.extend(ui::render_connection_panel(ctx, &self.state));
        events.extend(ui::show_options_dialog(ctx, &self.state));
        events.extend(ui::handle_file_dialogs(&mut self.state));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                events.push(AppIntent::ViewportResized {
                    size: [rect.width(), rect.height()],
                });

                events.extend(self.input.collect_viewport_events(
                    ui,
                    &response,
                    rect,
                    &self.state.camera,
                    &self.state.options,
                ));

                let painter = ui.painter_at(rect);
                if let Some(world) = &self.state.world {
                    let mut renderer =
                        PainterRenderer::new(&painter, &self.state.camera, rect);
                    draw_layers(
                        &self.state.layers,
                        world,
                        &self.state.options,
                        &mut renderer,
                        None,
                    );
                } else {
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Keine Welt geladen. Datei → Welt oeffnen...",
                        egui::FontId::proportional(20.0),
                        egui::Color32::WHITE,
                    );
                }
            });

        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event-Verarbeitung fehlgeschlagen: {:#}", e);
            }
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let events = self.collect_ui_events(ctx);

        let has_meaningful_events = events
            .iter()
            .any(|e| !matches!(e, AppIntent::ViewportResized { .. }));

        self.process_events(events);

        if has_meaningful_events || ctx.input(|i| i.pointer.is_moving()) {
            ctx.request_repaint();
        }
    }
}
