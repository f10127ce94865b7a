//! egui-Painter-Backend des `Renderer`-Traits.

use glam::Vec2;

use super::{Renderer, Rgba};
use crate::core::Camera2D;

/// Renderer ueber einem `egui::Painter` mit Kamera-Transformation.
pub struct PainterRenderer<'a> {
    painter: &'a egui::Painter,
    camera: &'a Camera2D,
    viewport: egui::Rect,
}

impl<'a> PainterRenderer<'a> {
    /// Erstellt einen Renderer fuer den gegebenen Viewport-Ausschnitt.
    pub fn new(painter: &'a egui::Painter, camera: &'a Camera2D, viewport: egui::Rect) -> Self {
        Self {
            painter,
            camera,
            viewport,
        }
    }

    fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport.width(), self.viewport.height())
    }

    fn to_pos2(&self, screen: Vec2) -> egui::Pos2 {
        egui::pos2(
            self.viewport.min.x + screen.x,
            self.viewport.min.y + screen.y,
        )
    }
}

/// Konvertiert eine Rgba-Farbe in egui-Farbdarstellung.
fn to_color32(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (color[0].clamp(0.0, 1.0) * 255.0) as u8,
        (color[1].clamp(0.0, 1.0) * 255.0) as u8,
        (color[2].clamp(0.0, 1.0) * 255.0) as u8,
        (color[3].clamp(0.0, 1.0) * 255.0) as u8,
    )
}

impl Renderer for PainterRenderer<'_> {
    fn size(&self) -> Vec2 {
        self.viewport_size()
    }

    fn transform(&self, world: Vec2) -> Vec2 {
        self.camera.world_to_screen(world, self.viewport_size())
    }

    fn inverse_transform(&self, screen: Vec2) -> Vec2 {
        self.camera.screen_to_world(screen, self.viewport_size())
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba, thickness: f32) {
        self.painter.line_segment(
            [self.to_pos2(from), self.to_pos2(to)],
            egui::Stroke::new(thickness, to_color32(color)),
        );
    }

    fn draw_rect(&mut self, min: Vec2, max: Vec2, color: Rgba) {
        let rect = egui::Rect::from_two_pos(self.to_pos2(min), self.to_pos2(max));
        self.painter.rect_filled(rect, 0.0, to_color32(color));
    }
}
