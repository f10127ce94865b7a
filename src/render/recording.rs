//! Protokollierender Renderer: zeichnet nichts, zeichnet alles auf.
//!
//! Fuer Tests der Zeichenpassen und zum Debuggen der Layer-Komposition.

use glam::Vec2;

use super::{Renderer, Rgba};

/// Ein aufgezeichneter Draw-Aufruf.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// Linie (Bildschirmkoordinaten)
    Line {
        /// Startpunkt
        from: Vec2,
        /// Endpunkt
        to: Vec2,
        /// Farbe
        color: Rgba,
        /// Linienstaerke
        thickness: f32,
    },
    /// Gefuelltes Rechteck (Bildschirmkoordinaten)
    Rect {
        /// Linke obere Ecke
        min: Vec2,
        /// Rechte untere Ecke
        max: Vec2,
        /// Farbe
        color: Rgba,
    },
}

/// Renderer mit Identitaets-Transformation, der alle Aufrufe sammelt.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    /// Gemeldete Bildschirmgroesse
    pub screen_size: Vec2,
    /// Alle Aufrufe in Reihenfolge
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    /// Erstellt einen Recorder mit der angegebenen Bildschirmgroesse.
    pub fn new(screen_size: Vec2) -> Self {
        Self {
            screen_size,
            calls: Vec::new(),
        }
    }

    /// Anzahl aufgezeichneter Linien.
    pub fn line_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .count()
    }

    /// Anzahl aufgezeichneter Rechtecke.
    pub fn rect_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Rect { .. }))
            .count()
    }

    /// Verwirft alle aufgezeichneten Aufrufe.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn size(&self) -> Vec2 {
        self.screen_size
    }

    fn transform(&self, world: Vec2) -> Vec2 {
        world
    }

    fn inverse_transform(&self, screen: Vec2) -> Vec2 {
        screen
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba, thickness: f32) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    fn draw_rect(&mut self, min: Vec2, max: Vec2, color: Rgba) {
        self.calls.push(DrawCall::Rect { min, max, color });
    }
}
