//! Render-Abstraktion: Linien- und Rechteck-Primitive plus Transformationen.
//!
//! Die Kern-Zeichenpassen kennen nur den `Renderer`-Trait; das egui-Painter-
//! Backend und der protokollierende Test-Renderer implementieren ihn.

mod painter;
mod recording;

pub use painter::PainterRenderer;
pub use recording::{DrawCall, RecordingRenderer};

use glam::Vec2;

/// RGBA-Farbe mit Komponenten in [0, 1].
pub type Rgba = [f32; 4];

/// Lineare Interpolation zweier Farben.
pub fn lerp_rgba(from: Rgba, to: Rgba, t: f32) -> Rgba {
    [
        from[0] + (to[0] - from[0]) * t,
        from[1] + (to[1] - from[1]) * t,
        from[2] + (to[2] - from[2]) * t,
        from[3] + (to[3] - from[3]) * t,
    ]
}

/// Zeichen-Backend fuer die Layer-Passen.
///
/// `transform` bildet Welt- auf Bildschirmkoordinaten ab; alle Draw-Aufrufe
/// erwarten bereits transformierte Bildschirmkoordinaten.
pub trait Renderer {
    /// Groesse des Zeichenbereichs in Pixeln.
    fn size(&self) -> Vec2;

    /// Welt → Bildschirm.
    fn transform(&self, world: Vec2) -> Vec2;

    /// Bildschirm → Welt.
    fn inverse_transform(&self, screen: Vec2) -> Vec2;

    /// Zeichnet eine Linie (Bildschirmkoordinaten).
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba, thickness: f32);

    /// Zeichnet ein gefuelltes Rechteck (Bildschirmkoordinaten).
    fn draw_rect(&mut self, min: Vec2, max: Vec2, color: Rgba);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_rgba_interpoliert_komponentenweise() {
        let white = [1.0, 1.0, 1.0, 1.0];
        let blue = [0.0, 0.0, 1.0, 1.0];

        let mixed = lerp_rgba(white, blue, 0.3);
        assert_relative_eq!(mixed[0], 0.7);
        assert_relative_eq!(mixed[1], 0.7);
        assert_relative_eq!(mixed[2], 1.0);
        assert_relative_eq!(mixed[3], 1.0);
    }
}
