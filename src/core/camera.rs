//! 2D-Kamera fuer Pan und Zoom.

use glam::Vec2;

/// 2D-Kamera mit Pan und Zoom. Bei Zoom 1.0 entspricht eine Welteinheit
/// einem Bildschirmpixel.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Welt-Position im Bildschirmzentrum
    pub position: Vec2,
    /// Zoom-Faktor (Pixel pro Welteinheit)
    pub zoom: f32,
}

impl Camera2D {
    /// Minimaler Zoom-Faktor.
    pub const ZOOM_MIN: f32 = 0.1;
    /// Maximaler Zoom-Faktor.
    pub const ZOOM_MAX: f32 = 100.0;

    /// Erstellt eine Kamera im Ursprung.
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Zentriert die Kamera auf einen Weltpunkt.
    pub fn look_at(&mut self, target: Vec2) {
        self.position = target;
    }

    /// Verschiebt die Kamera (Pan, Welteinheiten).
    pub fn pan(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Multipliziert den Zoom-Faktor (geklemmt).
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    /// Zoomt auf einen Welt-Fokuspunkt zu: der Punkt bleibt unter dem Cursor.
    pub fn zoom_towards(&mut self, factor: f32, focus_world: Vec2) {
        let before = self.zoom;
        self.zoom_by(factor);
        let applied = self.zoom / before;
        self.position = focus_world + (self.position - focus_world) / applied;
    }

    /// Welt → Bildschirm.
    pub fn world_to_screen(&self, world: Vec2, viewport: Vec2) -> Vec2 {
        (world - self.position) * self.zoom + viewport / 2.0
    }

    /// Bildschirm → Welt.
    pub fn screen_to_world(&self, screen: Vec2, viewport: Vec2) -> Vec2 {
        (screen - viewport / 2.0) / self.zoom + self.position
    }

    /// Welteinheiten pro Bildschirmpixel.
    pub fn world_per_pixel(&self) -> f32 {
        1.0 / self.zoom
    }

    /// Pick-Radius in Welteinheiten fuer einen Pixel-Radius.
    pub fn pick_radius_world(&self, pick_radius_px: f32) -> f32 {
        pick_radius_px * self.world_per_pixel()
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}
