use egui::Color32;
use serde::{Deserialize, Serialize};

pub const MIN_WIDTH: f32 = 1.0;
pub const MAX_WIDTH: f32 = 30.0;

/// Color and width shared by the committed and preview surfaces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    color: Color32,
    width: f32,
}

impl StrokeStyle {
    // Create a new style, clamping the width into the supported range
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            width: clamp_width(width),
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Same width, different color (used by the eraser)
    pub fn with_color(self, color: Color32) -> Self {
        Self { color, ..self }
    }

    /// True when drawing with this style would leave no visible mark
    /// on a surface filled with `background`
    pub fn is_invisible_on(&self, background: Color32) -> bool {
        self.color == background || self.color.a() == 0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color32::BLACK, 2.0)
    }
}

/// Clamp a width into [MIN_WIDTH, MAX_WIDTH]; NaN falls back to the minimum
pub fn clamp_width(width: f32) -> f32 {
    if width.is_nan() {
        MIN_WIDTH
    } else {
        width.clamp(MIN_WIDTH, MAX_WIDTH)
    }
}
