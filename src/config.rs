use std::time::Duration;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::document::MAX_CANVAS_SIDE;
use crate::stroke::clamp_width;
use crate::tools::Tool;
use crate::view::DEFAULT_ZOOM_STEP;

/// User preferences restored on startup and written back on shutdown.
///
/// The drawing itself is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    pub tool: Tool,
    pub color: Color32,
    pub width: f32,
    /// Fill color of the committed surface; the eraser paints with it
    pub background: Color32,
    /// Surface size before the first resize or load
    pub canvas_size: [u32; 2],
    pub zoom_step: f32,
    pub resize_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: Color32::BLACK,
            width: 2.0,
            background: Color32::WHITE,
            canvas_size: [1024, 768],
            zoom_step: DEFAULT_ZOOM_STEP,
            resize_debounce_ms: 150,
        }
    }
}

impl Settings {
    /// Clamp anything a hand-edited or stale storage file could get wrong
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.width = clamp_width(self.width);
        self.canvas_size = self.canvas_size.map(|side| side.clamp(1, MAX_CANVAS_SIDE));
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            self.zoom_step = defaults.zoom_step;
        }
        if self.background.a() != 255 {
            self.background = defaults.background;
        }
        self
    }

    pub fn resize_delay(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}
