use egui::Pos2;

use crate::stroke::StrokeStyle;
use crate::tools::ShapeKind;

/// Transient pointer-drag state, alive between pointer-down and pointer-up
#[derive(Debug, Default, Clone, PartialEq)]
pub enum DragSession {
    #[default]
    Idle,
    /// Pen or eraser stroke. `style` is the effective style for this drag,
    /// so the eraser's background color never leaks past pointer-up.
    Stroking { style: StrokeStyle },
    /// Rubber-band rectangle or oval
    Shaping { shape: ShapeKind, anchor: Pos2 },
}

impl DragSession {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
