use egui::{Pos2, Rect};

use crate::stroke::StrokeStyle;
use crate::tools::ShapeKind;

/// Which of the two stacked surfaces a command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Permanent pixels, saved to disk
    Committed,
    /// Transparent overlay for the live shape
    Preview,
}

/// Drawing operations produced by the tool controller and applied to a
/// [`Document`](crate::Document).
///
/// Coordinates are always in unscaled surface space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe a surface. The committed surface is filled with the background
    /// color, the preview surface becomes fully transparent.
    Clear(SurfaceKind),
    /// Start a new path on the committed surface
    BeginPath { at: Pos2 },
    /// Stroke the segment from the path cursor to `to` and advance the cursor
    LineTo { to: Pos2, style: StrokeStyle },
    /// Finish the current path
    EndPath,
    /// Stroke an unfilled rectangle or oval inscribed in `rect`
    StrokeShape {
        target: SurfaceKind,
        shape: ShapeKind,
        rect: Rect,
        style: StrokeStyle,
    },
}
