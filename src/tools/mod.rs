use egui::CursorIcon;
use serde::{Deserialize, Serialize};

mod controller;
pub use controller::{ToolController, normalized_rect};

/// Drawing tools. Exactly one is selected at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Rectangle,
    Oval,
}

/// Shapes drawn by the rubber-band tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Oval,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Pen, Tool::Eraser, Tool::Rectangle, Tool::Oval];

    /// Return the name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pen => "Pen",
            Self::Eraser => "Eraser",
            Self::Rectangle => "Rectangle",
            Self::Oval => "Oval",
        }
    }

    /// The shape this tool previews and commits, if it is a shape tool
    pub fn shape(&self) -> Option<ShapeKind> {
        match self {
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Oval => Some(ShapeKind::Oval),
            Self::Pen | Self::Eraser => None,
        }
    }

    pub fn cursor(&self) -> CursorIcon {
        match self {
            Self::Pen => CursorIcon::Crosshair,
            Self::Eraser => CursorIcon::PointingHand,
            Self::Rectangle | Self::Oval => CursorIcon::Default,
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
