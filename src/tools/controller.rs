use egui::{Color32, Pos2, Rect};
use log::{debug, info};

use crate::command::{DrawCommand, SurfaceKind};
use crate::state::DragSession;
use crate::stroke::{StrokeStyle, clamp_width};
use crate::tools::{ShapeKind, Tool};
use crate::view::ViewScale;

/// Rectangle spanned by two corners: top-left is the component-wise
/// minimum, size is the absolute difference.
pub fn normalized_rect(a: Pos2, b: Pos2) -> Rect {
    Rect::from_min_max(
        Pos2::new(a.x.min(b.x), a.y.min(b.y)),
        Pos2::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Interprets pointer events against the selected tool.
///
/// Every handler mutates only the controller's own state and returns the
/// surface operations to perform, in order. Pointer positions are given
/// relative to the scaled canvas container and divided by the current
/// scale before use.
#[derive(Debug, Clone)]
pub struct ToolController {
    tool: Tool,
    color: Color32,
    width: f32,
    background: Color32,
    drag: DragSession,
    view: ViewScale,
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new(Color32::WHITE)
    }
}

impl ToolController {
    pub fn new(background: Color32) -> Self {
        let style = StrokeStyle::default();
        Self {
            tool: Tool::default(),
            color: style.color(),
            width: style.width(),
            background,
            drag: DragSession::Idle,
            view: ViewScale::default(),
        }
    }

    pub fn with_zoom_step(mut self, step: f32) -> Self {
        self.view = ViewScale::new(step);
        self
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn scale(&self) -> f32 {
        self.view.get()
    }

    pub fn view(&self) -> &ViewScale {
        &self.view
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Style used for new strokes and shapes
    pub fn style(&self) -> StrokeStyle {
        StrokeStyle::new(self.color, self.width)
    }

    /// Switch tools. The preview is always cleared and any drag in
    /// progress is abandoned; committed pixels are left alone.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        if matches!(self.drag, DragSession::Stroking { .. }) {
            commands.push(DrawCommand::EndPath);
        }
        commands.push(DrawCommand::Clear(SurfaceKind::Preview));
        self.drag = DragSession::Idle;
        if tool != self.tool {
            info!("Tool selected: {}", tool);
        }
        self.tool = tool;
        commands
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = clamp_width(width);
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
        debug!("Scale set to {:.3}", self.view.get());
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
        debug!("Scale set to {:.3}", self.view.get());
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.view.set(scale);
    }

    pub fn reset_scale(&mut self) {
        self.view.reset();
    }

    /// Clear both surfaces
    pub fn clear(&self) -> Vec<DrawCommand> {
        vec![
            DrawCommand::Clear(SurfaceKind::Committed),
            DrawCommand::Clear(SurfaceKind::Preview),
        ]
    }

    pub fn pointer_down(&mut self, screen: Pos2) -> Vec<DrawCommand> {
        let anchor = self.view.to_surface(screen);
        match self.tool.shape() {
            None => {
                let style = match self.tool {
                    Tool::Eraser => self.style().with_color(self.background),
                    _ => self.style(),
                };
                self.drag = DragSession::Stroking { style };
                vec![DrawCommand::BeginPath { at: anchor }]
            }
            Some(shape) => {
                self.drag = DragSession::Shaping { shape, anchor };
                vec![DrawCommand::Clear(SurfaceKind::Preview)]
            }
        }
    }

    pub fn pointer_move(&mut self, screen: Pos2) -> Vec<DrawCommand> {
        let cur = self.view.to_surface(screen);
        match self.drag {
            DragSession::Idle => Vec::new(),
            DragSession::Stroking { style } => vec![DrawCommand::LineTo { to: cur, style }],
            DragSession::Shaping { shape, anchor } => {
                let mut commands = vec![DrawCommand::Clear(SurfaceKind::Preview)];
                commands.extend(shape_command(
                    SurfaceKind::Preview,
                    shape,
                    anchor,
                    cur,
                    self.style(),
                ));
                commands
            }
        }
    }

    pub fn pointer_up(&mut self, screen: Pos2) -> Vec<DrawCommand> {
        let end = self.view.to_surface(screen);
        match std::mem::take(&mut self.drag) {
            DragSession::Idle => Vec::new(),
            DragSession::Stroking { .. } => vec![DrawCommand::EndPath],
            DragSession::Shaping { shape, anchor } => {
                let mut commands = vec![DrawCommand::Clear(SurfaceKind::Preview)];
                let style = self.style();
                if !style.is_invisible_on(self.background) {
                    commands.extend(shape_command(SurfaceKind::Committed, shape, anchor, end, style));
                }
                commands
            }
        }
    }
}

fn shape_command(
    target: SurfaceKind,
    shape: ShapeKind,
    a: Pos2,
    b: Pos2,
    style: StrokeStyle,
) -> Option<DrawCommand> {
    let rect = normalized_rect(a, b);
    if rect.width() > 0.0 && rect.height() > 0.0 {
        Some(DrawCommand::StrokeShape {
            target,
            shape,
            rect,
            style,
        })
    } else {
        None
    }
}
