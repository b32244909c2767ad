use egui::Color32;
use image::RgbaImage;
use log::debug;

use crate::command::{DrawCommand, SurfaceKind};
use crate::error::{PaintError, PaintResult, pixel_size};
use crate::surface::Surface;

/// Largest surface side we ever allocate, in pixels
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// The two stacked drawing surfaces.
///
/// The committed surface holds the permanent drawing on top of an opaque
/// background. The preview surface sits above it, is transparent, and only
/// ever holds the live rubber-band shape.
#[derive(Debug)]
pub struct Document {
    committed: Surface,
    preview: Surface,
    background: Color32,
    /// Upper bound for either side; the GPU texture limit when known
    max_side: u32,
}

impl Document {
    pub fn new(width: u32, height: u32, background: Color32) -> PaintResult<Self> {
        let mut committed = Surface::new(width, height)?;
        committed.fill(background);
        let preview = Surface::new(width, height)?;
        Ok(Self {
            committed,
            preview,
            background,
            max_side: MAX_CANVAS_SIDE,
        })
    }

    pub fn committed(&self) -> &Surface {
        &self.committed
    }

    pub fn preview(&self) -> &Surface {
        &self.preview
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn size(&self) -> [u32; 2] {
        self.committed.size()
    }

    pub fn max_side(&self) -> u32 {
        self.max_side
    }

    /// Lower the side limit, e.g. to the renderer's texture limit.
    /// Surfaces already larger than the new limit are cropped to it.
    pub fn set_max_side(&mut self, side: u32) -> PaintResult<()> {
        self.max_side = side.clamp(1, MAX_CANVAS_SIDE);
        let [width, height] = self.size();
        if width > self.max_side || height > self.max_side {
            self.resize(width as f32, height as f32)?;
        }
        Ok(())
    }

    pub fn surface_mut(&mut self, kind: SurfaceKind) -> &mut Surface {
        match kind {
            SurfaceKind::Committed => &mut self.committed,
            SurfaceKind::Preview => &mut self.preview,
        }
    }

    /// Apply drawing commands in order
    pub fn apply<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = DrawCommand>,
    {
        for command in commands {
            self.apply_one(command);
        }
    }

    fn apply_one(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Clear(SurfaceKind::Committed) => self.committed.fill(self.background),
            DrawCommand::Clear(SurfaceKind::Preview) => self.preview.clear(),
            DrawCommand::BeginPath { at } => self.committed.begin_path(at),
            DrawCommand::LineTo { to, style } => self.committed.line_to(to, style),
            DrawCommand::EndPath => self.committed.end_path(),
            DrawCommand::StrokeShape {
                target,
                shape,
                rect,
                style,
            } => self.surface_mut(target).stroke_shape(shape, rect, style),
        }
    }

    /// Clear-and-redraw both surfaces at a new size.
    ///
    /// The committed surface is refilled with the background and its old
    /// pixels are drawn back at the origin; the preview starts empty. Both
    /// sides are capped at [`Self::max_side`]. An open pen path stays open.
    /// On error nothing is changed.
    pub fn resize(&mut self, width: f32, height: f32) -> PaintResult<()> {
        let (width, height) = pixel_size(width, height)?;
        let (width, height) = (width.min(self.max_side), height.min(self.max_side));
        if [width, height] == self.size() {
            return Ok(());
        }
        let mut committed = Surface::new(width, height)?;
        committed.fill(self.background);
        committed.draw_surface(&self.committed);
        if let Some(at) = self.committed.path_cursor() {
            committed.begin_path(at);
        }
        let preview = Surface::new(width, height)?;

        debug!("Surfaces resized to {}x{}", width, height);
        self.committed = committed;
        self.preview = preview;
        Ok(())
    }

    /// Replace the drawing with a decoded image.
    ///
    /// Both surfaces take the image's pixel size; the image is drawn at the
    /// origin over the background. Images with a side above
    /// [`Self::max_side`] are rejected. On error nothing is changed.
    pub fn load_image(&mut self, image: &RgbaImage) -> PaintResult<()> {
        let (width, height) = pixel_size(image.width() as f32, image.height() as f32)?;
        if width > self.max_side || height > self.max_side {
            return Err(PaintError::InvalidSurfaceSize {
                width: width as f32,
                height: height as f32,
            });
        }
        let decoded = Surface::from_rgba(image)?;
        let mut committed = Surface::new(width, height)?;
        committed.fill(self.background);
        committed.draw_surface(&decoded);
        let preview = Surface::new(width, height)?;

        self.committed = committed;
        self.preview = preview;
        Ok(())
    }

    /// Copy of the committed pixels, for saving
    pub fn snapshot(&self) -> RgbaImage {
        self.committed.to_rgba_image()
    }
}
