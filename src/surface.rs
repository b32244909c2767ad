//! Raster surfaces backed by tiny-skia pixmaps.
//!
//! A [`Surface`] is an immediate-mode drawing target: strokes are rasterized
//! as soon as they are issued and only pixels are kept.

use egui::{Color32, Pos2, Rect};
use image::{Rgba, RgbaImage};
use tiny_skia::{
    Color, ColorU8, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::error::{PaintError, PaintResult};
use crate::stroke::StrokeStyle;
use crate::tools::ShapeKind;

pub struct Surface {
    pixmap: Pixmap,
    /// Current point of the open path, if any
    cursor: Option<Pos2>,
    /// Set whenever pixels change, cleared by the renderer after upload
    dirty: bool,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl Surface {
    /// Creates a fully transparent surface
    pub fn new(width: u32, height: u32) -> PaintResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(PaintError::InvalidSurfaceSize {
            width: width as f32,
            height: height as f32,
        })?;
        Ok(Self {
            pixmap,
            cursor: None,
            dirty: true,
        })
    }

    /// Creates a surface holding a copy of an RGBA image (straight alpha)
    pub fn from_rgba(image: &RgbaImage) -> PaintResult<Self> {
        let size = IntSize::from_wh(image.width(), image.height()).ok_or(
            PaintError::InvalidSurfaceSize {
                width: image.width() as f32,
                height: image.height() as f32,
            },
        )?;
        let data: Vec<u8> = image
            .pixels()
            .flat_map(|p| {
                let c = ColorU8::from_rgba(p[0], p[1], p[2], p[3]).premultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        let pixmap = Pixmap::from_vec(data, size).ok_or_else(|| {
            PaintError::Conversion(format!(
                "cannot build a {}x{} pixmap from image data",
                image.width(),
                image.height()
            ))
        })?;
        Ok(Self {
            pixmap,
            cursor: None,
            dirty: true,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    /// Premultiplied RGBA bytes, row-major
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Returns whether the pixels changed since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Fill every pixel with `color`
    pub fn fill(&mut self, color: Color32) {
        self.pixmap.fill(skia_color(color));
        self.dirty = true;
    }

    /// Make every pixel fully transparent
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
        self.dirty = true;
    }

    pub fn begin_path(&mut self, at: Pos2) {
        self.cursor = Some(at);
    }

    /// End point of the open path, if a stroke is in progress
    pub fn path_cursor(&self) -> Option<Pos2> {
        self.cursor
    }

    /// Strokes only the new segment; earlier segments are never redrawn.
    /// Without an open path this just starts one at `to`.
    pub fn line_to(&mut self, to: Pos2, style: StrokeStyle) {
        let Some(from) = self.cursor.replace(to) else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &paint_for(style.color()),
                &stroke_for(style.width()),
                Transform::identity(),
                None,
            );
            self.dirty = true;
        }
    }

    pub fn end_path(&mut self) {
        self.cursor = None;
    }

    /// Strokes an unfilled rectangle or the oval inscribed in `rect`
    pub fn stroke_shape(&mut self, shape: ShapeKind, rect: Rect, style: StrokeStyle) {
        let Some(bounds) =
            tiny_skia::Rect::from_xywh(rect.min.x, rect.min.y, rect.width(), rect.height())
        else {
            return;
        };
        let path = match shape {
            ShapeKind::Rectangle => Some(PathBuilder::from_rect(bounds)),
            ShapeKind::Oval => PathBuilder::from_oval(bounds),
        };
        if let Some(path) = path {
            self.pixmap.stroke_path(
                &path,
                &paint_for(style.color()),
                &stroke_for(style.width()),
                Transform::identity(),
                None,
            );
            self.dirty = true;
        }
    }

    /// Draws `other` over this surface with its top-left corner at the origin
    pub fn draw_surface(&mut self, other: &Surface) {
        self.pixmap.draw_pixmap(
            0,
            0,
            other.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        self.dirty = true;
    }

    /// Color at (x, y) with straight alpha
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color32::from_rgba_unmultiplied(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// Copy the pixels out as a straight-alpha RGBA image
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width(), self.height());
        for (dst, src) in image.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image
    }
}

fn skia_color(color: Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

fn paint_for(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn stroke_for(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}
