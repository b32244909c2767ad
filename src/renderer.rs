// src/renderer.rs
use eframe::egui::{self, Color32, ColorImage, Rect, TextureHandle, TextureOptions};

use crate::command::SurfaceKind;
use crate::document::Document;
use crate::surface::Surface;
use crate::view::ViewScale;

/// Mirrors the two surfaces into GPU textures and paints them stacked.
#[derive(Default)]
pub struct Renderer {
    committed: Option<TextureHandle>,
    preview: Option<TextureHandle>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("committed", &self.committed.as_ref().map(|t| t.size()))
            .field("preview", &self.preview.as_ref().map(|t| t.size()))
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload surfaces whose pixels changed since the last frame
    pub fn sync(&mut self, ctx: &egui::Context, document: &mut Document) {
        upload(
            ctx,
            &mut self.committed,
            "committed_surface",
            document.surface_mut(SurfaceKind::Committed),
        );
        upload(
            ctx,
            &mut self.preview,
            "preview_surface",
            document.surface_mut(SurfaceKind::Preview),
        );
    }

    /// On-screen size of the canvas at the current scale
    pub fn canvas_size(document: &Document, view: &ViewScale) -> egui::Vec2 {
        let [w, h] = document.size();
        egui::vec2(view.to_screen_len(w as f32), view.to_screen_len(h as f32))
    }

    /// Paint the committed layer, then the preview layer, into `rect`
    pub fn render(&self, painter: &egui::Painter, rect: Rect) {
        let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        for texture in [&self.committed, &self.preview].into_iter().flatten() {
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }

    pub fn has_textures(&self) -> bool {
        self.committed.is_some() && self.preview.is_some()
    }
}

fn upload(
    ctx: &egui::Context,
    slot: &mut Option<TextureHandle>,
    name: &str,
    surface: &mut Surface,
) {
    if !surface.take_dirty() && slot.is_some() {
        return;
    }
    let [w, h] = surface.size();
    let image = ColorImage::from_rgba_premultiplied([w as usize, h as usize], surface.data());
    match slot {
        Some(texture) => texture.set(image, TextureOptions::NEAREST),
        None => *slot = Some(ctx.load_texture(name, image, TextureOptions::NEAREST)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_creates_textures() {
        let ctx = egui::Context::default();
        let mut document = Document::new(16, 8, Color32::WHITE).unwrap();
        let mut renderer = Renderer::new();
        assert!(!renderer.has_textures());

        renderer.sync(&ctx, &mut document);
        assert!(renderer.has_textures());
        assert_eq!(renderer.committed.as_ref().unwrap().size(), [16, 8]);

        // nothing dirty: sync is a no-op
        assert!(!document.surface_mut(SurfaceKind::Committed).take_dirty());
    }

    #[test]
    fn test_canvas_size_follows_scale() {
        let document = Document::new(100, 50, Color32::WHITE).unwrap();
        let mut view = ViewScale::default();
        view.set(2.0);
        assert_eq!(Renderer::canvas_size(&document, &view), egui::vec2(200.0, 100.0));
    }

    #[test]
    fn test_render_basics() {
        let ctx = egui::Context::default();
        let mut document = Document::new(10, 10, Color32::WHITE).unwrap();
        let mut renderer = Renderer::new();
        renderer.sync(&ctx, &mut document);

        let layer_id = egui::LayerId::background();
        let rect = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(10.0, 10.0));
        let painter = egui::Painter::new(ctx.clone(), layer_id, rect);
        renderer.render(&painter, rect);
    }
}
