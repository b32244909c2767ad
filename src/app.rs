use std::path::PathBuf;
use std::time::Duration;

use egui::{Color32, Vec2};
use log::{debug, error, info};

use crate::command::DrawCommand;
use crate::config::Settings;
use crate::document::Document;
use crate::error::{PaintError, PaintResult};
use crate::file_handler::{self, FileHandler, FileOutcome};
use crate::input::{InputEvent, InputHandler};
use crate::panels::{central_panel, controls_panel, error_dialog};
use crate::renderer::Renderer;
use crate::tools::{Tool, ToolController};
use crate::util::Debouncer;

/// Message shown in the error dialog
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
}

/// The paint application. Owns every piece of state; panels get it
/// explicitly instead of holding references to each other.
pub struct PaintApp {
    settings: Settings,
    controller: ToolController,
    document: Document,
    renderer: Renderer,
    input: InputHandler,
    file_handler: FileHandler,
    resize: Debouncer<Vec2>,
    last_viewport: Option<Vec2>,
    error: Option<ErrorDialog>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> PaintResult<Self> {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<Settings>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> PaintResult<Self> {
        let settings = settings.sanitized();
        let [width, height] = settings.canvas_size;
        let mut document = Document::new(width, height, settings.background)?;

        let mut controller =
            ToolController::new(settings.background).with_zoom_step(settings.zoom_step);
        controller.set_color(settings.color);
        controller.set_width(settings.width);
        document.apply(controller.set_tool(settings.tool));

        Ok(Self {
            resize: Debouncer::new(settings.resize_delay()),
            settings,
            controller,
            document,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            file_handler: FileHandler::new(),
            last_viewport: None,
            error: None,
        })
    }

    pub fn controller(&self) -> &ToolController {
        &self.controller
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn error(&self) -> Option<&ErrorDialog> {
        self.error.as_ref()
    }

    pub fn is_file_busy(&self) -> bool {
        self.file_handler.is_busy()
    }

    pub fn is_drawing(&self) -> bool {
        self.controller.drag().is_active()
    }

    /// Settings reflecting the current controls, as they will be persisted
    pub fn current_settings(&self) -> Settings {
        Settings {
            tool: self.controller.tool(),
            color: self.controller.color(),
            width: self.controller.width(),
            ..self.settings.clone()
        }
    }

    fn apply(&mut self, commands: Vec<DrawCommand>) {
        self.document.apply(commands);
    }

    /// Route one canvas input event through the tool controller
    pub fn handle_event(&mut self, event: InputEvent) {
        let commands = match event {
            InputEvent::PointerDown { location } => self.controller.pointer_down(location.position),
            InputEvent::PointerMove { location } => self.controller.pointer_move(location.position),
            InputEvent::PointerUp { location } => self.controller.pointer_up(location.position),
            InputEvent::Zoom { zoom_in: true } => {
                self.controller.zoom_in();
                Vec::new()
            }
            InputEvent::Zoom { zoom_in: false } => {
                self.controller.zoom_out();
                Vec::new()
            }
        };
        self.apply(commands);
    }

    pub fn select_tool(&mut self, tool: Tool) {
        let commands = self.controller.set_tool(tool);
        self.apply(commands);
    }

    pub fn set_color(&mut self, color: Color32) {
        self.controller.set_color(color);
    }

    pub fn set_width(&mut self, width: f32) {
        self.controller.set_width(width);
    }

    pub fn clear_canvas(&mut self) {
        let commands = self.controller.clear();
        self.apply(commands);
    }

    pub fn reset_zoom(&mut self) {
        self.controller.reset_scale();
    }

    /// Start writing the committed surface to `path` in the background
    pub fn save_to(&mut self, path: PathBuf) {
        let snapshot = self.document.snapshot();
        if self.file_handler.start_save(snapshot, path.clone()) {
            info!("Saving drawing to {}", path.display());
        }
    }

    /// Start decoding `path` in the background
    pub fn load_from(&mut self, path: PathBuf) {
        if self.file_handler.start_load(path.clone()) {
            info!("Loading drawing from {}", path.display());
        }
    }

    pub fn save_with_dialog(&mut self) {
        match file_handler::pick_save_path() {
            Some(path) => self.save_to(path),
            None => info!("Save cancelled"),
        }
    }

    pub fn load_with_dialog(&mut self) {
        match file_handler::pick_open_path() {
            Some(path) => self.load_from(path),
            None => info!("Load cancelled"),
        }
    }

    /// Apply the result of a finished file task, if there is one
    pub fn poll_file_tasks(&mut self) {
        if let Some(result) = self.file_handler.poll() {
            self.finish_file_task(result);
        }
    }

    /// Block until the running file task is done and apply its result
    pub fn wait_for_file_task(&mut self) {
        if let Some(result) = self.file_handler.wait() {
            self.finish_file_task(result);
        }
    }

    fn finish_file_task(&mut self, result: PaintResult<FileOutcome>) {
        let outcome = result.and_then(|outcome| match outcome {
            FileOutcome::Saved(path) => {
                info!("Saved {}", path.display());
                Ok(())
            }
            FileOutcome::Loaded { path, image } => {
                self.document.load_image(&image)?;
                let commands = self.controller.set_tool(self.controller.tool());
                self.apply(commands);
                self.controller.reset_scale();
                info!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
                Ok(())
            }
        });
        if let Err(err) = outcome {
            self.report_error(err);
        }
    }

    pub fn report_error(&mut self, err: PaintError) {
        error!("{}: {}", err.title(), err);
        self.error = Some(ErrorDialog {
            title: err.title().to_owned(),
            message: err.to_string(),
        });
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Note the size of the visible canvas area. Changes restart the
    /// resize timer instead of resizing right away.
    pub fn viewport_changed(&mut self, size: Vec2, now: f64) {
        if size.x < 0.0 || size.y < 0.0 || self.last_viewport == Some(size) {
            return;
        }
        self.last_viewport = Some(size);
        self.resize.notify(size, now);
    }

    /// Resize the surfaces once the viewport has been stable for the
    /// debounce delay. Surfaces grow to cover the viewport in surface
    /// pixels, independent of zoom, and never shrink below their current
    /// size. The document caps both sides at its maximum.
    pub fn poll_resize(&mut self, now: f64) {
        let Some(viewport) = self.resize.poll(now) else {
            return;
        };
        let [width, height] = self.document.size();
        let target_w = viewport.x.max(width as f32);
        let target_h = viewport.y.max(height as f32);
        debug!("Viewport settled at {:?}", viewport);
        if let Err(err) = self.document.resize(target_w, target_h) {
            self.report_error(err);
        }
    }

    /// Keep surfaces within the largest texture the renderer can upload
    pub fn set_max_canvas_side(&mut self, side: usize) {
        let side = u32::try_from(side).unwrap_or(u32::MAX);
        if let Err(err) = self.document.set_max_side(side) {
            self.report_error(err);
        }
    }

    /// Time until the pending resize fires
    pub fn resize_remaining(&self, now: f64) -> Option<Duration> {
        self.resize.remaining(now)
    }

    pub fn sync_renderer(&mut self, ctx: &egui::Context) {
        self.renderer.sync(ctx, &mut self.document);
    }

    pub fn canvas_screen_size(&self) -> Vec2 {
        Renderer::canvas_size(&self.document, self.controller.view())
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.current_settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.set_max_canvas_side(ctx.input(|i| i.max_texture_side));
        self.poll_file_tasks();
        if let Some(path) = self.file_handler.check_for_dropped_files(ctx) {
            self.load_from(path);
        }

        controls_panel(self, ctx);
        central_panel(self, ctx);
        error_dialog(self, ctx);
        self.file_handler.preview_files_being_dropped(ctx);

        let now = ctx.input(|i| i.time);
        if let Some(left) = self.resize_remaining(now) {
            ctx.request_repaint_after(left);
        }
        if self.file_handler.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputLocation;
    use egui::pos2;

    fn at(x: f32, y: f32) -> InputLocation {
        InputLocation {
            position: pos2(x, y),
        }
    }

    #[test]
    fn test_settings_are_applied_on_startup() {
        let app = PaintApp::with_settings(Settings {
            tool: Tool::Oval,
            color: Color32::RED,
            width: 6.0,
            canvas_size: [300, 200],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(app.controller().tool(), Tool::Oval);
        assert_eq!(app.controller().color(), Color32::RED);
        assert_eq!(app.document().size(), [300, 200]);
        assert_eq!(app.current_settings().width, 6.0);
    }

    #[test]
    fn test_zoom_events_change_scale() {
        let mut app = PaintApp::with_settings(Settings::default()).unwrap();
        app.handle_event(InputEvent::Zoom { zoom_in: true });
        assert!(app.controller().scale() > 1.0);
        app.reset_zoom();
        app.handle_event(InputEvent::Zoom { zoom_in: false });
        assert!(app.controller().scale() < 1.0);
    }

    #[test]
    fn test_resize_waits_for_the_viewport_to_settle() {
        let mut app = PaintApp::with_settings(Settings {
            canvas_size: [100, 100],
            ..Default::default()
        })
        .unwrap();
        app.viewport_changed(egui::vec2(150.0, 120.0), 0.0);
        app.poll_resize(0.05);
        app.viewport_changed(egui::vec2(300.0, 250.0), 0.1);
        app.poll_resize(0.2);
        assert_eq!(app.document().size(), [100, 100]);
        app.poll_resize(0.3);
        assert_eq!(app.document().size(), [300, 250]);
    }

    #[test]
    fn test_resize_never_crops_the_drawing() {
        let mut app = PaintApp::with_settings(Settings {
            canvas_size: [400, 300],
            ..Default::default()
        })
        .unwrap();
        app.viewport_changed(egui::vec2(200.0, 500.0), 0.0);
        app.poll_resize(1.0);
        assert_eq!(app.document().size(), [400, 500]);
    }

    #[test]
    fn test_resize_ignores_zoom() {
        let mut app = PaintApp::with_settings(Settings::default()).unwrap();
        for _ in 0..40 {
            app.handle_event(InputEvent::Zoom { zoom_in: false });
        }
        assert_eq!(app.controller().scale(), 0.1);
        app.viewport_changed(egui::vec2(1900.0, 1000.0), 0.0);
        app.poll_resize(1.0);
        assert_eq!(app.document().size(), [1900, 1000]);

        for _ in 0..40 {
            app.handle_event(InputEvent::Zoom { zoom_in: true });
        }
        app.viewport_changed(egui::vec2(1200.0, 900.0), 2.0);
        app.poll_resize(3.0);
        assert_eq!(app.document().size(), [1900, 1000]);
    }

    #[test]
    fn test_resize_respects_texture_limit() {
        let mut app = PaintApp::with_settings(Settings::default()).unwrap();
        app.set_max_canvas_side(800);
        assert_eq!(app.document().size(), [800, 768]);
        app.viewport_changed(egui::vec2(3000.0, 2000.0), 0.0);
        app.poll_resize(1.0);
        assert_eq!(app.document().size(), [800, 800]);
        assert!(app.error().is_none());
    }

    #[test]
    fn test_resize_mid_stroke_keeps_line_connected() {
        let mut app = PaintApp::with_settings(Settings {
            canvas_size: [100, 100],
            ..Default::default()
        })
        .unwrap();
        app.set_width(4.0);
        app.handle_event(InputEvent::PointerDown { location: at(10.0, 50.0) });
        app.handle_event(InputEvent::PointerMove { location: at(30.0, 50.0) });
        app.viewport_changed(egui::vec2(200.0, 200.0), 0.0);
        app.poll_resize(1.0);
        assert_eq!(app.document().size(), [200, 200]);
        app.handle_event(InputEvent::PointerMove { location: at(60.0, 50.0) });
        app.handle_event(InputEvent::PointerUp { location: at(60.0, 50.0) });
        assert_eq!(app.document().committed().pixel(45, 50), Some(Color32::BLACK));
    }

    #[test]
    fn test_shape_drag_commits_on_release() {
        let mut app = PaintApp::with_settings(Settings {
            canvas_size: [200, 100],
            ..Default::default()
        })
        .unwrap();
        app.select_tool(Tool::Rectangle);
        app.set_color(Color32::RED);
        app.set_width(4.0);
        app.handle_event(InputEvent::PointerDown { location: at(10.0, 10.0) });
        app.handle_event(InputEvent::PointerMove { location: at(110.0, 60.0) });
        assert_eq!(app.document().preview().pixel(60, 10), Some(Color32::RED));
        app.handle_event(InputEvent::PointerUp { location: at(110.0, 60.0) });
        assert_eq!(app.document().preview().pixel(60, 10), Some(Color32::TRANSPARENT));
        assert_eq!(app.document().committed().pixel(60, 10), Some(Color32::RED));
    }

    #[test]
    fn test_errors_are_reported_and_dismissed() {
        let mut app = PaintApp::with_settings(Settings::default()).unwrap();
        app.report_error(PaintError::Conversion("bad pixels".into()));
        let dialog = app.error().unwrap();
        assert_eq!(dialog.title, "Conversion error");
        assert!(dialog.message.contains("bad pixels"));
        app.dismiss_error();
        assert!(app.error().is_none());
    }
}
