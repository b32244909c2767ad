use std::path::{Path, PathBuf};

use eframe::egui;
use futures::channel::oneshot;
use image::{ImageFormat, Rgb, RgbImage, RgbaImage};

use crate::error::{PaintError, PaintResult, pixel_size};

pub const DEFAULT_FILE_NAME: &str = "drawing.png";
const PNG_FILTER_NAME: &str = "PNG images";
const PNG_EXTENSIONS: &[&str] = &["png"];

/// Result of a finished background file task
#[derive(Debug)]
pub enum FileOutcome {
    Saved(PathBuf),
    Loaded { path: PathBuf, image: RgbaImage },
}

/// Runs PNG encode/decode off the UI thread.
///
/// At most one task is in flight. The UI thread polls for the result every
/// frame and is the only place the outcome touches the document.
pub struct FileHandler {
    pending: Option<oneshot::Receiver<PaintResult<FileOutcome>>>,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Encode `snapshot` as PNG at `path` in the background.
    /// Returns false if another task is still running.
    pub fn start_save(&mut self, snapshot: RgbaImage, path: PathBuf) -> bool {
        self.start(move || {
            save_png(&snapshot, &path)?;
            Ok(FileOutcome::Saved(path))
        })
    }

    /// Decode the image at `path` in the background.
    /// Returns false if another task is still running.
    pub fn start_load(&mut self, path: PathBuf) -> bool {
        self.start(move || {
            let image = load_image(&path)?;
            Ok(FileOutcome::Loaded { path, image })
        })
    }

    fn start<F>(&mut self, job: F) -> bool
    where
        F: FnOnce() -> PaintResult<FileOutcome> + Send + 'static,
    {
        if self.is_busy() {
            log::warn!("A file operation is already running");
            return false;
        }
        let (tx, rx) = oneshot::channel();
        std::thread::spawn(move || {
            // the receiver may be gone if the app is shutting down
            let _ = tx.send(job());
        });
        self.pending = Some(rx);
        true
    }

    /// Non-blocking check for a finished task
    pub fn poll(&mut self) -> Option<PaintResult<FileOutcome>> {
        let rx = self.pending.as_mut()?;
        match rx.try_recv() {
            Ok(Some(result)) => {
                self.pending = None;
                Some(result)
            }
            Ok(None) => None,
            Err(oneshot::Canceled) => {
                self.pending = None;
                Some(Err(PaintError::TaskAborted))
            }
        }
    }

    /// Block until the running task finishes
    pub fn wait(&mut self) -> Option<PaintResult<FileOutcome>> {
        let rx = self.pending.take()?;
        Some(futures::executor::block_on(rx).unwrap_or(Err(PaintError::TaskAborted)))
    }

    /// First PNG among files dropped onto the window this frame, if any
    pub fn check_for_dropped_files(&self, ctx: &egui::Context) -> Option<PathBuf> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut found = None;
        for file in dropped {
            match file.path {
                Some(path) if is_png(&path) && found.is_none() => found = Some(path),
                Some(path) => log::warn!("Ignoring dropped file: {}", path.display()),
                None => log::warn!("Dropped file has no path: {}", file.name),
            }
        }
        found
    }

    /// Darken the window while files are dragged over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let text = ctx.input(|i| {
            let mut text = "Drop a PNG to open it:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

/// Ask the user where to save. `None` means cancelled.
pub fn pick_save_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save drawing")
        .set_file_name(DEFAULT_FILE_NAME)
        .add_filter(PNG_FILTER_NAME, PNG_EXTENSIONS)
        .save_file()
        .map(with_png_extension)
}

/// Ask the user which image to open. `None` means cancelled.
pub fn pick_open_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open drawing")
        .add_filter(PNG_FILTER_NAME, PNG_EXTENSIONS)
        .pick_file()
}

/// Append `.png` when the chosen name has no extension
pub fn with_png_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("png")
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// Composite straight-alpha pixels over opaque white
pub fn flatten_onto_white(image: &RgbaImage) -> PaintResult<RgbImage> {
    pixel_size(image.width() as f32, image.height() as f32)?;
    let mut out = RgbImage::new(image.width(), image.height());
    for (dst, src) in out.pixels_mut().zip(image.pixels()) {
        let a = src[3] as u32;
        let blend = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        *dst = Rgb([blend(src[0]), blend(src[1]), blend(src[2])]);
    }
    Ok(out)
}

/// Flatten onto white and write a PNG
pub fn save_png(image: &RgbaImage, path: &Path) -> PaintResult<()> {
    let flattened = flatten_onto_white(image)?;
    flattened.save_with_format(path, ImageFormat::Png)?;
    log::info!("Saved drawing to {}", path.display());
    Ok(())
}

/// Decode an image file into straight-alpha RGBA
pub fn load_image(path: &Path) -> PaintResult<RgbaImage> {
    let decoded = image::open(path)?;
    log::debug!("Decoded image: {}x{}", decoded.width(), decoded.height());
    let rgba = decoded.to_rgba8();
    pixel_size(rgba.width() as f32, rgba.height() as f32)?;
    Ok(rgba)
}
