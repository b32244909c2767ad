#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod surface;
pub mod tools;
pub mod util;
pub mod view;

pub use app::PaintApp;
pub use command::{DrawCommand, SurfaceKind};
pub use config::Settings;
pub use document::Document;
pub use error::{PaintError, PaintResult};
pub use input::{InputEvent, InputLocation};
pub use renderer::Renderer;
pub use state::DragSession;
pub use stroke::StrokeStyle;
pub use surface::Surface;
pub use tools::{ShapeKind, Tool, ToolController};
pub use view::ViewScale;
