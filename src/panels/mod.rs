mod central_panel;
mod controls_panel;
mod error_dialog;

pub use central_panel::central_panel;
pub use controls_panel::controls_panel;
pub use error_dialog::error_dialog;
