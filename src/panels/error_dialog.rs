use crate::PaintApp;

/// Shows the pending error, if any, until the user closes it
pub fn error_dialog(app: &mut PaintApp, ctx: &egui::Context) {
    let Some(dialog) = app.error().cloned() else {
        return;
    };
    egui::Window::new(dialog.title.as_str())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(&dialog.message);
            if ui.button("OK").clicked() {
                app.dismiss_error();
            }
        });
}
