use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // Debounce surface resizes against the visible area
        let now = ui.input(|i| i.time);
        app.viewport_changed(ui.available_size(), now);
        app.poll_resize(now);

        let canvas_size = app.canvas_screen_size();
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let (rect, response) = ui.allocate_exact_size(canvas_size, egui::Sense::drag());

                // Handle input
                let events = app.input_mut().process_input(ctx, &response);
                for event in events {
                    app.handle_event(event);
                }

                // Render the canvas
                app.sync_renderer(ctx);
                app.renderer().render(&ui.painter_at(rect), rect);

                if response.hovered() || app.is_drawing() {
                    ctx.set_cursor_icon(app.controller().tool().cursor());
                }
            });
    });
}
