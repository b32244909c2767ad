use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::PaintApp;
use crate::stroke::{MAX_WIDTH, MIN_WIDTH};
use crate::tools::Tool;

pub fn controls_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("controls_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("File:");
            let idle = !app.is_file_busy();
            if ui
                .add_enabled(idle, egui::Button::new("Save"))
                .on_hover_text("Save as PNG")
                .clicked()
            {
                app.save_with_dialog();
            }
            if ui
                .add_enabled(idle, egui::Button::new("Load"))
                .on_hover_text("Open a PNG")
                .clicked()
            {
                app.load_with_dialog();
            }
            if !idle {
                ui.spinner();
            }

            ui.separator();
            ui.label("Tools:");
            let active_tool = app.controller().tool();
            for tool in Tool::ALL {
                if ui.selectable_label(active_tool == tool, tool.name()).clicked() {
                    app.select_tool(tool);
                }
            }

            ui.separator();
            ui.label("Color:");
            let mut color = app.controller().color();
            if color_edit_button_srgba(ui, &mut color, Alpha::OnlyBlend).changed() {
                app.set_color(color);
            }

            ui.separator();
            ui.label("Width:");
            let mut width = app.controller().width();
            if ui
                .add(egui::Slider::new(&mut width, MIN_WIDTH..=MAX_WIDTH).show_value(false))
                .on_hover_text("Line width")
                .changed()
            {
                app.set_width(width);
            }
            ui.label(format!("{:.1}", app.controller().width()));

            ui.separator();
            ui.label(format!("{:.0}%", app.controller().scale() * 100.0))
                .on_hover_text("Ctrl + scroll over the canvas to zoom");
            if ui.button("100%").on_hover_text("Reset zoom").clicked() {
                app.reset_zoom();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear").on_hover_text("Clear the drawing").clicked() {
                    app.clear_canvas();
                }
            });
        });
    });
}
