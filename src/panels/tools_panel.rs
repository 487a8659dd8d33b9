use crate::PaintApp;
use crate::components::ToolButton;
use crate::tools::{TOOLS, ToolAction};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            let tools = app.tools();

            for spec in &TOOLS {
                let selected = tools.active == spec.tool;
                if ToolButton::new(spec, selected).show(ui).clicked() {
                    app.apply_tool_action(ToolAction::SelectTool(spec.tool));
                }
            }
            ui.separator();

            ui.label("Stroke:");
            let mut stroke = tools.stroke;
            if egui::color_picker::color_edit_button_srgba(ui, &mut stroke, egui::color_picker::Alpha::Opaque)
                .changed()
            {
                app.apply_tool_action(ToolAction::SetStroke(stroke));
            }

            ui.label("Fill:");
            let mut has_fill = tools.fill.is_some();
            if ui.checkbox(&mut has_fill, "").on_hover_text("Uncheck for no fill").changed() {
                let fill = has_fill.then_some(tools.fill.unwrap_or(egui::Color32::WHITE));
                app.apply_tool_action(ToolAction::SetFill(fill));
            }
            if let Some(mut fill) = tools.fill {
                if egui::color_picker::color_edit_button_srgba(ui, &mut fill, egui::color_picker::Alpha::Opaque)
                    .changed()
                {
                    app.apply_tool_action(ToolAction::SetFill(Some(fill)));
                }
            } else {
                ui.weak("No fill");
            }
            ui.separator();

            let (min, max) = {
                let config = app.editor().config();
                (config.min_stroke_width, config.max_stroke_width)
            };
            let mut width = tools.stroke_width;
            if ui.add(egui::Slider::new(&mut width, min..=max).text("Width")).changed() {
                app.apply_tool_action(ToolAction::SetStrokeWidth { width, min, max });
            }
            ui.separator();

            let has_selection = !app.editor().selection().is_empty();
            if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
                app.editor_mut().delete_selected();
            }
            if ui.button("Clear All").clicked() {
                app.editor_mut().request_clear();
            }
        });
    });
}
