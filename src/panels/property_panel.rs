use crate::PaintApp;
use crate::properties::PropertyChange;

/// Floating editor for the single selected shape. Hidden for zero or several selections.
pub fn property_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let Some(properties) = app.editor().selected_properties() else {
        return;
    };
    let (min_width, max_width) = {
        let config = app.editor().config();
        (config.min_stroke_width, config.max_stroke_width)
    };

    let mut changes = Vec::new();
    let mut close = false;
    let mut delete = false;

    egui::Window::new("Properties")
        .id(egui::Id::new("property_panel"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(format!("Properties: {}", properties.kind));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    close = ui.small_button("✖").on_hover_text("Close").clicked();
                });
            });
            ui.separator();

            egui::Grid::new("property_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Stroke");
                    let mut stroke = properties.stroke;
                    if egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut stroke,
                        egui::color_picker::Alpha::Opaque,
                    )
                    .changed()
                    {
                        changes.push(PropertyChange::Stroke(stroke));
                    }
                    ui.end_row();

                    ui.label("Fill");
                    ui.horizontal(|ui| {
                        let mut has_fill = properties.fill.is_some();
                        if ui.checkbox(&mut has_fill, "").changed() {
                            let fill = has_fill.then_some(properties.fill.unwrap_or(egui::Color32::WHITE));
                            changes.push(PropertyChange::Fill(fill));
                        }
                        match properties.fill {
                            Some(mut fill) => {
                                if egui::color_picker::color_edit_button_srgba(
                                    ui,
                                    &mut fill,
                                    egui::color_picker::Alpha::Opaque,
                                )
                                .changed()
                                {
                                    changes.push(PropertyChange::Fill(Some(fill)));
                                }
                            }
                            None => {
                                ui.weak("No fill");
                            }
                        }
                    });
                    ui.end_row();

                    ui.label("Width");
                    let mut width = properties.stroke_width;
                    if ui.add(egui::Slider::new(&mut width, min_width..=max_width)).changed() {
                        changes.push(PropertyChange::StrokeWidth(width));
                    }
                    ui.end_row();

                    ui.label("Opacity");
                    let mut percent = properties.opacity_percent();
                    if ui.add(egui::Slider::new(&mut percent, 0..=100).suffix("%")).changed() {
                        changes.push(PropertyChange::Opacity(percent as f32 / 100.0));
                    }
                    ui.end_row();
                });

            ui.separator();
            delete = ui.button("Delete").clicked();
        });

    let editor = app.editor_mut();
    for change in changes {
        editor.apply_property(change);
    }
    if delete {
        editor.delete_selected();
    } else if close {
        editor.clear_selection();
    }
}
