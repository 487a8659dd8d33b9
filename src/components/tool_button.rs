use crate::tools::ToolSpec;

/// Square toolbar button showing a tool's icon, with its label and shortcut as tooltip.
pub struct ToolButton {
    pub spec: &'static ToolSpec,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(spec: &'static ToolSpec, selected: bool) -> Self {
        Self { spec, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(100, 181, 246) // Light blue when selected
            } else if response.hovered() {
                egui::Color32::from_gray(225)
            } else {
                egui::Color32::from_gray(245)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.spec.icon,
                egui::FontId::proportional(20.0),
                egui::Color32::BLACK,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        let tooltip = match self.spec.shortcut {
            Some(key) => format!("{} ({})", self.spec.label, key.name()),
            None => self.spec.label.to_owned(),
        };
        response.on_hover_text(tooltip)
    }
}
