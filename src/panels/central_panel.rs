use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            // Create a painting area that fills the remaining space
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            if response.hovered() {
                ctx.set_cursor_icon(app.tools().active.spec().cursor);
            }

            app.handle_input(ctx, canvas_rect, response.contains_pointer());
            app.render(ctx, &painter, canvas_rect);
        });
}
