use egui::{Color32, Rect, Sense, pos2, vec2};

use crate::PaintApp;

const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let page = egui::Frame::none().fill(app.page_background());
    egui::CentralPanel::default().frame(page).show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let canvas_rect = response.rect;

        // The surface follows the widget size; content is kept from the origin.
        let width = canvas_rect.width().floor() as usize;
        let height = canvas_rect.height().floor() as usize;
        app.canvas_mut().resize(width, height);

        app.handle_input(ctx, canvas_rect);

        let Some([width, height]) = app.canvas().size() else {
            return;
        };
        let view = app.canvas().view();
        let image_rect = Rect::from_min_size(
            canvas_rect.min + view.translation,
            vec2(width as f32, height as f32) * view.scale(),
        );

        if let Some(texture) = app.frame_texture(ctx) {
            painter.image(texture, image_rect, FULL_UV, Color32::WHITE);
        }
        if let Some(texture) = app.grid_texture(ctx) {
            painter.image(texture, image_rect, FULL_UV, Color32::WHITE);
        }

        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    });
}
