use egui::{Color32, Response, Sense, Stroke, Ui, vec2};

/// A clickable color square. Left and right clicks are both reported.
pub struct ColorSwatch {
    pub color: Color32,
    pub selected: bool,
}

impl ColorSwatch {
    pub fn new(color: Color32, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(vec2(22.0, 22.0), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 3.0, self.color);
            let outline = if self.selected {
                Stroke::new(2.0, Color32::from_rgb(33, 150, 243))
            } else if response.hovered() {
                Stroke::new(1.0, Color32::from_gray(160))
            } else {
                Stroke::new(1.0, Color32::from_gray(90))
            };
            painter.rect_stroke(rect, 3.0, outline);
        }

        response
    }
}
