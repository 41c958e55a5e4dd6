use egui::{Button, Ui};

use crate::PaintApp;
use crate::components::{ColorSwatch, ToolButton};
use crate::settings::{BACKGROUND_PRESETS, COLOR_PALETTE};
use crate::tools::{BRUSH_SIZES, Tool};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            tool_buttons(app, ui);
            ui.separator();

            ui.label("Brush size");
            ui.horizontal(|ui| {
                for size in BRUSH_SIZES {
                    let tools = &mut app.canvas_mut().tools;
                    if ui
                        .selectable_label(tools.brush_size == size, format!("{size}px"))
                        .clicked()
                    {
                        tools.brush_size = size;
                    }
                }
            });
            ui.separator();

            colors(app, ui);
            ui.separator();

            view_controls(app, ui);
            ui.separator();

            ui.label("Selection");
            ui.horizontal(|ui| {
                let canvas = app.canvas_mut();
                if ui.button("Copy").clicked() {
                    canvas.copy();
                }
                if ui.button("Cut").clicked() {
                    canvas.cut();
                }
                let can_paste = canvas.clipboard().is_some() && canvas.selection().is_some();
                if ui.add_enabled(can_paste, Button::new("Paste")).clicked() {
                    canvas.paste();
                }
                if ui.button("Deselect").clicked() {
                    canvas.clear_selection();
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Clear canvas").clicked() {
                    log::info!("Canvas cleared from UI");
                    app.canvas_mut().clear_canvas();
                }
                if ui.button("Save PNG").clicked() {
                    app.save_image();
                }
            });
        });
}

fn tool_buttons(app: &mut PaintApp, ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        let active = app.canvas().tools.active_tool;
        for tool in Tool::ALL {
            if ToolButton::new(tool, active == tool).show(ui).clicked() && active != tool {
                log::info!("Tool selected from UI: {}", tool.name());
                app.canvas_mut().tools.active_tool = tool;
            }
        }
    });
}

fn colors(app: &mut PaintApp, ui: &mut Ui) {
    ui.label("Colors (left click: primary, right click: secondary)");
    ui.horizontal_wrapped(|ui| {
        let tools = &mut app.canvas_mut().tools;
        for color in COLOR_PALETTE {
            let response = ColorSwatch::new(color, tools.primary_color == color).show(ui);
            if response.clicked() {
                tools.primary_color = color;
            }
            if response.secondary_clicked() {
                tools.secondary_color = color;
            }
        }
    });
    ui.horizontal(|ui| {
        let tools = &mut app.canvas_mut().tools;
        ui.label("Primary");
        ui.color_edit_button_srgba(&mut tools.primary_color);
        ui.label("Secondary");
        ui.color_edit_button_srgba(&mut tools.secondary_color);
    });

    ui.label("Background");
    ui.horizontal_wrapped(|ui| {
        let current = app.canvas().background();
        for color in BACKGROUND_PRESETS {
            if ColorSwatch::new(color, current == color).show(ui).clicked() {
                app.canvas_mut().set_background(color);
            }
        }
    });
}

fn view_controls(app: &mut PaintApp, ui: &mut Ui) {
    let canvas = app.canvas_mut();
    let mut show_grid = canvas.grid().visible();
    if ui.checkbox(&mut show_grid, "Show grid").changed() {
        canvas.set_grid_visible(show_grid);
    }
    ui.horizontal(|ui| {
        if ui.button("-").on_hover_text("Zoom out").clicked() {
            canvas.zoom_out();
        }
        ui.label(format!("{}%", canvas.zoom_percent()));
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            canvas.zoom_in();
        }
        if ui.button("Reset").on_hover_text("Back to 100%").clicked() {
            canvas.reset_zoom();
        }
    });
}
