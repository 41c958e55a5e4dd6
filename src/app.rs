use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use egui::{Color32, Rect, TextureId};

use crate::canvas::Canvas;
use crate::event::BackgroundFollower;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::settings::{EXPORT_FILE_NAME, Preferences};
use crate::texture_manager::TextureManager;

/// The eframe shell around one [`Canvas`]. Only [`Preferences`] outlive a
/// session; the pixels are not persisted.
pub struct PaintApp {
    canvas: Canvas,
    textures: TextureManager,
    input: InputHandler,
    page_background: Rc<Cell<Color32>>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_preferences(Preferences::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let prefs = cc
            .storage
            .and_then(|storage| eframe::get_value::<Preferences>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::info!("Starting with {prefs:?}");
        Self::with_preferences(prefs)
    }

    pub fn with_preferences(prefs: Preferences) -> Self {
        let canvas = Canvas::from_preferences(&prefs);
        let page_background = Rc::new(Cell::new(prefs.background));
        canvas.subscribe(Box::new(BackgroundFollower::new(Rc::clone(&page_background))));
        Self {
            canvas,
            textures: TextureManager::new(),
            input: InputHandler::new(Rect::NOTHING),
            page_background,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Color of the page behind the canvas.
    pub fn page_background(&self) -> Color32 {
        self.page_background.get()
    }

    /// Feeds this frame's pointer input for the canvas at `canvas_rect`.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        self.input.set_canvas_rect(canvas_rect);
        for event in self.input.process_input(ctx) {
            self.canvas.handle_input(&event);
        }
    }

    pub fn frame_texture(&mut self, ctx: &egui::Context) -> Option<TextureId> {
        self.textures.frame_texture(ctx, &self.canvas)
    }

    pub fn grid_texture(&mut self, ctx: &egui::Context) -> Option<TextureId> {
        self.textures.grid_texture(ctx, &self.canvas)
    }

    /// Writes the committed pixels next to the working directory.
    pub fn save_image(&self) {
        match self.canvas.save_png(Path::new(EXPORT_FILE_NAME)) {
            Ok(()) => log::info!("Image saved to {EXPORT_FILE_NAME}"),
            Err(err) => log::warn!("Saving {EXPORT_FILE_NAME} failed: {err}"),
        }
    }

    fn handle_clipboard_shortcuts(&mut self, ctx: &egui::Context) {
        let (copy, cut, paste) = ctx.input(|i| {
            let copy = i.events.iter().any(|e| matches!(e, egui::Event::Copy));
            let cut = i.events.iter().any(|e| matches!(e, egui::Event::Cut));
            // Most backends turn Ctrl+V into a text paste event instead of a key press.
            let paste = i.events.iter().any(|e| matches!(e, egui::Event::Paste(_)))
                || (i.modifiers.command && i.key_pressed(egui::Key::V));
            (copy, cut, paste)
        });
        if copy {
            self.canvas.copy();
        }
        if cut {
            self.canvas.cut();
        }
        if paste {
            self.canvas.paste();
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.canvas.preferences());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_clipboard_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButtons;
    use crate::tools::Tool;
    use egui::{Modifiers, RawInput, pos2};

    fn shortcut_frame(app: &mut PaintApp, events: Vec<egui::Event>, modifiers: Modifiers) {
        let ctx = egui::Context::default();
        let input = RawInput {
            events,
            modifiers,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.handle_clipboard_shortcuts(ctx));
    }

    fn select(app: &mut PaintApp, from: egui::Pos2, to: egui::Pos2) {
        let canvas = app.canvas_mut();
        canvas.tools.active_tool = Tool::Select;
        canvas.pointer_down(from, PointerButtons::PRIMARY);
        canvas.pointer_move(to);
        canvas.pointer_up();
    }

    #[test]
    fn test_keyboard_copy_and_paste() {
        let mut app = PaintApp::default();
        let canvas = app.canvas_mut();
        canvas.resize(60, 60);
        canvas.tools.active_tool = Tool::Brush;
        canvas.tools.primary_color = Color32::RED;
        canvas.pointer_down(pos2(2.0, 5.5), PointerButtons::PRIMARY);
        canvas.pointer_move(pos2(18.0, 5.5));
        canvas.pointer_up();

        select(&mut app, pos2(0.0, 0.0), pos2(20.0, 10.0));
        shortcut_frame(&mut app, vec![egui::Event::Copy], Modifiers::COMMAND);
        assert!(app.canvas().clipboard().is_some());

        select(&mut app, pos2(30.0, 40.0), pos2(35.0, 45.0));
        let ctrl_v = egui::Event::Key {
            key: egui::Key::V,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::COMMAND,
        };
        shortcut_frame(&mut app, vec![ctrl_v], Modifiers::COMMAND);
        let surface = app.canvas().surface().unwrap();
        assert_eq!(surface.primary().get(40, 45), Some(Color32::RED));
    }

    #[test]
    fn test_paste_event_pastes_once_selection_exists() {
        let mut app = PaintApp::default();
        app.canvas_mut().resize(40, 40);
        shortcut_frame(&mut app, vec![egui::Event::Paste(String::new())], Modifiers::NONE);
        assert_eq!(app.canvas().revision(), 1);

        select(&mut app, pos2(0.0, 0.0), pos2(10.0, 10.0));
        shortcut_frame(&mut app, vec![egui::Event::Cut], Modifiers::NONE);
        let cut_revision = app.canvas().revision();
        shortcut_frame(&mut app, vec![egui::Event::Paste(String::new())], Modifiers::NONE);
        assert!(app.canvas().revision() > cut_revision);
    }
}
