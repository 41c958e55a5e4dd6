use std::path::Path;

use egui::{Color32, ColorImage, Pos2, Vec2};
use log::{debug, info};

use crate::error::{CanvasError, CanvasResult};
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::geometry::transform::wheel_zoom_factor;
use crate::geometry::{DragRect, ViewTransform};
use crate::grid::GridOverlay;
use crate::input::{InputEvent, PointerButtons};
use crate::raster::{PixelBuffer, RasterSurface, draw};
use crate::selection::SelectionModel;
use crate::settings::{DEFAULT_BACKGROUND, Preferences};
use crate::tools::state_machine::{GestureTarget, Outcome};
use crate::tools::{Gesture, ToolSettings, ToolStateMachine};

/// Scale step of the zoom buttons.
pub const ZOOM_STEP_IN: f32 = 1.1;
pub const ZOOM_STEP_OUT: f32 = 0.9;

const MARQUEE_COLOR: Color32 = Color32::BLUE;
const MARQUEE_DASH: f32 = 5.0;
const MARQUEE_WIDTH: f32 = 1.0;

/// The drawing engine behind one canvas widget.
///
/// Owns the surface, the selection and clipboard, the view and the gesture in
/// progress. Hosts feed it pointer events, mutate [`Canvas::tools`] directly,
/// and listen for [`CanvasEvent`]s. Until the first [`Canvas::resize`] there is
/// no surface and pixel operations do nothing.
#[derive(Debug, Clone)]
pub struct Canvas {
    surface: Option<RasterSurface>,
    selection: SelectionModel,
    machine: ToolStateMachine,
    view: ViewTransform,
    grid: GridOverlay,
    background: Color32,
    events: EventBus,
    revision: u64,
    /// Read at every pointer-down
    pub tools: ToolSettings,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            surface: None,
            selection: SelectionModel::new(),
            machine: ToolStateMachine::new(),
            view: ViewTransform::identity(),
            grid: GridOverlay::default(),
            background: DEFAULT_BACKGROUND,
            events: EventBus::new(),
            revision: 0,
            tools: ToolSettings::default(),
        }
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        let mut canvas = Self::new();
        canvas.resize(width, height);
        canvas
    }

    /// A canvas configured from saved preferences, not yet sized.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        let mut canvas = Self::new();
        canvas.tools = prefs.tools;
        canvas.background = prefs.background;
        canvas.grid.set_visible(prefs.show_grid);
        canvas
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            tools: self.tools,
            background: self.background,
            show_grid: self.grid.visible(),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> CanvasResult<&RasterSurface> {
        self.surface.as_ref().ok_or(CanvasError::NotInitialized)
    }

    pub fn size(&self) -> Option<[usize; 2]> {
        self.surface.as_ref().map(|s| [s.width(), s.height()])
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn gesture(&self) -> &Gesture {
        self.machine.gesture()
    }

    pub fn selection(&self) -> Option<&DragRect> {
        self.selection.selection()
    }

    pub fn clipboard(&self) -> Option<&PixelBuffer> {
        self.selection.clipboard()
    }

    pub fn grid(&self) -> &GridOverlay {
        &self.grid
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Bumped on every visible change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Creates the surface on first call, afterwards reallocates it keeping
    /// the old pixels at the origin. An open gesture is left as it is.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        let resized = if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height)
        } else {
            match RasterSurface::new(width, height, self.background) {
                Ok(surface) => {
                    info!("Canvas initialized at {width}x{height}");
                    self.surface = Some(surface);
                    true
                }
                Err(err) => {
                    debug!("Canvas not initialized: {err}");
                    false
                }
            }
        };
        if resized {
            self.grid.resize(width, height);
            self.events.emit(CanvasEvent::Resized { width, height });
            self.touch();
        }
        resized
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { position, buttons } => self.pointer_down(position, buttons),
            InputEvent::PointerMove { position, .. } => self.pointer_move(position),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::Wheel { position, delta_y } => {
                self.wheel(position, delta_y);
            }
        }
    }

    pub fn pointer_down(&mut self, screen: Pos2, buttons: PointerButtons) {
        let Some(surface) = self.surface.as_mut() else {
            debug!("Pointer down ignored: canvas not initialized");
            return;
        };
        let target = GestureTarget {
            surface,
            selection: &mut self.selection,
            view: &mut self.view,
        };
        let outcome = self.machine.pointer_down(target, &self.tools, screen, buttons);
        self.apply(outcome);
    }

    pub fn pointer_move(&mut self, screen: Pos2) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let target = GestureTarget {
            surface,
            selection: &mut self.selection,
            view: &mut self.view,
        };
        let outcome = self.machine.pointer_move(target, screen);
        self.apply(outcome);
    }

    pub fn pointer_up(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            let outcome = self.machine.pointer_up(surface);
            self.apply(outcome);
        }
    }

    pub fn pointer_leave(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            let outcome = self.machine.pointer_leave(surface);
            self.apply(outcome);
        }
    }

    /// Turns gesture results into notifications.
    fn apply(&mut self, outcome: Outcome) {
        if let Some(kind) = outcome.started {
            self.events.emit(CanvasEvent::GestureStarted(kind));
        }
        if outcome.selection_changed {
            self.events.emit(CanvasEvent::SelectionChanged(self.selection.bounds()));
        }
        if outcome.view_changed {
            self.emit_view();
        }
        if let Some((kind, committed)) = outcome.ended {
            self.events.emit(CanvasEvent::GestureEnded { kind, committed });
        }
        if outcome.pixels_changed || outcome.selection_changed || outcome.view_changed {
            self.touch();
        }
    }

    fn emit_view(&self) {
        self.events.emit(CanvasEvent::ViewChanged {
            scale: self.view.scale(),
            translation: self.view.translation,
        });
    }

    fn view_changed(&mut self, changed: bool) -> bool {
        if changed {
            self.emit_view();
            self.touch();
        }
        changed
    }

    /// Wheel zoom around the pointer: up zooms in by 1.1, down out by 0.9.
    pub fn wheel(&mut self, screen: Pos2, delta_y: f32) -> bool {
        match wheel_zoom_factor(delta_y) {
            Some(factor) => self.zoom_at(screen, factor),
            None => false,
        }
    }

    pub fn zoom_at(&mut self, screen: Pos2, factor: f32) -> bool {
        if !self.is_initialized() {
            debug!("Zoom ignored: canvas not initialized");
            return false;
        }
        let changed = self.view.zoom_at(screen, factor);
        self.view_changed(changed)
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.is_initialized() && self.view.zoom_by(ZOOM_STEP_IN);
        self.view_changed(changed)
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.is_initialized() && self.view.zoom_by(ZOOM_STEP_OUT);
        self.view_changed(changed)
    }

    /// Back to 100%; the pan offset stays.
    pub fn reset_zoom(&mut self) -> bool {
        if !self.is_initialized() || self.view.scale() == 1.0 {
            return false;
        }
        self.view.reset_zoom();
        self.view_changed(true)
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.view.scale() * 100.0).round() as u32
    }

    pub fn copy(&mut self) -> bool {
        let Some(surface) = self.surface.as_ref() else {
            debug!("Copy ignored: canvas not initialized");
            return false;
        };
        let copied = self.selection.copy(surface);
        if copied {
            self.emit_clipboard();
        }
        copied
    }

    pub fn cut(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            debug!("Cut ignored: canvas not initialized");
            return false;
        };
        let cut = self.selection.cut(surface);
        if cut {
            self.emit_clipboard();
            self.touch();
        }
        cut
    }

    pub fn paste(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            debug!("Paste ignored: canvas not initialized");
            return false;
        };
        let pasted = self.selection.paste(surface);
        if pasted {
            self.touch();
        }
        pasted
    }

    /// Destructive one-shot move of the selected pixels.
    pub fn move_selection(&mut self, delta: Vec2) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            debug!("Move ignored: canvas not initialized");
            return false;
        };
        let moved = self.selection.move_by(surface, delta);
        if moved {
            self.events.emit(CanvasEvent::SelectionChanged(self.selection.bounds()));
            self.touch();
        }
        moved
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.selection.selection().is_none() {
            return false;
        }
        self.selection.clear();
        self.events.emit(CanvasEvent::SelectionChanged(None));
        self.touch();
        true
    }

    fn emit_clipboard(&self) {
        if let Some(clip) = self.selection.clipboard() {
            info!("Clipboard holds {}x{} pixels", clip.width(), clip.height());
            self.events.emit(CanvasEvent::ClipboardChanged {
                width: clip.width(),
                height: clip.height(),
            });
        }
    }

    /// Fills the canvas with the background color, dropping the selection and
    /// any gesture in progress.
    pub fn clear_canvas(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            debug!("Clear ignored: canvas not initialized");
            return false;
        };
        let outcome = self.machine.abort(surface);
        surface.clear();
        self.apply(outcome);
        self.clear_selection();
        self.events.emit(CanvasEvent::Cleared);
        self.touch();
        true
    }

    /// Changes the fill for clears, cuts, the eraser and new area after a
    /// resize. Painted pixels keep their colors.
    pub fn set_background(&mut self, color: Color32) {
        if self.background == color {
            return;
        }
        self.background = color;
        if let Some(surface) = &mut self.surface {
            surface.set_background(color);
        }
        self.events.emit(CanvasEvent::BackgroundChanged(color));
    }

    pub fn set_grid_visible(&mut self, visible: bool) -> bool {
        let changed = self.grid.set_visible(visible);
        if changed {
            self.events.emit(CanvasEvent::GridToggled(visible));
            self.touch();
        }
        changed
    }

    pub fn toggle_grid(&mut self) {
        self.set_grid_visible(!self.grid.visible());
    }

    /// Pixels to display: the shape preview while one is being dragged, the
    /// committed pixels otherwise, with the selection marquee on top.
    pub fn frame(&self) -> Option<PixelBuffer> {
        let surface = self.surface.as_ref()?;
        let mut frame = if self.machine.preview_visible(surface) {
            surface.scratch().clone()
        } else {
            surface.primary().clone()
        };
        if let Some(sel) = self.selection.selection() {
            draw::stroke_dashed_rect(
                &mut frame,
                sel.origin,
                sel.extent,
                MARQUEE_DASH,
                MARQUEE_WIDTH,
                MARQUEE_COLOR,
            );
        }
        Some(frame)
    }

    pub fn frame_image(&self) -> Option<ColorImage> {
        self.frame().map(|frame| frame.to_color_image())
    }

    pub fn export_png(&self) -> CanvasResult<Vec<u8>> {
        self.surface()?.export_png()
    }

    pub fn save_png(&self, path: &Path) -> CanvasResult<()> {
        self.surface()?.save_png(path)
    }
}
