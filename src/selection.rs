use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::geometry::DragRect;
use crate::raster::{PixelBuffer, PixelRect, RasterSurface};

/// The rectangular selection and the clipboard it copies into.
///
/// The selection keeps its drag direction (width/height may be negative);
/// every pixel operation works on the normalized bounds.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selection: Option<DragRect>,
    clipboard: Option<PixelBuffer>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&DragRect> {
        self.selection.as_ref()
    }

    /// Normalized bounds of the selection, if any.
    pub fn bounds(&self) -> Option<Rect> {
        self.selection.map(|sel| sel.normalized())
    }

    pub fn clipboard(&self) -> Option<&PixelBuffer> {
        self.clipboard.as_ref()
    }

    pub fn set_selection(&mut self, selection: Option<DragRect>) {
        self.selection = selection;
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }

    /// Replaces any selection with a zero-size one at `anchor`.
    pub fn start_selection(&mut self, anchor: Pos2) {
        self.selection = Some(DragRect::at(anchor));
    }

    /// Stretches the selection from its origin to `current`.
    pub fn resize_selection(&mut self, current: Pos2) -> bool {
        match &mut self.selection {
            Some(sel) => {
                sel.resize_to(current);
                true
            }
            None => false,
        }
    }

    /// Inclusive hit-test against the normalized selection bounds.
    pub fn contains(&self, point: Pos2) -> bool {
        self.selection.is_some_and(|sel| sel.contains(point))
    }

    /// Reads the selected pixels into the clipboard.
    pub fn copy(&mut self, surface: &RasterSurface) -> bool {
        let Some(bounds) = self.bounds() else {
            debug!("Copy ignored: no selection");
            return false;
        };
        let pixels = surface.read_region(bounds);
        if pixels.is_empty() {
            debug!("Copy ignored: selection {bounds:?} covers no pixels");
            return false;
        }
        debug!("Copied {}x{} pixels", pixels.width(), pixels.height());
        self.clipboard = Some(pixels);
        true
    }

    /// Copies, then fills the selection with the background color.
    pub fn cut(&mut self, surface: &mut RasterSurface) -> bool {
        if !self.copy(surface) {
            return false;
        }
        if let Some(bounds) = self.bounds() {
            surface.clear_region(bounds, surface.background());
        }
        true
    }

    /// Writes the clipboard at the selection's top-left corner. The clipboard
    /// keeps its own size whatever the selection's size; pasting can repeat.
    pub fn paste(&self, surface: &mut RasterSurface) -> bool {
        let (Some(pixels), Some(bounds)) = (&self.clipboard, self.bounds()) else {
            debug!("Paste ignored: needs both a clipboard and a selection");
            return false;
        };
        surface.write_region(bounds.min, pixels)
    }

    /// Destructive move: read the selected pixels, clear them, write them back
    /// shifted by `delta`, and shift the selection along.
    pub fn move_by(&mut self, surface: &mut RasterSurface, delta: Vec2) -> bool {
        let Some(bounds) = self.bounds() else {
            debug!("Move ignored: no selection");
            return false;
        };
        let pixels = surface.read_region(bounds);
        if !pixels.is_empty() {
            let origin = clipped_origin(bounds, surface);
            surface.clear_region(bounds, surface.background());
            surface.write_region(origin + delta, &pixels);
        }
        if let Some(sel) = &mut self.selection {
            sel.translate(delta);
        }
        true
    }
}

/// Where the readable part of `bounds` starts once clipped to the surface.
fn clipped_origin(bounds: Rect, surface: &RasterSurface) -> Pos2 {
    let region = PixelRect::from_rect(bounds);
    match region.clip(surface.width(), surface.height()) {
        Some(clip) => Pos2::new(clip.x as f32, clip.y as f32),
        None => bounds.min,
    }
}

/// Selected pixels lifted off the surface for the length of a move drag.
///
/// Each frame starts again from the surface as it was when the drag began
/// (with the lifted area already cleared) and drops the lifted pixels at the
/// total offset, so nothing accumulates from frame to frame.
#[derive(Debug, Clone)]
pub struct FloatingSelection {
    base: PixelBuffer,
    pixels: PixelBuffer,
    pixel_origin: Pos2,
    start: DragRect,
    offset: Vec2,
}

impl FloatingSelection {
    /// Lifts the current selection; `None` without a selection.
    pub fn lift(selection: &SelectionModel, surface: &RasterSurface) -> Option<Self> {
        let start = *selection.selection()?;
        let bounds = start.normalized();
        let pixels = surface.read_region(bounds);
        let pixel_origin = clipped_origin(bounds, surface);

        let mut base = surface.primary().clone();
        if !pixels.is_empty() {
            base.fill_rect(PixelRect::from_rect(bounds), surface.background());
        }
        Some(Self {
            base,
            pixels,
            pixel_origin,
            start,
            offset: Vec2::ZERO,
        })
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Redraws the lifted pixels at `offset` from where they started and moves
    /// the selection to match.
    pub fn drag_to(&mut self, offset: Vec2, surface: &mut RasterSurface, selection: &mut SelectionModel) {
        self.offset = offset;
        surface.restore_primary(&self.base);
        if !self.pixels.is_empty() {
            surface.write_region(self.pixel_origin + offset, &self.pixels);
        }
        let mut moved = self.start;
        moved.translate(offset);
        selection.set_selection(Some(moved));
    }
}
