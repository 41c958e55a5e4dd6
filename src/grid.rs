use egui::{Color32, ColorImage};
use log::debug;

use crate::raster::PixelBuffer;

/// Spacing between grid lines, in buffer pixels.
pub const GRID_CELL_SIZE: usize = 20;
pub const GRID_COLOR: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);

/// A non-destructive square grid kept on its own transparent layer.
///
/// The layer matches the surface size and is redrawn whenever visibility or
/// size changes. It never touches the committed pixels.
#[derive(Debug, Clone, Default)]
pub struct GridOverlay {
    visible: bool,
    layer: PixelBuffer,
}

impl GridOverlay {
    pub fn new(width: usize, height: usize, visible: bool) -> Self {
        let mut grid = Self {
            visible,
            layer: PixelBuffer::new(width, height, Color32::TRANSPARENT),
        };
        grid.redraw();
        grid
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn layer(&self) -> &PixelBuffer {
        &self.layer
    }

    /// Returns true when the flag actually changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        self.redraw();
        true
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.layer.size() == [width, height] {
            return;
        }
        self.layer = PixelBuffer::new(width, height, Color32::TRANSPARENT);
        self.redraw();
    }

    /// The layer as an image, or `None` while hidden.
    pub fn to_color_image(&self) -> Option<ColorImage> {
        (self.visible && !self.layer.is_empty()).then(|| self.layer.to_color_image())
    }

    fn redraw(&mut self) {
        self.layer.fill(Color32::TRANSPARENT);
        if !self.visible {
            return;
        }
        let (width, height) = (self.layer.width(), self.layer.height());
        for x in (0..width).step_by(GRID_CELL_SIZE) {
            for y in 0..height {
                self.layer.set(x as i32, y as i32, GRID_COLOR);
            }
        }
        for y in (0..height).step_by(GRID_CELL_SIZE) {
            for x in 0..width {
                self.layer.set(x as i32, y as i32, GRID_COLOR);
            }
        }
        debug!("Grid redrawn at {width}x{height}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_grid_is_transparent() {
        let grid = GridOverlay::new(50, 50, false);
        assert!(grid.layer().pixels().iter().all(|p| *p == Color32::TRANSPARENT));
        assert!(grid.to_color_image().is_none());
    }

    #[test]
    fn test_lines_every_cell() {
        let mut grid = GridOverlay::new(50, 50, false);
        assert!(grid.set_visible(true));
        assert!(!grid.set_visible(true));
        assert_eq!(grid.layer().get(20, 7), Some(GRID_COLOR));
        assert_eq!(grid.layer().get(7, 40), Some(GRID_COLOR));
        assert_eq!(grid.layer().get(7, 7), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_resize_redraws() {
        let mut grid = GridOverlay::new(30, 30, true);
        grid.resize(70, 30);
        assert_eq!(grid.layer().size(), [70, 30]);
        assert_eq!(grid.layer().get(60, 3), Some(GRID_COLOR));
    }
}
