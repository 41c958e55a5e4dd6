use std::io::Cursor;
use std::path::Path;

use egui::{Color32, Pos2, Rect};
use log::{debug, info};

use super::{PixelBuffer, PixelRect, draw};
use crate::error::{CanvasError, CanvasResult};

/// The committed pixels plus a same-sized scratch buffer for previews.
///
/// The scratch buffer only holds something meaningful between
/// [`RasterSurface::prepare_scratch`] and the next commit, discard or resize;
/// outside that window compositing it is refused.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    primary: PixelBuffer,
    scratch: PixelBuffer,
    scratch_ready: bool,
    background: Color32,
}

impl RasterSurface {
    pub fn new(width: usize, height: usize, background: Color32) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(Self {
            primary: PixelBuffer::new(width, height, background),
            scratch: PixelBuffer::new(width, height, Color32::TRANSPARENT),
            scratch_ready: false,
            background,
        })
    }

    pub fn width(&self) -> usize {
        self.primary.width()
    }

    pub fn height(&self) -> usize {
        self.primary.height()
    }

    pub fn primary(&self) -> &PixelBuffer {
        &self.primary
    }

    pub fn scratch(&self) -> &PixelBuffer {
        &self.scratch
    }

    pub fn scratch_ready(&self) -> bool {
        self.scratch_ready
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Changes the fill used by clears, cuts and newly exposed area.
    /// Existing pixels are left alone.
    pub fn set_background(&mut self, color: Color32) {
        self.background = color;
    }

    /// Copy of the pixels inside `rect` (normalized and clipped to the
    /// surface). Empty when the rect has no area or misses the surface.
    pub fn read_region(&self, rect: Rect) -> PixelBuffer {
        let region = PixelRect::from_rect(rect);
        if region.is_empty() {
            return PixelBuffer::empty();
        }
        self.primary.crop(region)
    }

    /// Overwrites the primary buffer with `pixels` at their native size,
    /// top-left corner at `origin`. Pixels falling off the surface are dropped.
    pub fn write_region(&mut self, origin: Pos2, pixels: &PixelBuffer) -> bool {
        if pixels.is_empty() {
            return false;
        }
        self.primary
            .blit(pixels, origin.x.round() as i32, origin.y.round() as i32);
        true
    }

    /// Fills `rect` with a solid color.
    pub fn clear_region(&mut self, rect: Rect, fill: Color32) -> bool {
        let region = PixelRect::from_rect(rect);
        if region.clip(self.width(), self.height()).is_none() {
            return false;
        }
        self.primary.fill_rect(region, fill);
        true
    }

    /// Fills the whole primary buffer with the background color.
    pub fn clear(&mut self) {
        self.primary.fill(self.background);
    }

    /// Strokes a segment straight into the committed pixels.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        draw::stroke_segment(&mut self.primary, from, to, width, color);
    }

    /// Copies the committed pixels into the scratch buffer and hands it out
    /// for drawing a preview on top.
    pub fn prepare_scratch(&mut self) -> &mut PixelBuffer {
        self.scratch.copy_from(&self.primary);
        self.scratch_ready = true;
        &mut self.scratch
    }

    /// Replaces the primary buffer with the finished preview, then drops the
    /// preview. Refused when no preview has been prepared since the last
    /// commit, discard or resize.
    pub fn composite_scratch_onto_primary(&mut self) -> bool {
        if !self.scratch_ready {
            debug!("Nothing to composite: scratch buffer holds no preview");
            return false;
        }
        self.primary.copy_from(&self.scratch);
        self.discard_scratch();
        true
    }

    pub fn discard_scratch(&mut self) {
        self.scratch.fill(Color32::TRANSPARENT);
        self.scratch_ready = false;
    }

    /// Replaces the primary buffer wholesale with a same-sized copy, or as much
    /// of it as overlaps when the sizes differ.
    pub fn restore_primary(&mut self, snapshot: &PixelBuffer) {
        if !self.primary.copy_from(snapshot) {
            self.primary.blit(snapshot, 0, 0);
        }
    }

    /// Reallocates both buffers. Old content is kept from the origin, clipped
    /// to the smaller size; new area gets the background color and the
    /// scratch buffer starts over empty.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == 0 || height == 0 {
            debug!("Ignoring resize to {width}x{height}");
            return false;
        }
        if width == self.width() && height == self.height() {
            return false;
        }
        let mut primary = PixelBuffer::new(width, height, self.background);
        primary.blit(&self.primary, 0, 0);
        self.primary = primary;
        self.scratch = PixelBuffer::new(width, height, Color32::TRANSPARENT);
        self.scratch_ready = false;
        info!("Surface resized to {width}x{height}");
        true
    }

    /// Encodes the primary buffer as PNG.
    pub fn export_png(&self) -> CanvasResult<Vec<u8>> {
        let image = self.to_rgba_image()?;
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Writes the primary buffer to `path` as PNG.
    pub fn save_png(&self, path: &Path) -> CanvasResult<()> {
        let bytes = self.export_png()?;
        std::fs::write(path, bytes)?;
        info!("Saved {}x{} image to {}", self.width(), self.height(), path.display());
        Ok(())
    }

    fn to_rgba_image(&self) -> CanvasResult<image::RgbaImage> {
        image::RgbaImage::from_raw(
            self.width() as u32,
            self.height() as u32,
            self.primary.to_rgba_bytes(),
        )
        .ok_or(CanvasError::InvalidDimensions {
            width: self.width(),
            height: self.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn surface() -> RasterSurface {
        RasterSurface::new(20, 10, Color32::WHITE).unwrap()
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            RasterSurface::new(0, 5, Color32::WHITE),
            Err(CanvasError::InvalidDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_read_region_normalizes_and_clips() {
        let mut s = surface();
        s.clear_region(Rect::from_min_max(pos2(15.0, 5.0), pos2(20.0, 10.0)), Color32::RED);
        let backwards = Rect::from_two_pos(pos2(25.0, 12.0), pos2(15.0, 5.0));
        let region = s.read_region(backwards);
        assert_eq!(region.size(), [5, 5]);
        assert!(region.pixels().iter().all(|p| *p == Color32::RED));
    }

    #[test]
    fn test_empty_region_reads_nothing() {
        let s = surface();
        let flat = Rect::from_min_max(pos2(3.0, 3.0), pos2(3.0, 8.0));
        assert!(s.read_region(flat).is_empty());
        let outside = Rect::from_min_max(pos2(50.0, 50.0), pos2(60.0, 60.0));
        assert!(s.read_region(outside).is_empty());
    }

    #[test]
    fn test_composite_requires_preview() {
        let mut s = surface();
        assert!(!s.composite_scratch_onto_primary());
        s.prepare_scratch().set(1, 1, Color32::BLACK);
        assert_eq!(s.primary().get(1, 1), Some(Color32::WHITE));
        assert!(s.composite_scratch_onto_primary());
        assert_eq!(s.primary().get(1, 1), Some(Color32::BLACK));
        assert!(!s.scratch_ready());
        assert!(s.scratch().pixels().iter().all(|p| *p == Color32::TRANSPARENT));
    }

    #[test]
    fn test_resize_drops_preview() {
        let mut s = surface();
        s.prepare_scratch();
        assert!(s.resize(30, 5));
        assert!(!s.scratch_ready());
        assert!(!s.composite_scratch_onto_primary());
        assert_eq!(s.primary().get(29, 4), Some(Color32::WHITE));
    }

    #[test]
    fn test_export_png_signature() {
        let bytes = surface().export_png().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
