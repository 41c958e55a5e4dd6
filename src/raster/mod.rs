//! Pixel storage and software rasterization.
//!
//! Pixels are [`Color32`] (premultiplied sRGBA). Coordinates follow the
//! canvas convention: pixel `(x, y)` covers `[x, x + 1) x [y, y + 1)` and its
//! center sits at `(x + 0.5, y + 0.5)`.

pub mod draw;
pub mod surface;

use egui::{Color32, ColorImage, Rect};

pub use surface::RasterSurface;

/// An integer pixel rectangle with non-negative size. Its origin may lie
/// outside a buffer; [`PixelRect::clip`] trims it to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// Snaps a float rect (already normalized) to whole pixels by rounding
    /// each edge.
    pub fn from_rect(rect: Rect) -> Self {
        let x0 = rect.min.x.round() as i32;
        let y0 = rect.min.y.round() as i32;
        let x1 = rect.max.x.round() as i32;
        let y1 = rect.max.y.round() as i32;
        Self {
            x: x0,
            y: y0,
            width: (x1 - x0).max(0) as usize,
            height: (y1 - y0).max(0) as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersection with a `width x height` buffer, `None` when nothing overlaps.
    pub fn clip(&self, width: usize, height: usize) -> Option<PixelRect> {
        let x0 = self.x.max(0) as i64;
        let y0 = self.y.max(0) as i64;
        let x1 = (self.x as i64 + self.width as i64).min(width as i64);
        let y1 = (self.y as i64 + self.height as i64).min(height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect::new(
            x0 as i32,
            y0 as i32,
            (x1 - x0) as usize,
            (y1 - y0) as usize,
        ))
    }
}

/// A row-major block of pixels.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color32>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, fill: Color32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Wraps existing pixels, `None` if the length does not match the size.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color32>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Overwrites one pixel; out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, color: Color32) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Source-over blends one pixel; out-of-bounds writes are dropped.
    pub fn blend(&mut self, x: i32, y: i32, color: Color32) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = blend_over(self.pixels[idx], color);
        }
    }

    pub fn fill(&mut self, color: Color32) {
        self.pixels.fill(color);
    }

    /// Fills `rect` (clipped) with a solid color.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color32) {
        let Some(clip) = rect.clip(self.width, self.height) else {
            return;
        };
        for row in clip.y as usize..clip.y as usize + clip.height {
            let start = row * self.width + clip.x as usize;
            self.pixels[start..start + clip.width].fill(color);
        }
    }

    /// Copies the part of `rect` that lies inside the buffer.
    pub fn crop(&self, rect: PixelRect) -> PixelBuffer {
        let Some(clip) = rect.clip(self.width, self.height) else {
            return PixelBuffer::empty();
        };
        let mut pixels = Vec::with_capacity(clip.width * clip.height);
        for row in clip.y as usize..clip.y as usize + clip.height {
            let start = row * self.width + clip.x as usize;
            pixels.extend_from_slice(&self.pixels[start..start + clip.width]);
        }
        PixelBuffer {
            width: clip.width,
            height: clip.height,
            pixels,
        }
    }

    /// Overwrites pixels with `src` placed at `(x, y)`; whatever falls outside
    /// this buffer is dropped.
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        let target = PixelRect::new(x, y, src.width, src.height);
        let Some(clip) = target.clip(self.width, self.height) else {
            return;
        };
        let src_x = (clip.x - x) as usize;
        let src_y = (clip.y - y) as usize;
        for row in 0..clip.height {
            let src_start = (src_y + row) * src.width + src_x;
            let dst_start = (clip.y as usize + row) * self.width + clip.x as usize;
            self.pixels[dst_start..dst_start + clip.width]
                .copy_from_slice(&src.pixels[src_start..src_start + clip.width]);
        }
    }

    /// Copies every pixel from a buffer of identical size.
    pub fn copy_from(&mut self, other: &PixelBuffer) -> bool {
        if self.size() != other.size() {
            return false;
        }
        self.pixels.copy_from_slice(&other.pixels);
        true
    }

    pub fn to_color_image(&self) -> ColorImage {
        let mut image = ColorImage::new(self.size(), Color32::TRANSPARENT);
        image.pixels.copy_from_slice(&self.pixels);
        image
    }

    /// Unmultiplied RGBA bytes, the layout image encoders expect.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| p.to_srgba_unmultiplied())
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}

/// Source-over compositing of premultiplied colors.
pub fn blend_over(dst: Color32, src: Color32) -> Color32 {
    let src_a = src.a() as u32;
    if src_a == 255 {
        return src;
    }
    if src_a == 0 {
        return dst;
    }
    let inv = 255 - src_a;
    let mix = |s: u8, d: u8| (s as u32 + (d as u32 * inv + 127) / 255).min(255) as u8;
    Color32::from_rgba_premultiplied(
        mix(src.r(), dst.r()),
        mix(src.g(), dst.g()),
        mix(src.b(), dst.b()),
        mix(src.a(), dst.a()),
    )
}
