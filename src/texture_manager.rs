use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::canvas::Canvas;

/// One GPU texture that is re-uploaded only when its key changes.
#[derive(Default)]
struct CachedTexture<K> {
    key: Option<K>,
    handle: Option<TextureHandle>,
}

impl<K: PartialEq> CachedTexture<K> {
    fn get_or_upload<F>(&mut self, ctx: &Context, name: &str, key: K, generator: F) -> Option<TextureId>
    where
        F: FnOnce() -> Option<ColorImage>,
    {
        if self.key.as_ref() == Some(&key) {
            return self.handle.as_ref().map(|h| h.id());
        }
        let Some(image) = generator() else {
            self.key = None;
            self.handle = None;
            return None;
        };
        let size = image.size;
        if let Some(handle) = self.handle.as_mut().filter(|h| h.size() == size) {
            handle.set(image, TextureOptions::NEAREST);
        } else {
            self.handle = Some(ctx.load_texture(name, image, TextureOptions::NEAREST));
        }
        self.key = Some(key);
        self.handle.as_ref().map(|h| h.id())
    }
}

/// Keeps the canvas frame and grid layer on the GPU.
#[derive(Default)]
pub struct TextureManager {
    frame: CachedTexture<u64>,
    grid: CachedTexture<[usize; 2]>,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("frame_revision", &self.frame.key)
            .field("grid_size", &self.grid.key)
            .finish()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture of [`Canvas::frame`], uploaded again when the revision moves.
    pub fn frame_texture(&mut self, ctx: &Context, canvas: &Canvas) -> Option<TextureId> {
        self.frame
            .get_or_upload(ctx, "raster_paint_frame", canvas.revision(), || canvas.frame_image())
    }

    /// Texture of the grid layer, `None` while the grid is hidden.
    pub fn grid_texture(&mut self, ctx: &Context, canvas: &Canvas) -> Option<TextureId> {
        let grid = canvas.grid();
        if !grid.visible() {
            return None;
        }
        self.grid
            .get_or_upload(ctx, "raster_paint_grid", grid.layer().size(), || grid.to_color_image())
    }
}
