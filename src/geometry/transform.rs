use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom the view accepts. Below this the buffer collapses to a few
/// screen pixels and the screen/buffer round trip loses precision.
pub const MIN_SCALE: f32 = 0.05;
/// Largest zoom the view accepts.
pub const MAX_SCALE: f32 = 32.0;

/// Zoom factor applied per wheel notch toward the viewer.
pub const WHEEL_ZOOM_IN: f32 = 1.1;
/// Zoom factor applied per wheel notch away from the viewer.
pub const WHEEL_ZOOM_OUT: f32 = 0.9;

/// Maps screen space onto buffer space under pan and zoom:
/// `screen = buffer * scale + translation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Screen-space offset of the buffer origin
    pub translation: Vec2,
    /// Screen pixels per buffer pixel, always within `[MIN_SCALE, MAX_SCALE]`
    scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: 1.0,
        }
    }

    /// Builds a transform, clamping `scale` into the supported range.
    pub fn new(translation: Vec2, scale: f32) -> Self {
        Self {
            translation,
            scale: clamp_scale(scale),
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_buffer(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.translation) / self.scale).to_pos2()
    }

    pub fn to_screen(&self, buffer: Pos2) -> Pos2 {
        (buffer.to_vec2() * self.scale + self.translation).to_pos2()
    }

    /// Zooms by `factor` keeping the buffer point under `screen` fixed.
    ///
    /// The factor is reduced when it would push the scale out of range, so the
    /// anchor stays put even at the limits. Returns false when nothing changed.
    pub fn zoom_at(&mut self, screen: Pos2, factor: f32) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let new_scale = clamp_scale(self.scale * factor);
        let effective = new_scale / self.scale;
        if (effective - 1.0).abs() <= f32::EPSILON {
            return false;
        }
        self.translation -= (screen.to_vec2() - self.translation) * (effective - 1.0);
        self.scale = new_scale;
        true
    }

    /// Zooms around the translation origin, as the zoom buttons do.
    pub fn zoom_by(&mut self, factor: f32) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let new_scale = clamp_scale(self.scale * factor);
        let changed = new_scale != self.scale;
        self.scale = new_scale;
        changed
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// Back to 100% without touching the pan offset.
    pub fn reset_zoom(&mut self) {
        self.scale = 1.0;
    }

    /// Converts a screen-space length into buffer units.
    pub fn screen_len_to_buffer(&self, len: f32) -> f32 {
        len / self.scale
    }
}

/// Zoom factor for a wheel event, `None` when the wheel did not move vertically.
pub fn wheel_zoom_factor(delta_y: f32) -> Option<f32> {
    if delta_y < 0.0 {
        Some(WHEEL_ZOOM_IN)
    } else if delta_y > 0.0 {
        Some(WHEEL_ZOOM_OUT)
    } else {
        None
    }
}

fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    }
}
