use egui::{Color32, Pos2, pos2, vec2};
use serde::{Deserialize, Serialize};

use crate::raster::{RasterSurface, draw};

/// Half-angle between the arrow shaft and each head stroke.
const ARROW_HEAD_ANGLE: f32 = std::f32::consts::PI / 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Arrow,
}

/// Outline of a shape in buffer coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Circle { center: Pos2, radius: f32 },
    /// Closed polygon
    Polygon(Vec<Pos2>),
    /// Open segments drawn as one mark
    Segments(Vec<[Pos2; 2]>),
}

/// Geometry dragged out from `anchor` to `current`. `head_length` only
/// matters for arrows.
pub fn geometry(kind: ShapeKind, anchor: Pos2, current: Pos2, head_length: f32) -> ShapeGeometry {
    let w = current.x - anchor.x;
    let h = current.y - anchor.y;
    match kind {
        ShapeKind::Circle => ShapeGeometry::Circle {
            center: anchor + vec2(w, h) / 2.0,
            radius: (w * w + h * h).sqrt() / 2.0,
        },
        ShapeKind::Square => ShapeGeometry::Polygon(vec![
            anchor,
            pos2(anchor.x + w, anchor.y),
            current,
            pos2(anchor.x, anchor.y + h),
        ]),
        ShapeKind::Triangle => ShapeGeometry::Polygon(vec![
            pos2(anchor.x, anchor.y + h),
            pos2(anchor.x + w, anchor.y + h),
            pos2(anchor.x + w / 2.0, anchor.y),
        ]),
        ShapeKind::Arrow => {
            let angle = h.atan2(w);
            let barb = |theta: f32| current - vec2(theta.cos(), theta.sin()) * head_length;
            ShapeGeometry::Segments(vec![
                [anchor, current],
                [current, barb(angle - ARROW_HEAD_ANGLE)],
                [current, barb(angle + ARROW_HEAD_ANGLE)],
            ])
        }
    }
}

/// Draws live shape outlines into the surface's scratch buffer.
///
/// Every call starts from a fresh copy of the committed pixels, so only the
/// latest outline is ever visible.
#[derive(Debug, Clone, Copy)]
pub struct ShapePreviewRenderer {
    /// Arrow head length in screen pixels
    pub head_length: f32,
}

impl Default for ShapePreviewRenderer {
    fn default() -> Self {
        Self { head_length: 10.0 }
    }
}

impl ShapePreviewRenderer {
    /// `line_width` is in buffer units; `scale` converts the screen-sized arrow
    /// head into buffer units.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        surface: &mut RasterSurface,
        kind: ShapeKind,
        anchor: Pos2,
        current: Pos2,
        color: Color32,
        line_width: f32,
        scale: f32,
    ) {
        let shape = geometry(kind, anchor, current, self.head_length / scale);
        let scratch = surface.prepare_scratch();
        match shape {
            ShapeGeometry::Circle { center, radius } => {
                draw::stroke_circle(scratch, center, radius, line_width, color);
            }
            ShapeGeometry::Polygon(points) => {
                draw::stroke_path(scratch, &points, true, line_width, color);
            }
            ShapeGeometry::Segments(segments) => {
                draw::stroke_segments(scratch, &segments, line_width, color);
            }
        }
    }
}
