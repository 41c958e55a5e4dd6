use egui::{Pos2, Rect, Vec2};

/// A rectangle as a drag produces it: an origin at the anchor and a signed
/// extent toward the pointer. Width and height go negative when dragging up
/// or left; use [`DragRect::normalized`] before any area or pixel work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRect {
    pub origin: Pos2,
    pub extent: Vec2,
}

impl DragRect {
    pub fn new(origin: Pos2, extent: Vec2) -> Self {
        Self { origin, extent }
    }

    /// Zero-size rect at `anchor`, the start of every selection drag.
    pub fn at(anchor: Pos2) -> Self {
        Self::new(anchor, Vec2::ZERO)
    }

    pub fn from_corners(anchor: Pos2, current: Pos2) -> Self {
        Self::new(anchor, current - anchor)
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.extent.x
    }

    pub fn height(&self) -> f32 {
        self.extent.y
    }

    /// The corner opposite the origin.
    pub fn end(&self) -> Pos2 {
        self.origin + self.extent
    }

    /// Sets the extent so the rect reaches `current`, keeping the origin.
    pub fn resize_to(&mut self, current: Pos2) {
        self.extent = current - self.origin;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    /// Effective bounds: `[min, max]` of both corners on each axis.
    pub fn normalized(&self) -> Rect {
        Rect::from_two_pos(self.origin, self.end())
    }

    pub fn area(&self) -> f32 {
        (self.extent.x * self.extent.y).abs()
    }

    /// Inclusive inside-test on the normalized bounds.
    pub fn contains(&self, point: Pos2) -> bool {
        contains_inclusive(self.normalized(), point)
    }
}

/// Inclusive inside-test against the raw, non-normalized rect:
/// `x in [sel.x, sel.x + sel.width]`, same for y.
///
/// Never true for a point strictly inside a rect with negative width or
/// height; [`DragRect::contains`] is the one gestures use.
pub fn is_inside(point: Pos2, selection: &DragRect) -> bool {
    point.x >= selection.x()
        && point.x <= selection.x() + selection.width()
        && point.y >= selection.y()
        && point.y <= selection.y() + selection.height()
}

/// Edges count as inside.
pub fn contains_inclusive(rect: Rect, point: Pos2) -> bool {
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_normalized_negative_extent() {
        let rect = DragRect::new(pos2(30.0, 40.0), vec2(-20.0, -30.0));
        let bounds = rect.normalized();
        assert_eq!(bounds.min, pos2(10.0, 10.0));
        assert_eq!(bounds.max, pos2(30.0, 40.0));
        assert_eq!(rect.area(), 600.0);
    }

    #[test]
    fn test_edges_are_inside() {
        let rect = DragRect::from_corners(pos2(10.0, 10.0), pos2(30.0, 40.0));
        for p in [pos2(10.0, 10.0), pos2(30.0, 40.0), pos2(30.0, 10.0), pos2(20.0, 40.0)] {
            assert!(is_inside(p, &rect));
            assert!(rect.contains(p));
        }
        assert!(!is_inside(pos2(30.01, 20.0), &rect));
    }

    #[test]
    fn test_raw_test_misses_negative_rects() {
        let rect = DragRect::new(pos2(30.0, 40.0), vec2(-20.0, -30.0));
        let middle = pos2(20.0, 25.0);
        assert!(!is_inside(middle, &rect));
        assert!(rect.contains(middle));
    }

    #[test]
    fn test_resize_keeps_origin() {
        let mut rect = DragRect::at(pos2(5.0, 5.0));
        rect.resize_to(pos2(1.0, 9.0));
        assert_eq!(rect.origin, pos2(5.0, 5.0));
        assert_eq!(rect.extent, vec2(-4.0, 4.0));
    }
}
