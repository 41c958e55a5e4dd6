//! Outline rasterization: round-capped thick segments, polylines, circles and
//! the dashed selection marquee. Each call gathers the covered pixels first and
//! blends every pixel once, so joints of a translucent path do not darken.

use egui::{Color32, Pos2, Vec2, pos2, vec2};

use super::PixelBuffer;

/// Thinnest line that still covers a pixel row when centered on it.
const MIN_HALF_WIDTH: f32 = 0.5;

/// Distance from `point` to the segment `a..b`.
pub fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let line = b - a;
    let len_sq = line.length_sq();
    if len_sq == 0.0 {
        return (point - a).length();
    }
    let t = ((point - a).dot(line) / len_sq).clamp(0.0, 1.0);
    (point - (a + line * t)).length()
}

/// Strokes one segment with round caps.
pub fn stroke_segment(buf: &mut PixelBuffer, a: Pos2, b: Pos2, width: f32, color: Color32) {
    let mut coverage = Coverage::default();
    coverage.segment(buf, a, b, half_width(width));
    coverage.paint(buf, color);
}

/// Strokes consecutive points as one path, optionally closing it.
pub fn stroke_path(buf: &mut PixelBuffer, points: &[Pos2], closed: bool, width: f32, color: Color32) {
    let half = half_width(width);
    let mut coverage = Coverage::default();
    match points {
        [] => return,
        [only] => coverage.segment(buf, *only, *only, half),
        _ => {
            for pair in points.windows(2) {
                coverage.segment(buf, pair[0], pair[1], half);
            }
            if closed && points.len() > 2 {
                coverage.segment(buf, points[points.len() - 1], points[0], half);
            }
        }
    }
    coverage.paint(buf, color);
}

/// Strokes several independent segments as a single mark.
pub fn stroke_segments(buf: &mut PixelBuffer, segments: &[[Pos2; 2]], width: f32, color: Color32) {
    let half = half_width(width);
    let mut coverage = Coverage::default();
    for [a, b] in segments {
        coverage.segment(buf, *a, *b, half);
    }
    coverage.paint(buf, color);
}

/// Strokes a circle outline centered on `center`.
pub fn stroke_circle(buf: &mut PixelBuffer, center: Pos2, radius: f32, width: f32, color: Color32) {
    let half = half_width(width);
    let mut coverage = Coverage::default();
    let reach = vec2(radius + half, radius + half);
    for (x, y) in pixels_in(buf, center - reach, center + reach) {
        let d = (pixel_center(x, y) - center).length();
        if (d - radius).abs() <= half {
            coverage.push(x, y);
        }
    }
    coverage.paint(buf, color);
}

/// Strokes a rectangle outline with an on/off dash of `dash` units, walking
/// from `origin` along the signed extent like a canvas `strokeRect`.
pub fn stroke_dashed_rect(
    buf: &mut PixelBuffer,
    origin: Pos2,
    extent: Vec2,
    dash: f32,
    width: f32,
    color: Color32,
) {
    if extent.x == 0.0 && extent.y == 0.0 {
        return;
    }
    let corners = [
        origin,
        origin + vec2(extent.x, 0.0),
        origin + extent,
        origin + vec2(0.0, extent.y),
        origin,
    ];
    let half = half_width(width);
    let mut coverage = Coverage::default();
    let period = dash * 2.0;
    let mut travelled = 0.0_f32;
    for edge in corners.windows(2) {
        let (a, b) = (edge[0], edge[1]);
        let len = (b - a).length();
        if len == 0.0 {
            continue;
        }
        let dir = (b - a) / len;
        let mut t = 0.0_f32;
        while t < len {
            let phase = (travelled + t) % period;
            if phase < dash {
                let end = (t + dash - phase).min(len);
                coverage.segment(buf, a + dir * t, a + dir * end, half);
                t = end;
            } else {
                t += period - phase;
            }
        }
        travelled += len;
    }
    coverage.paint(buf, color);
}

fn half_width(width: f32) -> f32 {
    if width.is_finite() {
        (width * 0.5).max(MIN_HALF_WIDTH)
    } else {
        MIN_HALF_WIDTH
    }
}

fn pixel_center(x: i32, y: i32) -> Pos2 {
    pos2(x as f32 + 0.5, y as f32 + 0.5)
}

/// Pixels of `buf` whose cells intersect the box `min..max`.
fn pixels_in(buf: &PixelBuffer, min: Pos2, max: Pos2) -> impl Iterator<Item = (i32, i32)> {
    let x0 = min.x.floor().max(0.0) as i32;
    let y0 = min.y.floor().max(0.0) as i32;
    let x1 = (max.x.ceil() as i64).min(buf.width() as i64) as i32;
    let y1 = (max.y.ceil() as i64).min(buf.height() as i64) as i32;
    (y0..y1.max(y0)).flat_map(move |y| (x0..x1.max(x0)).map(move |x| (x, y)))
}

#[derive(Default)]
struct Coverage {
    cells: Vec<(i32, i32)>,
}

impl Coverage {
    fn push(&mut self, x: i32, y: i32) {
        self.cells.push((x, y));
    }

    fn segment(&mut self, buf: &PixelBuffer, a: Pos2, b: Pos2, half: f32) {
        let pad = vec2(half, half);
        let min = a.min(b) - pad;
        let max = a.max(b) + pad;
        for (x, y) in pixels_in(buf, min, max) {
            if distance_to_segment(pixel_center(x, y), a, b) <= half {
                self.cells.push((x, y));
            }
        }
    }

    fn paint(mut self, buf: &mut PixelBuffer, color: Color32) {
        self.cells.sort_unstable();
        self.cells.dedup();
        for (x, y) in self.cells {
            buf.blend(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> PixelBuffer {
        PixelBuffer::new(40, 40, Color32::WHITE)
    }

    #[test]
    fn test_distance_to_segment() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert_eq!(distance_to_segment(pos2(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(pos2(-4.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_segment(pos2(1.0, 1.0), a, a), 2.0_f32.sqrt());
    }

    #[test]
    fn test_horizontal_segment_covers_row() {
        let mut buf = canvas();
        stroke_segment(&mut buf, pos2(5.0, 10.5), pos2(30.0, 10.5), 1.0, Color32::BLACK);
        for x in 5..30 {
            assert_eq!(buf.get(x, 10), Some(Color32::BLACK), "x={x}");
        }
        assert_eq!(buf.get(15, 12), Some(Color32::WHITE));
        assert_eq!(buf.get(15, 8), Some(Color32::WHITE));
    }

    #[test]
    fn test_circle_outline_leaves_center() {
        let mut buf = canvas();
        stroke_circle(&mut buf, pos2(20.0, 20.0), 10.0, 2.0, Color32::RED);
        assert_eq!(buf.get(29, 19), Some(Color32::RED));
        assert_eq!(buf.get(19, 10), Some(Color32::RED));
        assert_eq!(buf.get(19, 19), Some(Color32::WHITE));
    }

    #[test]
    fn test_dashed_rect_alternates() {
        let mut buf = canvas();
        stroke_dashed_rect(&mut buf, pos2(0.0, 0.5), vec2(39.0, 30.0), 5.0, 1.0, Color32::BLUE);
        assert_eq!(buf.get(2, 0), Some(Color32::BLUE));
        assert_eq!(buf.get(7, 0), Some(Color32::WHITE));
        assert_eq!(buf.get(12, 0), Some(Color32::BLUE));
    }

    #[test]
    fn test_translucent_path_blends_once() {
        let mut buf = canvas();
        let ink = Color32::from_rgba_premultiplied(0, 0, 0, 128);
        let pts = [pos2(5.0, 5.5), pos2(20.0, 5.5), pos2(20.0, 25.0)];
        stroke_path(&mut buf, &pts, false, 3.0, ink);
        let corner = buf.get(19, 5).unwrap();
        let straight = buf.get(10, 5).unwrap();
        assert_eq!(corner, straight);
    }
}
