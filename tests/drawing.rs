use egui::{Color32, Pos2, Rect, pos2, vec2};
use raster_paint::tools::{Gesture, GestureKind};
use raster_paint::{Canvas, CanvasEvent, PointerButtons, RasterSurface, Tool};

fn canvas_with(tool: Tool) -> Canvas {
    let mut canvas = Canvas::with_size(120, 80);
    canvas.tools.active_tool = tool;
    canvas.tools.primary_color = Color32::RED;
    canvas.tools.brush_size = 2.0;
    canvas
}

fn pixel(canvas: &Canvas, x: usize, y: usize) -> Option<Color32> {
    canvas.surface().unwrap().primary().get(x, y)
}

#[test]
fn test_stroke_extends_through_every_point() {
    let mut canvas = canvas_with(Tool::Brush);
    let intermediate: Vec<Pos2> = (1..=5).map(|i| pos2(i as f32 * 10.0 / 6.0, i as f32 * 10.0 / 6.0)).collect();

    canvas.pointer_down(pos2(0.0, 0.0), PointerButtons::PRIMARY);
    for p in &intermediate {
        canvas.pointer_move(*p);
    }
    canvas.pointer_move(pos2(10.0, 10.0));

    let Gesture::Stroking { path, .. } = canvas.gesture() else {
        panic!("stroke should still be open");
    };
    assert_eq!(path.first(), Some(&pos2(0.0, 0.0)));
    assert_eq!(&path[1..6], intermediate.as_slice());
    assert_eq!(path.last(), Some(&pos2(10.0, 10.0)));

    // Every pixel along the diagonal is painted, so no segment is detached
    // from the next.
    for k in 0..10 {
        assert_eq!(pixel(&canvas, k, k), Some(Color32::RED), "gap at {k}");
    }
    canvas.pointer_up();
    assert!(canvas.gesture().is_idle());
}

#[test]
fn test_square_commit_lands_on_bounds() {
    let mut canvas = canvas_with(Tool::Square);
    canvas.pointer_down(pos2(0.0, 0.0), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(50.0, 30.0));
    canvas.pointer_up();

    for (x, y) in [(0, 15), (25, 0), (49, 15), (50, 15), (25, 29), (25, 30)] {
        assert_eq!(pixel(&canvas, x, y), Some(Color32::RED), "outline missing at ({x}, {y})");
    }
    for (x, y) in [(25, 15), (2, 15), (25, 2), (53, 15), (25, 33)] {
        assert_eq!(pixel(&canvas, x, y), Some(Color32::WHITE), "stray ink at ({x}, {y})");
    }

    let surface = canvas.surface().unwrap();
    assert!(!surface.scratch_ready());
    assert!(surface.scratch().pixels().iter().all(|p| *p == Color32::TRANSPARENT));
    assert_eq!(canvas.frame().unwrap(), *surface.primary());
}

#[test]
fn test_shape_preview_follows_pointer() {
    let mut canvas = canvas_with(Tool::Square);
    canvas.pointer_down(pos2(10.0, 10.0), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(100.0, 70.0));
    canvas.pointer_move(pos2(30.0, 30.0));
    canvas.pointer_up();
    // Only the last outline survives.
    assert_eq!(pixel(&canvas, 100, 40), Some(Color32::WHITE));
    assert_eq!(pixel(&canvas, 30, 20), Some(Color32::RED));
}

#[test]
fn test_leaving_canvas_commits_shape() {
    let mut canvas = canvas_with(Tool::Square);
    let recorder = raster_paint::event::EventRecorder::new();
    let events = recorder.events();
    canvas.subscribe(Box::new(recorder));

    canvas.pointer_down(pos2(10.0, 10.0), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(60.0, 60.0));
    canvas.pointer_leave();

    let surface = canvas.surface().unwrap();
    let red = surface.primary().pixels().iter().filter(|p| **p == Color32::RED).count();
    assert!(red > 0, "leave dropped the outline");
    assert_eq!(pixel(&canvas, 10, 35), Some(Color32::RED));
    assert_eq!(pixel(&canvas, 35, 35), Some(Color32::WHITE));
    assert!(canvas.gesture().is_idle());
    assert_eq!(
        events.borrow().last(),
        Some(&CanvasEvent::GestureEnded {
            kind: GestureKind::Shape,
            committed: true
        })
    );
}

#[test]
fn test_clear_canvas_discards_shape_preview() {
    let mut canvas = canvas_with(Tool::Circle);
    canvas.pointer_down(pos2(10.0, 10.0), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(60.0, 60.0));
    assert!(canvas.clear_canvas());
    canvas.pointer_up();

    let surface = canvas.surface().unwrap();
    assert!(surface.primary().pixels().iter().all(|p| *p == Color32::WHITE));
    assert!(!surface.scratch_ready());
}

#[test]
fn test_brush_keeps_screen_width_when_zoomed() {
    let mut canvas = canvas_with(Tool::Brush);
    canvas.tools.brush_size = 8.0;
    canvas.zoom_at(pos2(0.0, 0.0), 2.0);
    canvas.pointer_down(pos2(20.0, 40.0), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(200.0, 40.0));
    // Buffer row 20, four buffer pixels wide.
    assert_eq!(pixel(&canvas, 50, 18), Some(Color32::RED));
    assert_eq!(pixel(&canvas, 50, 21), Some(Color32::RED));
    assert_eq!(pixel(&canvas, 50, 23), Some(Color32::WHITE));
}

#[test]
fn test_resize_mid_shape_drag_commits_nothing_stale() {
    let mut canvas = canvas_with(Tool::Circle);
    canvas.pointer_down(pos2(10.0, 10.0), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(60.0, 60.0));
    assert!(canvas.resize(200, 100));
    canvas.pointer_up();

    let surface = canvas.surface().unwrap();
    assert_eq!(surface.width(), 200);
    assert!(surface.primary().pixels().iter().all(|p| *p == Color32::WHITE));
}

#[test]
fn test_png_export_decodes_to_surface_pixels() {
    let mut canvas = canvas_with(Tool::Brush);
    canvas.pointer_down(pos2(5.0, 5.5), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(40.0, 5.5));
    canvas.pointer_up();

    let bytes = canvas.export_png().unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
    assert_eq!(decoded.dimensions(), (120, 80));
    assert_eq!(decoded.get_pixel(20, 5).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(20, 40).0, [255, 255, 255, 255]);
}

#[test]
fn test_zero_sized_surface_is_rejected() {
    assert!(RasterSurface::new(0, 0, Color32::WHITE).is_err());
    let mut canvas = Canvas::new();
    assert!(!canvas.resize(0, 10));
    assert!(!canvas.is_initialized());
    let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(4.0, 4.0));
    assert!(canvas.surface().map(|s| s.read_region(rect)).is_err());
}
