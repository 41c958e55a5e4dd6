use egui::{Color32, Rect, pos2, vec2};
use raster_paint::geometry::is_inside;
use raster_paint::{Canvas, DragRect, PixelBuffer, PointerButtons, RasterSurface, SelectionModel, Tool};

/// A surface where every pixel differs from its neighbours.
fn patterned_surface(width: usize, height: usize) -> RasterSurface {
    let mut surface = RasterSurface::new(width, height, Color32::WHITE).unwrap();
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| Color32::from_rgb((x % 251) as u8, (y % 241) as u8, ((x * 7 + y * 3) % 256) as u8)))
        .collect();
    let pattern = PixelBuffer::from_pixels(width, height, pixels).unwrap();
    surface.write_region(pos2(0.0, 0.0), &pattern);
    surface
}

#[test]
fn test_copy_paste_is_bit_exact() {
    let mut surface = patterned_surface(100, 100);
    let mut model = SelectionModel::new();
    model.start_selection(pos2(10.0, 10.0));
    model.resize_selection(pos2(30.0, 40.0));
    assert!(model.copy(&surface));
    let original = surface.read_region(Rect::from_min_max(pos2(10.0, 10.0), pos2(30.0, 40.0)));
    assert_eq!(original.size(), [20, 30]);

    model.start_selection(pos2(60.0, 50.0));
    model.resize_selection(pos2(65.0, 55.0));
    assert!(model.paste(&mut surface));

    let pasted = surface.read_region(Rect::from_min_size(pos2(60.0, 50.0), vec2(20.0, 30.0)));
    assert_eq!(pasted, original);
    assert_eq!(model.clipboard(), Some(&original));
}

#[test]
fn test_cut_leaves_background_and_keeps_pixels() {
    let mut surface = patterned_surface(64, 48);
    surface.set_background(Color32::from_rgb(0xfe, 0xf3, 0xc7));
    let bounds = Rect::from_min_max(pos2(8.0, 4.0), pos2(40.0, 20.0));
    let before = surface.read_region(bounds);

    let mut model = SelectionModel::new();
    // Dragged up and left: the cut still covers the normalized rect.
    model.start_selection(bounds.max);
    model.resize_selection(bounds.min);
    assert!(model.cut(&mut surface));

    assert_eq!(model.clipboard(), Some(&before));
    let after = surface.read_region(bounds);
    assert!(after.pixels().iter().all(|p| *p == surface.background()));
    // Outside the selection nothing changed.
    assert_eq!(
        surface.primary().get(41, 10),
        Some(Color32::from_rgb(41, 10, ((41 * 7 + 10 * 3) % 256) as u8))
    );
}

#[test]
fn test_resize_keeps_overlap() {
    let mut surface = patterned_surface(800, 600);
    let before = surface.primary().clone();
    assert!(surface.resize(1000, 500));

    let after = surface.primary();
    assert_eq!(after.size(), [1000, 500]);
    for y in 0..500 {
        for x in 0..800 {
            assert_eq!(after.get(x, y), before.get(x, y), "pixel ({x}, {y}) changed");
        }
        for x in 800..1000 {
            assert_eq!(after.get(x, y), Some(Color32::WHITE));
        }
    }
}

#[test]
fn test_inside_test_includes_edges() {
    let sel = DragRect::new(pos2(10.0, 10.0), vec2(20.0, 30.0));
    for corner in [pos2(10.0, 10.0), pos2(30.0, 10.0), pos2(10.0, 40.0), pos2(30.0, 40.0)] {
        assert!(is_inside(corner, &sel), "{corner:?}");
        assert!(sel.contains(corner), "{corner:?}");
    }
    assert!(is_inside(pos2(20.0, 40.0), &sel));
    assert!(!is_inside(pos2(30.01, 20.0), &sel));
    assert!(!is_inside(pos2(20.0, 9.99), &sel));
}

#[test]
fn test_raw_inside_test_misses_backward_drag() {
    let backwards = DragRect::new(pos2(30.0, 40.0), vec2(-20.0, -30.0));
    let middle = pos2(20.0, 25.0);
    assert!(!is_inside(middle, &backwards));
    assert!(backwards.contains(middle));
}

#[test]
fn test_canvas_move_drag_has_no_trail() {
    let mut canvas = Canvas::with_size(100, 60);
    canvas.tools.active_tool = Tool::Square;
    canvas.tools.primary_color = Color32::BLACK;
    canvas.pointer_down(pos2(10.0, 10.0), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(30.0, 30.0));
    canvas.pointer_up();
    let black_before = count(&canvas, Color32::BLACK);

    canvas.tools.active_tool = Tool::Select;
    canvas.pointer_down(pos2(5.0, 5.0), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(35.0, 35.0));
    canvas.pointer_up();

    canvas.tools.active_tool = Tool::Move;
    canvas.pointer_down(pos2(20.0, 20.0), PointerButtons::PRIMARY);
    for step in 1..=20 {
        canvas.pointer_move(pos2(20.0 + step as f32 * 2.0, 20.0 + step as f32 * 0.5));
    }
    canvas.pointer_up();

    assert_eq!(count(&canvas, Color32::BLACK), black_before);
    assert_eq!(canvas.selection().unwrap().origin, pos2(45.0, 15.0));
}

#[test]
fn test_menu_move_is_destructive_one_shot() {
    let mut canvas = Canvas::with_size(60, 60);
    canvas.tools.active_tool = Tool::Select;
    canvas.pointer_down(pos2(10.0, 10.0), PointerButtons::PRIMARY);
    canvas.pointer_move(pos2(20.0, 20.0));
    canvas.pointer_up();
    assert!(canvas.move_selection(vec2(5.0, 5.0)));
    assert_eq!(canvas.selection().unwrap().origin, pos2(15.0, 15.0));

    assert!(canvas.clear_selection());
    assert!(!canvas.move_selection(vec2(5.0, 5.0)));
    assert!(!canvas.copy());
    assert!(!canvas.cut());
}

fn count(canvas: &Canvas, color: Color32) -> usize {
    canvas
        .surface()
        .unwrap()
        .primary()
        .pixels()
        .iter()
        .filter(|p| **p == color)
        .count()
}
