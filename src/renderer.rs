// src/renderer.rs
use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke as EguiStroke};

use crate::state::{GridState, BACKGROUND_COLOR};
use crate::surface::DrawingSurface;

/// Grid line colour, a faint blue
pub const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(6, 13, 25, 26);
pub const CANVAS_BORDER_COLOR: Color32 = Color32::from_rgb(0xbf, 0xdb, 0xfe);

/// Paints the white background, the optional grid, every committed stroke,
/// and the stroke being drawn. `rect` is the canvas in screen space.
pub fn render_canvas(painter: &Painter, rect: Rect, surface: &DrawingSurface, grid: &GridState) {
    painter.rect_filled(rect, 4.0, BACKGROUND_COLOR);

    if grid.visible {
        render_grid(painter, rect, grid.cell_size as f32);
    }

    let painter = painter.with_clip_rect(rect);
    let offset = rect.min.to_vec2();
    for stroke in surface.strokes() {
        let on_screen = stroke.translated(offset);
        render_stroke(&painter, on_screen.points(), on_screen.color(), on_screen.radius());
    }
    if let Some(current) = surface.current_stroke() {
        let points: Vec<Pos2> = current.points().iter().map(|p| *p + offset).collect();
        render_stroke(&painter, &points, current.color(), current.radius());
    }

    painter.rect_stroke(rect, 4.0, EguiStroke::new(1.0, CANVAS_BORDER_COLOR));
}

/// Vertical and horizontal 1px lines every `cell_size` points from the top-left corner.
pub fn render_grid(painter: &Painter, rect: Rect, cell_size: f32) {
    if cell_size <= 0.0 {
        return;
    }
    let stroke = EguiStroke::new(1.0, GRID_COLOR);

    let mut x = rect.left();
    while x <= rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += cell_size;
    }
    let mut y = rect.top();
    while y <= rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += cell_size;
    }
}

/// Round-capped polyline of the given brush radius, or a dot for a single point.
pub fn render_stroke(painter: &Painter, points: &[Pos2], color: Color32, radius: f32) {
    match points {
        [] => {}
        [single] => {
            painter.circle_filled(*single, radius, color);
        }
        [first, .., last] => {
            painter.add(Shape::line(points.to_vec(), EguiStroke::new(radius * 2.0, color)));
            painter.circle_filled(*first, radius, color);
            painter.circle_filled(*last, radius, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    // Paints into a background layer during one frame and returns the shapes
    fn painted(paint: impl Fn(&Painter, Rect)) -> Vec<Shape> {
        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let output = ctx.run(Default::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            paint(&painter, rect);
        });
        output.shapes.into_iter().map(|clipped| clipped.shape).collect()
    }

    fn count(shapes: &[Shape], pred: impl Fn(&Shape) -> bool) -> usize {
        shapes.iter().filter(|s| pred(s)).count()
    }

    #[test]
    fn test_render_canvas_paints_grid_strokes_and_live_stroke() {
        let mut surface = DrawingSurface::with_size(100, 100);
        surface.begin_stroke(pos2(10.0, 10.0), &Default::default());
        surface.extend_stroke(pos2(40.0, 40.0));
        surface.end_stroke();
        surface.begin_stroke(pos2(50.0, 50.0), &Default::default());

        let shapes = painted(|painter, rect| render_canvas(painter, rect, &surface, &GridState::default()));

        // 40px cells over 100px: lines at 0, 40 and 80 in each direction
        assert_eq!(count(&shapes, |s| matches!(s, Shape::LineSegment { .. })), 6);
        // One polyline for the committed stroke
        assert_eq!(count(&shapes, |s| matches!(s, Shape::Path(_))), 1);
        // Two end caps plus the single-point live stroke
        assert_eq!(count(&shapes, |s| matches!(s, Shape::Circle(_))), 3);
        // Background and border
        assert_eq!(count(&shapes, |s| matches!(s, Shape::Rect(_))), 2);
    }

    #[test]
    fn test_hidden_grid_is_not_painted() {
        let surface = DrawingSurface::with_size(100, 100);
        let grid = GridState::default().toggled();
        let shapes = painted(|painter, rect| render_canvas(painter, rect, &surface, &grid));
        assert_eq!(count(&shapes, |s| matches!(s, Shape::LineSegment { .. })), 0);
    }

    #[test]
    fn test_grid_color_is_translucent_blue() {
        let unmultiplied = GRID_COLOR.to_srgba_unmultiplied();
        assert_eq!(unmultiplied[3], 26);
        assert!(unmultiplied[2] > unmultiplied[0]);
    }

    #[test]
    fn test_zero_cell_size_draws_nothing() {
        let shapes = painted(|painter, rect| render_grid(painter, rect, 0.0));
        assert!(shapes.is_empty());
    }
}
