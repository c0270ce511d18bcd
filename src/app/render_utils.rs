use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, pos2};

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(21, 24, 30));

    let step = (64.0 * zoom).clamp(24.0, 160.0);
    let origin = rect.center() + pan;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(58, 66, 78, 55));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Conservative bounding-box cull for straight segments and sampled curves.
pub(super) fn span_visible(rect: Rect, points: &[Pos2], padding: f32) -> bool {
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for point in points {
        min_x = min_x.min(point.x);
        max_x = max_x.max(point.x);
        min_y = min_y.min(point.y);
        max_y = max_y.max(point.y);
    }

    !(max_x + padding < rect.left()
        || min_x - padding > rect.right()
        || max_y + padding < rect.top()
        || min_y - padding > rect.bottom())
}

/// Point on the quadratic Bezier defined by `start`, `control`, `end`.
pub(super) fn quadratic_point(start: Vec2, control: Vec2, end: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    start * (u * u) + control * (2.0 * u * t) + end * (t * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    #[test]
    fn quadratic_interpolates_endpoints_and_midpoint() {
        let start = vec2(0.0, 0.0);
        let control = vec2(50.0, 100.0);
        let end = vec2(100.0, 0.0);

        assert_eq!(quadratic_point(start, control, end, 0.0), start);
        assert_eq!(quadratic_point(start, control, end, 1.0), end);

        let mid = quadratic_point(start, control, end, 0.5);
        assert!((mid - vec2(50.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn span_visible_rejects_fully_offscreen_geometry() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(span_visible(rect, &[pos2(-10.0, 50.0), pos2(50.0, 50.0)], 0.0));
        assert!(!span_visible(
            rect,
            &[pos2(-50.0, -50.0), pos2(-10.0, -10.0)],
            0.0
        ));
    }
}
