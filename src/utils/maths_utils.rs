//! Small geometry helpers shared by the overlay layers.

use crate::domain::Point;

/// Arithmetic mean of the vertices. `None` for an empty slice.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Triangle for an arrowhead at `tip`, pointing along `from -> tip`.
/// The two back corners sit `size` away from the tip, `half_angle` either side of the shaft.
pub fn arrowhead(from: Point, tip: Point, size: f32, half_angle: f32) -> [Point; 3] {
    let angle = (tip.y - from.y).atan2(tip.x - from.x);
    let back = |a: f32| Point::new(tip.x - size * a.cos(), tip.y - size * a.sin());
    [tip, back(angle - half_angle), back(angle + half_angle)]
}

/// Upper bound on the segments one hatched box may produce.
pub const MAX_HATCH_LINES: usize = 4096;

/// Diagonal hatching clipped to a `width` x `height` box at `origin`.
///
/// Emits one segment per diagonal `x + y = offset + k * pitch` (box-local), from the
/// top/right edge down to the left/bottom edge. `offset` keeps the stripe phase of a
/// larger box when only part of it is hatched.
pub fn hatch_segments(origin: Point, width: f32, height: f32, pitch: f32, offset: f32) -> Vec<(Point, Point)> {
    let span = width + height;
    if !(pitch > 0.0 && width > 0.0 && height > 0.0 && span.is_finite() && offset >= 0.0) {
        return Vec::new();
    }
    let count = (((span - offset) / pitch).ceil().max(0.0) as usize).min(MAX_HATCH_LINES);

    (0..count)
        .map(|k| {
            let i = offset + k as f32 * pitch;
            let from = Point::new(origin.x + i.min(width), origin.y + (i - width).max(0.0));
            let to = Point::new(origin.x + (i - height).max(0.0), origin.y + i.min(height));
            (from, to)
        })
        .collect()
}

/// Six-vertex lightning bolt centred on `at`, 24px tall.
pub fn lightning_bolt(at: Point) -> [Point; 6] {
    [
        at.offset(0.0, -12.0),
        at.offset(-6.0, 0.0),
        at.offset(2.0, 0.0),
        at.offset(-2.0, 12.0),
        at.offset(6.0, 0.0),
        at.offset(-2.0, 0.0),
    ]
}

/// Upward take-profit triangle centred on `at`.
pub fn up_triangle(at: Point) -> [Point; 3] {
    [at.offset(0.0, -8.0), at.offset(-7.0, 6.0), at.offset(7.0, 6.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn centroid_of_square() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(centroid(&pts), Some(Point::new(5.0, 5.0)));
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn horizontal_arrowhead_is_symmetric() {
        let [tip, a, b] = arrowhead(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            12.0,
            std::f32::consts::FRAC_PI_6,
        );
        assert_eq!(tip, Point::new(100.0, 0.0));
        let dx = 12.0 * std::f32::consts::FRAC_PI_6.cos();
        let dy = 12.0 * std::f32::consts::FRAC_PI_6.sin();
        assert!(close(a, Point::new(100.0 - dx, dy)));
        assert!(close(b, Point::new(100.0 - dx, -dy)));
    }

    #[test]
    fn hatch_covers_box_diagonally() {
        let segs = hatch_segments(Point::new(0.0, 0.0), 20.0, 10.0, 10.0, 0.0);
        // i = 0, 10, 20
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], (Point::new(0.0, 0.0), Point::new(0.0, 0.0)));
        assert_eq!(segs[1], (Point::new(10.0, 0.0), Point::new(0.0, 10.0)));
        assert_eq!(segs[2], (Point::new(20.0, 0.0), Point::new(10.0, 10.0)));
        assert!(hatch_segments(Point::new(0.0, 0.0), 0.0, 10.0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn hatch_offset_shifts_the_stripe_phase() {
        let segs = hatch_segments(Point::new(100.0, 50.0), 20.0, 10.0, 10.0, 4.0);
        // i = 4, 14, 24
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], (Point::new(104.0, 50.0), Point::new(100.0, 54.0)));
        assert_eq!(segs[2], (Point::new(120.0, 54.0), Point::new(114.0, 60.0)));
    }

    #[test]
    fn hatch_line_count_is_bounded() {
        let segs = hatch_segments(Point::new(0.0, 0.0), 1e9, 40.0, 10.0, 0.0);
        assert_eq!(segs.len(), MAX_HATCH_LINES);

        assert!(hatch_segments(Point::new(0.0, 0.0), f32::INFINITY, 40.0, 10.0, 0.0).is_empty());
        assert!(hatch_segments(Point::new(0.0, 0.0), 20.0, f32::NAN, 10.0, 0.0).is_empty());
        assert!(hatch_segments(Point::new(0.0, 0.0), 20.0, 10.0, 0.0, 0.0).is_empty());
    }
}
