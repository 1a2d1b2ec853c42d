//! Coordinate spaces for overlay drawing.
//!
//! Overlay geometry arrives in a fixed reference frame ([`REFERENCE_FRAME`], 800×600)
//! regardless of the chart image resolution. Everything that ends up on a surface goes
//! through [`ScaleFactors`], obtained from [`ReferenceFrame::scale_to`].

/// A position in surface pixels (or reference units before scaling).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The part of this rect that lands on a `size` surface, with negative
    /// extents flipped. `None` when no finite area is visible.
    pub fn clipped_to(&self, size: SurfaceSize) -> Option<Rect> {
        let (x0, x1) = span(self.x, self.width);
        let (y0, y1) = span(self.y, self.height);
        if [x0, x1, y0, y1].iter().any(|v| v.is_nan()) {
            return None;
        }
        let (left, right) = (x0.max(0.0), x1.min(size.width as f32));
        let (top, bottom) = (y0.max(0.0), y1.min(size.height as f32));
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

fn span(origin: f32, extent: f32) -> (f32, f32) {
    let end = origin + extent;
    (origin.min(end), origin.max(end))
}

/// Pixel dimensions of a raster (chart image or drawing surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The coordinate space overlay producers write in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    pub width: f32,
    pub height: f32,
}

/// Every overlay coordinate is expressed against this frame.
pub const REFERENCE_FRAME: ReferenceFrame = ReferenceFrame {
    width: 800.0,
    height: 600.0,
};

impl ReferenceFrame {
    /// Scale factors mapping this frame onto a target surface.
    pub fn scale_to(&self, target: SurfaceSize) -> ScaleFactors {
        ScaleFactors {
            sx: target.width as f32 / self.width,
            sy: target.height as f32 / self.height,
        }
    }
}

/// Per-axis multipliers from reference units to surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub sx: f32,
    pub sy: f32,
}

impl ScaleFactors {
    pub fn x(&self, x: f32) -> f32 {
        x * self.sx
    }

    pub fn y(&self, y: f32) -> f32 {
        y * self.sy
    }

    pub fn point(&self, p: Point) -> Point {
        Point::new(self.x(p.x), self.y(p.y))
    }

    pub fn rect(&self, r: Rect) -> Rect {
        Rect::new(self.x(r.x), self.y(r.y), self.x(r.width), self.y(r.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_frame_keeps_coordinates() {
        let scale = REFERENCE_FRAME.scale_to(SurfaceSize::new(800, 600));
        assert_eq!(scale, ScaleFactors { sx: 1.0, sy: 1.0 });
        assert_eq!(scale.point(Point::new(123.5, 456.25)), Point::new(123.5, 456.25));
    }

    #[test]
    fn non_uniform_scale_applies_per_axis() {
        let scale = REFERENCE_FRAME.scale_to(SurfaceSize::new(1600, 300));
        assert_eq!(scale.sx, 2.0);
        assert_eq!(scale.sy, 0.5);

        let p = scale.point(Point::new(400.0, 300.0));
        assert_eq!(p, Point::new(800.0, 150.0));

        let r = scale.rect(Rect::new(100.0, 200.0, 80.0, 40.0));
        assert_eq!(r, Rect::new(200.0, 100.0, 160.0, 20.0));
    }

    #[test]
    fn clipping_keeps_only_the_visible_part() {
        let size = SurfaceSize::new(800, 600);
        assert_eq!(
            Rect::new(100.0, 100.0, 50.0, 20.0).clipped_to(size),
            Some(Rect::new(100.0, 100.0, 50.0, 20.0))
        );
        assert_eq!(
            Rect::new(700.0, -10.0, 1e9, 30.0).clipped_to(size),
            Some(Rect::new(700.0, 0.0, 100.0, 20.0))
        );
        // negative extents grow left/up from the anchor
        assert_eq!(
            Rect::new(50.0, 60.0, -40.0, -20.0).clipped_to(size),
            Some(Rect::new(10.0, 40.0, 40.0, 20.0))
        );
        assert_eq!(
            Rect::new(200.0, 10.0, f32::INFINITY, 10.0).clipped_to(size),
            Some(Rect::new(200.0, 10.0, 600.0, 10.0))
        );
    }

    #[test]
    fn clipping_rejects_empty_or_offscreen_rects() {
        let size = SurfaceSize::new(800, 600);
        assert_eq!(Rect::new(0.0, 0.0, 0.0, 10.0).clipped_to(size), None);
        assert_eq!(Rect::new(900.0, 10.0, 50.0, 10.0).clipped_to(size), None);
        assert_eq!(Rect::new(f32::INFINITY, 10.0, 50.0, 10.0).clipped_to(size), None);
        assert_eq!(
            Rect::new(f32::INFINITY, 0.0, f32::NEG_INFINITY, 10.0).clipped_to(size),
            None
        );
    }
}
