//! tiny-skia backend: executes a [`DrawList`] over a copy of the chart image.

use std::fmt;

use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::data::ChartImage;
use crate::domain::{Rect, Rgba, SurfaceSize};
use crate::error::ExportError;
use crate::render::commands::{DrawCommand, DrawList, Shape, StrokeStyle, TextAlign, TextRun};
use crate::render::text::{ApproxTextMeasure, GlyphSegment, LabelFont, TextMeasure};

// Canvas 2D default
const MITER_LIMIT: f32 = 10.0;
// Cubic approximation of a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// The composited output: base image plus (optionally) the overlay pass.
#[derive(Clone)]
pub struct RasterSurface {
    pixmap: Pixmap,
    tainted: bool,
}

impl RasterSurface {
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Premultiplied RGBA8, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight (demultiplied) RGBA of one pixel.
    pub fn pixel_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Derived from an image whose pixels may not be read back.
    pub fn is_tainted(&self) -> bool {
        self.tainted
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        if self.tainted {
            return Err(ExportError::Tainted);
        }
        self.pixmap
            .encode_png()
            .map_err(|e| ExportError::Encode(e.to_string()))
    }
}

impl PartialEq for RasterSurface {
    fn eq(&self, other: &Self) -> bool {
        self.tainted == other.tainted && self.size() == other.size() && self.data() == other.data()
    }
}

impl fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSurface")
            .field("size", &self.size())
            .field("tainted", &self.tainted)
            .finish()
    }
}

/// Turns draw lists into pixels. Holds the label font (if any).
#[derive(Debug, Clone, Default)]
pub struct Rasterizer {
    font: Option<LabelFont>,
    approx: ApproxTextMeasure,
}

impl Rasterizer {
    pub fn new(font: Option<LabelFont>) -> Self {
        Self {
            font,
            approx: ApproxTextMeasure::default(),
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// The measure chip layout must use so boxes fit the painted text.
    pub fn measure(&self) -> &dyn TextMeasure {
        match &self.font {
            Some(font) => font,
            None => &self.approx,
        }
    }

    pub fn rasterize(&self, image: &ChartImage, list: &DrawList) -> RasterSurface {
        let mut pixmap = image.pixmap().clone();
        for command in list.commands() {
            self.execute(&mut pixmap, command);
        }
        RasterSurface {
            pixmap,
            tainted: image.is_tainted(),
        }
    }

    /// The unmodified base image.
    pub fn bare(&self, image: &ChartImage) -> RasterSurface {
        RasterSurface {
            pixmap: image.pixmap().clone(),
            tainted: image.is_tainted(),
        }
    }

    fn execute(&self, pixmap: &mut Pixmap, command: &DrawCommand) {
        match command {
            DrawCommand::Fill { shape, color } => {
                if let Some(path) = shape_path(shape) {
                    pixmap.fill_path(&path, &paint(*color), FillRule::Winding, Transform::identity(), None);
                }
            }
            DrawCommand::Stroke { shape, stroke } => {
                if let Some(path) = shape_path(shape) {
                    pixmap.stroke_path(
                        &path,
                        &paint(stroke.color),
                        &skia_stroke(stroke),
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::Text(run) => self.paint_text(pixmap, run),
        }
    }

    fn paint_text(&self, pixmap: &mut Pixmap, run: &TextRun) {
        // without a font only the chip boxes are painted
        let Some(font) = &self.font else {
            return;
        };
        let x = match run.align {
            TextAlign::Left => run.baseline.x,
            TextAlign::Center => run.baseline.x - font.text_width(&run.text, run.font_px) / 2.0,
        };

        let mut pb = PathBuilder::new();
        for segment in font.outline(&run.text, run.font_px, x, run.baseline.y) {
            match segment {
                GlyphSegment::MoveTo(x, y) => pb.move_to(x, y),
                GlyphSegment::LineTo(x, y) => pb.line_to(x, y),
                GlyphSegment::QuadTo(x1, y1, x, y) => pb.quad_to(x1, y1, x, y),
                GlyphSegment::CubicTo(x1, y1, x2, y2, x, y) => pb.cubic_to(x1, y1, x2, y2, x, y),
                GlyphSegment::Close => pb.close(),
            }
        }
        if let Some(path) = pb.finish() {
            pixmap.fill_path(&path, &paint(run.color), FillRule::Winding, Transform::identity(), None);
        }
    }
}

fn paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn skia_stroke(style: &StrokeStyle) -> Stroke {
    Stroke {
        width: style.width,
        miter_limit: MITER_LIMIT,
        dash: style.dash.and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
        ..Stroke::default()
    }
}

/// Negative sizes flip like canvas `rect()`; zero-area rects yield nothing.
fn normalized(rect: &Rect) -> Option<tiny_skia::Rect> {
    let (left, right) = if rect.width < 0.0 {
        (rect.x + rect.width, rect.x)
    } else {
        (rect.x, rect.x + rect.width)
    };
    let (top, bottom) = if rect.height < 0.0 {
        (rect.y + rect.height, rect.y)
    } else {
        (rect.y, rect.y + rect.height)
    };
    if left == right || top == bottom {
        return None;
    }
    tiny_skia::Rect::from_ltrb(left, top, right, bottom)
}

fn round_rect_path(rect: &Rect, radius: f32) -> Option<Path> {
    let r = normalized(rect)?;
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    let rad = radius.max(0.0).min(r.width() / 2.0).min(r.height() / 2.0);
    if rad == 0.0 {
        return Some(PathBuilder::from_rect(r));
    }
    let k = rad * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(l + rad, t);
    pb.line_to(rt - rad, t);
    pb.cubic_to(rt - rad + k, t, rt, t + rad - k, rt, t + rad);
    pb.line_to(rt, b - rad);
    pb.cubic_to(rt, b - rad + k, rt - rad + k, b, rt - rad, b);
    pb.line_to(l + rad, b);
    pb.cubic_to(l + rad - k, b, l, b - rad + k, l, b - rad);
    pb.line_to(l, t + rad);
    pb.cubic_to(l, t + rad - k, l + rad - k, t, l + rad, t);
    pb.close();
    pb.finish()
}

fn shape_path(shape: &Shape) -> Option<Path> {
    match shape {
        Shape::Rect(rect) => normalized(rect).map(PathBuilder::from_rect),
        Shape::RoundRect { rect, radius } => round_rect_path(rect, *radius),
        Shape::Circle { center, radius } => PathBuilder::from_circle(center.x, center.y, *radius),
        Shape::Polygon(points) => {
            let (first, rest) = points.split_first()?;
            let mut pb = PathBuilder::new();
            pb.move_to(first.x, first.y);
            for p in rest {
                pb.line_to(p.x, p.y);
            }
            pb.close();
            pb.finish()
        }
        Shape::Segments(segments) => {
            let mut pb = PathBuilder::new();
            for (from, to) in segments {
                pb.move_to(from.x, from.y);
                pb.line_to(to.x, to.y);
            }
            pb.finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, rgba};

    fn white(width: u32, height: u32) -> ChartImage {
        ChartImage::blank(SurfaceSize::new(width, height), tiny_skia::Color::WHITE).unwrap()
    }

    #[test]
    fn empty_list_reproduces_base_image() {
        let image = white(20, 10);
        let raster = Rasterizer::default();
        let surface = raster.rasterize(&image, &DrawList::new());
        assert_eq!(surface, raster.bare(&image));
        assert_eq!(surface.size(), SurfaceSize::new(20, 10));
        assert_eq!(surface.pixel_rgba(5, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn translucent_fill_blends_over_base() {
        let image = white(10, 10);
        let mut list = DrawList::new();
        list.fill(Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)), rgba(0, 0, 0, 0.5));
        let surface = Rasterizer::default().rasterize(&image, &list);
        let [r, g, b, a] = surface.pixel_rgba(4, 4).unwrap();
        assert_eq!(a, 255);
        assert!((126..=129).contains(&r), "r = {}", r);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn dashed_stroke_leaves_gaps() {
        let image = white(40, 20);
        let mut list = DrawList::new();
        list.stroke(
            Shape::line(Point::new(0.0, 10.0), Point::new(40.0, 10.0)),
            StrokeStyle::dashed(Rgba::BLACK, 2.0, [5.0, 5.0]),
        );
        let surface = Rasterizer::default().rasterize(&image, &list);
        // dash on over x in [0, 5), off over [5, 10)
        assert_eq!(surface.pixel_rgba(2, 9), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel_rgba(7, 9), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel_rgba(12, 10), Some([0, 0, 0, 255]));
    }

    #[test]
    fn degenerate_shapes_are_ignored() {
        let image = white(10, 10);
        let mut list = DrawList::new();
        list.fill(Shape::Rect(Rect::new(2.0, 2.0, 0.0, 5.0)), Rgba::BLACK);
        list.fill(Shape::Polygon(vec![]), Rgba::BLACK);
        list.stroke(Shape::Segments(vec![]), StrokeStyle::solid(Rgba::BLACK, 1.0));
        let raster = Rasterizer::default();
        assert_eq!(raster.rasterize(&image, &list), raster.bare(&image));
    }

    #[test]
    fn negative_rect_paints_like_canvas() {
        let image = white(10, 10);
        let mut list = DrawList::new();
        list.fill(Shape::Rect(Rect::new(8.0, 8.0, -6.0, -6.0)), Rgba::BLACK);
        let surface = Rasterizer::default().rasterize(&image, &list);
        assert_eq!(surface.pixel_rgba(4, 4), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel_rgba(9, 9), Some([255, 255, 255, 255]));
    }

    #[test]
    fn tainted_image_yields_tainted_surface() {
        let image = white(4, 4).mark_tainted();
        let surface = Rasterizer::default().rasterize(&image, &DrawList::new());
        assert!(surface.is_tainted());
        assert_eq!(surface.encode_png(), Err(ExportError::Tainted));
    }

    #[test]
    fn png_encoding_keeps_dimensions() {
        let surface = Rasterizer::default().bare(&white(12, 7));
        let png = surface.encode_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }
}
