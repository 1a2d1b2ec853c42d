//! Backend-independent draw commands.
//!
//! Layers never touch a surface. They append [`DrawCommand`]s to a [`DrawList`]
//! which the rasterizer executes in order, once. Lists compare with `==`, so
//! geometry can be asserted without rendering anything.

use std::ops::Range;

use crate::domain::{Point, Rect, Rgba};
use crate::models::OverlayCategory;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(Rect),
    RoundRect { rect: Rect, radius: f32 },
    Circle { center: Point, radius: f32 },
    /// Closed polygon through the points in order
    Polygon(Vec<Point>),
    /// Independent straight segments stroked as one path
    Segments(Vec<(Point, Point)>),
}

impl Shape {
    pub fn line(from: Point, to: Point) -> Self {
        Shape::Segments(vec![(from, to)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
    /// On/off dash lengths; `None` strokes solid
    pub dash: Option<[f32; 2]>,
}

impl StrokeStyle {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Rgba, width: f32, dash: [f32; 2]) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `baseline.x` is the left edge of the run
    Left,
    /// `baseline.x` is the horizontal centre of the run
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub baseline: Point,
    pub font_px: f32,
    pub align: TextAlign,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { shape: Shape, color: Rgba },
    Stroke { shape: Shape, stroke: StrokeStyle },
    Text(TextRun),
}

/// Ordered commands for one render pass, with the span each category produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    spans: Vec<(OverlayCategory, Range<usize>)>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, shape: Shape, color: Rgba) {
        self.commands.push(DrawCommand::Fill { shape, color });
    }

    pub fn stroke(&mut self, shape: Shape, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::Stroke { shape, stroke });
    }

    pub fn text(&mut self, run: TextRun) {
        self.commands.push(DrawCommand::Text(run));
    }

    /// Records the commands appended by `draw` as belonging to `category`.
    pub fn record(&mut self, category: OverlayCategory, draw: impl FnOnce(&mut DrawList)) {
        let start = self.commands.len();
        draw(self);
        let end = self.commands.len();
        if end > start {
            self.spans.push((category, start..end));
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands produced by one category (empty when it drew nothing).
    pub fn commands_for(&self, category: OverlayCategory) -> &[DrawCommand] {
        self.spans
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, range)| &self.commands[range.clone()])
            .unwrap_or(&[])
    }

    /// Categories in the order they were drawn.
    pub fn categories(&self) -> Vec<OverlayCategory> {
        self.spans.iter().map(|(c, _)| *c).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(run) => Some(run),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tracks_category_spans() {
        let mut list = DrawList::new();
        list.record(OverlayCategory::SupportZones, |l| {
            l.fill(Shape::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)), Rgba::BLACK);
            l.fill(Shape::Rect(Rect::new(1.0, 1.0, 1.0, 1.0)), Rgba::WHITE);
        });
        list.record(OverlayCategory::Trendlines, |_| {});
        list.record(OverlayCategory::Patterns, |l| {
            l.stroke(
                Shape::line(Point::new(0.0, 0.0), Point::new(5.0, 5.0)),
                StrokeStyle::solid(Rgba::BLACK, 1.0),
            );
        });

        assert_eq!(list.len(), 3);
        assert_eq!(list.commands_for(OverlayCategory::SupportZones).len(), 2);
        assert!(list.commands_for(OverlayCategory::Trendlines).is_empty());
        assert_eq!(
            list.categories(),
            vec![OverlayCategory::SupportZones, OverlayCategory::Patterns]
        );
    }
}
