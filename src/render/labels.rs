// Label chip layout: a filled box with one run of text on top.

use crate::domain::{Point, Rect, Rgba};
use crate::render::commands::{DrawList, Shape, TextAlign, TextRun};
use crate::render::text::TextMeasure;

pub fn text_run(
    text: impl Into<String>,
    baseline: Point,
    font_px: f32,
    align: TextAlign,
    color: Rgba,
) -> TextRun {
    TextRun {
        text: text.into(),
        baseline,
        font_px,
        align,
        color,
    }
}

/// Chip width that fits `text` plus horizontal `padding` (both sides together).
pub fn fitted_width(measure: &dyn TextMeasure, text: &str, font_px: f32, padding: f32) -> f32 {
    measure.text_width(text, font_px) + padding
}

/// Square-cornered chip.
pub fn label_chip(list: &mut DrawList, rect: Rect, fill: Rgba, run: TextRun) {
    list.fill(Shape::Rect(rect), fill);
    list.text(run);
}

pub fn rounded_label_chip(list: &mut DrawList, rect: Rect, radius: f32, fill: Rgba, run: TextRun) {
    list.fill(Shape::RoundRect { rect, radius }, fill);
    list.text(run);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::commands::DrawCommand;
    use crate::render::text::ApproxTextMeasure;

    #[test]
    fn chip_paints_box_before_text() {
        let mut list = DrawList::new();
        let rect = Rect::new(10.0, 10.0, 40.0, 22.0);
        label_chip(
            &mut list,
            rect,
            Rgba::WHITE,
            text_run("S1", Point::new(18.0, 25.0), 12.0, TextAlign::Left, Rgba::BLACK),
        );
        assert!(matches!(
            list.commands()[0],
            DrawCommand::Fill { shape: Shape::Rect(r), .. } if r == rect
        ));
        assert!(matches!(&list.commands()[1], DrawCommand::Text(run) if run.text == "S1"));
    }

    #[test]
    fn fitted_width_adds_padding() {
        let m = ApproxTextMeasure { advance_em: 0.5 };
        assert_eq!(fitted_width(&m, "TP1", 12.0, 12.0), 30.0);
    }
}
