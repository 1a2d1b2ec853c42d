use crate::config::OVERLAY_STYLE;
use crate::domain::{Bias, Point, Rect, Rgba, ScaleFactors, SurfaceSize};
use crate::models::{
    BoxZone, ChartPattern, LevelZone, OverlayCategory, OverlaySet, PointMarker,
};
use crate::render::commands::{DrawList, Shape, StrokeStyle, TextAlign};
use crate::render::labels::{fitted_width, label_chip, rounded_label_chip, text_run};
use crate::render::text::TextMeasure;
use crate::utils::maths_utils::{arrowhead, centroid, hatch_segments, lightning_bolt, up_triangle};

/// Context passed to every layer during composition.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub overlays: &'a OverlaySet,
    pub scale: ScaleFactors,
    pub size: SurfaceSize,
    pub measure: &'a dyn TextMeasure,
}

/// One overlay category's drawer.
pub trait OverlayLayer {
    fn category(&self) -> OverlayCategory;
    fn render(&self, list: &mut DrawList, ctx: &LayerContext);
}

/// The drawer responsible for `category`.
pub fn layer_for(category: OverlayCategory) -> &'static dyn OverlayLayer {
    match category {
        OverlayCategory::SupportZones => &SupportZoneLayer,
        OverlayCategory::ResistanceZones => &ResistanceZoneLayer,
        OverlayCategory::Trendlines => &TrendlineLayer,
        OverlayCategory::Patterns => &PatternLayer,
        OverlayCategory::EntryMarkers => &EntryMarkerLayer,
        OverlayCategory::StopLossMarkers => &StopLossLayer,
        OverlayCategory::TakeProfitMarkers => &TakeProfitLayer,
        OverlayCategory::BreakoutZones => &BreakoutZoneLayer,
        OverlayCategory::LiquiditySweeps => &LiquiditySweepLayer,
        OverlayCategory::OrderBlocks => &OrderBlockLayer,
        OverlayCategory::FairValueGaps => &FairValueGapLayer,
    }
}

fn bias_color(bias: Bias) -> Rgba {
    let palette = &OVERLAY_STYLE.palette;
    if bias.is_bullish() {
        palette.green
    } else {
        palette.red
    }
}

// ============================================================================
// 1. SUPPORT / RESISTANCE BANDS
// ============================================================================

/// Full-width band + dashed level line. `offsets` = (chip top, text baseline) relative to the level.
fn draw_level(list: &mut DrawList, ctx: &LayerContext, zone: &LevelZone, color: Rgba, offsets: (f32, f32)) {
    let style = &OVERLAY_STYLE.levels;
    let y = ctx.scale.y(zone.y);
    let width = ctx.size.width as f32;
    let alpha = zone.strength.alpha();

    list.fill(
        Shape::Rect(Rect::new(0.0, y - style.band_height / 2.0, width, style.band_height)),
        color.with_alpha(alpha * style.fill_alpha_factor),
    );
    list.stroke(
        Shape::line(Point::new(0.0, y), Point::new(width, y)),
        StrokeStyle::dashed(color.with_alpha(alpha), style.line_width, style.dash),
    );

    if let Some(label) = &zone.label {
        let chip_width = fitted_width(ctx.measure, label, style.font_px, style.chip_padding);
        label_chip(
            list,
            Rect::new(style.chip_x, y + offsets.0, chip_width, style.chip_height),
            color.with_alpha(style.chip_alpha),
            text_run(
                label.as_str(),
                Point::new(style.text_x, y + offsets.1),
                style.font_px,
                TextAlign::Left,
                Rgba::BLACK,
            ),
        );
    }
}

pub struct SupportZoneLayer;

impl OverlayLayer for SupportZoneLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::SupportZones
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        for zone in &ctx.overlays.support_zones {
            draw_level(
                list,
                ctx,
                zone,
                OVERLAY_STYLE.palette.green,
                OVERLAY_STYLE.levels.support_offsets,
            );
        }
    }
}

pub struct ResistanceZoneLayer;

impl OverlayLayer for ResistanceZoneLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::ResistanceZones
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        for zone in &ctx.overlays.resistance_zones {
            draw_level(
                list,
                ctx,
                zone,
                OVERLAY_STYLE.palette.red,
                OVERLAY_STYLE.levels.resistance_offsets,
            );
        }
    }
}

// ============================================================================
// 2. TRENDLINES
// ============================================================================
pub struct TrendlineLayer;

impl OverlayLayer for TrendlineLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::Trendlines
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        let style = &OVERLAY_STYLE.trendline;
        let palette = &OVERLAY_STYLE.palette;

        for line in &ctx.overlays.trendlines {
            let start = ctx.scale.point(line.start);
            let end = ctx.scale.point(line.end);
            let color = if line.bias.is_bullish() {
                palette.blue
            } else {
                palette.orange
            }
            .with_alpha(style.alpha);

            list.stroke(Shape::line(start, end), StrokeStyle::solid(color, style.width));
            let head = arrowhead(start, end, style.arrow_size, style.arrow_half_angle);
            list.fill(Shape::Polygon(head.to_vec()), color);

            if let Some(label) = &line.label {
                let mid = start.midpoint(end);
                label_chip(
                    list,
                    Rect::new(
                        mid.x - style.chip_width / 2.0,
                        mid.y + style.chip_offset_y,
                        style.chip_width,
                        style.chip_height,
                    ),
                    color,
                    text_run(
                        label.as_str(),
                        mid.offset(0.0, style.text_offset_y),
                        style.font_px,
                        TextAlign::Center,
                        Rgba::WHITE,
                    ),
                );
            }
        }
    }
}

// ============================================================================
// 3. CHART PATTERNS
// ============================================================================

/// (stroke, fill) for a pattern: keyword match on its type/name, else breakout direction.
pub fn pattern_colors(pattern: &ChartPattern) -> (Rgba, Rgba) {
    let style = &OVERLAY_STYLE.pattern;
    let palette = &OVERLAY_STYLE.palette;
    let keyword = pattern.style_keyword();
    let has = |needle: &str| keyword.contains(needle);

    let family = if has("head") || has("h&s") {
        Some(palette.purple)
    } else if has("triangle") {
        Some(palette.blue)
    } else if has("wedge") {
        Some(palette.orange)
    } else if has("flag") || has("pennant") {
        Some(palette.pink)
    } else if has("double") || has("triple") {
        Some(palette.gold)
    } else if has("cup") || has("handle") {
        Some(palette.cyan)
    } else {
        None
    };

    match family {
        Some(color) => (
            color.with_alpha(style.stroke_alpha),
            color.with_alpha(style.fill_alpha),
        ),
        None => {
            let color = bias_color(pattern.breakout);
            (
                color.with_alpha(style.direction_stroke_alpha),
                color.with_alpha(style.fill_alpha),
            )
        }
    }
}

pub struct PatternLayer;

impl PatternLayer {
    fn draw_outline(list: &mut DrawList, ctx: &LayerContext, pattern: &ChartPattern, stroke: Rgba, fill: Rgba) {
        let style = &OVERLAY_STYLE.pattern;
        let points: Vec<Point> = pattern.points.iter().map(|p| ctx.scale.point(*p)).collect();

        list.fill(Shape::Polygon(points.clone()), fill);
        list.stroke(
            Shape::Polygon(points.clone()),
            StrokeStyle::dashed(stroke, style.width, style.dash),
        );

        let (Some(name), Some(center)) = (&pattern.name, centroid(&points)) else {
            return;
        };
        if name.is_empty() {
            return;
        }
        let chip_width = fitted_width(ctx.measure, name, style.font_px, style.chip_padding);
        rounded_label_chip(
            list,
            Rect::new(
                center.x - chip_width / 2.0,
                center.y + style.chip_offset_y,
                chip_width,
                style.chip_height,
            ),
            style.chip_radius,
            stroke,
            text_run(
                name.as_str(),
                center.offset(0.0, style.text_offset_y),
                style.font_px,
                TextAlign::Center,
                Rgba::WHITE,
            ),
        );
    }

    fn draw_key_points(list: &mut DrawList, ctx: &LayerContext, pattern: &ChartPattern, color: Rgba) {
        let style = &OVERLAY_STYLE.pattern;

        for key_point in &pattern.key_points {
            let at = ctx.scale.point(key_point.at);
            let dot = Shape::Circle {
                center: at,
                radius: style.key_point_radius,
            };
            list.fill(dot.clone(), color);
            list.stroke(dot, StrokeStyle::solid(Rgba::WHITE, style.key_point_ring_width));

            if let Some(label) = &key_point.label {
                let chip_width = fitted_width(
                    ctx.measure,
                    label,
                    style.key_point_font_px,
                    style.key_point_chip_padding,
                );
                let (dx, dy) = style.key_point_chip_offset;
                let (text_dx, text_dy) = style.key_point_text_offset;
                label_chip(
                    list,
                    Rect::new(at.x + dx, at.y + dy, chip_width, style.key_point_chip_height),
                    Rgba::BLACK.with_alpha(style.key_point_chip_alpha),
                    text_run(
                        label.as_str(),
                        at.offset(text_dx, text_dy),
                        style.key_point_font_px,
                        TextAlign::Left,
                        Rgba::WHITE,
                    ),
                );
            }
        }
    }

    fn draw_neckline(list: &mut DrawList, ctx: &LayerContext, pattern: &ChartPattern) {
        let style = &OVERLAY_STYLE.pattern;
        let Some(neckline) = &pattern.neckline else {
            return;
        };
        let color = OVERLAY_STYLE.palette.purple.with_alpha(style.neckline_alpha);
        let start = ctx.scale.point(neckline.start);
        let end = ctx.scale.point(neckline.end);

        list.stroke(
            Shape::line(start, end),
            StrokeStyle::dashed(color, style.secondary_line_width, style.neckline_dash),
        );

        let mid = start.midpoint(end);
        let (chip_w, chip_h) = style.neckline_chip_size;
        label_chip(
            list,
            Rect::new(
                mid.x - chip_w / 2.0,
                mid.y + style.neckline_chip_offset_y,
                chip_w,
                chip_h,
            ),
            color,
            text_run(
                "Neckline",
                mid.offset(0.0, style.neckline_text_offset_y),
                style.secondary_font_px,
                TextAlign::Center,
                Rgba::WHITE,
            ),
        );
    }

    fn draw_target(list: &mut DrawList, ctx: &LayerContext, pattern: &ChartPattern) {
        let style = &OVERLAY_STYLE.pattern;
        let Some(target) = &pattern.target else {
            return;
        };
        let mint = OVERLAY_STYLE.palette.mint;
        let at = ctx.scale.point(target.at);
        let tip = at.offset(style.target_ray_length, 0.0);
        let back = style.target_arrow_length;

        list.stroke(
            Shape::line(at, tip),
            StrokeStyle::dashed(
                mint.with_alpha(style.target_alpha),
                style.secondary_line_width,
                style.target_dash,
            ),
        );
        list.fill(
            Shape::Polygon(vec![
                tip,
                tip.offset(-back, -back / 2.0),
                tip.offset(-back, back / 2.0),
            ]),
            mint.with_alpha(style.target_fill_alpha),
        );

        let (chip_w, chip_h) = style.target_chip_size;
        let (chip_dx, chip_dy) = style.target_chip_offset;
        let (text_dx, text_dy) = style.target_text_offset;
        let price = target.price.as_deref().unwrap_or("");
        label_chip(
            list,
            Rect::new(tip.x + chip_dx, at.y + chip_dy, chip_w, chip_h),
            mint.with_alpha(style.target_chip_alpha),
            text_run(
                format!("Target: {}", price),
                Point::new(tip.x + text_dx, at.y + text_dy),
                style.target_font_px,
                TextAlign::Left,
                Rgba::BLACK,
            ),
        );
    }
}

impl OverlayLayer for PatternLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::Patterns
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        for pattern in &ctx.overlays.patterns {
            let (stroke, fill) = pattern_colors(pattern);
            Self::draw_outline(list, ctx, pattern, stroke, fill);
            Self::draw_key_points(list, ctx, pattern, stroke);
            Self::draw_neckline(list, ctx, pattern);
            Self::draw_target(list, ctx, pattern);
        }
    }
}

// ============================================================================
// 4. TRADE MARKERS (entry / stop loss / take profit / liquidity sweep)
// ============================================================================

/// Chip to the right of a point glyph.
fn marker_chip(
    list: &mut DrawList,
    ctx: &LayerContext,
    at: Point,
    label: &str,
    font_px: f32,
    chip: (f32, f32),
    fill: Rgba,
    text_color: Rgba,
) {
    let style = &OVERLAY_STYLE.marker;
    let (top, height) = chip;
    let (text_dx, text_dy) = style.text_offset;
    let chip_width = fitted_width(ctx.measure, label, font_px, style.chip_padding);
    label_chip(
        list,
        Rect::new(at.x + style.chip_offset.0, at.y + top, chip_width, height),
        fill,
        text_run(
            label,
            at.offset(text_dx, text_dy),
            font_px,
            TextAlign::Left,
            text_color,
        ),
    );
}

fn standard_marker_chip(list: &mut DrawList, ctx: &LayerContext, marker: &PointMarker, at: Point, fill: Rgba, text_color: Rgba) {
    let style = &OVERLAY_STYLE.marker;
    if let Some(label) = &marker.label {
        marker_chip(
            list,
            ctx,
            at,
            label,
            style.font_px,
            (style.chip_offset.1, style.chip_height),
            fill,
            text_color,
        );
    }
}

pub struct EntryMarkerLayer;

impl OverlayLayer for EntryMarkerLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::EntryMarkers
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        let style = &OVERLAY_STYLE.marker;
        let mint = OVERLAY_STYLE.palette.mint;

        for marker in &ctx.overlays.entry_markers {
            let at = ctx.scale.point(marker.at);
            let dot = Shape::Circle {
                center: at,
                radius: style.entry_radius,
            };
            list.fill(dot.clone(), mint.with_alpha(style.glyph_alpha));
            list.stroke(dot, StrokeStyle::solid(Rgba::BLACK, style.outline_width));
            standard_marker_chip(list, ctx, marker, at, mint.with_alpha(style.chip_alpha), Rgba::BLACK);
        }
    }
}

pub struct StopLossLayer;

impl OverlayLayer for StopLossLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::StopLossMarkers
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        let style = &OVERLAY_STYLE.marker;
        let red = OVERLAY_STYLE.palette.red;
        let s = style.stop_half_size;

        for marker in &ctx.overlays.stop_loss_markers {
            let at = ctx.scale.point(marker.at);
            list.stroke(
                Shape::Segments(vec![
                    (at.offset(-s, -s), at.offset(s, s)),
                    (at.offset(s, -s), at.offset(-s, s)),
                ]),
                StrokeStyle::solid(red.with_alpha(style.glyph_alpha), style.stop_width),
            );
            standard_marker_chip(list, ctx, marker, at, red.with_alpha(style.chip_alpha), Rgba::WHITE);
        }
    }
}

/// Colour of the take-profit marker at `index` (TP1, TP2, TP3, then cycles).
pub fn take_profit_color(index: usize) -> Rgba {
    let colors = &OVERLAY_STYLE.marker.take_profit_colors;
    colors[index % colors.len()]
}

pub struct TakeProfitLayer;

impl OverlayLayer for TakeProfitLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::TakeProfitMarkers
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        let style = &OVERLAY_STYLE.marker;

        for (index, marker) in ctx.overlays.take_profit_markers.iter().enumerate() {
            let at = ctx.scale.point(marker.at);
            let color = take_profit_color(index);
            let glyph = Shape::Polygon(up_triangle(at).to_vec());
            list.fill(glyph.clone(), color);
            list.stroke(glyph, StrokeStyle::solid(Rgba::BLACK, style.outline_width));
            standard_marker_chip(list, ctx, marker, at, color, Rgba::BLACK);
        }
    }
}

pub struct LiquiditySweepLayer;

impl OverlayLayer for LiquiditySweepLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::LiquiditySweeps
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        let style = &OVERLAY_STYLE.marker;
        let gold = OVERLAY_STYLE.palette.gold;

        for sweep in &ctx.overlays.liquidity_sweeps {
            let at = ctx.scale.point(sweep.at);
            let bolt = Shape::Polygon(lightning_bolt(at).to_vec());
            list.fill(bolt.clone(), gold.with_alpha(style.glyph_alpha));
            list.stroke(bolt, StrokeStyle::solid(Rgba::BLACK, style.sweep_outline_width));

            if let Some(label) = &sweep.label {
                marker_chip(
                    list,
                    ctx,
                    at,
                    label,
                    style.sweep_font_px,
                    (style.sweep_chip_offset_y, style.sweep_chip_height),
                    gold.with_alpha(style.chip_alpha),
                    Rgba::BLACK,
                );
            }
        }
    }
}

// ============================================================================
// 5. BOX ZONES (breakout / order block / fair value gap)
// ============================================================================
pub struct BreakoutZoneLayer;

impl OverlayLayer for BreakoutZoneLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::BreakoutZones
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        let style = &OVERLAY_STYLE.boxes;

        for zone in &ctx.overlays.breakout_zones {
            let rect = ctx.scale.rect(zone.rect);
            let color = bias_color(zone.bias);

            list.fill(Shape::Rect(rect), color.with_alpha(style.breakout_fill_alpha));
            list.stroke(
                Shape::Rect(rect),
                StrokeStyle::dashed(
                    color.with_alpha(style.breakout_stroke_alpha),
                    style.breakout_width,
                    style.breakout_dash,
                ),
            );

            if let Some(label) = &zone.label {
                let chip_width = fitted_width(
                    ctx.measure,
                    label,
                    style.breakout_font_px,
                    style.breakout_chip_padding,
                );
                let inset = style.breakout_chip_inset;
                let (text_dx, text_dy) = style.breakout_text_offset;
                label_chip(
                    list,
                    Rect::new(rect.x + inset, rect.y + inset, chip_width, style.breakout_chip_height),
                    color.with_alpha(style.breakout_chip_alpha),
                    text_run(
                        label.as_str(),
                        rect.top_left().offset(text_dx, text_dy),
                        style.breakout_font_px,
                        TextAlign::Left,
                        Rgba::WHITE,
                    ),
                );
            }
        }
    }
}

/// Offset of the first stripe inside `clip` so it lines up with the stripes of
/// the full `rect`.
fn hatch_phase(rect: Rect, clip: Rect, pitch: f32) -> f32 {
    let left = rect.x.min(rect.x + rect.width);
    let top = rect.y.min(rect.y + rect.height);
    let phase = ((clip.x - left) + (clip.y - top)).rem_euclid(pitch);
    if phase.is_finite() && phase > 0.0 {
        pitch - phase
    } else {
        0.0
    }
}

pub struct OrderBlockLayer;

impl OrderBlockLayer {
    fn draw_block(list: &mut DrawList, ctx: &LayerContext, block: &BoxZone) {
        let style = &OVERLAY_STYLE.boxes;
        let rect = ctx.scale.rect(block.rect);
        let color = bias_color(block.bias);
        let border = color.with_alpha(style.order_block_stroke_alpha);

        let visible = rect.clipped_to(ctx.size);

        if let Some(clip) = visible {
            list.fill(Shape::Rect(clip), color.with_alpha(style.order_block_fill_alpha));
        }
        list.stroke(Shape::Rect(rect), StrokeStyle::solid(border, style.order_block_width));

        if let Some(clip) = visible {
            let hatch = hatch_segments(
                clip.top_left(),
                clip.width,
                clip.height,
                style.order_block_hatch_pitch,
                hatch_phase(rect, clip, style.order_block_hatch_pitch),
            );
            if !hatch.is_empty() {
                list.stroke(
                    Shape::Segments(hatch),
                    StrokeStyle::solid(
                        color.with_alpha(style.order_block_hatch_alpha),
                        style.order_block_hatch_width,
                    ),
                );
            }
        }

        if let Some(label) = &block.label {
            let chip_width = fitted_width(
                ctx.measure,
                label,
                style.order_block_font_px,
                style.order_block_chip_padding,
            );
            let inset = style.order_block_chip_inset;
            let (text_dx, text_dy) = style.order_block_text_offset;
            label_chip(
                list,
                Rect::new(
                    rect.x + inset,
                    rect.y + inset,
                    chip_width,
                    style.order_block_chip_height,
                ),
                border,
                text_run(
                    label.as_str(),
                    rect.top_left().offset(text_dx, text_dy),
                    style.order_block_font_px,
                    TextAlign::Left,
                    Rgba::WHITE,
                ),
            );
        }
    }
}

impl OverlayLayer for OrderBlockLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::OrderBlocks
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        for block in &ctx.overlays.order_blocks {
            Self::draw_block(list, ctx, block);
        }
    }
}

pub struct FairValueGapLayer;

impl OverlayLayer for FairValueGapLayer {
    fn category(&self) -> OverlayCategory {
        OverlayCategory::FairValueGaps
    }

    fn render(&self, list: &mut DrawList, ctx: &LayerContext) {
        let style = &OVERLAY_STYLE.boxes;
        let palette = &OVERLAY_STYLE.palette;

        for gap in &ctx.overlays.fair_value_gaps {
            let rect = ctx.scale.rect(gap.rect);
            let color = if gap.bias.is_bullish() {
                palette.cyan
            } else {
                palette.purple
            };
            let border = color.with_alpha(style.gap_stroke_alpha);

            list.fill(Shape::Rect(rect), color.with_alpha(style.gap_fill_alpha));
            list.stroke(
                Shape::Rect(rect),
                StrokeStyle::dashed(border, style.gap_width, style.gap_dash),
            );

            if let Some(label) = &gap.label {
                let center = rect.center();
                let (chip_w, chip_h) = style.gap_chip_size;
                label_chip(
                    list,
                    Rect::new(center.x - chip_w / 2.0, center.y - chip_h / 2.0, chip_w, chip_h),
                    border,
                    text_run(
                        label.as_str(),
                        center.offset(0.0, style.gap_text_offset_y),
                        style.gap_font_px,
                        TextAlign::Center,
                        Rgba::WHITE,
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DRAW_ORDER;

    #[test]
    fn every_category_has_a_matching_layer() {
        for category in DRAW_ORDER {
            assert_eq!(layer_for(category).category(), category);
        }
    }

    #[test]
    fn take_profit_colors_cycle_by_index() {
        let palette = &OVERLAY_STYLE.palette;
        assert_eq!(take_profit_color(0), palette.cyan.with_alpha(0.9));
        assert_eq!(take_profit_color(1), palette.purple.with_alpha(0.9));
        assert_eq!(take_profit_color(2), palette.gold.with_alpha(0.9));
        assert_eq!(take_profit_color(3), take_profit_color(0));
        assert_ne!(take_profit_color(0), take_profit_color(1));
        assert_ne!(take_profit_color(1), take_profit_color(2));
    }

    fn pattern(kind: Option<&str>, name: Option<&str>, breakout: Bias) -> ChartPattern {
        ChartPattern {
            name: name.map(String::from),
            kind: kind.map(String::from),
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 5.0)],
            breakout,
            key_points: vec![],
            neckline: None,
            target: None,
        }
    }

    #[test]
    fn pattern_colour_follows_keyword_then_direction() {
        let palette = &OVERLAY_STYLE.palette;
        let (stroke, fill) = pattern_colors(&pattern(Some("inverse_head_and_shoulders"), None, Bias::Bearish));
        assert_eq!(stroke, palette.purple.with_alpha(0.8));
        assert_eq!(fill, palette.purple.with_alpha(0.1));

        let (stroke, _) = pattern_colors(&pattern(None, Some("Ascending Triangle"), Bias::Bearish));
        assert_eq!(stroke, palette.blue.with_alpha(0.8));

        let (stroke, _) = pattern_colors(&pattern(Some("bull_flag"), None, Bias::Bearish));
        assert_eq!(stroke, palette.pink.with_alpha(0.8));

        let (stroke, fill) = pattern_colors(&pattern(Some("channel"), None, Bias::Bullish));
        assert_eq!(stroke, palette.green.with_alpha(0.7));
        assert_eq!(fill, palette.green.with_alpha(0.1));

        let (stroke, _) = pattern_colors(&pattern(None, None, Bias::Bearish));
        assert_eq!(stroke, palette.red.with_alpha(0.7));
    }

    #[test]
    fn capitalised_type_misses_keywords_and_uses_direction() {
        let palette = &OVERLAY_STYLE.palette;
        let (stroke, _) = pattern_colors(&pattern(Some("Triangle"), Some("Ascending Triangle"), Bias::Bullish));
        assert_eq!(stroke, palette.green.with_alpha(0.7));
    }

    #[test]
    fn hatch_phase_follows_the_unclipped_corner() {
        let rect = Rect::new(-25.0, 10.0, 100.0, 40.0);
        let clip = Rect::new(0.0, 10.0, 75.0, 40.0);
        // 25px clipped off: next stripe of the full rect sits 5px in
        assert_eq!(hatch_phase(rect, clip, 10.0), 5.0);
        assert_eq!(hatch_phase(rect, rect, 10.0), 0.0);
    }
}
