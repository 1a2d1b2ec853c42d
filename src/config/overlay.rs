//! Overlay visual grammar: colours, alphas, dash patterns and glyph sizes.
//!
//! All pixel sizes here are surface pixels (they are NOT scaled with the
//! reference frame); only annotation positions and rectangle sizes are.

use crate::domain::{Rgba, rgba};

/// The fixed chart palette (alpha = 1.0; callers pick the alpha per use).
pub struct Palette {
    pub green: Rgba,
    pub red: Rgba,
    pub blue: Rgba,
    pub orange: Rgba,
    pub purple: Rgba,
    pub pink: Rgba,
    pub gold: Rgba,
    pub cyan: Rgba,
    pub mint: Rgba,
}

/// Support / resistance horizontal bands
pub struct LevelZoneStyle {
    pub band_height: f32,
    /// Band fill alpha = strength alpha * this factor
    pub fill_alpha_factor: f32,
    pub line_width: f32,
    pub dash: [f32; 2],
    pub chip_alpha: f32,
    pub chip_x: f32,
    pub chip_height: f32,
    pub chip_padding: f32,
    pub text_x: f32,
    /// Support chip sits above the level: (chip top, text baseline) relative to y
    pub support_offsets: (f32, f32),
    /// Resistance chip sits below the level
    pub resistance_offsets: (f32, f32),
    pub font_px: f32,
}

pub struct TrendlineStyle {
    pub alpha: f32,
    pub width: f32,
    pub arrow_size: f32,
    /// Half-angle of the arrowhead, radians
    pub arrow_half_angle: f32,
    pub chip_width: f32,
    pub chip_height: f32,
    /// Chip top and text baseline, relative to the line midpoint
    pub chip_offset_y: f32,
    pub text_offset_y: f32,
    pub font_px: f32,
}

pub struct PatternStyle {
    pub stroke_alpha: f32,
    /// Used for the bullish/bearish fallback colouring
    pub direction_stroke_alpha: f32,
    pub fill_alpha: f32,
    pub width: f32,
    pub dash: [f32; 2],
    pub chip_padding: f32,
    pub chip_height: f32,
    pub chip_radius: f32,
    /// Name chip top and text baseline, relative to the vertex centroid
    pub chip_offset_y: f32,
    pub text_offset_y: f32,
    pub font_px: f32,
    pub key_point_radius: f32,
    pub key_point_ring_width: f32,
    pub key_point_chip_alpha: f32,
    pub key_point_chip_height: f32,
    pub key_point_chip_padding: f32,
    /// Relative to the key point
    pub key_point_chip_offset: (f32, f32),
    pub key_point_text_offset: (f32, f32),
    pub key_point_font_px: f32,
    pub neckline_alpha: f32,
    pub neckline_dash: [f32; 2],
    pub neckline_chip_size: (f32, f32),
    /// Relative to the neckline midpoint
    pub neckline_chip_offset_y: f32,
    pub neckline_text_offset_y: f32,
    pub target_alpha: f32,
    pub target_fill_alpha: f32,
    pub target_chip_alpha: f32,
    pub target_dash: [f32; 2],
    pub target_ray_length: f32,
    pub target_arrow_length: f32,
    pub target_chip_size: (f32, f32),
    /// Chip x is relative to the ray tip, y to the target
    pub target_chip_offset: (f32, f32),
    pub target_text_offset: (f32, f32),
    pub secondary_line_width: f32,
    pub secondary_font_px: f32,
    pub target_font_px: f32,
}

/// Entry / stop-loss / take-profit / liquidity-sweep point glyphs
pub struct MarkerStyle {
    pub glyph_alpha: f32,
    pub chip_alpha: f32,
    pub entry_radius: f32,
    pub stop_half_size: f32,
    pub stop_width: f32,
    pub outline_width: f32,
    /// Take-profit colours, cycled by marker index
    pub take_profit_colors: [Rgba; 3],
    /// Chip top-left and text baseline, relative to the glyph centre
    pub chip_offset: (f32, f32),
    pub text_offset: (f32, f32),
    pub chip_height: f32,
    pub chip_padding: f32,
    pub font_px: f32,
    pub sweep_outline_width: f32,
    pub sweep_chip_offset_y: f32,
    pub sweep_chip_height: f32,
    pub sweep_font_px: f32,
}

/// Breakout zones, order blocks and fair value gaps
pub struct BoxZoneStyle {
    pub breakout_fill_alpha: f32,
    pub breakout_stroke_alpha: f32,
    pub breakout_chip_alpha: f32,
    pub breakout_dash: [f32; 2],
    pub breakout_width: f32,
    pub breakout_font_px: f32,
    /// Chip inset from the zone's top-left corner
    pub breakout_chip_inset: f32,
    pub breakout_chip_height: f32,
    pub breakout_chip_padding: f32,
    pub breakout_text_offset: (f32, f32),
    pub order_block_fill_alpha: f32,
    pub order_block_stroke_alpha: f32,
    pub order_block_hatch_alpha: f32,
    pub order_block_hatch_pitch: f32,
    pub order_block_hatch_width: f32,
    pub order_block_width: f32,
    pub order_block_font_px: f32,
    pub order_block_chip_inset: f32,
    pub order_block_chip_height: f32,
    pub order_block_chip_padding: f32,
    pub order_block_text_offset: (f32, f32),
    /// Default order block size in reference units
    pub order_block_default_size: (f32, f32),
    pub gap_fill_alpha: f32,
    pub gap_stroke_alpha: f32,
    pub gap_dash: [f32; 2],
    pub gap_width: f32,
    pub gap_chip_size: (f32, f32),
    /// Text baseline below the gap centre
    pub gap_text_offset_y: f32,
    pub gap_font_px: f32,
    /// Default fair value gap size in reference units
    pub gap_default_size: (f32, f32),
}

/// The Master Overlay Style
pub struct OverlayStyle {
    pub palette: Palette,
    pub levels: LevelZoneStyle,
    pub trendline: TrendlineStyle,
    pub pattern: PatternStyle,
    pub marker: MarkerStyle,
    pub boxes: BoxZoneStyle,
}

const PALETTE: Palette = Palette {
    green: rgba(34, 197, 94, 1.0),
    red: rgba(239, 68, 68, 1.0),
    blue: rgba(59, 130, 246, 1.0),
    orange: rgba(249, 115, 22, 1.0),
    purple: rgba(168, 85, 247, 1.0),
    pink: rgba(236, 72, 153, 1.0),
    gold: rgba(255, 214, 10, 1.0),
    cyan: rgba(0, 217, 245, 1.0),
    mint: rgba(0, 245, 160, 1.0),
};

pub const OVERLAY_STYLE: OverlayStyle = OverlayStyle {
    palette: PALETTE,

    levels: LevelZoneStyle {
        band_height: 20.0,
        fill_alpha_factor: 0.15,
        line_width: 2.0,
        dash: [5.0, 5.0],
        chip_alpha: 0.9,
        chip_x: 10.0,
        chip_height: 22.0,
        chip_padding: 16.0,
        text_x: 18.0,
        support_offsets: (-25.0, -10.0),
        resistance_offsets: (5.0, 19.0),
        font_px: 12.0,
    },

    trendline: TrendlineStyle {
        alpha: 0.8,
        width: 3.0,
        arrow_size: 12.0,
        arrow_half_angle: std::f32::consts::FRAC_PI_6,
        chip_width: 100.0,
        chip_height: 20.0,
        chip_offset_y: -12.0,
        text_offset_y: 3.0,
        font_px: 11.0,
    },

    pattern: PatternStyle {
        stroke_alpha: 0.8,
        direction_stroke_alpha: 0.7,
        fill_alpha: 0.1,
        width: 2.5,
        dash: [6.0, 3.0],
        chip_padding: 20.0,
        chip_height: 26.0,
        chip_radius: 6.0,
        chip_offset_y: -14.0,
        text_offset_y: 4.0,
        font_px: 12.0,
        key_point_radius: 6.0,
        key_point_ring_width: 2.0,
        key_point_chip_alpha: 0.8,
        key_point_chip_height: 18.0,
        key_point_chip_padding: 10.0,
        key_point_chip_offset: (8.0, -10.0),
        key_point_text_offset: (13.0, 3.0),
        key_point_font_px: 10.0,
        neckline_alpha: 0.9,
        neckline_dash: [10.0, 5.0],
        neckline_chip_size: (70.0, 18.0),
        neckline_chip_offset_y: -10.0,
        neckline_text_offset_y: 3.0,
        target_alpha: 0.8,
        target_fill_alpha: 0.9,
        target_chip_alpha: 0.95,
        target_dash: [5.0, 5.0],
        target_ray_length: 100.0,
        target_arrow_length: 10.0,
        target_chip_size: (80.0, 20.0),
        target_chip_offset: (5.0, -10.0),
        target_text_offset: (10.0, 4.0),
        secondary_line_width: 2.0,
        secondary_font_px: 10.0,
        target_font_px: 11.0,
    },

    marker: MarkerStyle {
        glyph_alpha: 0.9,
        chip_alpha: 0.95,
        entry_radius: 8.0,
        stop_half_size: 8.0,
        stop_width: 3.0,
        outline_width: 2.0,
        take_profit_colors: [
            rgba(0, 217, 245, 0.9),
            rgba(168, 85, 247, 0.9),
            rgba(255, 214, 10, 0.9),
        ],
        chip_offset: (12.0, -12.0),
        text_offset: (18.0, 3.0),
        chip_height: 22.0,
        chip_padding: 12.0,
        font_px: 12.0,
        sweep_outline_width: 1.5,
        sweep_chip_offset_y: -10.0,
        sweep_chip_height: 20.0,
        sweep_font_px: 11.0,
    },

    boxes: BoxZoneStyle {
        breakout_fill_alpha: 0.25,
        breakout_stroke_alpha: 0.8,
        breakout_chip_alpha: 0.9,
        breakout_dash: [4.0, 4.0],
        breakout_width: 2.0,
        breakout_font_px: 11.0,
        breakout_chip_inset: 5.0,
        breakout_chip_height: 20.0,
        breakout_chip_padding: 12.0,
        breakout_text_offset: (11.0, 18.0),
        order_block_fill_alpha: 0.3,
        order_block_stroke_alpha: 0.8,
        order_block_hatch_alpha: 0.2,
        order_block_hatch_pitch: 10.0,
        order_block_hatch_width: 1.0,
        order_block_width: 2.0,
        order_block_font_px: 10.0,
        order_block_chip_inset: 2.0,
        order_block_chip_height: 16.0,
        order_block_chip_padding: 10.0,
        order_block_text_offset: (7.0, 13.0),
        order_block_default_size: (80.0, 40.0),
        gap_fill_alpha: 0.25,
        gap_stroke_alpha: 0.8,
        gap_dash: [4.0, 4.0],
        gap_width: 1.5,
        gap_chip_size: (30.0, 16.0),
        gap_text_offset_y: 4.0,
        gap_font_px: 9.0,
        gap_default_size: (60.0, 30.0),
    },
};
