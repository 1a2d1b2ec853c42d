//! Label text measurement and the font used to paint chip labels.

use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, OutlineCurve, PxScale, ScaleFont};
use anyhow::{Context, Result};

use crate::config::TEXT;

/// Measures rendered label width in surface pixels. Chip widths derive from it.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_px: f32) -> f32;
}

/// Width estimate used when no font is available: a fixed advance per char.
#[derive(Debug, Clone, Copy)]
pub struct ApproxTextMeasure {
    pub advance_em: f32,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self {
            advance_em: TEXT.approx_advance_em,
        }
    }
}

impl TextMeasure for ApproxTextMeasure {
    fn text_width(&self, text: &str, font_px: f32) -> f32 {
        text.chars().count() as f32 * font_px * self.advance_em
    }
}

/// A positioned glyph outline in surface pixels, ready to fill.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphSegment {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32),
    CubicTo(f32, f32, f32, f32, f32, f32),
    Close,
}

/// Bold sans face used for chip labels.
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    source: String,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont").field("source", &self.source).finish()
    }
}

impl LabelFont {
    pub fn from_bytes(bytes: Vec<u8>, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid font data in {}", source))?;
        Ok(Self { font, source })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font file {}", path.display()))?;
        Self::from_bytes(bytes, path.display().to_string())
    }

    /// First loadable font from the configured search paths.
    pub fn discover() -> Option<Self> {
        TEXT.font_search_paths.iter().find_map(|candidate| {
            let path = Path::new(candidate);
            if !path.exists() {
                return None;
            }
            match Self::load(path) {
                Ok(font) => {
                    log::info!("Using label font {}", candidate);
                    Some(font)
                }
                Err(e) => {
                    log::warn!("Skipping font {}: {:#}", candidate, e);
                    None
                }
            }
        })
    }

    /// The explicit font when given (failing if unreadable), else [`LabelFont::discover`].
    pub fn resolve(explicit: Option<&Path>) -> Result<Option<Self>> {
        match explicit {
            Some(path) => Self::load(path).map(Some),
            None => Ok(Self::discover()),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn units_per_em(&self) -> f32 {
        self.font.units_per_em().unwrap_or(1000.0)
    }

    /// ab_glyph scales by line height; label sizes are em sizes.
    fn px_scale(&self, font_px: f32) -> PxScale {
        PxScale::from(font_px * self.font.height_unscaled() / self.units_per_em())
    }

    fn layout(&self, text: &str, font_px: f32) -> Vec<(GlyphId, f32)> {
        let scaled = self.font.as_scaled(self.px_scale(font_px));
        let mut caret = 0.0;
        let mut prev: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            glyphs.push((id, caret));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
        glyphs
    }

    /// Outline of `text` with its baseline origin at (`x`, `y`).
    pub fn outline(&self, text: &str, font_px: f32, x: f32, y: f32) -> Vec<GlyphSegment> {
        let unit = font_px / self.units_per_em();
        let mut segments = Vec::new();
        for (id, caret) in self.layout(text, font_px) {
            let Some(outline) = self.font.outline(id) else {
                continue;
            };
            let ox = x + caret;
            // font units are y-up
            let map = |p: ab_glyph::Point| (ox + p.x * unit, y - p.y * unit);
            let mut pen: Option<(f32, f32)> = None;
            for curve in &outline.curves {
                let (start, end) = match curve {
                    OutlineCurve::Line(a, b) => (*a, *b),
                    OutlineCurve::Quad(a, _, c) => (*a, *c),
                    OutlineCurve::Cubic(a, _, _, d) => (*a, *d),
                };
                let start = map(start);
                if pen != Some(start) {
                    if pen.is_some() {
                        segments.push(GlyphSegment::Close);
                    }
                    segments.push(GlyphSegment::MoveTo(start.0, start.1));
                }
                match curve {
                    OutlineCurve::Line(_, b) => {
                        let b = map(*b);
                        segments.push(GlyphSegment::LineTo(b.0, b.1));
                    }
                    OutlineCurve::Quad(_, b, c) => {
                        let (b, c) = (map(*b), map(*c));
                        segments.push(GlyphSegment::QuadTo(b.0, b.1, c.0, c.1));
                    }
                    OutlineCurve::Cubic(_, b, c, d) => {
                        let (b, c, d) = (map(*b), map(*c), map(*d));
                        segments.push(GlyphSegment::CubicTo(b.0, b.1, c.0, c.1, d.0, d.1));
                    }
                }
                pen = Some(map(end));
            }
            if pen.is_some() {
                segments.push(GlyphSegment::Close);
            }
        }
        segments
    }
}

impl TextMeasure for LabelFont {
    fn text_width(&self, text: &str, font_px: f32) -> f32 {
        let scaled = self.font.as_scaled(self.px_scale(font_px));
        self.layout(text, font_px)
            .last()
            .map(|(id, caret)| caret + scaled.h_advance(*id))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_width_scales_with_chars_and_size() {
        let m = ApproxTextMeasure { advance_em: 0.5 };
        assert_eq!(m.text_width("", 12.0), 0.0);
        assert_eq!(m.text_width("abcd", 10.0), 20.0);
        assert_eq!(m.text_width("abcd", 20.0), 40.0);
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        assert!(LabelFont::from_bytes(vec![0, 1, 2, 3], "junk").is_err());
    }

    #[test]
    fn discovered_font_measures_monotonically() {
        // Only meaningful on hosts with one of the configured fonts installed.
        let Some(font) = LabelFont::discover() else {
            return;
        };
        let short = font.text_width("Su", 12.0);
        let long = font.text_width("Support", 12.0);
        assert!(short > 0.0);
        assert!(long > short);
        assert!(font.text_width("Support", 24.0) > long);
        assert!(!font.outline("S", 12.0, 0.0, 12.0).is_empty());
    }
}
