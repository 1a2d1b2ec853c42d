//! Typed annotation objects and their boundary validation.
//!
//! Each `Raw*` struct mirrors the loose JSON the analysis backend emits; every
//! field is optional so that one sloppy entry can be rejected on its own instead
//! of failing the whole document. `validate` turns a raw entry into the typed
//! annotation the layers draw, or explains why it cannot be drawn.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Bias, Point, Rect, ZoneStrength};

/// Conversion from a raw (JSON-shaped) entry into a drawable annotation.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, String>;
}

fn required(field: &str, value: Option<f32>) -> Result<f32, String> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(format!("`{}` is not a finite number", field)),
        None => Err(format!("missing `{}`", field)),
    }
}

fn optional(field: &str, value: Option<f32>) -> Result<Option<f32>, String> {
    match value {
        Some(v) if !v.is_finite() => Err(format!("`{}` is not a finite number", field)),
        other => Ok(other),
    }
}

/// Empty labels are treated as absent so no empty chip gets drawn.
fn label(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ============================================================================
// SUPPORT / RESISTANCE
// ============================================================================

/// A horizontal price level drawn as a band across the full chart width.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelZone {
    pub y: f32,
    pub strength: ZoneStrength,
    pub label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLevelZone {
    pub y: Option<f32>,
    pub label: Option<String>,
    pub strength: Option<String>,
}

impl Validate for RawLevelZone {
    type Output = LevelZone;

    fn validate(self) -> Result<LevelZone, String> {
        Ok(LevelZone {
            y: required("y", self.y)?,
            strength: ZoneStrength::from_keyword(self.strength.as_deref()),
            label: label(self.label),
        })
    }
}

// ============================================================================
// TRENDLINES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Trendline {
    pub start: Point,
    pub end: Point,
    pub bias: Bias,
    pub label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTrendline {
    pub x1: Option<f32>,
    pub y1: Option<f32>,
    pub x2: Option<f32>,
    pub y2: Option<f32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub label: Option<String>,
}

impl Validate for RawTrendline {
    type Output = Trendline;

    fn validate(self) -> Result<Trendline, String> {
        Ok(Trendline {
            start: Point::new(required("x1", self.x1)?, required("y1", self.y1)?),
            end: Point::new(required("x2", self.x2)?, required("y2", self.y2)?),
            bias: Bias::from_keyword(self.kind.as_deref()),
            label: label(self.label),
        })
    }
}

// ============================================================================
// CHART PATTERNS
// ============================================================================

/// A named vertex of a pattern (shoulder, head, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPoint {
    pub at: Point,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neckline {
    pub start: Point,
    pub end: Point,
}

/// Projected price objective of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTarget {
    pub at: Point,
    /// Display text for the price, as supplied (string or number).
    pub price: Option<String>,
}

/// A chart formation outlined by an arbitrary polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPattern {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub points: Vec<Point>,
    pub breakout: Bias,
    pub key_points: Vec<KeyPoint>,
    pub neckline: Option<Neckline>,
    pub target: Option<PriceTarget>,
}

impl ChartPattern {
    /// Text used to pick the pattern colour: the `type` verbatim when present,
    /// otherwise the lower-cased display name. Type keywords are matched
    /// case-sensitively.
    pub fn style_keyword(&self) -> String {
        match self.kind.as_deref().filter(|k| !k.is_empty()) {
            Some(kind) => kind.to_string(),
            None => self.name.as_deref().unwrap_or_default().to_lowercase(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawKeyPoint {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawNeckline {
    pub x1: Option<f32>,
    pub y1: Option<f32>,
    pub x2: Option<f32>,
    pub y2: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTarget {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub price: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPattern {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub points: Option<Vec<[f32; 2]>>,
    #[serde(alias = "breakoutDirection")]
    pub breakout_direction: Option<String>,
    #[serde(alias = "keyPoints")]
    pub key_points: Option<Vec<Value>>,
    pub neckline: Option<Value>,
    pub target: Option<Value>,
}

impl Validate for RawKeyPoint {
    type Output = KeyPoint;

    fn validate(self) -> Result<KeyPoint, String> {
        Ok(KeyPoint {
            at: Point::new(required("x", self.x)?, required("y", self.y)?),
            label: label(self.label),
        })
    }
}

impl Validate for RawNeckline {
    type Output = Neckline;

    fn validate(self) -> Result<Neckline, String> {
        Ok(Neckline {
            start: Point::new(required("x1", self.x1)?, required("y1", self.y1)?),
            end: Point::new(required("x2", self.x2)?, required("y2", self.y2)?),
        })
    }
}

impl Validate for RawTarget {
    type Output = PriceTarget;

    fn validate(self) -> Result<PriceTarget, String> {
        let price = match self.price {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        Ok(PriceTarget {
            at: Point::new(required("x", self.x)?, required("y", self.y)?),
            price,
        })
    }
}

/// Sub-annotations are validated one by one: a broken neckline costs the
/// neckline, not the pattern.
fn sub_annotation<R>(value: Value) -> Option<R::Output>
where
    R: Validate + serde::de::DeserializeOwned,
{
    serde_json::from_value::<R>(value)
        .map_err(|e| e.to_string())
        .and_then(Validate::validate)
        .map_err(|reason| log::debug!("Dropping pattern sub-annotation: {}", reason))
        .ok()
}

impl Validate for RawPattern {
    type Output = ChartPattern;

    fn validate(self) -> Result<ChartPattern, String> {
        let raw_points = self.points.unwrap_or_default();
        if raw_points.is_empty() {
            return Err("pattern has no `points`".to_string());
        }
        let points = raw_points
            .iter()
            .map(|[x, y]| Point::new(*x, *y))
            .collect::<Vec<_>>();
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(format!("pattern point {} is not finite", bad));
        }

        let key_points = self
            .key_points
            .unwrap_or_default()
            .into_iter()
            .filter_map(sub_annotation::<RawKeyPoint>)
            .collect();

        Ok(ChartPattern {
            name: label(self.name),
            kind: self.kind,
            points,
            breakout: Bias::from_keyword(self.breakout_direction.as_deref()),
            key_points,
            neckline: self.neckline.and_then(sub_annotation::<RawNeckline>),
            target: self.target.and_then(sub_annotation::<RawTarget>),
        })
    }
}

// ============================================================================
// POINT MARKERS (entry / stop loss / take profit)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PointMarker {
    pub at: Point,
    pub label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPointMarker {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub label: Option<String>,
}

impl Validate for RawPointMarker {
    type Output = PointMarker;

    fn validate(self) -> Result<PointMarker, String> {
        Ok(PointMarker {
            at: Point::new(required("x", self.x)?, required("y", self.y)?),
            label: label(self.label),
        })
    }
}

// ============================================================================
// LIQUIDITY SWEEPS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LiquiditySweep {
    pub at: Point,
    pub label: Option<String>,
    /// Informational only (`up` / `down`); the glyph is the same either way.
    pub direction: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLiquiditySweep {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub label: Option<String>,
    pub direction: Option<String>,
}

impl Validate for RawLiquiditySweep {
    type Output = LiquiditySweep;

    fn validate(self) -> Result<LiquiditySweep, String> {
        Ok(LiquiditySweep {
            at: Point::new(required("x", self.x)?, required("y", self.y)?),
            label: label(self.label),
            direction: self.direction,
        })
    }
}

// ============================================================================
// RECTANGULAR ZONES (breakout / order block / fair value gap)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BoxZone {
    pub rect: Rect,
    pub bias: Bias,
    pub label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawBoxZone {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub label: Option<String>,
}

impl RawBoxZone {
    /// Validate with a fallback size for kinds that have one (order blocks,
    /// fair value gaps); a zero side counts as missing there. Breakout zones
    /// pass `None` and require both sides.
    pub fn validate_with_default(self, default_size: Option<(f32, f32)>) -> Result<BoxZone, String> {
        let x = required("x", self.x)?;
        let y = required("y", self.y)?;
        let (width, height) = match default_size {
            Some((w, h)) => (
                optional("width", self.width)?.filter(|v| *v != 0.0).unwrap_or(w),
                optional("height", self.height)?.filter(|v| *v != 0.0).unwrap_or(h),
            ),
            None => (required("width", self.width)?, required("height", self.height)?),
        };

        Ok(BoxZone {
            rect: Rect::new(x, y, width, height),
            bias: Bias::from_keyword(self.kind.as_deref()),
            label: label(self.label),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw<R: serde::de::DeserializeOwned>(value: Value) -> R {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn level_zone_requires_y() {
        let zone: RawLevelZone = raw(json!({"label": "S1", "strength": "strong"}));
        assert_eq!(zone.validate().unwrap_err(), "missing `y`");

        let zone: RawLevelZone = raw(json!({"y": 300, "label": "S1"}));
        let zone = zone.validate().unwrap();
        assert_eq!(zone.y, 300.0);
        assert_eq!(zone.strength, ZoneStrength::Medium);
        assert_eq!(zone.label.as_deref(), Some("S1"));
    }

    #[test]
    fn non_numeric_coordinate_fails_to_deserialize() {
        let parsed = serde_json::from_value::<RawLevelZone>(json!({"y": "high"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn pattern_without_points_is_rejected() {
        let pattern: RawPattern = raw(json!({"name": "Bull Flag", "points": []}));
        assert!(pattern.validate().is_err());

        let pattern: RawPattern = raw(json!({"name": "Bull Flag"}));
        assert!(pattern.validate().is_err());
    }

    #[test]
    fn broken_sub_annotations_are_dropped_individually() {
        let pattern: RawPattern = raw(json!({
            "name": "Head & Shoulders",
            "type": "head_shoulders",
            "points": [[200, 300], [300, 150], [400, 100]],
            "breakout_direction": "bearish",
            "key_points": [
                {"x": 200, "y": 300, "label": "Left Shoulder"},
                {"x": "oops", "y": 100},
                {"y": 100}
            ],
            "neckline": {"x1": 200, "y1": 300, "x2": 600},
            "target": {"x": 600, "y": 520, "price": 1.075}
        }));
        let pattern = pattern.validate().unwrap();
        assert_eq!(pattern.points.len(), 3);
        assert_eq!(pattern.key_points.len(), 1);
        assert!(pattern.neckline.is_none());
        let target = pattern.target.unwrap();
        assert_eq!(target.price.as_deref(), Some("1.075"));
        assert_eq!(pattern.breakout, Bias::Bearish);
    }

    #[test]
    fn style_keyword_prefers_type_then_name() {
        let pattern: RawPattern = raw(json!({"name": "Falling Wedge", "points": [[0, 0]]}));
        assert_eq!(pattern.validate().unwrap().style_keyword(), "falling wedge");

        let pattern: RawPattern =
            raw(json!({"name": "Falling Wedge", "type": "triangle", "points": [[0, 0]]}));
        assert_eq!(pattern.validate().unwrap().style_keyword(), "triangle");

        let pattern: RawPattern =
            raw(json!({"name": "Falling Wedge", "type": "Triangle", "points": [[0, 0]]}));
        assert_eq!(pattern.validate().unwrap().style_keyword(), "Triangle");

        let pattern: RawPattern = raw(json!({"name": "Bull Flag", "type": "", "points": [[0, 0]]}));
        assert_eq!(pattern.validate().unwrap().style_keyword(), "bull flag");
    }

    #[test]
    fn box_zone_defaults_only_where_configured() {
        let ob: RawBoxZone = raw(json!({"x": 200, "y": 400, "type": "bullish"}));
        let ob = ob.validate_with_default(Some((80.0, 40.0))).unwrap();
        assert_eq!(ob.rect, Rect::new(200.0, 400.0, 80.0, 40.0));
        assert!(ob.bias.is_bullish());

        let breakout: RawBoxZone = raw(json!({"x": 550, "y": 240, "width": 100}));
        assert_eq!(
            breakout.validate_with_default(None).unwrap_err(),
            "missing `height`"
        );
    }

    #[test]
    fn zero_sized_box_takes_the_default_size() {
        let ob: RawBoxZone = raw(json!({"x": 200, "y": 400, "width": 0, "height": 0}));
        let ob = ob.validate_with_default(Some((80.0, 40.0))).unwrap();
        assert_eq!(ob.rect, Rect::new(200.0, 400.0, 80.0, 40.0));

        let gap: RawBoxZone = raw(json!({"x": 10, "y": 20, "width": 0, "height": 12}));
        let gap = gap.validate_with_default(Some((60.0, 30.0))).unwrap();
        assert_eq!(gap.rect, Rect::new(10.0, 20.0, 60.0, 12.0));

        let breakout: RawBoxZone = raw(json!({"x": 10, "y": 20, "width": 0, "height": 12}));
        assert_eq!(
            breakout.validate_with_default(None).unwrap().rect,
            Rect::new(10.0, 20.0, 0.0, 12.0)
        );
    }

    #[test]
    fn empty_label_counts_as_absent() {
        let marker: RawPointMarker = raw(json!({"x": 1, "y": 2, "label": ""}));
        assert_eq!(marker.validate().unwrap().label, None);
    }
}
