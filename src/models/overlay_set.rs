//! The overlay collection handed to the renderer, and its JSON ingestion.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::OVERLAY_STYLE;
use crate::models::annotations::{
    BoxZone, ChartPattern, LevelZone, LiquiditySweep, PointMarker, RawBoxZone, RawLevelZone,
    RawLiquiditySweep, RawPattern, RawPointMarker, RawTrendline, Trendline, Validate,
};

/// One annotation sequence of an [`OverlaySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum OverlayCategory {
    SupportZones,
    ResistanceZones,
    Trendlines,
    Patterns,
    EntryMarkers,
    StopLossMarkers,
    TakeProfitMarkers,
    BreakoutZones,
    LiquiditySweeps,
    OrderBlocks,
    FairValueGaps,
}

/// Paint order of the categories. Later entries paint over earlier ones.
pub const DRAW_ORDER: [OverlayCategory; 11] = [
    OverlayCategory::SupportZones,
    OverlayCategory::ResistanceZones,
    OverlayCategory::Trendlines,
    OverlayCategory::Patterns,
    OverlayCategory::EntryMarkers,
    OverlayCategory::StopLossMarkers,
    OverlayCategory::TakeProfitMarkers,
    OverlayCategory::BreakoutZones,
    OverlayCategory::LiquiditySweeps,
    OverlayCategory::OrderBlocks,
    OverlayCategory::FairValueGaps,
];

/// An entry that could not be drawn and was left out of the set.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedAnnotation {
    pub category: OverlayCategory,
    /// Position in the source list; `None` when the whole category was unusable.
    pub index: Option<usize>,
    pub reason: String,
}

/// Every annotation to draw over one chart, already validated.
///
/// Deserializing never fails because of a single bad entry: such entries are
/// dropped and recorded in [`OverlaySet::rejected`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawOverlaySet")]
pub struct OverlaySet {
    pub support_zones: Vec<LevelZone>,
    pub resistance_zones: Vec<LevelZone>,
    pub trendlines: Vec<Trendline>,
    pub patterns: Vec<ChartPattern>,
    pub entry_markers: Vec<PointMarker>,
    pub stop_loss_markers: Vec<PointMarker>,
    pub take_profit_markers: Vec<PointMarker>,
    pub breakout_zones: Vec<BoxZone>,
    pub liquidity_sweeps: Vec<LiquiditySweep>,
    pub order_blocks: Vec<BoxZone>,
    pub fair_value_gaps: Vec<BoxZone>,
    rejected: Vec<RejectedAnnotation>,
}

impl OverlaySet {
    /// Number of drawable annotations in a category.
    pub fn count(&self, category: OverlayCategory) -> usize {
        match category {
            OverlayCategory::SupportZones => self.support_zones.len(),
            OverlayCategory::ResistanceZones => self.resistance_zones.len(),
            OverlayCategory::Trendlines => self.trendlines.len(),
            OverlayCategory::Patterns => self.patterns.len(),
            OverlayCategory::EntryMarkers => self.entry_markers.len(),
            OverlayCategory::StopLossMarkers => self.stop_loss_markers.len(),
            OverlayCategory::TakeProfitMarkers => self.take_profit_markers.len(),
            OverlayCategory::BreakoutZones => self.breakout_zones.len(),
            OverlayCategory::LiquiditySweeps => self.liquidity_sweeps.len(),
            OverlayCategory::OrderBlocks => self.order_blocks.len(),
            OverlayCategory::FairValueGaps => self.fair_value_gaps.len(),
        }
    }

    pub fn total(&self) -> usize {
        DRAW_ORDER.iter().map(|c| self.count(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Entries dropped during ingestion.
    pub fn rejected(&self) -> &[RejectedAnnotation] {
        &self.rejected
    }

    /// Parse an overlay document. Accepts a bare overlay object or a full
    /// analysis response carrying it under `visual_overlays`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_document(document: Value) -> Result<Self, serde_json::Error> {
        let overlays = match document {
            Value::Null => return Ok(Self::default()),
            Value::Object(mut map) => match map.remove("visual_overlays") {
                Some(inner) if !inner.is_null() => inner,
                Some(_) => return Ok(Self::default()),
                None => Value::Object(map),
            },
            other => other,
        };
        serde_json::from_value(overlays)
    }
}

/// The wire shape: each category is kept as loose JSON until validated.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawOverlaySet {
    #[serde(alias = "supportZones")]
    pub support_zones: Option<Value>,
    #[serde(alias = "resistanceZones")]
    pub resistance_zones: Option<Value>,
    pub trendlines: Option<Value>,
    pub patterns: Option<Value>,
    #[serde(alias = "entryMarkers")]
    pub entry_markers: Option<Value>,
    #[serde(alias = "stopLossMarkers")]
    pub stop_loss_markers: Option<Value>,
    #[serde(alias = "takeProfitMarkers")]
    pub take_profit_markers: Option<Value>,
    #[serde(alias = "breakoutZones")]
    pub breakout_zones: Option<Value>,
    #[serde(alias = "liquiditySweeps")]
    pub liquidity_sweeps: Option<Value>,
    #[serde(alias = "orderBlocks")]
    pub order_blocks: Option<Value>,
    #[serde(alias = "fairValueGaps")]
    pub fair_value_gaps: Option<Value>,
}

/// Collects validated entries of one category, recording the rejects.
struct Ingest<'a> {
    rejected: &'a mut Vec<RejectedAnnotation>,
}

impl Ingest<'_> {
    fn reject(&mut self, category: OverlayCategory, index: Option<usize>, reason: String) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_skipped_annotations {
            log::info!("Skipping {} entry {:?}: {}", category, index, reason);
        }
        log::debug!("Skipping malformed {} entry {:?}: {}", category, index, reason);
        self.rejected.push(RejectedAnnotation {
            category,
            index,
            reason,
        });
    }

    fn entries(&mut self, category: OverlayCategory, value: Option<Value>) -> Vec<Value> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.reject(category, None, "expected a list".to_string());
                Vec::new()
            }
        }
    }

    fn with<R, T>(
        &mut self,
        category: OverlayCategory,
        value: Option<Value>,
        validate: impl Fn(R) -> Result<T, String>,
    ) -> Vec<T>
    where
        R: DeserializeOwned,
    {
        let mut accepted = Vec::new();
        for (index, item) in self.entries(category, value).into_iter().enumerate() {
            let outcome = serde_json::from_value::<R>(item)
                .map_err(|e| e.to_string())
                .and_then(&validate);
            match outcome {
                Ok(annotation) => accepted.push(annotation),
                Err(reason) => self.reject(category, Some(index), reason),
            }
        }
        accepted
    }

    fn list<R>(&mut self, category: OverlayCategory, value: Option<Value>) -> Vec<R::Output>
    where
        R: DeserializeOwned + Validate,
    {
        self.with(category, value, R::validate)
    }
}

impl From<RawOverlaySet> for OverlaySet {
    fn from(raw: RawOverlaySet) -> Self {
        use OverlayCategory as C;

        let boxes = &OVERLAY_STYLE.boxes;
        let mut rejected = Vec::new();
        let mut ingest = Ingest {
            rejected: &mut rejected,
        };

        let support_zones = ingest.list::<RawLevelZone>(C::SupportZones, raw.support_zones);
        let resistance_zones =
            ingest.list::<RawLevelZone>(C::ResistanceZones, raw.resistance_zones);
        let trendlines = ingest.list::<RawTrendline>(C::Trendlines, raw.trendlines);
        let patterns = ingest.list::<RawPattern>(C::Patterns, raw.patterns);
        let entry_markers = ingest.list::<RawPointMarker>(C::EntryMarkers, raw.entry_markers);
        let stop_loss_markers =
            ingest.list::<RawPointMarker>(C::StopLossMarkers, raw.stop_loss_markers);
        let take_profit_markers =
            ingest.list::<RawPointMarker>(C::TakeProfitMarkers, raw.take_profit_markers);
        let breakout_zones = ingest.with(C::BreakoutZones, raw.breakout_zones, |r: RawBoxZone| {
            r.validate_with_default(None)
        });
        let liquidity_sweeps =
            ingest.list::<RawLiquiditySweep>(C::LiquiditySweeps, raw.liquidity_sweeps);
        let order_blocks = ingest.with(C::OrderBlocks, raw.order_blocks, |r: RawBoxZone| {
            r.validate_with_default(Some(boxes.order_block_default_size))
        });
        let fair_value_gaps = ingest.with(C::FairValueGaps, raw.fair_value_gaps, |r: RawBoxZone| {
            r.validate_with_default(Some(boxes.gap_default_size))
        });

        Self {
            support_zones,
            resistance_zones,
            trendlines,
            patterns,
            entry_markers,
            stop_loss_markers,
            take_profit_markers,
            breakout_zones,
            liquidity_sweeps,
            order_blocks,
            fair_value_gaps,
            rejected,
        }
    }
}
