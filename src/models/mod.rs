// Overlay data model: what the analysis backend asks us to draw.
// Pure data and validation, independent of any drawing backend.

pub mod annotations;
pub mod overlay_set;

// Re-export key types for convenience
pub use annotations::{
    BoxZone, ChartPattern, KeyPoint, LevelZone, LiquiditySweep, Neckline, PointMarker,
    PriceTarget, Trendline,
};
pub use overlay_set::{DRAW_ORDER, OverlayCategory, OverlaySet, RejectedAnnotation};
