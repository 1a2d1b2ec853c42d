use crate::domain::{REFERENCE_FRAME, SurfaceSize};
use crate::models::{DRAW_ORDER, OverlaySet};
use crate::render::commands::DrawList;
use crate::render::layers::{LayerContext, layer_for};
use crate::render::text::TextMeasure;

/// Builds the full overlay pass for a surface of `size`.
///
/// Pure: the same inputs always give an identical list. Categories are visited in
/// [`DRAW_ORDER`]; empty ones contribute nothing.
pub fn compose_overlays(size: SurfaceSize, overlays: &OverlaySet, measure: &dyn TextMeasure) -> DrawList {
    let ctx = LayerContext {
        overlays,
        scale: REFERENCE_FRAME.scale_to(size),
        size,
        measure,
    };

    let mut list = DrawList::new();
    for category in DRAW_ORDER {
        if overlays.count(category) == 0 {
            continue;
        }
        let layer = layer_for(category);
        list.record(category, |l| layer.render(l, &ctx));
    }
    list
}
