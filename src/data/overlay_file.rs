use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::models::OverlaySet;

/// Reads an overlay document (bare overlay object or analysis response with
/// `visual_overlays`) from disk. Malformed entries are dropped, not fatal.
pub fn load_overlay_file(path: &Path) -> Result<OverlaySet> {
    let file = File::open(path).context(format!("Failed to open overlay file: {:?}", path))?;
    let document: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .context(format!("Overlay file is not valid JSON: {:?}", path))?;
    let overlays = OverlaySet::from_document(document)
        .context(format!("Overlay file has an unexpected shape: {:?}", path))?;

    log::info!(
        "Loaded {} overlays from {} ({} skipped)",
        overlays.total(),
        path.display(),
        overlays.rejected().len()
    );
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_skipped_annotations {
        for rejected in overlays.rejected() {
            log::info!(
                "  skipped {}[{:?}]: {}",
                rejected.category,
                rejected.index,
                rejected.reason
            );
        }
    }
    Ok(overlays)
}
