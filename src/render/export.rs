use std::path::{Path, PathBuf};

use crate::config::export_file_name;
use crate::error::ExportError;
use crate::render::raster::RasterSurface;

/// A PNG ready to be saved, with its default download name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    /// Writes the PNG into `dir` (created if missing) and returns the full path.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let io_error = |path: &Path, e: std::io::Error| ExportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|e| io_error(&path, e))?;
        Ok(path)
    }
}

/// Encodes the surface as `chart-analysis-<epoch_ms>.png`.
pub fn export_png(surface: &RasterSurface, epoch_ms: i64) -> Result<ExportedImage, ExportError> {
    let bytes = surface.encode_png()?;
    Ok(ExportedImage {
        file_name: export_file_name(epoch_ms),
        bytes,
    })
}
