use std::sync::Arc;

use tiny_skia::{ColorU8, IntSize, Pixmap};

use crate::domain::SurfaceSize;
use crate::error::LoadError;

/// A decoded chart image. Immutable once built; clones share the pixels.
#[derive(Debug, Clone)]
pub struct ChartImage {
    pixels: Arc<Pixmap>,
    tainted: bool,
    description: String,
}

impl ChartImage {
    /// Decodes any format the `image` crate was built with (png, jpeg, webp, gif, bmp).
    pub fn decode(bytes: &[u8], description: impl Into<String>) -> Result<Self, LoadError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| LoadError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let size = IntSize::from_wh(width, height).ok_or(LoadError::EmptyImage)?;

        // tiny-skia stores premultiplied RGBA
        let mut data = rgba.into_raw();
        for px in data.chunks_exact_mut(4) {
            let p = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
            px.copy_from_slice(&[p.red(), p.green(), p.blue(), p.alpha()]);
        }

        let pixmap = Pixmap::from_vec(data, size)
            .ok_or_else(|| LoadError::Decode("pixel buffer does not match dimensions".to_string()))?;
        Ok(Self::from_pixmap(pixmap, description))
    }

    pub fn from_pixmap(pixmap: Pixmap, description: impl Into<String>) -> Self {
        Self {
            pixels: Arc::new(pixmap),
            tainted: false,
            description: description.into(),
        }
    }

    /// Solid-colour image, mostly useful for previews and tests.
    pub fn blank(size: SurfaceSize, color: tiny_skia::Color) -> Result<Self, LoadError> {
        let mut pixmap = Pixmap::new(size.width, size.height).ok_or(LoadError::EmptyImage)?;
        pixmap.fill(color);
        Ok(Self::from_pixmap(pixmap, format!("blank {}x{}", size.width, size.height)))
    }

    /// Marks the pixels as read-back restricted (cross-origin without permission).
    pub fn mark_tainted(mut self) -> Self {
        self.tainted = true;
        self
    }

    pub fn is_tainted(&self) -> bool {
        self.tainted
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.pixels.width(), self.pixels.height())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixels
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
