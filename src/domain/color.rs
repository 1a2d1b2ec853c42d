/// Straight (non-premultiplied) RGBA colour with a fractional alpha,
/// mirroring the `rgba(r, g, b, a)` notation the overlay palette is written in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Shorthand constructor used by the style tables.
pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Rgba {
    Rgba { r, g, b, a }
}

impl Rgba {
    pub const BLACK: Rgba = rgba(0, 0, 0, 1.0);
    pub const WHITE: Rgba = rgba(255, 255, 255, 1.0);

    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba { a, ..self }
    }

    /// Alpha quantised to a byte, as the raster backend stores it.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.alpha_u8())
    }
}
