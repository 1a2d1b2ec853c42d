//! Label text configuration

pub struct TextConfig {
    /// Fonts tried (in order) when no explicit font is supplied. Bold faces only.
    pub font_search_paths: &'static [&'static str],
    /// Average advance of a bold sans glyph, as a fraction of the font size.
    /// Only used when no font could be loaded.
    pub approx_advance_em: f32,
}

pub const TEXT: TextConfig = TextConfig {
    font_search_paths: &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "/Library/Fonts/Arial Bold.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
    ],
    approx_advance_em: 0.6,
};
