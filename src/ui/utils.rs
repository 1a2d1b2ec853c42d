use eframe::egui::{ColorImage, Context, Visuals};

use crate::render::RasterSurface;
use crate::ui::config::UI_CONFIG;

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    // Make the widgets stand out a bit more
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// The composited surface as an egui image (both are premultiplied RGBA).
pub fn surface_to_color_image(surface: &RasterSurface) -> ColorImage {
    let size = surface.size();
    ColorImage::from_rgba_premultiplied([size.width as usize, size.height as usize], surface.data())
}

/// "1280x720"
pub fn format_dimensions(width: u32, height: u32) -> String {
    format!("{}x{}", width, height)
}
