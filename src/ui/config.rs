use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    /// Width of the image source text box
    pub image_input_width: f32,
    pub overlays_input_width: f32,
    /// How often to poll an in-flight image load
    pub load_poll_interval_ms: u64,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        central_panel: Color32::from_rgb(18, 18, 24),
        side_panel: Color32::from_rgb(25, 25, 25),
        success: Color32::from_rgb(100, 200, 100),
        warning: Color32::from_rgb(255, 215, 0),
        error: Color32::from_rgb(255, 100, 100),
    },
    image_input_width: 320.0,
    overlays_input_width: 240.0,
    load_poll_interval_ms: 50,
};
