/// All user-facing strings of the viewer in one place.
pub struct UiText {
    pub window_title: &'static str,
    pub label_image: &'static str,
    pub label_overlays: &'static str,
    pub hint_image: &'static str,
    pub hint_overlays: &'static str,
    pub button_load: &'static str,
    pub button_hide_overlays: &'static str,
    pub button_show_overlays: &'static str,
    pub button_download: &'static str,
    pub status_unloaded: &'static str,
    pub status_loading: &'static str,
    pub status_ready: &'static str,
    pub placeholder_no_chart: &'static str,
    pub placeholder_loading: &'static str,
    pub label_overlay_count: &'static str,
    pub label_skipped: &'static str,
    pub label_no_font: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Chart Overlay - annotated chart viewer",
    label_image: "Chart image",
    label_overlays: "Overlays",
    hint_image: "path or https:// URL",
    hint_overlays: "overlay JSON file (optional)",
    button_load: "Load",
    button_hide_overlays: "Hide Overlays",
    button_show_overlays: "Show Overlays",
    button_download: "Download",
    status_unloaded: "No chart",
    status_loading: "Loading chart...",
    status_ready: "Ready",
    placeholder_no_chart: "Enter a chart image and press Load",
    placeholder_loading: "Loading chart image...",
    label_overlay_count: "Overlays",
    label_skipped: "Skipped",
    label_no_font: "no label font: chip text hidden",
};
