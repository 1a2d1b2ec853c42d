use eframe::{Frame, egui};
use poll_promise::Promise;
use serde::{Deserialize, Serialize};

use crate::Cli;
use crate::config::PERSISTENCE;
use crate::data::ChartImage;
use crate::error::LoadError;
use crate::render::{LabelFont, LoadTicket, OverlayRenderer};
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// One-line message shown in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Notification {
    Info(String),
    Warning(String),
    Error(String),
}

/// An image fetch running on its own thread, tagged with its renderer ticket.
pub(super) struct PendingLoad {
    pub ticket: LoadTicket,
    pub promise: Promise<Result<ChartImage, LoadError>>,
}

#[derive(Deserialize, Serialize)]
pub struct ChartViewerApp {
    // Inputs (persisted)
    #[serde(default)]
    pub(super) image_input: String,
    #[serde(default)]
    pub(super) overlays_input: String,
    #[serde(default = "default_overlays_visible")]
    pub(super) overlays_visible: bool,
    #[serde(default = "default_export_dir")]
    pub(super) export_dir: String,

    // Runtime-only state
    #[serde(skip)]
    pub(super) renderer: OverlayRenderer,
    #[serde(skip)]
    pub(super) pending_load: Option<PendingLoad>,
    #[serde(skip)]
    pub(super) texture: Option<egui::TextureHandle>,
    // Set whenever the renderer surface changed and the texture must be re-uploaded
    #[serde(skip)]
    pub(super) texture_stale: bool,
    #[serde(skip)]
    pub(super) notification: Option<Notification>,
    #[serde(skip)]
    pub(super) has_font: bool,
}

fn default_overlays_visible() -> bool {
    true
}

fn default_export_dir() -> String {
    PERSISTENCE.export.default_directory.to_string()
}

impl Default for ChartViewerApp {
    fn default() -> Self {
        Self {
            image_input: String::new(),
            overlays_input: String::new(),
            overlays_visible: default_overlays_visible(),
            export_dir: default_export_dir(),
            renderer: OverlayRenderer::default(),
            pending_load: None,
            texture: None,
            texture_stale: false,
            notification: None,
            has_font: false,
        }
    }
}

impl ChartViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        // Attempt to load the persisted state
        let mut app: ChartViewerApp = match cc.storage.and_then(|s| eframe::get_value(s, eframe::APP_KEY)) {
            Some(value) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("Successfully loaded persisted viewer state");
                }
                value
            }
            None => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("No persisted viewer state. Creating anew.");
                }
                ChartViewerApp::default()
            }
        };

        app.apply_cli(&args);

        let font = match LabelFont::resolve(args.font.as_deref()) {
            Ok(font) => font,
            Err(e) => {
                log::warn!("{:#}", e);
                app.notify(Notification::Warning(format!("{:#}", e)));
                LabelFont::discover()
            }
        };
        app.has_font = font.is_some();
        match &font {
            Some(font) => log::info!("Chip labels use {}", font.source()),
            None => log::warn!("No label font found; chip text will not be painted"),
        }
        app.renderer = OverlayRenderer::with_font(font);
        // no scene yet, so this only records the flag
        let _ = app.renderer.set_visible(app.overlays_visible);

        if !app.image_input.trim().is_empty() {
            app.start_load();
        }
        app
    }

    /// Command-line values win over persisted ones.
    pub(super) fn apply_cli(&mut self, args: &Cli) {
        if let Some(image) = &args.image {
            self.image_input = image.clone();
        }
        if let Some(overlays) = &args.overlays {
            self.overlays_input = overlays.display().to_string();
        }
        if let Some(dir) = &args.export_dir {
            self.export_dir = dir.display().to_string();
        }
        if args.hide_overlays {
            self.overlays_visible = false;
        }
    }

    pub(super) fn notify(&mut self, notification: Notification) {
        match &notification {
            Notification::Info(msg) => log::info!("{}", msg),
            Notification::Warning(msg) => log::warn!("{}", msg),
            Notification::Error(msg) => log::error!("{}", msg),
        }
        self.notification = Some(notification);
    }

    pub(super) fn toggle_overlays(&mut self) {
        self.overlays_visible = !self.overlays_visible;
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Overlays visible: {}", self.overlays_visible);
        }
        if self.renderer.set_visible(self.overlays_visible).is_some() {
            self.texture_stale = true;
        }
    }

    pub(super) fn download(&mut self) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Download requested into {}", self.export_dir);
        }
        let saved = self
            .renderer
            .export()
            .map_err(|e| e.to_string())
            .and_then(|exported| {
                exported
                    .save_in(std::path::Path::new(&self.export_dir))
                    .map_err(|e| e.to_string())
            });
        match saved {
            Ok(path) => self.notify(Notification::Info(format!("Saved {}", path.display()))),
            Err(msg) => self.notify(Notification::Error(format!("Download failed: {}", msg))),
        }
    }

    fn handle_global_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (toggle, save) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::H),
                i.modifiers.command && i.key_pressed(egui::Key::S),
            )
        });
        if toggle {
            self.toggle_overlays();
        }
        if save {
            self.download();
        }
    }
}

impl eframe::App for ChartViewerApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_image_load(ctx);
        self.handle_global_shortcuts(ctx);

        self.render_top_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_overrides_persisted_inputs() {
        let mut app = ChartViewerApp {
            image_input: "old.png".to_string(),
            overlays_input: "old.json".to_string(),
            ..Default::default()
        };
        let args = Cli::parse_from([
            "chart-overlay",
            "--image",
            "https://example.com/new.png",
            "--hide-overlays",
        ]);
        app.apply_cli(&args);
        assert_eq!(app.image_input, "https://example.com/new.png");
        assert_eq!(app.overlays_input, "old.json");
        assert!(!app.overlays_visible);
    }

    #[test]
    fn persisted_state_skips_runtime_fields() {
        let app = ChartViewerApp {
            image_input: "chart.png".to_string(),
            notification: Some(Notification::Info("hello".to_string())),
            ..Default::default()
        };
        let json = serde_json::to_string(&app).unwrap();
        assert!(json.contains("chart.png"));
        assert!(!json.contains("hello"));

        let restored: ChartViewerApp = serde_json::from_str(r#"{"image_input": "a.png"}"#).unwrap();
        assert_eq!(restored.image_input, "a.png");
        assert!(restored.overlays_visible);
        assert_eq!(restored.export_dir, "exports");
    }

    #[test]
    fn download_without_chart_reports_error() {
        let mut app = ChartViewerApp::default();
        app.download();
        assert!(matches!(app.notification, Some(Notification::Error(_))));
    }
}
