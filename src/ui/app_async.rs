use std::path::Path;
use std::time::Duration;

use eframe::egui;
use poll_promise::Promise;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{ChartImage, ImageSource, load_overlay_file};
use crate::error::LoadError;
use crate::models::OverlaySet;
use crate::render::LoadOutcome;
use crate::ui::app::{ChartViewerApp, Notification, PendingLoad};
use crate::ui::config::UI_CONFIG;

/// Runs on the promise thread: a private current-thread runtime drives the fetch.
fn fetch_chart_image(source: ImageSource) -> Result<ChartImage, LoadError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LoadError::Io {
            path: source.describe(),
            message: format!("failed to start runtime: {}", e),
        })?;
    runtime.block_on(source.load())
}

impl ChartViewerApp {
    fn read_overlays(&self) -> anyhow::Result<OverlaySet> {
        let input = self.overlays_input.trim();
        if input.is_empty() {
            return Ok(OverlaySet::default());
        }
        load_overlay_file(Path::new(input))
    }

    /// Starts fetching the image named in the inputs. A load already in flight
    /// is superseded: its result will be discarded.
    pub(super) fn start_load(&mut self) {
        let source = match ImageSource::parse(&self.image_input) {
            Ok(source) => source,
            Err(e) => {
                self.notify(Notification::Error(e.to_string()));
                return;
            }
        };
        let overlays = match self.read_overlays() {
            Ok(overlays) => overlays,
            Err(e) => {
                self.notify(Notification::Error(format!("{:#}", e)));
                return;
            }
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Load requested: {}", source.describe());
        }

        let ticket = self.renderer.begin_load(overlays);
        let promise = Promise::spawn_thread("chart_image_load", move || fetch_chart_image(source));
        self.pending_load = Some(PendingLoad { ticket, promise });
        self.notification = None;
    }

    pub(super) fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub(super) fn poll_image_load(&mut self, ctx: &egui::Context) {
        let outcome = self.pending_load.as_ref().and_then(|pending| {
            pending
                .promise
                .ready()
                .map(|result| (pending.ticket, result.clone()))
        });

        let Some((ticket, result)) = outcome else {
            if self.is_loading() {
                ctx.request_repaint_after(Duration::from_millis(UI_CONFIG.load_poll_interval_ms));
            }
            return;
        };
        self.pending_load = None;

        match self.renderer.complete_load(ticket, result) {
            Ok(LoadOutcome::Rendered) => {
                self.texture_stale = true;
                let skipped = self.renderer.validation().len();
                if skipped > 0 {
                    self.notify(Notification::Warning(format!(
                        "{} malformed annotation(s) skipped",
                        skipped
                    )));
                }
            }
            Ok(LoadOutcome::Discarded) => {}
            Err(e) => {
                self.texture = None;
                self.notify(Notification::Error(e.to_string()));
            }
        }
        ctx.request_repaint();
    }
}
