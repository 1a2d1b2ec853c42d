use eframe::egui::{
    Button, CentralPanel, Context, Frame, Image, Key, RichText, Spinner, TextEdit, TextureOptions,
    TopBottomPanel,
};

use crate::render::RendererState;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{format_dimensions, surface_to_color_image};

use super::app::{ChartViewerApp, Notification};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl ChartViewerApp {
    pub(super) fn render_top_panel(&mut self, ctx: &Context) {
        TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label_subdued(UI_TEXT.label_image);
                let image_edit = ui.add(
                    TextEdit::singleline(&mut self.image_input)
                        .hint_text(UI_TEXT.hint_image)
                        .desired_width(UI_CONFIG.image_input_width),
                );

                ui.label_subdued(UI_TEXT.label_overlays);
                let overlays_edit = ui.add(
                    TextEdit::singleline(&mut self.overlays_input)
                        .hint_text(UI_TEXT.hint_overlays)
                        .desired_width(UI_CONFIG.overlays_input_width),
                );

                // Enter in either box behaves like the Load button
                let submitted = (image_edit.lost_focus() || overlays_edit.lost_focus())
                    && ui.input(|i| i.key_pressed(Key::Enter));

                if ui.button(UI_TEXT.button_load).clicked() || submitted {
                    self.start_load();
                }

                ui.separator();

                let toggle_text = if self.overlays_visible {
                    UI_TEXT.button_hide_overlays
                } else {
                    UI_TEXT.button_show_overlays
                };
                if ui.button(toggle_text).clicked() {
                    self.toggle_overlays();
                }

                let can_download = self.renderer.surface().is_some();
                if ui
                    .add_enabled(can_download, Button::new(UI_TEXT.button_download))
                    .clicked()
                {
                    self.download();
                }
            });
            ui.add_space(4.0);
        });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.renderer.state() {
                    RendererState::Unloaded => ui.label_subdued(UI_TEXT.status_unloaded),
                    RendererState::Loading(_) => {
                        ui.add(Spinner::new().size(12.0));
                        ui.label_subdued(UI_TEXT.status_loading);
                    }
                    RendererState::Ready => ui.label_success(UI_TEXT.status_ready),
                }

                if let Some(image) = self.renderer.image() {
                    ui.separator();
                    let size = image.size();
                    ui.label_subdued(format_dimensions(size.width, size.height));
                    if image.is_tainted() {
                        ui.label_warning("cross-origin: export disabled");
                    }
                }

                if let Some(overlays) = self.renderer.overlays() {
                    ui.separator();
                    ui.metric(
                        UI_TEXT.label_overlay_count,
                        &overlays.total().to_string(),
                        UI_CONFIG.colors.heading,
                    );
                    let skipped = self.renderer.validation().len();
                    if skipped > 0 {
                        ui.metric(
                            UI_TEXT.label_skipped,
                            &skipped.to_string(),
                            UI_CONFIG.colors.warning,
                        );
                    }
                }

                if !self.has_font {
                    ui.separator();
                    ui.label_warning(UI_TEXT.label_no_font);
                }

                if let Some(notification) = &self.notification {
                    ui.separator();
                    match notification {
                        Notification::Info(msg) => ui.label_success(msg.as_str()),
                        Notification::Warning(msg) => ui.label_warning(msg.as_str()),
                        Notification::Error(msg) => ui.label_error(msg.as_str()),
                    }
                }
            });
        });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        if self.texture_stale {
            self.texture_stale = false;
            self.texture = self.renderer.surface().map(|surface| {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    let size = surface.size();
                    log::info!("Uploading chart texture {}x{}", size.width, size.height);
                }
                ctx.load_texture(
                    "chart_surface",
                    surface_to_color_image(surface),
                    TextureOptions::LINEAR,
                )
            });
        }

        let central_panel_frame = Frame::new().fill(UI_CONFIG.colors.central_panel);
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| match &self.texture {
                Some(texture) => {
                    ui.centered_and_justified(|ui| {
                        ui.add(Image::from_texture(texture).shrink_to_fit());
                    });
                }
                None => {
                    let placeholder = if self.is_loading() {
                        UI_TEXT.placeholder_loading
                    } else {
                        UI_TEXT.placeholder_no_chart
                    };
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(placeholder).color(UI_CONFIG.colors.label));
                    });
                }
            });
    }
}
