//! The stateful overlay renderer: owns the surface, the cached scene and the
//! load lifecycle (`Unloaded -> Loading -> Ready`).

use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{ChartImage, ImageSource};
use crate::error::{ExportError, LoadError, OverlayError};
use crate::models::{OverlaySet, RejectedAnnotation};
use crate::render::commands::DrawList;
use crate::render::compose::compose_overlays;
use crate::render::export::{ExportedImage, export_png};
use crate::render::raster::{RasterSurface, Rasterizer};
use crate::render::text::LabelFont;
use crate::utils::app_time;

/// Identifies one image load. Only the most recent ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    Unloaded,
    Loading(LoadTicket),
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The load was current: the scene was swapped in and drawn.
    Rendered,
    /// A newer load superseded this one; its result was dropped.
    Discarded,
}

/// Image and overlays, always swapped together.
#[derive(Debug)]
struct Scene {
    image: ChartImage,
    overlays: Arc<OverlaySet>,
}

#[derive(Debug)]
pub struct OverlayRenderer {
    rasterizer: Rasterizer,
    state: RendererState,
    last_ticket: u64,
    pending: Option<(LoadTicket, Arc<OverlaySet>)>,
    scene: Option<Arc<Scene>>,
    visible: bool,
    draw_list: DrawList,
    surface: Option<RasterSurface>,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(Rasterizer::default())
    }
}

impl OverlayRenderer {
    pub fn new(rasterizer: Rasterizer) -> Self {
        Self {
            rasterizer,
            state: RendererState::Unloaded,
            last_ticket: 0,
            pending: None,
            scene: None,
            visible: true,
            draw_list: DrawList::new(),
            surface: None,
        }
    }

    pub fn with_font(font: Option<LabelFont>) -> Self {
        Self::new(Rasterizer::new(font))
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The last composited output, if any image has been drawn.
    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    /// Commands of the last pass (empty when overlays are hidden).
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn image(&self) -> Option<&ChartImage> {
        self.scene.as_ref().map(|s| &s.image)
    }

    pub fn overlays(&self) -> Option<&OverlaySet> {
        self.scene.as_ref().map(|s| s.overlays.as_ref())
    }

    /// Annotations of the current scene that were skipped as malformed.
    pub fn validation(&self) -> &[RejectedAnnotation] {
        self.scene
            .as_ref()
            .map(|s| s.overlays.rejected())
            .unwrap_or(&[])
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Starts a load for `overlays`. Any earlier in-flight load is superseded.
    pub fn begin_load(&mut self, overlays: OverlaySet) -> LoadTicket {
        self.last_ticket += 1;
        let ticket = LoadTicket(self.last_ticket);
        self.pending = Some((ticket, Arc::new(overlays)));
        self.state = RendererState::Loading(ticket);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_load_events {
            log::info!("Image load {:?} started", ticket);
        }
        ticket
    }

    /// Delivers the result of the load identified by `ticket`.
    ///
    /// Stale tickets are discarded whatever their result. A failed current load
    /// clears the scene and returns the renderer to `Unloaded`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ChartImage, LoadError>,
    ) -> Result<LoadOutcome, OverlayError> {
        let overlays = match self.pending.take() {
            Some((current, overlays)) if current == ticket => overlays,
            other => {
                self.pending = other;
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_load_events {
                    log::info!("Discarding stale image load {:?}", ticket);
                }
                return Ok(LoadOutcome::Discarded);
            }
        };

        match result {
            Ok(image) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_load_events {
                    log::info!(
                        "Image load {:?} ready: {} ({}x{})",
                        ticket,
                        image.description(),
                        image.size().width,
                        image.size().height
                    );
                }
                self.show(Arc::new(Scene { image, overlays }));
                self.state = RendererState::Ready;
                Ok(LoadOutcome::Rendered)
            }
            Err(e) => {
                log::warn!("Chart image failed to load: {}", e);
                self.clear();
                Err(OverlayError::Load(e))
            }
        }
    }

    /// Draws an already decoded image. Supersedes any in-flight load.
    pub fn render(&mut self, image: ChartImage, overlays: OverlaySet, visible: bool) -> &RasterSurface {
        self.pending = None;
        self.visible = visible;
        self.state = RendererState::Ready;
        self.show(Arc::new(Scene {
            image,
            overlays: Arc::new(overlays),
        }))
    }

    /// Fetches `source`, then draws it with `overlays`.
    pub async fn load_and_render(
        &mut self,
        source: &ImageSource,
        overlays: OverlaySet,
        visible: bool,
    ) -> Result<&RasterSurface, OverlayError> {
        let ticket = self.begin_load(overlays);
        self.visible = visible;
        let result = source.load().await;
        match self.complete_load(ticket, result)? {
            LoadOutcome::Rendered => self.surface.as_ref().ok_or(OverlayError::NotReady),
            LoadOutcome::Discarded => Err(OverlayError::NotReady),
        }
    }

    /// Replaces the overlays. While loading they pair with the incoming image;
    /// when ready they re-render over the cached image.
    pub fn set_overlays(&mut self, overlays: OverlaySet) -> Result<(), OverlayError> {
        if let Some((ticket, _)) = self.pending.take() {
            self.pending = Some((ticket, Arc::new(overlays)));
            return Ok(());
        }
        let scene = self.scene.clone().ok_or(OverlayError::NotReady)?;
        self.show(Arc::new(Scene {
            image: scene.image.clone(),
            overlays: Arc::new(overlays),
        }));
        Ok(())
    }

    /// Shows or hides the overlay pass, re-rendering the cached scene.
    pub fn set_visible(&mut self, visible: bool) -> Option<&RasterSurface> {
        self.visible = visible;
        let scene = self.scene.clone()?;
        Some(self.show(scene))
    }

    /// PNG of the current surface. Fails (without touching the surface) when
    /// nothing is drawn yet or the image forbids read-back.
    pub fn export(&self) -> Result<ExportedImage, OverlayError> {
        let surface = self.surface.as_ref().ok_or(ExportError::NoSurface)?;
        Ok(export_png(surface, app_time::epoch_millis())?)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn show(&mut self, scene: Arc<Scene>) -> &RasterSurface {
        let started = app_time::now();
        let list = if self.visible {
            compose_overlays(scene.image.size(), &scene.overlays, self.rasterizer.measure())
        } else {
            DrawList::new()
        };
        let surface = self.rasterizer.rasterize(&scene.image, &list);

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_render_timings {
            log::info!(
                "Rendered {} commands over {}x{} in {:?}",
                list.len(),
                surface.size().width,
                surface.size().height,
                started.elapsed()
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = started;

        self.scene = Some(scene);
        self.draw_list = list;
        self.surface.insert(surface)
    }

    fn clear(&mut self) {
        self.pending = None;
        self.scene = None;
        self.surface = None;
        self.draw_list = DrawList::new();
        self.state = RendererState::Unloaded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SurfaceSize;
    use crate::models::OverlayCategory;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use serde_json::json;
    use std::io::Cursor;

    fn white(width: u32, height: u32) -> ChartImage {
        ChartImage::blank(SurfaceSize::new(width, height), tiny_skia::Color::WHITE).unwrap()
    }

    fn overlays(doc: serde_json::Value) -> OverlaySet {
        OverlaySet::from_document(doc).unwrap()
    }

    fn busy_overlays() -> OverlaySet {
        overlays(json!({
            "support_zones": [{"y": 450, "strength": "strong", "label": "Support"}],
            "resistance_zones": [{"y": 120, "strength": "weak", "label": "Resistance"}],
            "trendlines": [{"x1": 50, "y1": 550, "x2": 700, "y2": 150, "type": "bullish", "label": "Uptrend"}],
            "patterns": [{
                "name": "Ascending Triangle",
                "type": "ascending_triangle",
                "points": [[200, 400], [500, 200], [500, 400]],
                "key_points": [{"x": 500, "y": 200, "label": "Apex"}],
                "neckline": {"x1": 200, "y1": 400, "x2": 500, "y2": 400},
                "target": {"x": 520, "y": 150, "price": "64250"}
            }],
            "entry_markers": [{"x": 400, "y": 300, "label": "Entry"}],
            "stop_loss_markers": [{"x": 400, "y": 380, "label": "SL"}],
            "take_profit_markers": [{"x": 450, "y": 200, "label": "TP1"}, {"x": 480, "y": 150, "label": "TP2"}],
            "breakout_zones": [{"x": 600, "y": 100, "width": 120, "height": 60, "type": "bullish", "label": "Breakout"}],
            "liquidity_sweeps": [{"x": 300, "y": 500, "label": "Sweep", "direction": "down"}],
            "order_blocks": [{"x": 100, "y": 350, "type": "bullish", "label": "OB"}],
            "fair_value_gaps": [{"x": 650, "y": 300, "type": "bearish", "label": "FVG"}]
        }))
    }

    fn near(actual: u8, expected: u8) -> bool {
        (actual as i32 - expected as i32).abs() <= 2
    }

    #[test]
    fn starts_unloaded_and_export_needs_a_surface() {
        let renderer = OverlayRenderer::default();
        assert_eq!(renderer.state(), RendererState::Unloaded);
        assert!(renderer.surface().is_none());
        assert_eq!(
            renderer.export(),
            Err(OverlayError::Export(ExportError::NoSurface))
        );
    }

    #[test]
    fn surface_matches_image_size() {
        let mut renderer = OverlayRenderer::default();
        let surface = renderer.render(white(1024, 512), busy_overlays(), true);
        assert_eq!(surface.size(), SurfaceSize::new(1024, 512));
        assert_eq!(renderer.state(), RendererState::Ready);
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut a = OverlayRenderer::default();
        let mut b = OverlayRenderer::default();
        let first = a.render(white(800, 600), busy_overlays(), true).clone();
        let again = a.render(white(800, 600), busy_overlays(), true).clone();
        let other = b.render(white(800, 600), busy_overlays(), true).clone();
        assert_eq!(first, again);
        assert_eq!(first, other);
        assert_ne!(first, a.rasterizer.bare(&white(800, 600)));
    }

    #[test]
    fn malformed_pattern_does_not_blank_the_chart() {
        let set = overlays(json!({
            "supportZones": [{"y": 300, "strength": "medium"}],
            "patterns": [{"name": "Ghost", "points": []}]
        }));
        let mut renderer = OverlayRenderer::default();
        let surface = renderer.render(white(800, 600), set, true).clone();

        assert_eq!(renderer.validation().len(), 1);
        assert_eq!(renderer.validation()[0].category, OverlayCategory::Patterns);
        assert!(renderer.draw_list().commands_for(OverlayCategory::Patterns).is_empty());
        // band at y = 290..310 is tinted green
        assert_ne!(surface.pixel_rgba(400, 295), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel_rgba(400, 100), Some([255, 255, 255, 255]));
    }

    #[test]
    fn toggling_visibility_round_trips() {
        let mut renderer = OverlayRenderer::default();
        let original = renderer.render(white(640, 480), busy_overlays(), true).clone();

        let hidden = renderer.set_visible(false).cloned().unwrap();
        assert_eq!(hidden, renderer.rasterizer.bare(&white(640, 480)));
        assert!(renderer.draw_list().is_empty());

        let shown = renderer.set_visible(true).cloned().unwrap();
        assert_eq!(shown, original);
    }

    #[test]
    fn empty_overlays_equal_hidden_overlays() {
        let mut renderer = OverlayRenderer::default();
        let visible = renderer.render(white(320, 200), OverlaySet::default(), true).clone();
        let hidden = renderer.render(white(320, 200), OverlaySet::default(), false).clone();
        assert_eq!(visible, hidden);
        assert_eq!(visible, renderer.rasterizer.bare(&white(320, 200)));
    }

    #[test]
    fn strong_support_band_on_small_chart() {
        let set = overlays(json!({
            "supportZones": [{"y": 300, "strength": "strong", "label": "S1"}]
        }));
        let mut renderer = OverlayRenderer::default();
        let surface = renderer.render(white(400, 300), set, true).clone();

        // band y in [140, 160), green at alpha 0.12 over white
        for x in [0, 200, 399] {
            let [r, g, b, a] = surface.pixel_rgba(x, 143).unwrap();
            assert_eq!(a, 255);
            assert!(near(r, 228) && near(g, 248) && near(b, 235), "{:?}", [r, g, b]);
        }
        assert_eq!(surface.pixel_rgba(200, 138), Some([255, 255, 255, 255]));

        // chip at (10, 125), 22 tall, green at 0.9
        let [r, g, b, _] = surface.pixel_rgba(12, 127).unwrap();
        assert!(near(r, 56) && near(g, 203) && near(b, 110), "{:?}", [r, g, b]);

        let text = renderer.draw_list().texts().next().unwrap();
        assert_eq!((text.baseline.x, text.baseline.y), (18.0, 140.0));
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut renderer = OverlayRenderer::default();
        let first = renderer.begin_load(overlays(json!({"support_zones": [{"y": 100}]})));
        let second = renderer.begin_load(overlays(json!({"resistance_zones": [{"y": 200}]})));
        assert_eq!(renderer.state(), RendererState::Loading(second));

        assert_eq!(
            renderer.complete_load(first, Ok(white(100, 100))),
            Ok(LoadOutcome::Discarded)
        );
        assert!(renderer.surface().is_none());
        assert_eq!(renderer.state(), RendererState::Loading(second));

        assert_eq!(
            renderer.complete_load(second, Ok(white(200, 150))),
            Ok(LoadOutcome::Rendered)
        );
        assert_eq!(renderer.state(), RendererState::Ready);
        assert_eq!(renderer.surface().unwrap().size(), SurfaceSize::new(200, 150));
        let drawn = renderer.overlays().unwrap();
        assert_eq!(drawn.resistance_zones.len(), 1);
        assert!(drawn.support_zones.is_empty());

        // a late result for the old ticket changes nothing
        assert_eq!(
            renderer.complete_load(first, Err(LoadError::EmptyImage)),
            Ok(LoadOutcome::Discarded)
        );
        assert_eq!(renderer.state(), RendererState::Ready);
    }

    #[test]
    fn failed_load_returns_to_unloaded_and_accepts_retry() {
        let mut renderer = OverlayRenderer::default();
        renderer.render(white(50, 50), busy_overlays(), true);

        let ticket = renderer.begin_load(busy_overlays());
        let err = renderer
            .complete_load(ticket, Err(LoadError::Decode("bad header".to_string())))
            .unwrap_err();
        assert!(matches!(err, OverlayError::Load(LoadError::Decode(_))));
        assert_eq!(renderer.state(), RendererState::Unloaded);
        assert!(renderer.surface().is_none());
        assert!(renderer.image().is_none());

        let retry = renderer.begin_load(busy_overlays());
        assert_eq!(renderer.complete_load(retry, Ok(white(60, 40))), Ok(LoadOutcome::Rendered));
        assert_eq!(renderer.state(), RendererState::Ready);
    }

    #[test]
    fn overlays_set_while_loading_pair_with_incoming_image() {
        let mut renderer = OverlayRenderer::default();
        renderer.render(white(80, 60), overlays(json!({"support_zones": [{"y": 10}]})), true);

        let ticket = renderer.begin_load(OverlaySet::default());
        renderer
            .set_overlays(overlays(json!({"entry_markers": [{"x": 5, "y": 5}]})))
            .unwrap();
        // old scene untouched until the image arrives
        assert_eq!(renderer.overlays().unwrap().support_zones.len(), 1);

        renderer.complete_load(ticket, Ok(white(90, 70))).unwrap();
        let drawn = renderer.overlays().unwrap();
        assert_eq!(drawn.entry_markers.len(), 1);
        assert!(drawn.support_zones.is_empty());
    }

    #[test]
    fn set_overlays_needs_an_image() {
        let mut renderer = OverlayRenderer::default();
        assert_eq!(
            renderer.set_overlays(OverlaySet::default()),
            Err(OverlayError::NotReady)
        );
        assert!(renderer.set_visible(false).is_none());
    }

    #[test]
    fn set_overlays_rerenders_cached_image() {
        let mut renderer = OverlayRenderer::default();
        let bare = renderer.render(white(100, 100), OverlaySet::default(), true).clone();
        renderer
            .set_overlays(overlays(json!({"order_blocks": [{"x": 100, "y": 100}]})))
            .unwrap();
        assert_ne!(renderer.surface().unwrap(), &bare);
        assert_eq!(renderer.image().unwrap().size(), SurfaceSize::new(100, 100));
    }

    #[test]
    fn tainted_export_fails_but_surface_survives() {
        let mut renderer = OverlayRenderer::default();
        renderer.render(white(100, 80).mark_tainted(), busy_overlays(), true);
        assert_eq!(
            renderer.export(),
            Err(OverlayError::Export(ExportError::Tainted))
        );
        assert!(renderer.surface().is_some());
        assert_eq!(renderer.state(), RendererState::Ready);
    }

    #[test]
    fn export_produces_named_png() {
        let mut renderer = OverlayRenderer::default();
        renderer.render(white(100, 80), busy_overlays(), true);
        let exported = renderer.export().unwrap();
        assert!(exported.file_name.starts_with("chart-analysis-"));
        assert!(exported.file_name.ends_with(".png"));
        let decoded = image::load_from_memory(&exported.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 80));
    }

    #[tokio::test]
    async fn load_and_render_from_bytes() {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_pixel(160, 120, Rgba([255, 255, 255, 255]));
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png).unwrap();

        let mut renderer = OverlayRenderer::default();
        let source = ImageSource::Bytes(png.into_inner());
        let size = renderer
            .load_and_render(&source, busy_overlays(), true)
            .await
            .unwrap()
            .size();
        assert_eq!(size, SurfaceSize::new(160, 120));
        assert_eq!(renderer.state(), RendererState::Ready);
        assert!(!renderer.draw_list().is_empty());
    }

    #[tokio::test]
    async fn load_and_render_reports_load_failure() {
        let mut renderer = OverlayRenderer::default();
        let source = ImageSource::Bytes(b"not an image".to_vec());
        let err = renderer
            .load_and_render(&source, busy_overlays(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, OverlayError::Load(LoadError::Decode(_))));
        assert_eq!(renderer.state(), RendererState::Unloaded);
    }
}
