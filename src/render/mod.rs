// Overlay composition and rasterization
pub mod commands;
pub mod compose;
pub mod export;
pub mod labels;
pub mod layers;
pub mod raster;
pub mod renderer;
pub mod text;

// Re-export commonly used types
pub use commands::{DrawCommand, DrawList, Shape, StrokeStyle, TextAlign, TextRun};
pub use compose::compose_overlays;
pub use export::{ExportedImage, export_png};
pub use layers::{LayerContext, OverlayLayer, layer_for};
pub use raster::{RasterSurface, Rasterizer};
pub use renderer::{LoadOutcome, LoadTicket, OverlayRenderer, RendererState};
pub use text::{ApproxTextMeasure, LabelFont, TextMeasure};
