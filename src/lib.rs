#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod render;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use data::{ChartImage, ImageSource, load_overlay_file};
pub use domain::{Point, Rect, SurfaceSize};
pub use error::{ExportError, LoadError, OverlayError};
pub use models::OverlaySet;
pub use render::{LabelFont, OverlayRenderer, RasterSurface};
pub use ui::ChartViewerApp;
pub use utils::app_time;

use std::path::PathBuf;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Chart image to open on startup: a file path or an http(s) URL
    #[arg(long)]
    pub image: Option<String>,

    /// Overlay JSON document to draw over the chart
    #[arg(long)]
    pub overlays: Option<PathBuf>,

    /// TTF/OTF font for chip labels (otherwise a system font is searched for)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Start with overlays hidden
    #[arg(long, default_value_t = false)]
    pub hide_overlays: bool,

    /// Directory that downloads are written to
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, args: Cli) -> Box<dyn eframe::App> {
    let app = ui::ChartViewerApp::new(cc, args);
    Box::new(app)
}
