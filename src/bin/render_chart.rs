//! Headless renderer: draws an overlay document over a chart image and
//! writes the result as a PNG, the same file the viewer's Download produces.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Runtime;

use chart_overlay::config::PERSISTENCE;
use chart_overlay::{ImageSource, LabelFont, OverlayRenderer, load_overlay_file};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render chart overlays to a PNG without a window")]
struct RenderArgs {
    /// Chart image: a file path or an http(s) URL
    #[arg(long)]
    image: String,

    /// Overlay JSON document
    #[arg(long)]
    overlays: PathBuf,

    /// Output directory
    #[arg(long, default_value = PERSISTENCE.export.default_directory)]
    out: PathBuf,

    /// TTF/OTF font for chip labels
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render the bare image only
    #[arg(long, default_value_t = false)]
    hide_overlays: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = RenderArgs::parse();

    let font = LabelFont::resolve(args.font.as_deref())?;
    match &font {
        Some(font) => log::info!("Chip labels use {}", font.source()),
        None => log::warn!("No label font found; chip text will not be painted"),
    }

    let overlays = load_overlay_file(&args.overlays)?;
    let source = ImageSource::parse(&args.image)
        .with_context(|| format!("Invalid image source {:?}", args.image))?;

    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let mut renderer = OverlayRenderer::with_font(font);
    rt.block_on(renderer.load_and_render(&source, overlays, !args.hide_overlays))
        .with_context(|| format!("Failed to render {}", source.describe()))?;

    let skipped = renderer.validation();
    if !skipped.is_empty() {
        log::warn!("{} malformed annotation(s) skipped", skipped.len());
    }

    let exported = renderer.export()?;
    let path = exported.save_in(&args.out)?;
    println!("{}", path.display());
    Ok(())
}
