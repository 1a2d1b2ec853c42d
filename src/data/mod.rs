// Chart image acquisition and overlay document loading
pub mod chart_image;
pub mod image_source;
pub mod overlay_file;

// Re-export commonly used types
pub use chart_image::ChartImage;
pub use image_source::{ImageProvider, ImageSource};
pub use overlay_file::load_overlay_file;
