//! Configuration module for the chart overlay renderer.

mod debug; // Private: files use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod overlay;
pub mod persistence;
pub mod text;

// Re-export commonly used items
pub use overlay::{OVERLAY_STYLE, OverlayStyle};
pub use persistence::{PERSISTENCE, export_file_name};
pub use text::TEXT;
