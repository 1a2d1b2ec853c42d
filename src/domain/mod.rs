// Domain types and value objects
pub mod color;
pub mod geometry;
pub mod sentiment;

// Re-export commonly used types
pub use color::{Rgba, rgba};
pub use geometry::{Point, REFERENCE_FRAME, Rect, ReferenceFrame, ScaleFactors, SurfaceSize};
pub use sentiment::{Bias, ZoneStrength};
