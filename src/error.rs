use std::fmt;

/// The chart image could not be obtained or decoded. Nothing is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Reading a local file failed
    Io { path: String, message: String },
    /// The HTTP request itself failed (DNS, TLS, connection...)
    Http { url: String, message: String },
    /// The server answered with a non-success status
    HttpStatus { url: String, status: u16 },
    /// The bytes are not a decodable raster image
    Decode(String),
    /// Decoded fine but has no pixels
    EmptyImage,
    /// The source string names nothing we can fetch
    UnsupportedSource(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, message } => write!(f, "Failed to read {}: {}", path, message),
            LoadError::Http { url, message } => write!(f, "Failed to fetch {}: {}", url, message),
            LoadError::HttpStatus { url, status } => {
                write!(f, "Failed to fetch {}: HTTP {}", url, status)
            }
            LoadError::Decode(msg) => write!(f, "Failed to decode chart image: {}", msg),
            LoadError::EmptyImage => write!(f, "Chart image has no pixels"),
            LoadError::UnsupportedSource(src) => write!(f, "Unsupported image source: {}", src),
        }
    }
}

impl std::error::Error for LoadError {}

/// The composited surface could not be turned into a downloadable image.
/// The on-screen surface stays valid.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Pixels come from a cross-origin image that did not allow read-back
    Tainted,
    /// Nothing has been rendered yet
    NoSurface,
    /// PNG encoding failed
    Encode(String),
    /// Writing the file failed
    Io { path: String, message: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Tainted => write!(
                f,
                "Export blocked: the chart image was served without cross-origin permission"
            ),
            ExportError::NoSurface => write!(f, "Nothing to export yet: no chart has been rendered"),
            ExportError::Encode(msg) => write!(f, "Failed to encode PNG: {}", msg),
            ExportError::Io { path, message } => write!(f, "Failed to write {}: {}", path, message),
        }
    }
}

impl std::error::Error for ExportError {}

/// Errors surfaced by [`crate::render::OverlayRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayError {
    Load(LoadError),
    Export(ExportError),
    /// A render was requested before any image finished loading
    NotReady,
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::Load(e) => write!(f, "{}", e),
            OverlayError::Export(e) => write!(f, "{}", e),
            OverlayError::NotReady => write!(f, "Chart image is not loaded yet"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverlayError::Load(e) => Some(e),
            OverlayError::Export(e) => Some(e),
            OverlayError::NotReady => None,
        }
    }
}

impl From<LoadError> for OverlayError {
    fn from(e: LoadError) -> Self {
        OverlayError::Load(e)
    }
}

impl From<ExportError> for OverlayError {
    fn from(e: ExportError) -> Self {
        OverlayError::Export(e)
    }
}
