use std::path::PathBuf;

use async_trait::async_trait;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::chart_image::ChartImage;
use crate::error::LoadError;

/// Where a chart image comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// `http(s)://...` is a URL, `file://...` and anything else a local path.
    pub fn parse(input: &str) -> Result<Self, LoadError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LoadError::UnsupportedSource("empty image source".to_string()));
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(ImageSource::Url(trimmed.to_string()));
        }
        if let Some(path) = trimmed.strip_prefix("file://") {
            return Ok(ImageSource::Path(PathBuf::from(path)));
        }
        if let Some((scheme, _)) = trimmed.split_once("://") {
            return Err(LoadError::UnsupportedSource(format!("scheme `{}`", scheme)));
        }
        Ok(ImageSource::Path(PathBuf::from(trimmed)))
    }

    pub fn describe(&self) -> String {
        match self {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Url(url) => url.clone(),
            ImageSource::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }

    fn provider(&self) -> Box<dyn ImageProvider + '_> {
        match self {
            ImageSource::Path(path) => Box::new(FileImageProvider { path }),
            ImageSource::Url(url) => Box::new(HttpImageProvider { url }),
            ImageSource::Bytes(bytes) => Box::new(MemoryImageProvider { bytes }),
        }
    }

    /// Fetches and decodes the image.
    pub async fn load(&self) -> Result<ChartImage, LoadError> {
        let provider = self.provider();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_load_events {
            log::info!("Fetching chart image via {}: {}", provider.signature(), self.describe());
        }

        let fetched = provider.fetch().await?;
        let description = self.describe();
        let readback_allowed = fetched.readback_allowed;

        // decoding is CPU-bound
        let image = tokio::task::spawn_blocking(move || ChartImage::decode(&fetched.bytes, description))
            .await
            .map_err(|e| LoadError::Decode(format!("decode task failed: {}", e)))??;

        if readback_allowed {
            Ok(image)
        } else {
            log::warn!(
                "{} was served without cross-origin permission; export will be blocked",
                self.describe()
            );
            Ok(image.mark_tainted())
        }
    }
}

/// Raw image bytes plus whether their pixels may be read back (exported).
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub readback_allowed: bool,
}

#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn fetch(&self) -> Result<FetchedImage, LoadError>;

    /// Short name of this provider, for logs.
    fn signature(&self) -> &'static str;
}

pub struct FileImageProvider<'a> {
    pub path: &'a std::path::Path,
}

#[async_trait]
impl ImageProvider for FileImageProvider<'_> {
    async fn fetch(&self) -> Result<FetchedImage, LoadError> {
        let bytes = tokio::fs::read(self.path).await.map_err(|e| LoadError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(FetchedImage {
            bytes,
            readback_allowed: true,
        })
    }

    fn signature(&self) -> &'static str {
        "file"
    }
}

pub struct HttpImageProvider<'a> {
    pub url: &'a str,
}

/// Whether an `Access-Control-Allow-Origin` value lets an anonymous client read pixels.
pub fn allows_anonymous_readback(header: Option<&str>) -> bool {
    matches!(header.map(str::trim), Some(value) if !value.is_empty() && value != "null")
}

#[async_trait]
impl ImageProvider for HttpImageProvider<'_> {
    async fn fetch(&self) -> Result<FetchedImage, LoadError> {
        let http_error = |e: reqwest::Error| LoadError::Http {
            url: self.url.to_string(),
            message: e.to_string(),
        };

        let response = reqwest::get(self.url).await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let readback_allowed = allows_anonymous_readback(
            response
                .headers()
                .get(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
        );
        let bytes = response.bytes().await.map_err(http_error)?;

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            readback_allowed,
        })
    }

    fn signature(&self) -> &'static str {
        "http"
    }
}

pub struct MemoryImageProvider<'a> {
    pub bytes: &'a [u8],
}

#[async_trait]
impl ImageProvider for MemoryImageProvider<'_> {
    async fn fetch(&self) -> Result<FetchedImage, LoadError> {
        Ok(FetchedImage {
            bytes: self.bytes.to_vec(),
            readback_allowed: true,
        })
    }

    fn signature(&self) -> &'static str {
        "memory"
    }
}
