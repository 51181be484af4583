//! Image Loader
//!
//! Fetches remote images over HTTP and decodes them to RGBA pixels.
//! Decoded images are cached by URL so repeated fetches (several widgets
//! sharing one avatar) hit the network at most once.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lru::LruCache;
use thiserror::Error;
use tracing::{debug, warn};

/// Cached decoded images, keyed by URL.
const CACHE_CAPACITY: usize = 32;

/// HTTP timeout for image fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from fetching or decoding a remote image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// A decoded RGBA image, ready for the image store.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl DecodedImage {
    /// Decode image bytes (PNG, JPEG, ...) into RGBA pixels.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            data: rgba.into_raw(),
        })
    }
}

/// Remote image loader with a URL-keyed LRU cache.
pub struct ImageLoader {
    client: reqwest::Client,
    cache: Mutex<LruCache<String, Arc<DecodedImage>>>,
}

impl ImageLoader {
    /// Create a loader with a fresh HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            client,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(CACHE_CAPACITY).unwrap(),
            )),
        }
    }

    /// Look up a previously decoded image without touching the network.
    pub fn cached(&self, url: &str) -> Option<Arc<DecodedImage>> {
        self.cache.lock().unwrap().get(url).cloned()
    }

    /// Fetch and decode an image, consulting the cache first.
    pub async fn fetch(&self, url: &str) -> Result<Arc<DecodedImage>, LoadError> {
        if let Some(cached) = self.cached(url) {
            debug!(url, "image cache hit");
            return Ok(cached);
        }

        debug!(url, "fetching image");
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let decoded = Arc::new(DecodedImage::decode(&bytes)?);
        debug!(
            url,
            width = decoded.width,
            height = decoded.height,
            "image decoded"
        );

        self.cache
            .lock()
            .unwrap()
            .put(url.to_string(), Arc::clone(&decoded));
        Ok(decoded)
    }

    /// Fetch variant that logs failures and returns `None` instead of an error.
    ///
    /// Suits fire-and-forget avatar loads where the app falls back to a
    /// placeholder on failure.
    pub async fn fetch_or_log(&self, url: &str) -> Option<Arc<DecodedImage>> {
        match self.fetch(url).await {
            Ok(img) => Some(img),
            Err(err) => {
                warn!(url, error = %err, "image fetch failed, keeping placeholder");
                None
            }
        }
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}
