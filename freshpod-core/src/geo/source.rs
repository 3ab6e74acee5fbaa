//! Where the world topology comes from
//!
//! The map makes a single fetch attempt. Failures are logged and degrade to
//! an empty country layer; markers still render.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use super::topology::WorldTopology;
use crate::cache::FileCache;
use crate::error::TopologyError;

/// Public `world-atlas` 110m country outlines
pub const DEFAULT_TOPOLOGY_URL: &str =
    "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

/// Default cache TTL for the fetched topology (24 hours)
pub const DEFAULT_TOPOLOGY_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Provider of raw TopoJSON text
#[async_trait]
pub trait TopologySource: Send + Sync {
    /// Fetch the TopoJSON document
    async fn fetch(&self) -> Result<String, TopologyError>;

    /// Source identifier for logging
    fn name(&self) -> &'static str;
}

/// Fetches the topology over HTTP, with an optional on-disk cache
#[derive(Debug, Clone)]
pub struct HttpTopologySource {
    url: String,
    timeout: Duration,
    cache: Option<FileCache>,
    ttl: Duration,
    refresh: bool,
}

impl HttpTopologySource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            cache: None,
            ttl: DEFAULT_TOPOLOGY_TTL,
            refresh: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cache responses in `cache` for `ttl`
    pub fn with_cache(mut self, cache: FileCache, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.ttl = ttl;
        self
    }

    /// Skip the cache read (the response is still written back)
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn cached(&self) -> Option<String> {
        if self.refresh {
            return None;
        }
        let cache = self.cache.as_ref()?;
        match cache.load_fresh::<String>(&self.url, self.ttl) {
            Ok(Some(body)) if WorldTopology::from_topojson(&body).is_err() => {
                tracing::warn!("Ignoring cached topology that no longer decodes");
                None
            }
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!("Ignoring unreadable topology cache: {:#}", e);
                None
            }
        }
    }

    fn save(&self, body: &str) {
        if let Some(cache) = &self.cache {
            // Caching is best effort
            if let Err(e) = cache.store(&self.url, body) {
                tracing::warn!("Failed to save topology to cache: {:#}", e);
            }
        }
    }
}

#[async_trait]
impl TopologySource for HttpTopologySource {
    async fn fetch(&self) -> Result<String, TopologyError> {
        if let Some(body) = self.cached() {
            return Ok(body);
        }

        let body = fetch_remote(&self.url, self.timeout).await?;

        // Only documents that decode are cached
        WorldTopology::from_topojson(&body)?;
        self.save(&body);
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(feature = "http")]
async fn fetch_remote(url: &str, timeout: Duration) -> Result<String, TopologyError> {
    let fetch_error = |reason: String| TopologyError::Fetch {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .user_agent(concat!("freshpod/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| fetch_error(e.to_string()))?;

    tracing::debug!("Fetching world topology from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    if !response.status().is_success() {
        return Err(fetch_error(format!("HTTP {}", response.status())));
    }

    response.text().await.map_err(|e| fetch_error(e.to_string()))
}

/// Stub for when the http feature is disabled
#[cfg(not(feature = "http"))]
async fn fetch_remote(url: &str, _timeout: Duration) -> Result<String, TopologyError> {
    Err(TopologyError::Fetch {
        url: url.to_string(),
        reason: "HTTP support is not enabled. Rebuild with --features http".to_string(),
    })
}

/// Reads the topology from a local file
#[derive(Debug, Clone)]
pub struct FileTopologySource {
    path: PathBuf,
}

impl FileTopologySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TopologySource for FileTopologySource {
    async fn fetch(&self) -> Result<String, TopologyError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| TopologyError::Fetch {
                url: self.path.display().to_string(),
                reason: e.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Serves a fixed document from memory
#[derive(Debug, Clone)]
pub struct StaticTopologySource {
    body: String,
}

impl StaticTopologySource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl TopologySource for StaticTopologySource {
    async fn fetch(&self) -> Result<String, TopologyError> {
        Ok(self.body.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Fetch and decode the topology, surfacing errors
pub async fn try_load_topology(
    source: &dyn TopologySource,
) -> Result<WorldTopology, TopologyError> {
    let body = source.fetch().await?;
    WorldTopology::from_topojson(&body)
}

/// Fetch and decode the topology once
///
/// Any failure yields an empty topology so the map still renders its
/// markers.
pub async fn load_topology(source: &dyn TopologySource) -> WorldTopology {
    match try_load_topology(source).await {
        Ok(world) => world,
        Err(e) => {
            tracing::warn!(source = source.name(), "World topology unavailable: {}", e);
            WorldTopology::empty()
        }
    }
}
