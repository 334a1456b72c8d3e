// File: crates/dashplot-ingest/src/source.rs
// Summary: Where chart bytes come from (blob, local file, URL) and the HTTP fetcher seam.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Url;

use crate::error::IngestError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// In-memory bytes with the MIME type they arrived with.
    Blob { bytes: Vec<u8>, mime: String },
    /// Local file, routed by its name.
    File(PathBuf),
    /// `http(s)` resource fetched without caching.
    Url(String),
}

impl Source {
    pub fn blob(bytes: impl Into<Vec<u8>>, mime: impl Into<String>) -> Self {
        Self::Blob { bytes: bytes.into(), mime: mime.into() }
    }

    /// `http://` and `https://` arguments become URLs, anything else a file path.
    pub fn from_arg(arg: &str) -> Self {
        if is_remote_url(arg) {
            Self::Url(arg.to_string())
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Short human-readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Blob { bytes, mime } => format!("blob ({} bytes, {mime})", bytes.len()),
            Self::File(path) => path.display().to_string(),
            Self::Url(href) => href.clone(),
        }
    }
}

pub fn is_remote_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

pub fn parse_url(href: &str) -> Result<Url, IngestError> {
    Url::parse(href).map_err(|e| IngestError::InvalidUrl { url: href.to_string(), reason: e.to_string() })
}

/// Lower-cased text after the last `.` of the URL path.
pub fn url_extension(url: &Url) -> String {
    url.path().rsplit('.').next().unwrap_or_default().to_ascii_lowercase()
}

/// Lower-cased final path component, used for routing.
pub fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().to_ascii_lowercase()).unwrap_or_default()
}

/// A fetched response body and its status code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedBody {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl FetchedBody {
    pub fn ok(bytes: impl Into<Vec<u8>>) -> Self {
        Self { status: 200, bytes: bytes.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP GET abstraction so ingestion can be exercised without a network.
pub trait Fetcher {
    /// Fetch `url`. Non-2xx responses are returned, not turned into errors.
    fn get(&self, url: &Url) -> Result<FetchedBody, IngestError>;
}

/// Production fetcher on a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, IngestError> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, IngestError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &Url) -> Result<FetchedBody, IngestError> {
        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    IngestError::Transport(format!("request timed out: {url}"))
                } else if e.is_connect() {
                    IngestError::Transport(format!("could not connect: {url}"))
                } else {
                    IngestError::Transport(e.to_string())
                }
            })?;
        let status = response.status().as_u16();
        let bytes = response.bytes().map_err(|e| IngestError::Transport(e.to_string()))?;
        tracing::debug!(%url, status, len = bytes.len(), "fetched");
        Ok(FetchedBody { status, bytes: bytes.to_vec() })
    }
}
