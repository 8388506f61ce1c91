use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use tracing::info;
use url::Url;

use crate::common::error::XdockError;
use crate::common::result::XdockResult;
use crate::domain::entities::template::{latest_from_catalog, TemplateVersion};

/// Well-known location of the published template catalog.
pub const DEFAULT_CATALOG_URL: &str = "https://xdock.build/latest-versions.json";

/// Request timeout for catalog downloads.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of template definitions.
pub trait TemplateCatalog {
    /// Latest version of the named template, `None` when the catalog has no
    /// such template.
    fn latest(&self, name: &str) -> XdockResult<Option<TemplateVersion>>;

    /// Where the catalog is read from, for messages.
    fn location(&self) -> String;
}

/// Catalog downloaded over HTTP(S).
pub struct HttpTemplateCatalog {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpTemplateCatalog {
    pub fn new(url: impl Into<String>) -> XdockResult<Self> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> XdockResult<Self> {
        let url = url.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("xdock/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| XdockError::fetch_failed_with_source(url.clone(), e))?;

        Ok(Self { url, client })
    }

    fn fetch_document(&self) -> XdockResult<Value> {
        info!(url = %self.url, "fetching template catalog");

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| XdockError::fetch_failed_with_source(self.url.clone(), e))?;

        if !response.status().is_success() {
            return Err(XdockError::fetch_failed(
                self.url.clone(),
                format!("HTTP {}", response.status()),
            ));
        }

        let body = response
            .text()
            .map_err(|e| XdockError::fetch_failed_with_source(self.url.clone(), e))?;
        parse_document(&body)
    }
}

impl TemplateCatalog for HttpTemplateCatalog {
    fn latest(&self, name: &str) -> XdockResult<Option<TemplateVersion>> {
        let document = self.fetch_document()?;
        latest_from_catalog(&document, name)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Catalog read from a local JSON file.
pub struct FileTemplateCatalog {
    path: PathBuf,
}

impl FileTemplateCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateCatalog for FileTemplateCatalog {
    fn latest(&self, name: &str) -> XdockResult<Option<TemplateVersion>> {
        info!(path = %self.path.display(), "reading template catalog");

        let body = std::fs::read_to_string(&self.path).map_err(|e| {
            XdockError::fetch_failed(self.path.display().to_string(), e.to_string())
        })?;
        let document = parse_document(&body)?;
        latest_from_catalog(&document, name)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn parse_document(body: &str) -> XdockResult<Value> {
    serde_json::from_str(body).map_err(|e| {
        XdockError::malformed_catalog_with_source(format!("catalog is not valid JSON: {}", e), e)
    })
}

/// Pick the catalog implementation for a `--catalog` value: `http(s)://`
/// URLs are downloaded, `file://` URLs and anything else are local paths.
pub fn catalog_for_location(location: &str) -> XdockResult<Box<dyn TemplateCatalog>> {
    match Url::parse(location) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Ok(Box::new(HttpTemplateCatalog::new(location)?))
        }
        Ok(url) if url.scheme() == "file" => {
            let path = url.to_file_path().map_err(|_| {
                XdockError::fetch_failed(location, "file URL does not name a local path")
            })?;
            Ok(Box::new(FileTemplateCatalog::new(path)))
        }
        _ => Ok(Box::new(FileTemplateCatalog::new(location))),
    }
}
