use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XdockError {
    #[error("{} already exists.", .path.display())]
    OutputExists { path: PathBuf },

    #[error("Template not found for {template}")]
    TemplateNotFound { template: String },

    #[error("Fetching template catalog from {url} failed: {message}")]
    FetchFailed {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Malformed template catalog: {message}")]
    MalformedCatalog {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid template path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Template nesting exceeds the maximum depth of {max_depth}")]
    NestingTooDeep { max_depth: usize },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl XdockError {
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    pub fn template_not_found(template: impl Into<String>) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
        }
    }

    pub fn fetch_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            url: url.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn fetch_failed_with_source(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::FetchFailed {
            url: url.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub fn malformed_catalog(message: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            message: message.into(),
            source: None,
        }
    }

    pub fn malformed_catalog_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::MalformedCatalog {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn config_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: Some(Box::new(source)),
        }
    }

    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn nesting_too_deep(max_depth: usize) -> Self {
        Self::NestingTooDeep { max_depth }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<std::io::Error> for XdockError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}

impl From<serde_yaml::Error> for XdockError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML serialization failed", error)
    }
}
