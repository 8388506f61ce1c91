/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Template catalog access (HTTP download or local file)
/// - Local configuration (YAML file and environment variables)
/// - File system facts about the project directory
pub mod config;
pub mod filesystem;
pub mod http;

// Re-export commonly used types
pub use config::config_store::{EnvConfigProvider, LayeredConfig, YamlConfigStore};
pub use filesystem::project_directory::WorkingDirectory;
pub use http::template_catalog::{
    catalog_for_location, FileTemplateCatalog, HttpTemplateCatalog, TemplateCatalog,
};
