//! Test fixtures for creating catalogs, configuration files and project
//! directories.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Catalog documents used across tests
pub struct CatalogFixture;

impl CatalogFixture {
    /// The single-service php-app template with one config replacement
    pub fn php_app() -> &'static str {
        r#"{
  "php-app": [
    {
      "docker-compose": {
        "services": {
          "app": {
            "image": "'%IMAGE%'"
          }
        }
      },
      "docker-compose-replacements": {
        "services.app.image": [
          {"source": "config", "key": "app.image"}
        ]
      }
    }
  ]
}"#
    }

    /// A two-service template exercising fallbacks, sentinels and unquoting
    pub fn full_stack() -> &'static str {
        r#"{
  "php-app": [
    {
      "docker-compose": {
        "services": {
          "app": {
            "image": "'%IMAGE%'",
            "container_name": "app",
            "command": "'php-fpm'",
            "ports": ["8080:80"],
            "environment": {"APP_ENV": "local"}
          },
          "formatting-1": "NEWLINE",
          "db": {
            "image": "mysql:8.0",
            "environment": {"MYSQL_DATABASE": "app"}
          }
        }
      },
      "docker-compose-replacements": {
        "services.app.image": [
          {"source": "config", "key": "app.image"},
          {"source": "config", "key": "docker.default_image"}
        ],
        "services.app.container_name": [
          {"source": "config", "key": "app.container"},
          {"source": "project_directory_name"}
        ],
        "services.db.environment.MYSQL_DATABASE": [
          {"source": "vault", "key": "db"},
          {"source": "project_directory_name"}
        ]
      }
    },
    {
      "docker-compose": {"services": {}}
    }
  ]
}"#
    }
}

/// A temporary project directory plus catalog and configuration files
pub struct TestProject {
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub config_path: PathBuf,
}

impl TestProject {
    /// Create a project directory named `name` next to the given catalog
    pub fn new(name: &str, catalog: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project_dir = temp_dir.path().join(name);
        std::fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        let catalog_path = temp_dir.path().join("latest-versions.json");
        std::fs::write(&catalog_path, catalog).expect("Failed to write catalog");

        let config_path = temp_dir.path().join("config.yml");

        Self {
            temp_dir,
            project_dir,
            catalog_path,
            config_path,
        }
    }

    /// Write the local configuration file
    pub fn with_config(self, contents: &str) -> Self {
        std::fs::write(&self.config_path, contents).expect("Failed to write config");
        self
    }

    pub fn compose_path(&self) -> PathBuf {
        self.project_dir.join("docker-compose.yml")
    }

    pub fn read_compose(&self) -> String {
        std::fs::read_to_string(self.compose_path()).expect("Failed to read compose file")
    }

    /// `xdock` command isolated from the caller's environment
    pub fn xdock(&self) -> Command {
        self.xdock_with_catalog(&self.catalog_path)
    }

    /// Same as [`TestProject::xdock`] with a different catalog location
    pub fn xdock_with_catalog(&self, catalog: &Path) -> Command {
        let mut cmd = Command::cargo_bin("xdock").expect("binary is built");
        cmd.current_dir(&self.project_dir)
            .env_remove("XDOCK_CONFIG")
            .env_remove("XDOCK_CATALOG")
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("xdg"))
            .arg("--no-color")
            .arg("--catalog")
            .arg(catalog)
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }
}
