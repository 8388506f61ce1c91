//! # xdock - docker-compose.yml initializer
//!
//! `xdock` creates a `docker-compose.yml` for a project from a template published
//! in the xdock catalog. The latest version of the requested template is fetched,
//! a handful of values are filled in from local configuration or the project's
//! directory name, and the result is written as YAML.
//!
//! ## Quick Start
//!
//! ```bash
//! # inside your project directory
//! xdock init            # php-app template
//! xdock init node-app   # another template
//! xdock init --force    # overwrite an existing docker-compose.yml
//! ```
//!
//! Values come from `~/.config/xdock/config.yml` (or `--config <FILE>`):
//!
//! ```yaml
//! app:
//!   image: myorg/app:1.2
//! ```
//!
//! and can be overridden with environment variables such as `XDOCK__APP__IMAGE`.
//!
//! ## Architecture
//!
//! - [`domain`]: catalog template model and dotted paths
//! - [`application`]: value resolution, replacement, serialization and the init use case
//! - [`infrastructure`]: catalog download, configuration sources, project directory
//! - [`presentation`]: CLI interface
//! - [`common`]: error handling
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use xdock::application::services::value_resolver::ValueResolver;
//! use xdock::application::use_cases::init_compose::{InitComposeConfig, InitComposeUseCase};
//! use xdock::infrastructure::{catalog_for_location, LayeredConfig, WorkingDirectory};
//!
//! # fn example() -> xdock::Result<()> {
//! let project = WorkingDirectory::new("/srv/shop");
//! let config = LayeredConfig::load(None)?;
//! let catalog = catalog_for_location("https://xdock.build/latest-versions.json")?;
//!
//! let use_case = InitComposeUseCase::new(InitComposeConfig::new(project.root()));
//! let resolver = ValueResolver::new(&config, &project);
//! let result = use_case.execute(catalog.as_ref(), &resolver, |_| {})?;
//!
//! println!("wrote {}", result.output_path.display());
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::XdockError;
pub use crate::common::result::XdockResult as Result;
