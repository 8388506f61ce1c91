use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;

use crate::application::services::value_resolver::ValueResolver;
use crate::application::use_cases::init_compose::{
    InitComposeConfig, InitComposeUseCase, InitStep, COMPOSE_FILE_NAME,
};
use crate::infrastructure::config::config_store::LayeredConfig;
use crate::infrastructure::filesystem::project_directory::WorkingDirectory;
use crate::infrastructure::http::template_catalog::catalog_for_location;

/// Initialize a docker-compose.yml file from a catalog template
pub struct InitCommand {
    /// Template type to fetch
    pub template: String,
    /// Force overwrite existing file
    pub force: bool,
    /// Catalog URL or path
    pub catalog: String,
    /// Local configuration file (defaults to the user config directory)
    pub config_path: Option<PathBuf>,
}

impl InitCommand {
    pub fn new(
        template: impl Into<String>,
        force: bool,
        catalog: impl Into<String>,
        config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            template: template.into(),
            force,
            catalog: catalog.into(),
            config_path,
        }
    }

    /// Execute the init command
    pub fn execute(&self) -> Result<()> {
        let project = WorkingDirectory::current()?;
        let use_case = InitComposeUseCase::new(
            InitComposeConfig::new(project.root())
                .with_template(&self.template)
                .with_force(self.force),
        );

        let config = LayeredConfig::load(self.config_path.as_deref())?;
        let catalog = catalog_for_location(&self.catalog)?;
        let resolver = ValueResolver::new(&config, &project);

        let result = use_case.execute(catalog.as_ref(), &resolver, |step| match step {
            InitStep::Fetching { template } => println!(
                "{} Fetching latest version info for template '{}'",
                "::".blue().bold(),
                template
            ),
            InitStep::Writing => {
                println!("{} Writing {} file", "::".blue().bold(), COMPOSE_FILE_NAME)
            }
        })?;
        let output_path = result.output_path;

        println!(
            "{} Created {}",
            "✓".green().bold(),
            output_path
                .strip_prefix(env::current_dir()?)
                .unwrap_or(&output_path)
                .display()
        );

        Ok(())
    }
}
