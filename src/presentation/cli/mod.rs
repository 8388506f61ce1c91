pub mod commands;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

use crate::application::use_cases::init_compose::DEFAULT_TEMPLATE;
use crate::infrastructure::http::template_catalog::DEFAULT_CATALOG_URL;

/// xdock - Initialize docker-compose.yml files from xdock templates
#[derive(Parser)]
#[command(name = "xdock")]
#[command(about = "Initialize docker-compose.yml files from xdock templates")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<String>,

    /// Local configuration file
    #[arg(long, global = true, env = "XDOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Template catalog URL or local path
    #[arg(long, global = true, env = "XDOCK_CATALOG", default_value = DEFAULT_CATALOG_URL)]
    pub catalog: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize an xdock application (a docker-compose.yml file)
    Init {
        /// The type of application to initialize
        #[arg(default_value = DEFAULT_TEMPLATE)]
        r#type: String,

        /// Overwrite existing docker-compose.yml file
        #[arg(short, long)]
        force: bool,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn run(self) -> anyhow::Result<()> {
        self.init_logging();

        // Set up colored output
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        // Change directory if specified
        if let Some(ref dir) = self.cli.directory {
            env::set_current_dir(dir)?;
        }

        // Handle the command
        match self.handle_command() {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    fn init_logging(&self) {
        let level = match self.cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("xdock={}", level)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .try_init();
    }

    fn handle_command(&self) -> anyhow::Result<()> {
        match &self.cli.command {
            Commands::Init { r#type, force } => self.handle_init_command(r#type, *force),
        }
    }

    fn handle_init_command(&self, template: &str, force: bool) -> anyhow::Result<()> {
        use crate::presentation::cli::commands::init::InitCommand;

        let init_cmd = InitCommand::new(
            template,
            force,
            self.cli.catalog.clone(),
            self.cli.config.clone(),
        );
        init_cmd.execute()?;
        Ok(())
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["xdock", "init"]).unwrap();
        match cli.command {
            Commands::Init { r#type, force } => {
                assert_eq!(r#type, "php-app");
                assert!(!force);
            }
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_init_with_type_and_force() {
        let cli = Cli::try_parse_from([
            "xdock",
            "-vv",
            "--catalog",
            "catalog.json",
            "init",
            "node-app",
            "--force",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.catalog, "catalog.json");
        match cli.command {
            Commands::Init { r#type, force } => {
                assert_eq!(r#type, "node-app");
                assert!(force);
            }
        }
    }
}
