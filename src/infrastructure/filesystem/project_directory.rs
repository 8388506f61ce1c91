use std::path::{Path, PathBuf};

use crate::application::services::value_resolver::ProjectDirectory;

/// Project root the command was run in.
#[derive(Debug, Clone)]
pub struct WorkingDirectory {
    root: PathBuf,
}

impl WorkingDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn current() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ProjectDirectory for WorkingDirectory {
    fn name(&self) -> Option<String> {
        self.root
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
    }
}
