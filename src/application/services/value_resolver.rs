//! Resolution of [`ValueSpec`]s against local configuration and the project
//! directory.

use tracing::debug;

use crate::domain::entities::template::ValueSpec;

/// Read-only lookup of local configuration by dotted key.
///
/// `Some("")` means the key is configured but empty, `None` means it is not
/// configured at all.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// Source of the project directory name.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectDirectory {
    fn name(&self) -> Option<String>;
}

/// Outcome of resolving one or more value specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Unresolved,
}

impl Resolution {
    fn from_candidate(candidate: Option<String>) -> Self {
        match candidate {
            Some(value) if !value.is_empty() => Self::Resolved(value),
            _ => Self::Unresolved,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Resolves value specs in rank order.
pub struct ValueResolver<'a> {
    config: &'a dyn ConfigProvider,
    project: &'a dyn ProjectDirectory,
}

impl<'a> ValueResolver<'a> {
    pub fn new(config: &'a dyn ConfigProvider, project: &'a dyn ProjectDirectory) -> Self {
        Self { config, project }
    }

    /// Resolve a single spec.
    pub fn resolve(&self, spec: &ValueSpec) -> Resolution {
        match spec {
            ValueSpec::Config { key } => {
                let raw = self.config.get(key);
                match raw.as_deref() {
                    None => debug!(key = %key, "config value not set"),
                    Some("") => debug!(key = %key, "config value is empty"),
                    Some(value) => debug!(key = %key, value = %value, "config value resolved"),
                }
                Resolution::from_candidate(raw)
            }
            ValueSpec::ProjectDirectoryName => {
                let resolution = Resolution::from_candidate(self.project.name());
                debug!(
                    resolved = resolution.is_resolved(),
                    "project directory name lookup"
                );
                resolution
            }
            ValueSpec::Unknown => {
                debug!("unknown value source, skipping");
                Resolution::Unresolved
            }
        }
    }

    /// Resolve the first spec that yields a non-empty value. Specs after the
    /// first hit are never evaluated.
    pub fn resolve_first(&self, specs: &[ValueSpec]) -> Resolution {
        specs
            .iter()
            .map(|spec| self.resolve(spec))
            .find(Resolution::is_resolved)
            .unwrap_or(Resolution::Unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn config_returning(key: &'static str, value: Option<&'static str>) -> MockConfigProvider {
        let mut config = MockConfigProvider::new();
        config
            .expect_get()
            .with(eq(key))
            .returning(move |_| value.map(str::to_string));
        config
    }

    #[test]
    fn test_config_value_resolves() {
        let config = config_returning("app.image", Some("myorg/app:1.2"));
        let project = MockProjectDirectory::new();
        let resolver = ValueResolver::new(&config, &project);

        assert_eq!(
            resolver.resolve(&ValueSpec::config("app.image")),
            Resolution::Resolved("myorg/app:1.2".to_string())
        );
    }

    #[test]
    fn test_empty_and_missing_config_are_unresolved() {
        let mut config = MockConfigProvider::new();
        config
            .expect_get()
            .with(eq("app.empty"))
            .returning(|_| Some(String::new()));
        config.expect_get().with(eq("app.missing")).returning(|_| None);
        let project = MockProjectDirectory::new();
        let resolver = ValueResolver::new(&config, &project);

        assert_eq!(
            resolver.resolve(&ValueSpec::config("app.empty")),
            Resolution::Unresolved
        );
        assert_eq!(
            resolver.resolve(&ValueSpec::config("app.missing")),
            Resolution::Unresolved
        );
    }

    #[test]
    fn test_project_directory_name() {
        let config = MockConfigProvider::new();
        let mut project = MockProjectDirectory::new();
        project
            .expect_name()
            .times(1)
            .returning(|| Some("shop".to_string()));
        let resolver = ValueResolver::new(&config, &project);

        assert_eq!(
            resolver.resolve(&ValueSpec::ProjectDirectoryName),
            Resolution::Resolved("shop".to_string())
        );
    }

    #[test]
    fn test_unknown_source_is_unresolved() {
        let config = MockConfigProvider::new();
        let project = MockProjectDirectory::new();
        let resolver = ValueResolver::new(&config, &project);

        assert_eq!(resolver.resolve(&ValueSpec::Unknown), Resolution::Unresolved);
    }

    #[test]
    fn test_first_match_wins_without_touching_fallback() {
        let config = config_returning("app.name", Some("billing"));
        let mut project = MockProjectDirectory::new();
        project.expect_name().times(0);
        let resolver = ValueResolver::new(&config, &project);

        let resolution = resolver.resolve_first(&[
            ValueSpec::config("app.name"),
            ValueSpec::ProjectDirectoryName,
        ]);

        assert_eq!(resolution, Resolution::Resolved("billing".to_string()));
    }

    #[test]
    fn test_falls_through_to_project_directory() {
        let config = config_returning("app.name", None);
        let mut project = MockProjectDirectory::new();
        project
            .expect_name()
            .times(1)
            .returning(|| Some("shop".to_string()));
        let resolver = ValueResolver::new(&config, &project);

        let resolution = resolver.resolve_first(&[
            ValueSpec::Unknown,
            ValueSpec::config("app.name"),
            ValueSpec::ProjectDirectoryName,
        ]);

        assert_eq!(resolution, Resolution::Resolved("shop".to_string()));
    }

    #[test]
    fn test_all_sources_miss() {
        let config = config_returning("app.name", Some(""));
        let mut project = MockProjectDirectory::new();
        project.expect_name().returning(|| None);
        let resolver = ValueResolver::new(&config, &project);

        assert_eq!(
            resolver.resolve_first(&[
                ValueSpec::config("app.name"),
                ValueSpec::ProjectDirectoryName
            ]),
            Resolution::Unresolved
        );
        assert_eq!(resolver.resolve_first(&[]), Resolution::Unresolved);
    }
}
