//! Applies replacement directives to a template.

use serde_json::Value;
use tracing::{debug, info};

use crate::application::services::value_resolver::{Resolution, ValueResolver};
use crate::common::result::XdockResult;
use crate::domain::entities::template::ReplacementDirective;

/// What happened to each directive during one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementReport {
    /// Paths that were overwritten, with the value written.
    pub applied: Vec<(String, String)>,

    /// Paths left untouched because no source produced a value.
    pub skipped: Vec<String>,
}

impl ReplacementReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

pub struct ReplacementEngine<'r, 'a> {
    resolver: &'r ValueResolver<'a>,
}

impl<'r, 'a> ReplacementEngine<'r, 'a> {
    pub fn new(resolver: &'r ValueResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Apply every directive in order. Later directives may overwrite paths
    /// written by earlier ones.
    pub fn apply(
        &self,
        template: &mut Value,
        directives: &[ReplacementDirective],
    ) -> XdockResult<ReplacementReport> {
        let mut report = ReplacementReport::default();

        for directive in directives {
            let path = directive.path.as_str();
            match self.resolver.resolve_first(&directive.specs) {
                Resolution::Resolved(value) => {
                    debug!(path = %path, value = %value, "replacing template value");
                    directive
                        .path
                        .set(template, Value::String(value.clone()))
                        .map_err(|e| e.at(path))?;
                    report.applied.push((path.to_string(), value));
                }
                Resolution::Unresolved => {
                    info!(path = %path, "no replacement value found, keeping template value");
                    report.skipped.push(path.to_string());
                }
            }
        }

        Ok(report)
    }
}
