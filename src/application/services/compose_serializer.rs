//! Block-style YAML emitter for compose templates.
//!
//! Mapping keys keep their insertion order. Sequences nested under a key are
//! indented, which is how compose files are conventionally written.

use serde_json::{Map, Value};

use crate::common::error::XdockError;
use crate::common::result::XdockResult;

/// Deepest collection nesting the serializer accepts.
pub const MAX_DEPTH: usize = 10;

/// Spaces per nesting level.
pub const INDENT_WIDTH: usize = 2;

#[derive(Debug, Clone)]
pub struct ComposeSerializer {
    max_depth: usize,
    indent: String,
}

impl ComposeSerializer {
    pub fn new() -> Self {
        Self::with_settings(MAX_DEPTH, INDENT_WIDTH)
    }

    pub fn with_settings(max_depth: usize, indent_width: usize) -> Self {
        Self {
            max_depth,
            indent: " ".repeat(indent_width),
        }
    }

    /// Serialize a template to YAML text ending in a single newline.
    pub fn serialize(&self, value: &Value) -> XdockResult<String> {
        let lines = match value {
            Value::Object(map) if !map.is_empty() => self.mapping(map, 1)?,
            Value::Array(items) if !items.is_empty() => self.sequence(items, 1)?,
            Value::String(text) if literal_header(text).is_some() => {
                let mut lines = Vec::new();
                self.push_literal("", text, &mut lines);
                lines
            }
            other => vec![inline(other)?],
        };

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }

    fn mapping(&self, map: &Map<String, Value>, depth: usize) -> XdockResult<Vec<String>> {
        self.check_depth(depth)?;
        let mut lines = Vec::new();

        for (key, value) in map {
            let key = scalar(key)?;
            match value {
                Value::Object(nested) if !nested.is_empty() => {
                    lines.push(format!("{}:", key));
                    self.push_indented(self.mapping(nested, depth + 1)?, &mut lines);
                }
                Value::Array(items) if !items.is_empty() => {
                    lines.push(format!("{}:", key));
                    self.push_indented(self.sequence(items, depth + 1)?, &mut lines);
                }
                Value::String(text) if literal_header(text).is_some() => {
                    self.push_literal(&format!("{}: ", key), text, &mut lines);
                }
                other => lines.push(format!("{}: {}", key, inline(other)?)),
            }
        }

        Ok(lines)
    }

    fn sequence(&self, items: &[Value], depth: usize) -> XdockResult<Vec<String>> {
        self.check_depth(depth)?;
        let mut lines = Vec::new();

        for item in items {
            let nested = match item {
                Value::Object(map) if !map.is_empty() => Some(self.mapping(map, depth + 1)?),
                Value::Array(inner) if !inner.is_empty() => Some(self.sequence(inner, depth + 1)?),
                _ => None,
            };

            match (nested, item) {
                (Some(block), _) => {
                    for (position, line) in block.into_iter().enumerate() {
                        if position == 0 {
                            lines.push(format!("- {}", line));
                        } else if line.is_empty() {
                            lines.push(line);
                        } else {
                            lines.push(format!("  {}", line));
                        }
                    }
                }
                (None, Value::String(text)) if literal_header(text).is_some() => {
                    self.push_literal("- ", text, &mut lines);
                }
                (None, other) => lines.push(format!("- {}", inline(other)?)),
            }
        }

        Ok(lines)
    }

    fn push_indented(&self, block: Vec<String>, lines: &mut Vec<String>) {
        for line in block {
            if line.is_empty() {
                lines.push(line);
            } else {
                lines.push(format!("{}{}", self.indent, line));
            }
        }
    }

    fn push_literal(&self, prefix: &str, text: &str, lines: &mut Vec<String>) {
        let header = literal_header(text).unwrap_or("|-");
        lines.push(format!("{}{}", prefix, header));

        let body = text.strip_suffix('\n').unwrap_or(text);
        for line in body.split('\n') {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{}{}", self.indent, line));
            }
        }
    }

    fn check_depth(&self, depth: usize) -> XdockResult<()> {
        if depth > self.max_depth {
            return Err(XdockError::nesting_too_deep(self.max_depth));
        }
        Ok(())
    }
}

impl Default for ComposeSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Literal block header for strings that can be written as one, `None` for
/// strings that must stay on a single line.
fn literal_header(text: &str) -> Option<&'static str> {
    if !text.contains('\n') || text.contains('\r') || text.starts_with(' ') {
        return None;
    }
    if text.ends_with("\n\n") {
        return None;
    }
    if text.ends_with('\n') {
        Some("|")
    } else {
        Some("|-")
    }
}

fn inline(value: &Value) -> XdockResult<String> {
    Ok(match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => scalar(text)?,
        Value::Array(_) => "[]".to_string(),
        Value::Object(_) => "{}".to_string(),
    })
}

/// Render a string scalar on one line, quoted only when YAML needs it.
fn scalar(text: &str) -> XdockResult<String> {
    if needs_single_quotes(text) {
        return Ok(format!("'{}'", text.replace('\'', "''")));
    }

    let rendered = serde_yaml::to_string(text)?;
    let rendered = rendered.strip_suffix('\n').unwrap_or(&rendered);

    if rendered.contains('\n') {
        // long or multi-line scalars get folded by the YAML emitter
        return serde_json::to_string(text).map_err(|e| {
            XdockError::serialization_error_with_source("failed to quote scalar", e)
        });
    }
    Ok(rendered.to_string())
}

/// Strings that YAML 1.1 readers would take for something else: base-60
/// numbers and times like `22:22`, and the y/n/yes/no/on/off booleans.
fn needs_single_quotes(text: &str) -> bool {
    if text.contains(['\n', '\r']) {
        return false;
    }
    text.contains(':')
        || matches!(
            text.to_ascii_lowercase().as_str(),
            "y" | "n" | "yes" | "no" | "on" | "off"
        )
}
