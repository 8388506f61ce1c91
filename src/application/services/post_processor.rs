use regex::Regex;

/// Prefix of values that stand for a forced blank line.
pub const BLANK_LINE_PREFIX: &str = "formatting-";

/// Suffix of values that stand for a forced blank line.
pub const BLANK_LINE_SUFFIX: &str = "NEWLINE";

/// Line-level fixups applied to serialized compose files.
///
/// Lines that start with `formatting-` and end with `NEWLINE` (ignoring
/// leading whitespace) become empty. Indented `image:` and `command:` lines
/// lose their single quotes, since those fields are written unquoted in compose
/// files.
pub struct PostProcessor {
    unquoted_fields: Regex,
}

impl PostProcessor {
    pub fn new() -> Self {
        Self {
            unquoted_fields: Regex::new(r"^\s+(image|command):.*$")
                .expect("unquoted field pattern is valid"),
        }
    }

    pub fn process(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| self.process_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn process_line(&self, line: &str) -> String {
        let content = line.trim_start();
        if content.starts_with(BLANK_LINE_PREFIX) && content.ends_with(BLANK_LINE_SUFFIX) {
            return String::new();
        }

        if self.unquoted_fields.is_match(line) {
            return line.replace('\'', "");
        }

        line.to_string()
    }
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new()
    }
}
