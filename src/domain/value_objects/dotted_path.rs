use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use crate::common::error::XdockError;

/// ドット区切りパス関連のエラー
#[derive(Debug, Error, PartialEq)]
pub enum DottedPathError {
    #[error("path is empty")]
    Empty,

    #[error("segment {0} is empty")]
    EmptySegment(usize),

    #[error("'{segment}' is not a valid sequence index")]
    InvalidIndex { segment: String },

    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// テンプレート内の位置を示すドット区切りパス（例: `services.app.image`）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedPath {
    /// 元の文字列
    raw: String,

    /// 分割済みセグメント
    segments: Vec<String>,
}

impl DottedPath {
    /// 文字列からパスを作成
    pub fn parse(raw: &str) -> Result<Self, DottedPathError> {
        if raw.is_empty() {
            return Err(DottedPathError::Empty);
        }

        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if let Some(position) = segments.iter().position(String::is_empty) {
            return Err(DottedPathError::EmptySegment(position));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// 元の文字列を取得
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// パスに値を書き込む
    ///
    /// 途中のマッピングが無ければ作成し、途中にスカラーがあればマッピングで置き換える。
    /// シーケンスのセグメントは `len` 以下のインデックスでなければならない（`len` は末尾追加）。
    pub fn set(&self, root: &mut Value, value: Value) -> Result<(), DottedPathError> {
        let mut current = root;
        let last = self.segments.len() - 1;

        for (position, segment) in self.segments.iter().enumerate() {
            if !current.is_object() && !current.is_array() {
                *current = Value::Object(Map::new());
            }

            let slot = match current {
                Value::Array(items) => {
                    let index = segment
                        .parse::<usize>()
                        .map_err(|_| DottedPathError::InvalidIndex {
                            segment: segment.clone(),
                        })?;
                    if index > items.len() {
                        return Err(DottedPathError::IndexOutOfRange {
                            index,
                            len: items.len(),
                        });
                    }
                    if index == items.len() {
                        items.push(Value::Null);
                    }
                    &mut items[index]
                }
                Value::Object(map) => map.entry(segment.clone()).or_insert(Value::Null),
                _ => unreachable!("non-container replaced above"),
            };

            if position == last {
                *slot = value;
                return Ok(());
            }
            current = slot;
        }

        Ok(())
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl DottedPathError {
    /// 対象パスを含むXdockErrorに変換
    pub fn at(self, path: &str) -> XdockError {
        XdockError::invalid_path(path, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_rejects_empty_input() {
        assert_eq!(DottedPath::parse(""), Err(DottedPathError::Empty));
        assert_eq!(
            DottedPath::parse("services..image"),
            Err(DottedPathError::EmptySegment(1))
        );
    }

    #[test]
    fn test_set_overwrites_existing_leaf() {
        let mut template = json!({"services": {"app": {"image": "'%IMAGE%'", "ports": []}}});
        let path = DottedPath::parse("services.app.image").unwrap();

        path.set(&mut template, json!("myorg/app:1.2")).unwrap();

        assert_eq!(
            template,
            json!({"services": {"app": {"image": "myorg/app:1.2", "ports": []}}})
        );
    }

    #[test]
    fn test_set_keeps_key_order() {
        let mut template = json!({"version": "3", "services": {"app": {"image": "a", "restart": "always"}}});
        let path = DottedPath::parse("services.app.image").unwrap();

        path.set(&mut template, json!("b")).unwrap();

        let keys: Vec<&String> = template["services"]["app"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, vec!["image", "restart"]);
    }

    #[test]
    fn test_set_creates_intermediate_mappings() {
        let mut template = json!({"services": {}});
        let path = DottedPath::parse("services.db.environment.MYSQL_DATABASE").unwrap();

        path.set(&mut template, json!("shop")).unwrap();

        assert_eq!(
            template,
            json!({"services": {"db": {"environment": {"MYSQL_DATABASE": "shop"}}}})
        );
    }

    #[test]
    fn test_set_replaces_scalar_in_the_way() {
        let mut template = json!({"services": "none"});
        let path = DottedPath::parse("services.app").unwrap();

        path.set(&mut template, json!("x")).unwrap();

        assert_eq!(template, json!({"services": {"app": "x"}}));
    }

    #[test]
    fn test_set_sequence_index() {
        let mut template = json!({"ports": ["80:80"]});

        DottedPath::parse("ports.0")
            .unwrap()
            .set(&mut template, json!("8080:80"))
            .unwrap();
        DottedPath::parse("ports.1")
            .unwrap()
            .set(&mut template, json!("443:443"))
            .unwrap();

        assert_eq!(template, json!({"ports": ["8080:80", "443:443"]}));
    }

    #[test]
    fn test_set_sequence_rejects_bad_index() {
        let mut template = json!({"ports": ["80:80"]});

        assert_eq!(
            DottedPath::parse("ports.5")
                .unwrap()
                .set(&mut template, json!("x")),
            Err(DottedPathError::IndexOutOfRange { index: 5, len: 1 })
        );
        assert!(matches!(
            DottedPath::parse("ports.first")
                .unwrap()
                .set(&mut template, json!("x")),
            Err(DottedPathError::InvalidIndex { .. })
        ));
    }
}
