use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::error::XdockError;
use crate::common::result::{OptionExt, XdockResult};
use crate::domain::value_objects::dotted_path::DottedPath;

/// カタログ内のテンプレート本体を保持するキー
pub const COMPOSE_KEY: &str = "docker-compose";

/// カタログ内の置換ディレクティブを保持するキー
pub const REPLACEMENTS_KEY: &str = "docker-compose-replacements";

/// 置換値の取得元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ValueSpec {
    /// ローカル設定から `key` を参照する
    Config { key: String },

    /// プロジェクトディレクトリ名を使用する
    ProjectDirectoryName,

    /// 未知の取得元（常に未解決）
    #[serde(other)]
    Unknown,
}

impl ValueSpec {
    /// 設定キー参照を作成
    pub fn config(key: impl Into<String>) -> Self {
        Self::Config { key: key.into() }
    }

    /// ログ出力用の説明
    pub fn describe(&self) -> String {
        match self {
            Self::Config { key } => format!("config:{}", key),
            Self::ProjectDirectoryName => "project_directory_name".to_string(),
            Self::Unknown => "unknown".to_string(),
        }
    }
}

/// 置換ディレクティブ
///
/// `path` の値を `specs` のうち最初に解決できたもので上書きする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementDirective {
    /// 書き込み先
    pub path: DottedPath,

    /// 候補となる取得元（先頭から順に評価）
    pub specs: Vec<ValueSpec>,
}

impl ReplacementDirective {
    /// 新しいディレクティブを作成
    pub fn new(path: DottedPath, specs: Vec<ValueSpec>) -> Self {
        Self { path, specs }
    }
}

/// テンプレートの1バージョン
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateVersion {
    /// docker-compose の構造
    pub compose: Value,

    /// カタログ上の順序を保った置換ディレクティブ
    pub replacements: Vec<ReplacementDirective>,
}

impl TemplateVersion {
    /// 置換なしのテンプレートを作成
    pub fn new(compose: Value) -> Self {
        Self {
            compose,
            replacements: Vec::new(),
        }
    }

    /// 置換ディレクティブを設定
    pub fn with_replacements(mut self, replacements: Vec<ReplacementDirective>) -> Self {
        self.replacements = replacements;
        self
    }

    /// カタログのバージョンエントリから作成
    pub fn from_entry(entry: &Value) -> XdockResult<Self> {
        let entry = entry
            .as_object()
            .ok_or_malformed("template version entry is not an object")?;

        let compose = entry
            .get(COMPOSE_KEY)
            .cloned()
            .ok_or_malformed(format!("template version has no '{}' member", COMPOSE_KEY))?;

        let replacements = match entry.get(REPLACEMENTS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            // PHP側で空配列が `[]` としてエンコードされる
            Some(Value::Array(items)) if items.is_empty() => Vec::new(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(path, specs)| parse_directive(path, specs))
                .collect::<XdockResult<Vec<_>>>()?,
            Some(_) => {
                return Err(XdockError::malformed_catalog(format!(
                    "'{}' must be an object keyed by path",
                    REPLACEMENTS_KEY
                )))
            }
        };

        Ok(Self {
            compose,
            replacements,
        })
    }
}

fn parse_directive(path: &str, specs: &Value) -> XdockResult<ReplacementDirective> {
    let dotted = DottedPath::parse(path).map_err(|e| e.at(path))?;
    let specs: Vec<ValueSpec> = serde_json::from_value(specs.clone()).map_err(|e| {
        XdockError::malformed_catalog_with_source(
            format!("invalid value specs for '{}': {}", path, e),
            e,
        )
    })?;
    Ok(ReplacementDirective::new(dotted, specs))
}

/// カタログ文書から指定テンプレートの最新バージョンを取り出す
///
/// カタログはテンプレート名からバージョン一覧へのマッピングで、先頭が最新。
pub fn latest_from_catalog(document: &Value, name: &str) -> XdockResult<Option<TemplateVersion>> {
    let catalog = document
        .as_object()
        .ok_or_malformed("catalog document is not an object")?;

    let versions = match catalog.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(versions)) => versions,
        Some(_) => {
            return Err(XdockError::malformed_catalog(format!(
                "versions of '{}' are not a list",
                name
            )))
        }
    };

    versions.first().map(TemplateVersion::from_entry).transpose()
}
