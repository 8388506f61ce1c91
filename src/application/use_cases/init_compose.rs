use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::application::services::{
    compose_serializer::ComposeSerializer,
    post_processor::PostProcessor,
    replacement_engine::{ReplacementEngine, ReplacementReport},
    value_resolver::ValueResolver,
};
use crate::common::error::XdockError;
use crate::common::result::{ResultExt, XdockResult};
use crate::domain::entities::template::TemplateVersion;
use crate::infrastructure::http::template_catalog::TemplateCatalog;

/// 出力ファイル名
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

/// 既定のテンプレート種別
pub const DEFAULT_TEMPLATE: &str = "php-app";

/// docker-compose.yml 初期化の設定
#[derive(Debug, Clone)]
pub struct InitComposeConfig {
    /// 取得するテンプレート種別
    pub template: String,

    /// 既存ファイルを上書きするか
    pub force: bool,

    /// 出力先ディレクトリ（プロジェクトルート）
    pub project_root: PathBuf,
}

impl InitComposeConfig {
    /// 新しい設定を作成
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            force: false,
            project_root: project_root.into(),
        }
    }

    /// テンプレート種別を設定
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// 上書き可否を設定
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// 出力ファイルのパス
    pub fn output_path(&self) -> PathBuf {
        self.project_root.join(COMPOSE_FILE_NAME)
    }
}

/// 初期化の結果
#[derive(Debug, Clone)]
pub struct InitComposeResult {
    /// 書き込んだファイル
    pub output_path: PathBuf,

    /// 置換の適用状況
    pub report: ReplacementReport,

    /// 書き込んだ内容
    pub content: String,
}

/// 実行中の進捗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep<'a> {
    /// カタログからテンプレートを取得する直前
    Fetching { template: &'a str },

    /// ファイルを書き込む直前
    Writing,
}

/// テンプレートから docker-compose.yml を生成するユースケース
pub struct InitComposeUseCase {
    config: InitComposeConfig,
    serializer: ComposeSerializer,
    post_processor: PostProcessor,
}

impl InitComposeUseCase {
    /// 新しいユースケースを作成
    pub fn new(config: InitComposeConfig) -> Self {
        Self {
            config,
            serializer: ComposeSerializer::new(),
            post_processor: PostProcessor::new(),
        }
    }

    /// 出力先が書き込み可能か確認（`--force` なしで既存ならエラー）
    pub fn check_destination(&self) -> XdockResult<()> {
        let output_path = self.config.output_path();
        if !self.config.force && output_path.exists() {
            return Err(XdockError::output_exists(COMPOSE_FILE_NAME));
        }
        Ok(())
    }

    /// テンプレートの最新バージョンを取得
    pub fn fetch_latest(&self, catalog: &dyn TemplateCatalog) -> XdockResult<TemplateVersion> {
        catalog
            .latest(&self.config.template)?
            .ok_or_else(|| XdockError::template_not_found(&self.config.template))
    }

    /// 置換・シリアライズ・後処理を行い、ファイル内容を生成
    pub fn render(
        &self,
        version: TemplateVersion,
        resolver: &ValueResolver<'_>,
    ) -> XdockResult<(String, ReplacementReport)> {
        let TemplateVersion {
            mut compose,
            replacements,
        } = version;

        let report = ReplacementEngine::new(resolver).apply(&mut compose, &replacements)?;
        let serialized = self.serializer.serialize(&compose)?;

        Ok((self.post_processor.process(&serialized), report))
    }

    /// ファイルを書き込む
    pub fn write(&self, content: &str) -> XdockResult<PathBuf> {
        let output_path = self.config.output_path();
        fs::write(&output_path, content).with_filesystem_error(
            format!("failed to write {}", output_path.display()),
            Some(output_path.clone()),
        )?;
        info!(path = %output_path.display(), "wrote compose file");
        Ok(output_path)
    }

    /// 確認・取得・生成・書き込みを順に実行し、各段階の前に `progress` を呼ぶ
    pub fn execute(
        &self,
        catalog: &dyn TemplateCatalog,
        resolver: &ValueResolver<'_>,
        mut progress: impl FnMut(InitStep<'_>),
    ) -> XdockResult<InitComposeResult> {
        self.check_destination()?;

        progress(InitStep::Fetching {
            template: &self.config.template,
        });
        let version = self.fetch_latest(catalog)?;
        let (content, report) = self.render(version, resolver)?;
        info!(
            applied = report.applied_count(),
            skipped = report.skipped.len(),
            "applied template replacements"
        );

        progress(InitStep::Writing);
        let output_path = self.write(&content)?;

        Ok(InitComposeResult {
            output_path,
            report,
            content,
        })
    }
}
