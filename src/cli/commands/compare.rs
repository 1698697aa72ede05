// compareコマンドハンドラー
//
// 2つのデータベースのテーブル構成と行数を比較する機能を実装します。
// - 接続先の解決（コマンドライン引数または設定ファイル）
// - 両データベースからのインベントリ取得
// - 差分検出とレポート表示（不一致行の強調表示）

use crate::cli::commands::{render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::config::Dialect;
use crate::core::inventory::LabeledInventory;
use crate::core::report::{
    self, ComparisonReport, DivergenceMarker, PlainMarker, DIVERGENCE_POINTER,
};
use crate::core::table_diff::compare;
use crate::services::inventory_service::InventoryService;
use crate::services::target_resolver::TargetResolver;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// 不一致行を赤色で強調する書式
#[derive(Debug, Clone, Copy, Default)]
pub struct ColoredMarker;

impl DivergenceMarker for ColoredMarker {
    fn mark(&self, line: &str) -> String {
        format!("{}{}", line, DIVERGENCE_POINTER).red().to_string()
    }
}

/// compareコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct CompareOutput {
    #[serde(flatten)]
    pub report: ComparisonReport,
    /// テキスト出力メッセージ
    #[serde(skip)]
    pub text_message: String,
}

impl CommandOutput for CompareOutput {
    fn to_text(&self) -> String {
        self.text_message.clone()
    }
}

/// compareコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct CompareCommand {
    /// コマンドラインで指定された接続先
    pub targets: Vec<String>,
    /// 設定ファイルパス
    pub config_path: PathBuf,
    /// スキーム省略時の方言
    pub default_dialect: Dialect,
    /// 出力フォーマット
    pub format: OutputFormat,
    /// 色付き出力を使うかどうか
    pub color: bool,
}

/// compareコマンドハンドラー
#[derive(Debug, Default)]
pub struct CompareCommandHandler {
    inventory_service: InventoryService,
}

impl CompareCommandHandler {
    /// 新しいCompareCommandHandlerを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// compareコマンドを実行
    ///
    /// 不一致が見つかっても成功として扱い、レポートを返します。
    pub async fn execute(&self, command: &CompareCommand) -> Result<String> {
        let targets = TargetResolver::resolve(
            &command.targets,
            command.default_dialect,
            &command.config_path,
        )?;

        let inventories = self.inventory_service.collect_pair(&targets).await?;

        self.format_comparison(&inventories, &command.format, command.color)
    }

    /// インベントリを比較してレポートを整形
    pub fn format_comparison(
        &self,
        inventories: &[LabeledInventory; 2],
        format: &OutputFormat,
        color: bool,
    ) -> Result<String> {
        let result = compare(&inventories[0].inventory, &inventories[1].inventory);
        if result.is_empty() {
            warn!("Neither target contains any tables");
        }
        let summary = result.summary(inventories);
        debug!(
            common = summary.common,
            mismatched = summary.mismatched,
            only_in_first = summary.only_in_first,
            only_in_second = summary.only_in_second,
            "Compared inventories"
        );

        let marker: &dyn DivergenceMarker = if color { &ColoredMarker } else { &PlainMarker };
        let mut text_message = report::render(&result, inventories, marker);
        text_message.push('\n');
        text_message.push_str(&report::render_summary(&summary, inventories));

        let output = CompareOutput {
            report: ComparisonReport::new(&result, inventories),
            text_message,
        };

        render_output(&output, format)
    }
}
