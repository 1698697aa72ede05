// 比較レポートの整形
//
// 差分検出結果を固定幅のテキストに整形します。
// 不一致行の強調表示は DivergenceMarker に委ね、比較ロジックには触れません。

use crate::core::inventory::LabeledInventory;
use crate::core::table_diff::{DiffResult, DiffSummary, Section, TableComparison};
use serde::Serialize;

/// ヘッダーの各カラム幅
pub const HEADER_COLUMN_WIDTH: usize = 55;
/// 左カラムのテーブル名幅
pub const LEFT_NAME_WIDTH: usize = 30;
/// 右カラムのテーブル名幅
pub const RIGHT_NAME_WIDTH: usize = 42;
/// 行数の表示幅
pub const COUNT_WIDTH: usize = 12;
/// 共通テーブルセクションの区切り幅
pub const COMMON_DIVIDER_WIDTH: usize = 100;
/// 欠落テーブルセクションの区切り幅
pub const MISSING_DIVIDER_WIDTH: usize = 98;

pub const COMMON_SECTION_TITLE: &str = "table name : row count";
pub const MISSING_SECTION_TITLE: &str = "possibly missing tables";
/// テーブルが存在しない側に表示する値
pub const ABSENT_SENTINEL: &str = "NULL";
/// 不一致行の末尾に付ける矢印
pub const DIVERGENCE_POINTER: &str = "<--";

/// 不一致行を強調するための書式
pub trait DivergenceMarker {
    /// 不一致行を強調した文字列を返す
    fn mark(&self, line: &str) -> String;
}

/// 色を使わずに矢印だけを付ける書式
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMarker;

impl DivergenceMarker for PlainMarker {
    fn mark(&self, line: &str) -> String {
        format!("{}{}", line, DIVERGENCE_POINTER)
    }
}

/// テキストレポートを生成
pub fn render(
    result: &DiffResult,
    labeled: &[LabeledInventory; 2],
    marker: &dyn DivergenceMarker,
) -> String {
    let mut output = String::new();
    let rows = result.rows(labeled);

    output.push_str(&format!(
        "{:^width$} {:^width$}\n",
        labeled[0].alias,
        labeled[1].alias,
        width = HEADER_COLUMN_WIDTH
    ));
    output.push_str(&format!(
        "{:=^width$}\n",
        COMMON_SECTION_TITLE,
        width = COMMON_DIVIDER_WIDTH
    ));

    for row in rows.iter().filter(|row| row.section == Section::Common) {
        output.push_str(&format_row(row, marker));
        output.push('\n');
    }

    let mut missing = rows
        .iter()
        .filter(|row| row.section == Section::Missing)
        .peekable();
    if missing.peek().is_some() {
        output.push_str(&format!(
            "\n{:=^width$}\n",
            MISSING_SECTION_TITLE,
            width = MISSING_DIVIDER_WIDTH
        ));
        for row in missing {
            output.push_str(&format_row(row, marker));
            output.push('\n');
        }
    }

    output
}

/// 乖離が無い場合の集計行の末尾
pub const IDENTICAL_SUFFIX: &str = "; inventories are identical";

/// 集計行を生成
///
/// 乖離が1つも無ければ末尾に一致した旨を付けます。
pub fn render_summary(summary: &DiffSummary, labeled: &[LabeledInventory; 2]) -> String {
    let mut line = format!(
        "Tables: {} common ({} mismatched), {} only in {}, {} only in {}",
        summary.common,
        summary.mismatched,
        summary.only_in_first,
        labeled[0].alias,
        summary.only_in_second,
        labeled[1].alias
    );
    if !summary.has_divergence() {
        line.push_str(IDENTICAL_SUFFIX);
    }
    line
}

/// 1行分を整形し、不一致であれば強調する
fn format_row(row: &TableComparison, marker: &dyn DivergenceMarker) -> String {
    let line = format!(
        "{:>lw$}: {:<cw$}{:>rw$}: {:<cw$}",
        row.name,
        display_count(row.counts[0]),
        row.name,
        display_count(row.counts[1]),
        lw = LEFT_NAME_WIDTH,
        rw = RIGHT_NAME_WIDTH,
        cw = COUNT_WIDTH
    );

    if row.is_mismatch() {
        marker.mark(&line)
    } else {
        line
    }
}

fn display_count(count: Option<u64>) -> String {
    count.map_or_else(|| ABSENT_SENTINEL.to_string(), |c| c.to_string())
}

/// 構造化出力用のレポート
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// 各インベントリの別名
    pub aliases: [String; 2],
    /// テーブルごとの比較結果
    pub tables: Vec<TableReportEntry>,
    /// 片側にしか存在しないテーブル
    pub missing: Vec<String>,
    pub summary: DiffSummary,
}

/// 構造化出力用のテーブル行
#[derive(Debug, Clone, Serialize)]
pub struct TableReportEntry {
    pub name: String,
    pub counts: [Option<u64>; 2],
    pub section: Section,
    pub mismatch: bool,
}

impl ComparisonReport {
    /// 差分検出結果から構造化レポートを作成
    pub fn new(result: &DiffResult, labeled: &[LabeledInventory; 2]) -> Self {
        let tables = result
            .rows(labeled)
            .into_iter()
            .map(|row| TableReportEntry {
                mismatch: row.is_mismatch(),
                name: row.name,
                counts: row.counts,
                section: row.section,
            })
            .collect();

        Self {
            aliases: [labeled[0].alias.clone(), labeled[1].alias.clone()],
            tables,
            missing: result.missing(),
            summary: result.summary(labeled),
        }
    }
}
