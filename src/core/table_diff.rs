// テーブル差分検出
//
// 2つのインベントリのテーブル名集合を比較し、
// 共通テーブルと片側にしか存在しないテーブルに分類する純粋なロジック。

use crate::core::inventory::{Inventory, LabeledInventory};
use serde::Serialize;
use std::collections::BTreeSet;

/// テーブル名の集合
///
/// 辞書順を保つ `BTreeSet` を包み、比較に必要な集合演算を型付きで提供します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSet(BTreeSet<String>);

impl TableSet {
    /// インベントリのキー集合を作成
    pub fn from_inventory(inventory: &Inventory) -> Self {
        Self(inventory.table_names().map(str::to_string).collect())
    }

    /// 積集合
    pub fn intersection(&self, other: &TableSet) -> TableSet {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// 差集合（self にあって other にないもの）
    pub fn difference(&self, other: &TableSet) -> TableSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// 対称差集合
    pub fn symmetric_difference(&self, other: &TableSet) -> TableSet {
        Self(self.0.symmetric_difference(&other.0).cloned().collect())
    }

    /// 辞書順に並んだテーブル名に変換
    pub fn into_sorted_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl FromIterator<String> for TableSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 差分検出結果
///
/// `common`, `only_in[0]`, `only_in[1]` は両インベントリのテーブル名の和集合を分割し、
/// 互いに素で、それぞれ辞書順に並びます。行数の比較結果は保持せず、必要時に導出します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// 両方に存在するテーブル
    pub common: Vec<String>,
    /// 片方にのみ存在するテーブル（インデックスはインベントリの位置）
    pub only_in: [Vec<String>; 2],
}

/// 2つのインベントリを比較する
///
/// テーブル名は完全一致で比較します（大文字小文字の同一視やトリムは行わない）。
pub fn compare(a: &Inventory, b: &Inventory) -> DiffResult {
    let keys_a = TableSet::from_inventory(a);
    let keys_b = TableSet::from_inventory(b);

    DiffResult {
        common: keys_a.intersection(&keys_b).into_sorted_vec(),
        only_in: [
            keys_a.difference(&keys_b).into_sorted_vec(),
            keys_b.difference(&keys_a).into_sorted_vec(),
        ],
    }
}

/// レポート上のセクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// 両方に存在するテーブル
    Common,
    /// 片方に欠けている可能性のあるテーブル
    Missing,
}

/// 1テーブル分の比較行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableComparison {
    pub name: String,
    /// 各インベントリの行数（存在しない側はNone）
    pub counts: [Option<u64>; 2],
    pub section: Section,
}

impl TableComparison {
    /// 表示上の行数が食い違っているかどうか
    ///
    /// 片側にしか存在しない場合も不一致として扱います。
    pub fn is_mismatch(&self) -> bool {
        self.counts[0] != self.counts[1]
    }
}

/// 差分の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub common: usize,
    pub matching: usize,
    pub mismatched: usize,
    pub only_in_first: usize,
    pub only_in_second: usize,
}

impl DiffSummary {
    /// 何らかの乖離があるかどうか
    pub fn has_divergence(&self) -> bool {
        self.mismatched > 0 || self.only_in_first > 0 || self.only_in_second > 0
    }
}

impl DiffResult {
    /// 片側にしか存在しないテーブル（対称差）を辞書順で返す
    pub fn missing(&self) -> Vec<String> {
        let first: TableSet = self.only_in[0].iter().cloned().collect();
        let second: TableSet = self.only_in[1].iter().cloned().collect();
        first.symmetric_difference(&second).into_sorted_vec()
    }

    /// どちらのインベントリにもテーブルが無いかどうか
    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.only_in.iter().all(Vec::is_empty)
    }

    /// レポート用の比較行を生成
    ///
    /// 共通テーブル、続いて欠落テーブルの順に辞書順で並びます。
    pub fn rows(&self, labeled: &[LabeledInventory; 2]) -> Vec<TableComparison> {
        let counts_for = |name: &str| {
            [
                labeled[0].inventory.get(name),
                labeled[1].inventory.get(name),
            ]
        };

        let common = self.common.iter().map(|name| TableComparison {
            name: name.clone(),
            counts: counts_for(name.as_str()),
            section: Section::Common,
        });
        let missing = self.missing().into_iter().map(|name| TableComparison {
            counts: counts_for(name.as_str()),
            name,
            section: Section::Missing,
        });

        common.chain(missing).collect()
    }

    /// 集計を作成
    pub fn summary(&self, labeled: &[LabeledInventory; 2]) -> DiffSummary {
        let mismatched = self
            .common
            .iter()
            .filter(|name| labeled[0].inventory.get(name) != labeled[1].inventory.get(name))
            .count();

        DiffSummary {
            common: self.common.len(),
            matching: self.common.len() - mismatched,
            mismatched,
            only_in_first: self.only_in[0].len(),
            only_in_second: self.only_in[1].len(),
        }
    }
}
