// テーブルインベントリ
//
// ある時点でのデータベースの「テーブル名 → 行数」スナップショットを表現します。

use crate::core::config::default_alias;
use crate::core::error::InventoryError;
use serde::Serialize;
use std::collections::BTreeMap;

/// テーブル名と行数のマッピング
///
/// キーは辞書順で保持されるため、入力順序に関係なく走査順は決定的です。
/// 一度構築したら変更されません。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    tables: BTreeMap<String, u64>,
}

impl Inventory {
    /// 空のインベントリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// テーブル名と行数の組からインベントリを作成
    ///
    /// 空のテーブル名は `InvalidInventory`、同名テーブルは `DuplicateTable` になります。
    pub fn from_counts<I, S>(counts: I) -> Result<Self, InventoryError>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut tables = BTreeMap::new();
        for (name, count) in counts {
            let name: String = name.into();
            if name.is_empty() {
                return Err(InventoryError::InvalidInventory {
                    reason: "table name must not be empty".to_string(),
                });
            }
            if tables.contains_key(&name) {
                return Err(InventoryError::DuplicateTable { name });
            }
            tables.insert(name, count);
        }

        Ok(Self { tables })
    }

    /// ドライバーが返した符号付きの行数からインベントリを作成
    ///
    /// 負の行数は `InvalidInventory` として扱います。
    pub fn from_signed_counts<I, S>(counts: I) -> Result<Self, InventoryError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let converted = counts
            .into_iter()
            .map(|(name, count)| {
                let name: String = name.into();
                u64::try_from(count)
                    .map(|count| (name.clone(), count))
                    .map_err(|_| InventoryError::InvalidInventory {
                        reason: format!("table '{}' reported a negative row count ({})", name, count),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_counts(converted)
    }

    /// 行数を取得（テーブルが存在しない場合はNone）
    pub fn get(&self, table: &str) -> Option<u64> {
        self.tables.get(table).copied()
    }

    /// テーブル名を辞書順で返す
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// 表示名付きインベントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledInventory {
    /// レポートヘッダーに表示する別名
    pub alias: String,
    /// インベントリ本体
    pub inventory: Inventory,
}

impl LabeledInventory {
    /// 別名を指定して作成（未指定の場合は位置に応じた名前を使用）
    pub fn new(alias: Option<String>, index: usize, inventory: Inventory) -> Self {
        let alias = match alias {
            Some(alias) if !alias.is_empty() => alias,
            _ => default_alias(index),
        };
        Self { alias, inventory }
    }
}
