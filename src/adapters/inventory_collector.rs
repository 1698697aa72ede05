// インベントリコレクター
//
// データベースからテーブル一覧と各テーブルの行数を取得するための抽象化レイヤー。
// 各方言固有のINFORMATION_SCHEMA/sqlite_masterクエリを実装します。

use crate::adapters::sql_quote::count_rows_sql;
use crate::core::config::Dialect;
use crate::core::error::DatabaseError;
use crate::core::inventory::Inventory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{AnyPool, Row};
use tracing::debug;

/// テーブル情報取得インターフェース
///
/// テーブル一覧の取得は方言ごとに異なり、行数の取得は共通のCOUNTクエリで行います。
#[async_trait]
pub trait InventoryCollector: Send + Sync {
    /// 対象の方言
    fn dialect(&self) -> Dialect;

    /// テーブル名一覧を取得するSQL
    fn table_names_sql(&self) -> &'static str;

    /// テーブル名一覧を取得
    async fn get_table_names(&self, pool: &AnyPool) -> Result<Vec<String>, DatabaseError> {
        let sql = self.table_names_sql();
        let rows = sqlx::query(sql)
            .fetch_all(pool)
            .await
            .map_err(|e| DatabaseError::Query {
                message: format!("Failed to list tables: {}", e),
                sql: Some(sql.to_string()),
            })?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>(0).map_err(|e| DatabaseError::Query {
                    message: format!("Failed to read table name: {}", e),
                    sql: Some(sql.to_string()),
                })
            })
            .collect()
    }

    /// テーブルの行数を取得
    async fn count_rows(&self, pool: &AnyPool, table: &str) -> Result<i64, DatabaseError> {
        let sql = count_rows_sql(self.dialect(), table);
        let row = sqlx::query(&sql)
            .fetch_one(pool)
            .await
            .map_err(|e| DatabaseError::Query {
                message: format!("Failed to count rows of '{}': {}", table, e),
                sql: Some(sql.clone()),
            })?;

        row.try_get::<i64, _>(0).map_err(|e| DatabaseError::Query {
            message: format!("Failed to read row count of '{}': {}", table, e),
            sql: Some(sql),
        })
    }

    /// テーブル名と行数のスナップショットを取得
    ///
    /// テーブルを1つずつ順番に数えます。途中でテーブルが消えた場合などはエラーになり、再試行しません。
    async fn collect(&self, pool: &AnyPool) -> Result<Inventory> {
        let table_names = self
            .get_table_names(pool)
            .await
            .inspect_err(|e| debug!(sql = ?e.sql(), "Table listing query failed"))?;
        debug!(dialect = %self.dialect(), count = table_names.len(), "Listed tables");

        let mut counts = Vec::with_capacity(table_names.len());
        for table in table_names {
            let count = self
                .count_rows(pool, &table)
                .await
                .inspect_err(|e| debug!(sql = ?e.sql(), "Row count query failed"))?;
            debug!(table = %table, rows = count, "Counted rows");
            counts.push((table, count));
        }

        Inventory::from_signed_counts(counts).context("Database returned an invalid inventory")
    }
}

/// PostgreSQL用コレクター
pub struct PostgresCollector;

/// MySQL用コレクター
pub struct MySqlCollector;

/// SQLite用コレクター
pub struct SqliteCollector;

/// 方言に応じたコレクターを作成
pub fn create_collector(dialect: Dialect) -> Box<dyn InventoryCollector> {
    match dialect {
        Dialect::PostgreSQL => Box::new(PostgresCollector),
        Dialect::MySQL => Box::new(MySqlCollector),
        Dialect::SQLite => Box::new(SqliteCollector),
    }
}

#[async_trait]
impl InventoryCollector for PostgresCollector {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSQL
    }

    fn table_names_sql(&self) -> &'static str {
        r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = current_schema()
                AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#
    }
}

#[async_trait]
impl InventoryCollector for MySqlCollector {
    fn dialect(&self) -> Dialect {
        Dialect::MySQL
    }

    fn table_names_sql(&self) -> &'static str {
        r#"
            SELECT CAST(table_name AS CHAR) AS table_name
            FROM information_schema.tables
            WHERE table_schema = DATABASE()
                AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#
    }
}

#[async_trait]
impl InventoryCollector for SqliteCollector {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn table_names_sql(&self) -> &'static str {
        r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table'
                AND name NOT LIKE 'sqlite_%'
            ORDER BY name
        "#
    }
}
