// データベース接続アダプター
//
// SQLxを使用したデータベース接続の管理を行います。
// PostgreSQL、MySQL、SQLiteに対応した統一されたインターフェースを提供します。

use crate::adapters::connection_string;
use crate::core::config::TargetConfig;
use crate::core::error::DatabaseError;
use sqlx::pool::PoolOptions;
use sqlx::{Any, AnyPool};
use std::time::Duration;
use tracing::debug;

/// 未設定時の最大コネクション数
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// 未設定時の接続タイムアウト（秒）
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// データベース接続サービス
///
/// 接続先ごとの接続プールの初期化と破棄を行います。
#[derive(Debug, Clone, Default)]
pub struct DatabaseConnectionService;

impl DatabaseConnectionService {
    /// 新しいDatabaseConnectionServiceを作成
    pub fn new() -> Self {
        Self
    }

    /// データベース接続プールを作成
    ///
    /// # Arguments
    ///
    /// * `target` - 接続先の設定
    ///
    /// # Returns
    ///
    /// 接続プールまたはエラー
    pub async fn create_pool(&self, target: &TargetConfig) -> Result<AnyPool, DatabaseError> {
        let connection_string = connection_string::build_connection_string(target);
        debug!(
            dialect = %target.dialect,
            host = %target.host,
            database = %target.database,
            "Connecting to database"
        );

        self.create_pool_options(target)
            .connect(&connection_string)
            .await
            .map_err(|e| DatabaseError::Connection {
                message: format!(
                    "Failed to create database connection pool: {} ({})",
                    target.dialect, target.database
                ),
                cause: e.to_string(),
            })
    }

    /// TargetConfigからプールオプションを作成
    ///
    /// 未設定の場合はデフォルト値（max_connections=5, timeout=30秒）を使用します。
    pub fn create_pool_options(&self, target: &TargetConfig) -> PoolOptions<Any> {
        let max_conn = target.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let timeout = target.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);

        PoolOptions::new()
            .max_connections(max_conn)
            .acquire_timeout(Duration::from_secs(timeout))
    }

    /// 接続プールを閉じる
    pub async fn close_pool(&self, pool: AnyPool) {
        pool.close().await;
    }
}
