// エラー型定義
//
// アプリケーション全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、InventoryError, TargetError, ConfigError, DatabaseError を定義します。

use thiserror::Error;

/// インベントリエラー
///
/// テーブル名と行数のマッピングを構築できない場合に発生します。
/// 比較処理の前に検出され、実行全体を中断します。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Invalid inventory
    #[error("Invalid inventory: {reason}")]
    InvalidInventory {
        /// 不正な理由
        reason: String,
    },

    /// Duplicate table name
    #[error("Duplicate table name in inventory: {name}")]
    DuplicateTable {
        /// テーブル名
        name: String,
    },
}

/// 接続先指定エラー
///
/// コマンドライン引数で渡された接続URLの解釈時に発生します。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// Invalid URL
    #[error("Invalid target URL '{url}': {cause}")]
    InvalidUrl {
        /// 入力されたURL
        url: String,
        /// エラー原因
        cause: String,
    },

    /// Unsupported scheme
    #[error("Unsupported database scheme '{scheme}'. Please use one of: postgresql, mysql, sqlite.")]
    UnsupportedScheme {
        /// スキーム
        scheme: String,
    },

    /// Missing database name
    #[error("Target URL '{url}' does not specify a database")]
    MissingDatabase {
        /// 入力されたURL
        url: String,
    },

    /// Too many targets
    #[error("Exactly two targets can be compared, but {count} were given")]
    TooManyTargets {
        /// 指定された接続先の数
        count: usize,
    },
}

/// 設定ファイルエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 接続先が足りない
    #[error("Config file must define two targets, but {count} found")]
    NotEnoughTargets {
        /// 定義されている接続先の数
        count: usize,
    },

    /// 接続先が多すぎる
    #[error("Config file must define exactly two targets, but {count} found")]
    TooManyTargets {
        /// 定義されている接続先の数
        count: usize,
    },

    /// データベース名未指定
    #[error("Database name is not specified for {target}")]
    MissingDatabaseName {
        /// 接続先の表示名
        target: String,
    },
}

/// データベースエラー
///
/// 接続およびイントロスペクションクエリ実行時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Connection error
    #[error("Database connection error: {message} (cause: {cause})")]
    Connection {
        /// エラーメッセージ
        message: String,
        /// エラー原因
        cause: String,
    },

    /// Query execution error
    #[error("Query execution error: {message}")]
    Query {
        /// エラーメッセージ
        message: String,
        /// 失敗したSQL
        sql: Option<String>,
    },
}

impl DatabaseError {
    /// 失敗したSQLを取得
    pub fn sql(&self) -> Option<&str> {
        match self {
            DatabaseError::Query { sql, .. } => sql.as_deref(),
            DatabaseError::Connection { .. } => None,
        }
    }
}
