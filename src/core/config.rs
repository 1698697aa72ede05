// 設定ファイル管理
//
// 比較対象となる2つのデータベース接続先の設定を表現します。
// ファイルI/Oは services::config_loader に集約し、ここは純粋な構造体に保つ。

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// データベース方言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[serde(rename = "postgresql", alias = "postgres")]
    PostgreSQL,
    #[serde(rename = "mysql")]
    MySQL,
    #[serde(rename = "sqlite")]
    SQLite,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::PostgreSQL => write!(f, "postgresql"),
            Dialect::MySQL => write!(f, "mysql"),
            Dialect::SQLite => write!(f, "sqlite"),
        }
    }
}

impl Dialect {
    /// Dialectに応じたデフォルトポートを返す
    ///
    /// - PostgreSQL: 5432
    /// - MySQL: 3306
    /// - SQLite: None（ファイルベースのためポート不要）
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Dialect::PostgreSQL => Some(5432),
            Dialect::MySQL => Some(3306),
            Dialect::SQLite => None,
        }
    }

    /// URLスキームからDialectを判定
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "postgresql" | "postgres" => Some(Dialect::PostgreSQL),
            "mysql" => Some(Dialect::MySQL),
            "sqlite" => Some(Dialect::SQLite),
            _ => None,
        }
    }
}

/// プロジェクト設定
///
/// 比較対象の接続先を2つ定義します。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 接続先の一覧（先頭から順に target 1, target 2）
    pub targets: Vec<TargetConfig>,
}

impl Config {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = ".rowtally.yaml";

    /// 設定の妥当性を検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.targets.len() {
            0 | 1 => {
                return Err(ConfigError::NotEnoughTargets {
                    count: self.targets.len(),
                })
            }
            2 => {}
            count => return Err(ConfigError::TooManyTargets { count }),
        }

        for (index, target) in self.targets.iter().enumerate() {
            target.validate(index)?;
        }

        Ok(())
    }

    /// 検証済みの接続先ペアを取得
    pub fn target_pair(&self) -> Result<[TargetConfig; 2], ConfigError> {
        self.validate()?;
        Ok([self.targets[0].clone(), self.targets[1].clone()])
    }
}

/// 接続先の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// レポートに表示する別名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// データベース方言（省略時はMySQL）
    #[serde(default = "default_dialect")]
    pub dialect: Dialect,

    /// ホスト名（SQLiteの場合は不要）
    #[serde(default = "default_host", skip_serializing_if = "String::is_empty")]
    pub host: String,

    /// ポート番号（Noneの場合はDialectのデフォルトポートを使用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// データベース名（SQLiteの場合はファイルパス）
    pub database: String,

    /// ユーザー名
    #[serde(default, alias = "username", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// パスワード
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// 接続タイムアウト（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// 最大コネクション数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

fn default_dialect() -> Dialect {
    Dialect::MySQL
}

fn default_host() -> String {
    "localhost".to_string()
}

impl TargetConfig {
    /// 最小限の項目で接続先を作成
    pub fn new(dialect: Dialect, database: impl Into<String>) -> Self {
        Self {
            alias: None,
            dialect,
            host: default_host(),
            port: None,
            database: database.into(),
            user: None,
            password: None,
            timeout: None,
            max_connections: None,
        }
    }

    /// 解決済みポート番号を取得
    ///
    /// portがSomeの場合はその値を返し、Noneの場合はDialectのデフォルトポートを返します。
    /// SQLiteなどデフォルトポートがないDialectの場合は0を返します。
    pub fn resolved_port(&self) -> u16 {
        self.port
            .unwrap_or_else(|| self.dialect.default_port().unwrap_or(0))
    }

    /// レポート用の表示名を取得
    ///
    /// 別名が無い場合は位置に応じて "target 1" / "target 2" を返します。
    pub fn display_alias(&self, index: usize) -> String {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => default_alias(index),
        }
    }

    /// Validate target configuration
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.database.is_empty() {
            return Err(ConfigError::MissingDatabaseName {
                target: self.display_alias(index),
            });
        }

        Ok(())
    }
}

/// 位置に応じたデフォルトの別名
pub fn default_alias(index: usize) -> String {
    format!("target {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::PostgreSQL.to_string(), "postgresql");
        assert_eq!(Dialect::MySQL.to_string(), "mysql");
        assert_eq!(Dialect::SQLite.to_string(), "sqlite");
    }

    #[test]
    fn test_dialect_from_scheme() {
        assert_eq!(Dialect::from_scheme("postgres"), Some(Dialect::PostgreSQL));
        assert_eq!(Dialect::from_scheme("postgresql"), Some(Dialect::PostgreSQL));
        assert_eq!(Dialect::from_scheme("mysql"), Some(Dialect::MySQL));
        assert_eq!(Dialect::from_scheme("sqlite"), Some(Dialect::SQLite));
        assert_eq!(Dialect::from_scheme("oracle"), None);
    }

    #[test]
    fn test_resolved_port() {
        let mut target = TargetConfig::new(Dialect::MySQL, "app");
        assert_eq!(target.resolved_port(), 3306);

        // 明示的に設定したポートは常にその値を返す
        target.port = Some(3307);
        assert_eq!(target.resolved_port(), 3307);

        let sqlite = TargetConfig::new(Dialect::SQLite, "app.db");
        assert_eq!(sqlite.resolved_port(), 0);
    }

    #[test]
    fn test_display_alias_defaults_to_position() {
        let mut target = TargetConfig::new(Dialect::MySQL, "app");
        assert_eq!(target.display_alias(0), "target 1");
        assert_eq!(target.display_alias(1), "target 2");

        target.alias = Some(String::new());
        assert_eq!(target.display_alias(1), "target 2");

        target.alias = Some("staging".to_string());
        assert_eq!(target.display_alias(1), "staging");
    }

    #[test]
    fn test_validate_target_count() {
        let one = Config {
            targets: vec![TargetConfig::new(Dialect::MySQL, "a")],
        };
        assert_eq!(
            one.validate(),
            Err(ConfigError::NotEnoughTargets { count: 1 })
        );

        let three = Config {
            targets: vec![
                TargetConfig::new(Dialect::MySQL, "a"),
                TargetConfig::new(Dialect::MySQL, "b"),
                TargetConfig::new(Dialect::MySQL, "c"),
            ],
        };
        assert_eq!(
            three.validate(),
            Err(ConfigError::TooManyTargets { count: 3 })
        );
    }

    #[test]
    fn test_validate_missing_database() {
        let config = Config {
            targets: vec![
                TargetConfig::new(Dialect::MySQL, "a"),
                TargetConfig::new(Dialect::MySQL, ""),
            ],
        };

        assert_eq!(
            config.target_pair(),
            Err(ConfigError::MissingDatabaseName {
                target: "target 2".to_string()
            })
        );
    }
}
