// 比較対象の解決サービス
//
// コマンドライン引数または設定ファイルから、比較する2つの接続先を決定する。
// 環境変数による上書きもここで扱い、coreは純粋な構造体に保つ。

use crate::adapters::connection_string::parse_target;
use crate::core::config::{Dialect, TargetConfig};
use crate::core::error::TargetError;
use crate::services::config_loader::ConfigLoader;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// 接続先ごとのパスワード上書き用環境変数の接頭辞
pub const PASSWORD_ENV_PREFIX: &str = "ROWTALLY_PASSWORD_";

/// 比較対象の解決ユーティリティ
#[derive(Debug, Clone, Default)]
pub struct TargetResolver;

impl TargetResolver {
    /// 比較する2つの接続先を解決
    ///
    /// - 引数が2つの場合は接続URLとして解釈する
    /// - 2つ未満の場合は設定ファイルから読み込む（1つだけ渡された引数は無視される）
    /// - 3つ以上の場合はエラー
    pub fn resolve(
        args: &[String],
        default_dialect: Dialect,
        config_path: &Path,
    ) -> Result<[TargetConfig; 2]> {
        let targets = match args {
            [first, second] => [
                parse_target(first, default_dialect)?,
                parse_target(second, default_dialect)?,
            ],
            [] | [_] => {
                if args.len() == 1 {
                    warn!("Only one target was given on the command line; reading both targets from the config file instead");
                }
                Self::from_config_file(config_path)?
            }
            _ => return Err(TargetError::TooManyTargets { count: args.len() }.into()),
        };

        let [first, second] = targets;
        Ok([
            Self::apply_env_overrides(0, first),
            Self::apply_env_overrides(1, second),
        ])
    }

    /// 設定ファイルから接続先ペアを読み込む
    pub fn from_config_file(config_path: &Path) -> Result<[TargetConfig; 2]> {
        if !config_path.exists() {
            return Err(anyhow!(
                "Config file not found: {:?}. Pass two connection URLs or create the config file.",
                config_path
            ));
        }
        debug!(path = ?config_path, "Reading targets from config file");

        let config = ConfigLoader::from_file(config_path)
            .with_context(|| "Failed to read config file")?;
        Ok(config.target_pair()?)
    }

    /// 環境変数による上書きを適用
    ///
    /// `ROWTALLY_PASSWORD_1` / `ROWTALLY_PASSWORD_2` が設定されていれば、
    /// それぞれ1つ目・2つ目の接続先のパスワードとして使用します。
    pub fn apply_env_overrides(index: usize, base: TargetConfig) -> TargetConfig {
        let mut target = base;

        let var = format!("{}{}", PASSWORD_ENV_PREFIX, index + 1);
        if let Ok(password) = std::env::var(&var) {
            debug!(variable = %var, "Overriding password from environment");
            target.password = Some(password);
        }

        target
    }
}
