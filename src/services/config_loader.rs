// 設定ファイル読み込みサービス
//
// core::config の純粋性を保つため、ファイルI/Oはこのサービスに集約する。

use crate::core::config::Config;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::Path;

/// 設定ファイル読み込みサービス
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// 設定ファイルを読み込む
    ///
    /// 拡張子が `.json` の場合はJSON、それ以外はYAMLとして解釈します。
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// YAML文字列から設定を読み込む
    pub fn from_yaml_str(content: &str) -> Result<Config> {
        serde_saphyr::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// JSON文字列から設定を読み込む
    ///
    /// `targets` キーを持つオブジェクトのほか、接続先の配列だけを並べた形式も受け付けます。
    pub fn from_json_str(content: &str) -> Result<Config> {
        let value: Value =
            serde_json::from_str(content).with_context(|| "Failed to parse config file")?;
        let value = match value {
            Value::Array(targets) => json!({ "targets": targets }),
            other => other,
        };

        serde_json::from_value(value).with_context(|| "Failed to parse config file")
    }
}
