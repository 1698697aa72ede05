// コマンドハンドラー層
// CLIコマンドの実装と出力フォーマットの切り替え

pub mod compare;

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;

/// テキスト表現を持つコマンド出力
pub trait CommandOutput: Serialize {
    /// 人間向けのテキスト出力
    fn to_text(&self) -> String;
}

/// 指定フォーマットでコマンド出力を文字列化
pub fn render_output<T: CommandOutput>(output: &T, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(output.to_text()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(output).with_context(|| "Failed to serialize output")
        }
    }
}
