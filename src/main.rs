use anyhow::{Context, Result};
use clap::Parser;
use colored::control as color_control;
use rowtally::cli::commands::compare::{CompareCommand, CompareCommandHandler};
use rowtally::cli::Cli;
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    sqlx::any::install_default_drivers();

    // CLIをパースして実行
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // 非同期ランタイムを作成して実行
    let runtime = tokio::runtime::Runtime::new()
        .context("Failed to create Tokio runtime")
        .unwrap_or_else(|e| {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        });

    let result = runtime.block_on(run_command(cli));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// ログ出力を初期化する
///
/// RUST_LOG が設定されていればそれを優先し、無ければ --verbose に応じて debug / warn を使う。
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "rowtally=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// コマンドを実行する
async fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    // --config フラグの処理（絶対パスに変換）
    let config_path = if cli.config.is_absolute() {
        cli.config
    } else {
        env::current_dir()?.join(cli.config)
    };

    let handler = CompareCommandHandler::new();
    let command = CompareCommand {
        targets: cli.targets,
        config_path,
        default_dialect: cli.dialect.into(),
        format: cli.format,
        color: !cli.no_color,
    };
    handler.execute(&command).await
}
