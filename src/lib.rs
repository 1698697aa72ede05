// Rowtallyライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメインロジック（インベントリ比較、レポート整形）
// - adapters: データベースへのアクセスを抽象化
// - services: 設定ファイルの読み込みと接続先の解決

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;
