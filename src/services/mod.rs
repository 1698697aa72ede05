// Services
// 設定ファイルの読み込み、接続先の解決、インベントリ取得を担うアプリケーションサービス

pub mod config_loader;
pub mod inventory_service;
pub mod target_resolver;
