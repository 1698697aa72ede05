// Adapters
// データベースへの接続とテーブル情報の取得を抽象化

pub mod connection_string;
pub mod database;
pub mod inventory_collector;
pub mod sql_quote;
