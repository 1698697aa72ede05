// Core Domain
// インベントリの比較とレポート整形の純粋なビジネスロジック

pub mod config;
pub mod error;
pub mod inventory;
pub mod report;
pub mod table_diff;
