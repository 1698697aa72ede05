// インベントリ取得サービス
//
// 接続先ごとに接続プールを作成し、テーブル一覧と行数のスナップショットを取得する。

use crate::adapters::database::DatabaseConnectionService;
use crate::adapters::inventory_collector::create_collector;
use crate::core::config::TargetConfig;
use crate::core::inventory::LabeledInventory;
use anyhow::{Context, Result};
use tracing::info;

/// インベントリ取得サービス
#[derive(Debug, Clone, Default)]
pub struct InventoryService {
    connection_service: DatabaseConnectionService,
}

impl InventoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1つの接続先からインベントリを取得
    ///
    /// 接続やクエリの失敗はそのまま返し、再試行しません。
    pub async fn collect(&self, target: &TargetConfig, index: usize) -> Result<LabeledInventory> {
        let alias = target.display_alias(index);

        let pool = self
            .connection_service
            .create_pool(target)
            .await
            .with_context(|| format!("Failed to connect to {}", alias))?;

        let collector = create_collector(target.dialect);
        let result = collector.collect(&pool).await;
        self.connection_service.close_pool(pool).await;

        let inventory =
            result.with_context(|| format!("Failed to collect table inventory from {}", alias))?;
        info!(alias = %alias, tables = inventory.len(), "Collected table inventory");

        Ok(LabeledInventory::new(Some(alias), index, inventory))
    }

    /// 2つの接続先から並行してインベントリを取得
    ///
    /// 完了順に関係なく、結果の位置は引数の位置と一致します。
    pub async fn collect_pair(&self, targets: &[TargetConfig; 2]) -> Result<[LabeledInventory; 2]> {
        let (first, second) =
            tokio::try_join!(self.collect(&targets[0], 0), self.collect(&targets[1], 1))?;
        Ok([first, second])
    }
}
