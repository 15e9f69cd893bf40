//! 分配引擎主入口

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use wms_core::{EngineConfig, Lot, Result};

use crate::allocation::{AllocationCalculator, AllocationResult, ShippingPriority};
use crate::picking::{PickingBatch, PickingBatcher};
use crate::summary::{InventorySummarizer, InventorySummary};
use crate::validation::{SnapshotIssue, SnapshotValidator};

/// 單筆分配請求（各自獨立的快照）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// 單一產品的批次快照
    pub lots: Vec<Lot>,

    /// 需求數量
    pub quantity: u64,
}

impl AllocationRequest {
    pub fn new(lots: Vec<Lot>, quantity: u64) -> Self {
        Self { lots, quantity }
    }
}

/// 分配計劃與對應的揀貨批次
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingPlan {
    pub allocation: AllocationResult,
    pub batches: Vec<PickingBatch>,
}

/// 分配引擎
///
/// 無內部可變狀態，可在多執行緒間共用。
#[derive(Debug, Clone, Default)]
pub struct LotEngine {
    config: EngineConfig,
}

impl LotEngine {
    /// 創建新的引擎，配置無效時回傳錯誤
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 產生扣量計劃
    #[instrument(skip(self, lots), fields(lots = lots.len()))]
    pub fn allocate(
        &self,
        lots: &[Lot],
        requested_quantity: u64,
        reference_time: DateTime<Utc>,
    ) -> Result<AllocationResult> {
        tracing::info!(
            "開始分配：批次 {} 筆，需求數量 {}",
            lots.len(),
            requested_quantity
        );

        if self.config.validate_snapshot {
            self.log_snapshot_issues(lots);
        }

        let result = AllocationCalculator::allocate(lots, requested_quantity, reference_time)?;

        tracing::debug!("排除批次: {:?}", result.excluded);
        tracing::info!(
            "分配完成：已分配 {} / {}，完全滿足: {}",
            result.allocated_quantity,
            result.requested_quantity,
            result.fully_satisfied
        );

        Ok(result)
    }

    /// 出貨優先順序
    #[instrument(skip(self, lots), fields(lots = lots.len()))]
    pub fn rank(&self, lots: &[Lot], reference_time: DateTime<Utc>) -> Result<ShippingPriority> {
        let priority = AllocationCalculator::rank(lots, reference_time)?;
        tracing::debug!("可出貨批次 {} 筆", priority.ranked.len());
        Ok(priority)
    }

    /// 下一個應出貨的批次（僅 ACTIVE）
    pub fn next_lot_to_ship(&self, lots: &[Lot], reference_time: DateTime<Utc>) -> Option<Lot> {
        AllocationCalculator::next_lot_to_ship(lots, reference_time)
    }

    /// 分配後依儲位分批
    ///
    /// 計劃中任何批次儲位不完整時回傳 `IncompleteLocation`。
    #[instrument(skip(self, lots), fields(lots = lots.len()))]
    pub fn plan_picking(
        &self,
        lots: &[Lot],
        requested_quantity: u64,
        reference_time: DateTime<Utc>,
    ) -> Result<PickingPlan> {
        let allocation = self.allocate(lots, requested_quantity, reference_time)?;

        let batches = PickingBatcher::batch(&allocation).map_err(|err| {
            tracing::warn!("揀貨分批失敗: {}", err);
            err
        })?;

        tracing::info!("揀貨批次 {} 個", batches.len());
        Ok(PickingPlan {
            allocation,
            batches,
        })
    }

    /// 庫存彙總（容量與門檻取自配置）
    #[instrument(skip(self, lots), fields(lots = lots.len()))]
    pub fn summarize(&self, lots: &[Lot], reference_time: DateTime<Utc>) -> InventorySummary {
        InventorySummarizer::summarize_with_threshold(
            lots,
            self.config.warehouse_capacity,
            reference_time,
            self.config.expiring_soon_days,
        )
    }

    /// 快照資料品質檢查
    pub fn validate_snapshot(&self, lots: &[Lot]) -> Vec<SnapshotIssue> {
        SnapshotValidator::validate(lots)
    }

    /// 並行處理多筆獨立請求，結果順序與請求順序相同
    #[instrument(skip(self, requests), fields(requests = requests.len()))]
    pub fn allocate_many(
        &self,
        requests: &[AllocationRequest],
        reference_time: DateTime<Utc>,
    ) -> Vec<Result<AllocationResult>> {
        requests
            .par_iter()
            .map(|request| self.allocate(&request.lots, request.quantity, reference_time))
            .collect()
    }

    fn log_snapshot_issues(&self, lots: &[Lot]) {
        for issue in SnapshotValidator::validate(lots) {
            tracing::warn!(lot_id = %issue.lot_id, kind = ?issue.kind, "{}", issue.message);
        }
    }
}
