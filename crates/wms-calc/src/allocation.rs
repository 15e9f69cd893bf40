//! 批次分配（篩選 → 排序 → 貪婪扣量）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wms_core::{Lot, LotStatus, Result, WmsError};

use crate::classifier::{Eligibility, LotClassifier};
use crate::priority::PriorityComparator;

/// 沒有任何可分配批次時的說明
pub const NO_ELIGIBLE_LOTS_REASON: &str = "no eligible lots — all expired, held, or exhausted";

/// 快照中沒有任何批次時的說明
pub const NO_LOTS_REASON: &str = "no lots supplied";

/// 分配計劃中的一筆扣量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    /// 批次（快照副本）
    pub lot: Lot,

    /// 本次扣用數量
    pub quantity: u64,
}

/// 被排除的批次及原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedLot {
    pub lot_id: String,
    pub eligibility: Eligibility,
}

/// 分配結果
///
/// 只是建議的扣量順序；實際扣減由呼叫端在交易中完成。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// 產品 SKU（快照為空時為 None）
    pub sku: Option<String>,

    /// 需求數量
    pub requested_quantity: u64,

    /// 依優先順序排列的扣量計劃
    pub entries: Vec<AllocationEntry>,

    /// 已分配數量合計
    pub allocated_quantity: u64,

    /// 是否完全滿足需求
    pub fully_satisfied: bool,

    /// 是否可出貨（等同完全滿足）
    pub ready_to_ship: bool,

    /// 說明（決定批次的策略與到期日）
    pub reason: String,

    /// 被排除的批次
    pub excluded: Vec<ExcludedLot>,
}

impl AllocationResult {
    /// 創建沒有任何扣量的結果
    fn unfilled(sku: Option<String>, requested_quantity: u64, reason: &str) -> Self {
        Self {
            sku,
            requested_quantity,
            entries: Vec::new(),
            allocated_quantity: 0,
            fully_satisfied: false,
            ready_to_ship: false,
            reason: reason.to_string(),
            excluded: Vec::new(),
        }
    }

    /// 未滿足的數量（待補單）
    pub fn shortfall(&self) -> u64 {
        self.requested_quantity.saturating_sub(self.allocated_quantity)
    }

    /// 計劃是否為空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 計劃中的批次ID（依扣量順序）
    pub fn lot_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.lot.lot_id.as_str()).collect()
    }
}

/// 出貨優先順序（只排序，不扣量）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPriority {
    /// 依優先順序排列的可分配批次
    pub ranked: Vec<Lot>,

    /// 是否有可出貨批次
    pub ready_to_ship: bool,

    /// 說明
    pub reason: String,

    /// 被排除的批次
    pub excluded: Vec<ExcludedLot>,
}

/// 分配計算器
pub struct AllocationCalculator;

impl AllocationCalculator {
    /// 為單一產品的批次快照產生扣量計劃
    ///
    /// 需求數量為 0 或批次跨越多個產品時直接回傳錯誤；
    /// 無可分配批次或只能部分滿足都是正常結果。
    pub fn allocate(
        lots: &[Lot],
        requested_quantity: u64,
        reference_time: DateTime<Utc>,
    ) -> Result<AllocationResult> {
        if requested_quantity == 0 {
            return Err(WmsError::InvalidQuantity(requested_quantity));
        }
        let sku = Self::single_product(lots)?;

        let (mut eligible, excluded) = Self::partition(lots, reference_time);
        if eligible.is_empty() {
            let reason = if lots.is_empty() { NO_LOTS_REASON } else { NO_ELIGIBLE_LOTS_REASON };
            let mut result = AllocationResult::unfilled(sku, requested_quantity, reason);
            result.excluded = excluded;
            return Ok(result);
        }

        PriorityComparator::sort(&mut eligible);

        let mut entries = Vec::new();
        let mut remaining = requested_quantity;
        for lot in eligible {
            if remaining == 0 {
                break;
            }
            let quantity = lot.available.min(remaining);
            entries.push(AllocationEntry {
                lot: lot.clone(),
                quantity,
            });
            remaining -= quantity;
        }

        let allocated_quantity = requested_quantity - remaining;
        let fully_satisfied = remaining == 0;
        let reason = match entries.first() {
            Some(first) if fully_satisfied => format!("Ready for shipping - {}", Self::describe(&first.lot)),
            Some(first) => format!(
                "Partially satisfied ({} of {}) - {}",
                allocated_quantity,
                requested_quantity,
                Self::describe(&first.lot)
            ),
            None => NO_ELIGIBLE_LOTS_REASON.to_string(),
        };

        Ok(AllocationResult {
            sku,
            requested_quantity,
            entries,
            allocated_quantity,
            fully_satisfied,
            ready_to_ship: fully_satisfied,
            reason,
            excluded,
        })
    }

    /// 依出貨優先順序排列所有可分配批次
    pub fn rank(lots: &[Lot], reference_time: DateTime<Utc>) -> Result<ShippingPriority> {
        Self::single_product(lots)?;

        let (mut eligible, excluded) = Self::partition(lots, reference_time);
        PriorityComparator::sort(&mut eligible);

        let reason = match eligible.first() {
            Some(first) => format!("Ready for shipping - {}", Self::describe(first)),
            None if lots.is_empty() => NO_LOTS_REASON.to_string(),
            None => NO_ELIGIBLE_LOTS_REASON.to_string(),
        };

        Ok(ShippingPriority {
            ready_to_ship: !eligible.is_empty(),
            ranked: eligible.into_iter().cloned().collect(),
            reason,
            excluded,
        })
    }

    /// 下一個應出貨的批次
    ///
    /// 比一般分配嚴格：儲存狀態必須為 ACTIVE。
    pub fn next_lot_to_ship(lots: &[Lot], reference_time: DateTime<Utc>) -> Option<Lot> {
        let mut candidates: Vec<&Lot> = lots
            .iter()
            .filter(|lot| {
                lot.status == LotStatus::Active
                    && lot.available > 0
                    && !LotClassifier::is_expired(lot, reference_time)
            })
            .collect();

        PriorityComparator::sort(&mut candidates);
        candidates.first().map(|lot| (*lot).clone())
    }

    /// 確認所有批次屬於同一產品，回傳該 SKU
    fn single_product(lots: &[Lot]) -> Result<Option<String>> {
        let Some(first) = lots.first() else {
            return Ok(None);
        };

        if let Some(other) = lots.iter().find(|lot| lot.sku != first.sku) {
            return Err(WmsError::MixedProducts {
                expected: first.sku.clone(),
                found: other.sku.clone(),
            });
        }

        Ok(Some(first.sku.clone()))
    }

    /// 分出可分配批次與被排除批次
    fn partition(lots: &[Lot], reference_time: DateTime<Utc>) -> (Vec<&Lot>, Vec<ExcludedLot>) {
        let mut eligible = Vec::new();
        let mut excluded = Vec::new();

        for lot in lots {
            match LotClassifier::classify(lot, reference_time) {
                Eligibility::Eligible => eligible.push(lot),
                eligibility => excluded.push(ExcludedLot {
                    lot_id: lot.lot_id.clone(),
                    eligibility,
                }),
            }
        }

        (eligible, excluded)
    }

    /// 決定批次的策略與到期日說明
    fn describe(lot: &Lot) -> String {
        if lot.expiry_date >= Lot::no_expiry() {
            format!("{} method. Lot {}, no expiry", lot.policy, lot.lot_id)
        } else {
            format!(
                "{} method. Lot {}, expiry {}",
                lot.policy,
                lot.lot_id,
                lot.expiry_date.format("%Y-%m-%d")
            )
        }
    }
}
