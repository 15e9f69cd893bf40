//! 庫存彙總

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wms_core::{Lot, DEFAULT_EXPIRING_SOON_DAYS};

use crate::classifier::LotClassifier;

/// 庫存彙總統計
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    /// 批次數
    pub total_lots: usize,

    /// 收貨數量合計
    pub total_quantity: u64,

    /// 可用數量
    pub available_quantity: u64,

    /// 已保留數量
    pub reserved_quantity: u64,

    /// 暫停數量
    pub on_hold_quantity: u64,

    /// 損壞數量
    pub damaged_quantity: u64,

    /// 可出貨數量（可分配批次的可用數量）
    pub ready_to_ship_quantity: u64,

    /// 已過期批次數
    pub expired_count: usize,

    /// 即將到期批次數
    pub expiring_soon_count: usize,

    /// 倉庫使用率（%）
    pub utilization_percent: Decimal,
}

/// 庫存彙總計算器
pub struct InventorySummarizer;

impl InventorySummarizer {
    /// 以預設門檻（30 天）計算彙總
    pub fn summarize(
        lots: &[Lot],
        warehouse_capacity: u64,
        reference_time: DateTime<Utc>,
    ) -> InventorySummary {
        Self::summarize_with_threshold(
            lots,
            warehouse_capacity,
            reference_time,
            DEFAULT_EXPIRING_SOON_DAYS,
        )
    }

    /// 計算彙總（單次走訪）
    ///
    /// 數量合計溢位時停在 `u64::MAX`，與 `Lot::bucket_total` 相同。
    pub fn summarize_with_threshold(
        lots: &[Lot],
        warehouse_capacity: u64,
        reference_time: DateTime<Utc>,
        expiring_soon_days: u32,
    ) -> InventorySummary {
        let mut summary = lots.iter().fold(
            InventorySummary {
                total_lots: lots.len(),
                ..InventorySummary::default()
            },
            |mut acc, lot| {
                acc.total_quantity = acc.total_quantity.saturating_add(lot.quantity_received);
                acc.available_quantity = acc.available_quantity.saturating_add(lot.available);
                acc.reserved_quantity = acc.reserved_quantity.saturating_add(lot.reserved);
                acc.on_hold_quantity = acc.on_hold_quantity.saturating_add(lot.on_hold);
                acc.damaged_quantity = acc.damaged_quantity.saturating_add(lot.damaged);

                if LotClassifier::is_eligible_for_allocation(lot, reference_time) {
                    acc.ready_to_ship_quantity = acc.ready_to_ship_quantity.saturating_add(lot.available);
                }

                if LotClassifier::is_expired(lot, reference_time) {
                    acc.expired_count += 1;
                } else if LotClassifier::is_expiring_soon(lot, reference_time, expiring_soon_days) {
                    acc.expiring_soon_count += 1;
                }

                acc
            },
        );

        summary.utilization_percent =
            Self::utilization_percent(summary.total_quantity, warehouse_capacity);
        summary
    }

    /// 使用率 = 收貨數量 / 容量 × 100；容量為 0 時回傳 0
    fn utilization_percent(total_quantity: u64, warehouse_capacity: u64) -> Decimal {
        if warehouse_capacity == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(total_quantity) / Decimal::from(warehouse_capacity) * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use wms_core::{LotLocation, LotStatus, StoragePolicy};

    fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    fn lot(id: &str, received: u64, expiry_in_days: i64) -> Lot {
        Lot::new(
            id.to_string(),
            "ADTV-001".to_string(),
            LotLocation::new("wh-1", "rack-1", "pallet-1"),
            received,
            reference_time() - Duration::days(90),
            reference_time() + Duration::days(expiry_in_days),
            StoragePolicy::Fefo,
        )
    }

    fn sample_lots() -> Vec<Lot> {
        vec![
            lot("A", 100, 120).with_quantities(60, 20, 10, 5),
            lot("B", 50, 10),
            lot("C", 80, 200).with_status(LotStatus::Hold).with_quantities(0, 0, 80, 0),
            // 狀態仍為 ACTIVE，但已過期
            lot("D", 20, -3),
        ]
    }

    #[test]
    fn test_summarize_quantities() {
        let summary = InventorySummarizer::summarize(&sample_lots(), 1_000, reference_time());

        assert_eq!(summary.total_lots, 4);
        assert_eq!(summary.total_quantity, 250);
        assert_eq!(summary.available_quantity, 130);
        assert_eq!(summary.reserved_quantity, 20);
        assert_eq!(summary.on_hold_quantity, 90);
        assert_eq!(summary.damaged_quantity, 5);
        // A 與 B 可出貨；C 暫停；D 已過期
        assert_eq!(summary.ready_to_ship_quantity, 110);
    }

    #[test]
    fn test_expiry_counts_are_exclusive() {
        let summary = InventorySummarizer::summarize(&sample_lots(), 1_000, reference_time());

        assert_eq!(summary.expired_count, 1);
        assert_eq!(summary.expiring_soon_count, 1);
    }

    #[test]
    fn test_custom_threshold() {
        let summary =
            InventorySummarizer::summarize_with_threshold(&sample_lots(), 0, reference_time(), 150);
        assert_eq!(summary.expiring_soon_count, 2);
    }

    #[test]
    fn test_utilization() {
        let summary = InventorySummarizer::summarize(&sample_lots(), 1_000, reference_time());
        assert_eq!(summary.utilization_percent, Decimal::from(25));

        let summary = InventorySummarizer::summarize(&sample_lots(), 0, reference_time());
        assert_eq!(summary.utilization_percent, Decimal::ZERO);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let lots = sample_lots();
        let first = InventorySummarizer::summarize(&lots, 400, reference_time());
        let second = InventorySummarizer::summarize(&lots, 400, reference_time());

        assert_eq!(first, second);
        assert_eq!(first.utilization_percent, Decimal::new(625, 1));
    }

    #[test]
    fn test_quantity_totals_saturate() {
        let lots = vec![lot("A", u64::MAX, 120), lot("B", u64::MAX, 120)];

        let summary = InventorySummarizer::summarize(&lots, 0, reference_time());

        assert_eq!(summary.total_quantity, u64::MAX);
        assert_eq!(summary.available_quantity, u64::MAX);
        assert_eq!(summary.ready_to_ship_quantity, u64::MAX);
        assert_eq!(summary.utilization_percent, Decimal::ZERO);
    }

    #[test]
    fn test_empty_snapshot() {
        let summary = InventorySummarizer::summarize(&[], 100, reference_time());

        assert_eq!(summary, InventorySummary {
            utilization_percent: Decimal::ZERO,
            ..InventorySummary::default()
        });
    }
}
