//! 揀貨分批（依儲位合併分配計劃）

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wms_core::{LocationKey, Result, WmsError};

use crate::allocation::AllocationResult;
use crate::classifier::LotClassifier;

/// 揀貨明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickLine {
    /// 批次ID
    pub lot_id: String,

    /// 揀貨數量
    pub quantity: u64,

    /// 箱號代碼（可選）
    pub box_code: Option<String>,
}

/// 揀貨批次：同一儲位的所有明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingBatch {
    /// 批次ID（由儲位鍵推導）
    pub id: Uuid,

    /// 走訪順序（從 1 開始）
    pub sequence: usize,

    /// 儲位鍵
    pub key: LocationKey,

    /// 倉庫代碼
    pub warehouse_code: String,

    /// 貨架代碼
    pub rack_code: String,

    /// 棧板代碼
    pub pallet_code: String,

    /// 揀貨明細（依分配順序）
    pub lines: Vec<PickLine>,

    /// 總數量
    pub total_quantity: u64,
}

/// 揀貨分批器
pub struct PickingBatcher;

impl PickingBatcher {
    /// 依 `(warehouse_id, rack_id, pallet_id)` 合併計劃明細
    ///
    /// 批次順序為儲位在計劃中第一次出現的順序。任何儲位不完整的明細
    /// 都會使整個分批失敗並列出所有問題批次。
    pub fn batch(plan: &AllocationResult) -> Result<Vec<PickingBatch>> {
        let incomplete: Vec<String> = plan
            .entries
            .iter()
            .filter(|entry| !LotClassifier::is_location_complete(&entry.lot))
            .map(|entry| entry.lot.lot_id.clone())
            .collect();

        if !incomplete.is_empty() {
            return Err(WmsError::IncompleteLocation { lot_ids: incomplete });
        }

        let mut batches: Vec<PickingBatch> = Vec::new();
        let mut index: HashMap<LocationKey, usize> = HashMap::new();

        for entry in &plan.entries {
            let location = &entry.lot.location;
            let key = location.key();

            let position = match index.get(&key) {
                Some(&position) => position,
                None => {
                    batches.push(PickingBatch {
                        id: key.batch_id(),
                        sequence: batches.len() + 1,
                        key: key.clone(),
                        warehouse_code: location.warehouse_code.clone(),
                        rack_code: location.rack_code.clone(),
                        pallet_code: location.pallet_code.clone(),
                        lines: Vec::new(),
                        total_quantity: 0,
                    });
                    index.insert(key, batches.len() - 1);
                    batches.len() - 1
                }
            };

            let batch = &mut batches[position];
            batch.lines.push(PickLine {
                lot_id: entry.lot.lot_id.clone(),
                quantity: entry.quantity,
                box_code: location.box_code.clone(),
            });
            batch.total_quantity = batch.total_quantity.saturating_add(entry.quantity);
        }

        Ok(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::AllocationEntry;
    use chrono::{TimeZone, Utc};
    use wms_core::{Lot, LotLocation, StoragePolicy};

    fn entry(id: &str, location: LotLocation, quantity: u64) -> AllocationEntry {
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        AllocationEntry {
            lot: Lot::new(
                id.to_string(),
                "ADTV-001".to_string(),
                location,
                100,
                date,
                date,
                StoragePolicy::Fifo,
            ),
            quantity,
        }
    }

    fn plan(entries: Vec<AllocationEntry>) -> AllocationResult {
        let allocated = entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.quantity));
        AllocationResult {
            sku: Some("ADTV-001".to_string()),
            requested_quantity: allocated,
            entries,
            allocated_quantity: allocated,
            fully_satisfied: true,
            ready_to_ship: true,
            reason: String::new(),
            excluded: Vec::new(),
        }
    }

    #[test]
    fn test_same_location_combines() {
        let shared = LotLocation::new("wh-1", "rack-1", "pallet-1").with_codes("WH-A", "R-01", "P-001");
        let result = plan(vec![
            entry("A", shared.clone(), 20),
            entry("B", shared.clone().with_box("box-2", "B-02"), 15),
        ]);

        let batches = PickingBatcher::batch(&result).unwrap();

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].total_quantity, 35);
        assert_eq!(batches[0].lines.len(), 2);
        assert_eq!(batches[0].warehouse_code, "WH-A");
        assert_eq!(batches[0].pallet_code, "P-001");
        assert_eq!(batches[0].lines[1].box_code.as_deref(), Some("B-02"));
        assert_eq!(batches[0].id, shared.key().batch_id());
    }

    #[test]
    fn test_first_appearance_order() {
        let loc_1 = LotLocation::new("wh-1", "rack-2", "pallet-7");
        let loc_2 = LotLocation::new("wh-1", "rack-1", "pallet-1");
        let result = plan(vec![
            entry("A", loc_1.clone(), 5),
            entry("B", loc_2.clone(), 10),
            entry("C", loc_1.clone(), 7),
        ]);

        let batches = PickingBatcher::batch(&result).unwrap();

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].key, loc_1.key());
        assert_eq!(batches[0].sequence, 1);
        assert_eq!(batches[0].total_quantity, 12);
        assert_eq!(batches[1].key, loc_2.key());
        assert_eq!(batches[1].sequence, 2);
        assert_eq!(batches[1].total_quantity, 10);
    }

    #[test]
    fn test_incomplete_location_is_reported() {
        let mut broken = LotLocation::new("wh-1", "rack-1", "pallet-1");
        broken.pallet_code.clear();
        let result = plan(vec![
            entry("A", LotLocation::new("wh-1", "rack-1", "pallet-1"), 5),
            entry("B", broken, 5),
        ]);

        match PickingBatcher::batch(&result) {
            Err(WmsError::IncompleteLocation { lot_ids }) => assert_eq!(lot_ids, vec!["B"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_batch_total_saturates() {
        let shared = LotLocation::new("wh-1", "rack-1", "pallet-1");
        let result = plan(vec![
            entry("A", shared.clone(), u64::MAX),
            entry("B", shared, u64::MAX),
        ]);

        let batches = PickingBatcher::batch(&result).unwrap();

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].lines.len(), 2);
        assert_eq!(batches[0].total_quantity, u64::MAX);
    }

    #[test]
    fn test_empty_plan() {
        let batches = PickingBatcher::batch(&plan(Vec::new())).unwrap();
        assert!(batches.is_empty());
    }
}
