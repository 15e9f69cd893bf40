//! 快照資料品質檢查

use serde::{Deserialize, Serialize};
use wms_core::Lot;

use crate::classifier::LotClassifier;

/// 資料問題類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// 數量桶合計超過收貨數量
    QuantityOverflow,
    /// 儲位不完整，無法揀貨
    IncompleteLocation,
}

/// 快照中單一批次的資料問題
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotIssue {
    pub lot_id: String,
    pub kind: IssueKind,
    pub message: String,
}

impl SnapshotIssue {
    pub fn new(lot_id: String, kind: IssueKind, message: String) -> Self {
        Self {
            lot_id,
            kind,
            message,
        }
    }
}

/// 快照檢查器
pub struct SnapshotValidator;

impl SnapshotValidator {
    /// 列出所有批次的資料問題（不修改快照）
    pub fn validate(lots: &[Lot]) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();

        for lot in lots {
            if let Err(err) = lot.validate_quantities() {
                issues.push(SnapshotIssue::new(
                    lot.lot_id.clone(),
                    IssueKind::QuantityOverflow,
                    err.to_string(),
                ));
            }

            if !LotClassifier::is_location_complete(lot) {
                issues.push(SnapshotIssue::new(
                    lot.lot_id.clone(),
                    IssueKind::IncompleteLocation,
                    format!("批次 {} 的倉庫/貨架/棧板資料不完整", lot.lot_id),
                ));
            }
        }

        issues
    }
}
