//! 批次分類（可出貨判定與到期旗標）

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use wms_core::{Lot, LotStatus};

/// 批次可分配狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eligibility {
    /// 可分配
    Eligible,
    /// 已過期（以到期日為準，不看儲存狀態）
    Expired,
    /// 暫停出貨
    OnHold,
    /// 隔離中
    Quarantined,
    /// 損壞
    Damaged,
    /// 無可用數量
    Exhausted,
}

impl Eligibility {
    pub fn is_eligible(self) -> bool {
        self == Eligibility::Eligible
    }
}

impl std::fmt::Display for Eligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Eligibility::Eligible => "eligible",
            Eligibility::Expired => "expired",
            Eligibility::OnHold => "on hold",
            Eligibility::Quarantined => "quarantined",
            Eligibility::Damaged => "damaged",
            Eligibility::Exhausted => "no available quantity",
        };
        f.write_str(label)
    }
}

/// 批次分類器
///
/// 純函數：所有判定只依賴批次內容與呼叫端傳入的參考時間。
pub struct LotClassifier;

impl LotClassifier {
    /// 到期日早於參考時間即視為過期
    pub fn is_expired(lot: &Lot, reference_time: DateTime<Utc>) -> bool {
        lot.expiry_date < reference_time
    }

    /// 距到期的天數（無條件進位，精度到奈秒）
    pub fn days_until_expiry(lot: &Lot, reference_time: DateTime<Utc>) -> i64 {
        let remaining = lot.expiry_date - reference_time;
        if remaining > Duration::zero() {
            (remaining + Duration::days(1) - Duration::nanoseconds(1)).num_days()
        } else {
            // num_days 向零截斷，對非正數即為 ceil
            remaining.num_days()
        }
    }

    /// 即將到期：`0 < ceil(剩餘天數) <= threshold_days`
    ///
    /// 已過期的批次永遠不算即將到期。
    pub fn is_expiring_soon(lot: &Lot, reference_time: DateTime<Utc>, threshold_days: u32) -> bool {
        let days = Self::days_until_expiry(lot, reference_time);
        days > 0 && days <= i64::from(threshold_days)
    }

    /// 判定批次的可分配狀態
    ///
    /// 判定順序：過期 → 儲存狀態 → 可用數量。
    pub fn classify(lot: &Lot, reference_time: DateTime<Utc>) -> Eligibility {
        if Self::is_expired(lot, reference_time) {
            return Eligibility::Expired;
        }

        match lot.status {
            LotStatus::Hold => Eligibility::OnHold,
            LotStatus::Quarantine => Eligibility::Quarantined,
            LotStatus::Damaged => Eligibility::Damaged,
            _ if lot.available == 0 => Eligibility::Exhausted,
            _ => Eligibility::Eligible,
        }
    }

    /// 未過期、狀態允許且有可用數量
    pub fn is_eligible_for_allocation(lot: &Lot, reference_time: DateTime<Utc>) -> bool {
        Self::classify(lot, reference_time).is_eligible()
    }

    /// 儲位是否足以實際揀貨
    pub fn is_location_complete(lot: &Lot) -> bool {
        lot.location.is_complete()
    }
}
