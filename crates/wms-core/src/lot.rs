//! 批次（Lot）模型

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::location::LotLocation;

/// 批次狀態（由庫存管理流程維護，引擎只讀）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LotStatus {
    /// 正常
    Active,
    /// 暫停出貨
    Hold,
    /// 隔離檢驗
    Quarantine,
    /// 已保留
    Reserved,
    /// 損壞
    Damaged,
    /// 已過期
    Expired,
}

impl LotStatus {
    /// 此狀態是否禁止分配
    pub fn blocks_allocation(self) -> bool {
        matches!(self, LotStatus::Hold | LotStatus::Quarantine | LotStatus::Damaged)
    }
}

impl std::fmt::Display for LotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LotStatus::Active => "ACTIVE",
            LotStatus::Hold => "HOLD",
            LotStatus::Quarantine => "QUARANTINE",
            LotStatus::Reserved => "RESERVED",
            LotStatus::Damaged => "DAMAGED",
            LotStatus::Expired => "EXPIRED",
        };
        f.write_str(label)
    }
}

/// 存放策略（入庫時由產品設定繼承）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StoragePolicy {
    /// 先進先出
    Fifo,
    /// 先到期先出
    Fefo,
}

impl std::fmt::Display for StoragePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoragePolicy::Fifo => f.write_str("FIFO"),
            StoragePolicy::Fefo => f.write_str("FEFO"),
        }
    }
}

/// 批次：一次收貨、一個產品、一個儲位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    /// 批次ID（唯一）
    pub lot_id: String,

    /// 產品 SKU（同產品的批次共用）
    pub sku: String,

    /// 儲位
    pub location: LotLocation,

    /// 收貨數量
    pub quantity_received: u64,

    /// 可用數量
    pub available: u64,

    /// 已保留數量
    pub reserved: u64,

    /// 暫停數量
    pub on_hold: u64,

    /// 損壞數量
    pub damaged: u64,

    /// 收貨日期
    pub received_date: DateTime<Utc>,

    /// 到期日（無到期日的批次使用 [`Lot::no_expiry`]）
    pub expiry_date: DateTime<Utc>,

    /// 最後移動日期
    pub last_moved_date: DateTime<Utc>,

    /// 儲存狀態
    pub status: LotStatus,

    /// 存放策略
    pub policy: StoragePolicy,

    /// 設計版本（舊版本先出）
    pub design_version: Option<String>,
}

impl Lot {
    /// 創建新的批次，全部收貨數量皆為可用
    pub fn new(
        lot_id: String,
        sku: String,
        location: LotLocation,
        quantity_received: u64,
        received_date: DateTime<Utc>,
        expiry_date: DateTime<Utc>,
        policy: StoragePolicy,
    ) -> Self {
        Self {
            lot_id,
            sku,
            location,
            quantity_received,
            available: quantity_received,
            reserved: 0,
            on_hold: 0,
            damaged: 0,
            received_date,
            expiry_date,
            last_moved_date: received_date,
            status: LotStatus::Active,
            policy,
            design_version: None,
        }
    }

    /// 無到期日批次使用的哨兵日期
    pub fn no_expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// 建構器模式：設置各數量桶
    pub fn with_quantities(mut self, available: u64, reserved: u64, on_hold: u64, damaged: u64) -> Self {
        self.available = available;
        self.reserved = reserved;
        self.on_hold = on_hold;
        self.damaged = damaged;
        self
    }

    /// 建構器模式：設置可用數量
    pub fn with_available(mut self, available: u64) -> Self {
        self.available = available;
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: LotStatus) -> Self {
        self.status = status;
        self
    }

    /// 建構器模式：設置設計版本
    pub fn with_design_version(mut self, version: &str) -> Self {
        self.design_version = Some(version.to_string());
        self
    }

    /// 建構器模式：設置最後移動日期
    pub fn with_last_moved_date(mut self, date: DateTime<Utc>) -> Self {
        self.last_moved_date = date;
        self
    }

    /// 有效的設計版本（空字串視為未設定）
    pub fn design_tag(&self) -> Option<&str> {
        self.design_version
            .as_deref()
            .filter(|tag| !tag.is_empty())
    }

    /// 各數量桶合計
    pub fn bucket_total(&self) -> u64 {
        self.available
            .saturating_add(self.reserved)
            .saturating_add(self.on_hold)
            .saturating_add(self.damaged)
    }

    /// 檢查數量桶合計不超過收貨數量
    pub fn validate_quantities(&self) -> crate::Result<()> {
        let bucket_total = self.bucket_total();
        if bucket_total > self.quantity_received {
            return Err(crate::WmsError::QuantityOverflow {
                lot_id: self.lot_id.clone(),
                bucket_total,
                received: self.quantity_received,
            });
        }
        Ok(())
    }
}
