//! # WMS Core
//!
//! 批次分配引擎的核心資料模型與類型定義

pub mod config;
pub mod location;
pub mod lot;

// Re-export 主要類型
pub use config::{EngineConfig, DEFAULT_EXPIRING_SOON_DAYS};
pub use location::{LocationKey, LotLocation};
pub use lot::{Lot, LotStatus, StoragePolicy};

/// 引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum WmsError {
    #[error("無效的需求數量: {0}（必須大於 0）")]
    InvalidQuantity(u64),

    #[error("批次跨越多個產品: 預期 {expected}, 發現 {found}")]
    MixedProducts { expected: String, found: String },

    #[error("儲位資料不完整，無法揀貨: {lot_ids:?}")]
    IncompleteLocation { lot_ids: Vec<String> },

    #[error("批次 {lot_id} 數量桶合計 {bucket_total} 超過收貨數量 {received}")]
    QuantityOverflow {
        lot_id: String,
        bucket_total: u64,
        received: u64,
    },

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WmsError>;
