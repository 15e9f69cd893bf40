//! 引擎配置模型

use serde::{Deserialize, Serialize};

use crate::{Result, WmsError};

/// 預設「即將到期」門檻（天）
pub const DEFAULT_EXPIRING_SOON_DAYS: u32 = 30;

/// 分配引擎配置
///
/// 由呼叫端在每次呼叫時傳入，引擎本身不保存任何全域狀態。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 即將到期門檻（天）
    pub expiring_soon_days: u32,

    /// 倉庫容量（0 表示未設定，使用率為 0）
    pub warehouse_capacity: u64,

    /// 分配前是否檢查快照資料品質（只記錄日誌，不影響分配結果）
    pub validate_snapshot: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: DEFAULT_EXPIRING_SOON_DAYS,
            warehouse_capacity: 0,
            validate_snapshot: true,
        }
    }
}

impl EngineConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置，缺少的欄位使用預設值
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置即將到期門檻
    pub fn with_expiring_soon_days(mut self, days: u32) -> Self {
        self.expiring_soon_days = days;
        self
    }

    /// 建構器模式：設置倉庫容量
    pub fn with_warehouse_capacity(mut self, capacity: u64) -> Self {
        self.warehouse_capacity = capacity;
        self
    }

    /// 建構器模式：設置是否檢查快照
    pub fn with_validate_snapshot(mut self, validate: bool) -> Self {
        self.validate_snapshot = validate;
        self
    }

    /// 檢查配置是否有效
    pub fn validate(&self) -> Result<()> {
        if self.expiring_soon_days == 0 {
            return Err(WmsError::InvalidConfig(
                "expiring_soon_days 必須大於 0".to_string(),
            ));
        }
        Ok(())
    }
}
