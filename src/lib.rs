//! # WMS Engine
//!
//! 庫存批次分配與出貨優先順序引擎。

pub use wms_calc::*;
pub use wms_core::{
    EngineConfig, LocationKey, Lot, LotLocation, LotStatus, Result, StoragePolicy, WmsError,
    DEFAULT_EXPIRING_SOON_DAYS,
};

pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
