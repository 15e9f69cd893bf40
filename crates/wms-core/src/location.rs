//! 儲位模型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 揀貨批次 ID 的命名空間（v5 決定性 ID）
const PICKING_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2b7e_94d3_4a51_b0e8_3c5d_7a29_e416);

/// 批次儲位（倉庫 / 貨架 / 棧板）
///
/// 每個欄位同時帶有內部 ID 與顯示用代碼。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LotLocation {
    /// 倉庫ID
    pub warehouse_id: String,

    /// 倉庫代碼
    pub warehouse_code: String,

    /// 貨架ID
    pub rack_id: String,

    /// 貨架代碼
    pub rack_code: String,

    /// 棧板ID
    pub pallet_id: String,

    /// 棧板代碼
    pub pallet_code: String,

    /// 箱號（可選）
    pub box_id: Option<String>,

    /// 箱號代碼（可選）
    pub box_code: Option<String>,
}

impl LotLocation {
    /// 創建新的儲位，ID 與代碼相同
    pub fn new(warehouse: &str, rack: &str, pallet: &str) -> Self {
        Self {
            warehouse_id: warehouse.to_string(),
            warehouse_code: warehouse.to_string(),
            rack_id: rack.to_string(),
            rack_code: rack.to_string(),
            pallet_id: pallet.to_string(),
            pallet_code: pallet.to_string(),
            box_id: None,
            box_code: None,
        }
    }

    /// 建構器模式：設置顯示代碼
    pub fn with_codes(mut self, warehouse_code: &str, rack_code: &str, pallet_code: &str) -> Self {
        self.warehouse_code = warehouse_code.to_string();
        self.rack_code = rack_code.to_string();
        self.pallet_code = pallet_code.to_string();
        self
    }

    /// 建構器模式：設置箱號
    pub fn with_box(mut self, box_id: &str, box_code: &str) -> Self {
        self.box_id = Some(box_id.to_string());
        self.box_code = Some(box_code.to_string());
        self
    }

    /// 倉庫、貨架、棧板的 ID 與代碼是否都已填寫
    pub fn is_complete(&self) -> bool {
        [
            &self.warehouse_id,
            &self.warehouse_code,
            &self.rack_id,
            &self.rack_code,
            &self.pallet_id,
            &self.pallet_code,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    /// 揀貨分組鍵
    pub fn key(&self) -> LocationKey {
        LocationKey {
            warehouse_id: self.warehouse_id.clone(),
            rack_id: self.rack_id.clone(),
            pallet_id: self.pallet_id.clone(),
        }
    }
}

/// 揀貨分組鍵 `(warehouse_id, rack_id, pallet_id)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey {
    pub warehouse_id: String,
    pub rack_id: String,
    pub pallet_id: String,
}

impl LocationKey {
    /// 由儲位鍵推導的決定性批次 ID
    pub fn batch_id(&self) -> Uuid {
        Uuid::new_v5(&PICKING_NAMESPACE, self.to_string().as_bytes())
    }
}

impl std::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.warehouse_id, self.rack_id, self.pallet_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_complete_location() {
        let location = complete_location();
        assert!(location.is_complete());
        assert_eq!(location.key().to_string(), "wh-1|rack-1|pallet-1");
    }

    #[rstest]
    #[case::missing_warehouse_id(|l: &mut LotLocation| l.warehouse_id.clear())]
    #[case::missing_rack_code(|l: &mut LotLocation| l.rack_code.clear())]
    #[case::blank_pallet_code(|l: &mut LotLocation| l.pallet_code = "  ".to_string())]
    fn test_incomplete_location(#[case] blank: fn(&mut LotLocation)) {
        let mut location = complete_location();
        blank(&mut location);
        assert!(!location.is_complete());
    }

    #[test]
    fn test_box_is_optional() {
        let location = complete_location().with_box("box-9", "B-09");
        assert!(location.is_complete());
        assert_eq!(location.box_code.as_deref(), Some("B-09"));
    }

    #[test]
    fn test_batch_id_is_deterministic() {
        let a = LotLocation::new("wh-1", "rack-1", "pallet-1").key();
        let b = LotLocation::new("wh-1", "rack-1", "pallet-1")
            .with_codes("WH", "R1", "P1")
            .key();
        let c = LotLocation::new("wh-1", "rack-1", "pallet-2").key();

        assert_eq!(a, b);
        assert_eq!(a.batch_id(), b.batch_id());
        assert_ne!(a.batch_id(), c.batch_id());
    }

    fn complete_location() -> LotLocation {
        LotLocation::new("wh-1", "rack-1", "pallet-1").with_codes("WH-A", "R-01", "P-001")
    }
}
