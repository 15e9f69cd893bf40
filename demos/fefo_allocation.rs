//! FEFO 分配與揀貨示例

use chrono::{TimeZone, Utc};
use tracing_subscriber::EnvFilter;
use wms_engine::{EngineConfig, LotEngine, Lot, LotLocation, LotStatus, StoragePolicy};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    println!("=== FEFO 分配示例 ===\n");

    let config = EngineConfig::from_json_str(r#"{ "warehouse_capacity": 500 }"#)?;
    let engine = LotEngine::new(config)?;
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();

    let lots = vec![
        Lot::new(
            "LOT-2501-A".to_string(),
            "ADTV-001".to_string(),
            LotLocation::new("wh-1", "rack-1", "pallet-1").with_codes("WH-A", "R-01", "P-001"),
            30,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            StoragePolicy::Fefo,
        ),
        Lot::new(
            "LOT-2502-B".to_string(),
            "ADTV-001".to_string(),
            LotLocation::new("wh-1", "rack-2", "pallet-4").with_codes("WH-A", "R-02", "P-004"),
            20,
            Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
            StoragePolicy::Fefo,
        ),
        Lot::new(
            "LOT-2412-C".to_string(),
            "ADTV-001".to_string(),
            LotLocation::new("wh-1", "rack-3", "pallet-9").with_codes("WH-A", "R-03", "P-009"),
            50,
            Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
            StoragePolicy::Fefo,
        )
        .with_status(LotStatus::Hold),
    ];

    let picking = engine.plan_picking(&lots, 40, now)?;

    println!("分配結果: {}", picking.allocation.reason);
    for entry in &picking.allocation.entries {
        println!("  - 批次: {}, 數量: {}", entry.lot.lot_id, entry.quantity);
    }
    for excluded in &picking.allocation.excluded {
        println!("  x 排除: {} ({})", excluded.lot_id, excluded.eligibility);
    }

    println!("\n揀貨清單:");
    for batch in &picking.batches {
        println!(
            "  {}. {} / {} / {} 共 {}",
            batch.sequence, batch.warehouse_code, batch.rack_code, batch.pallet_code, batch.total_quantity
        );
    }

    let summary = engine.summarize(&lots, now);
    println!("\n庫存彙總: {}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
