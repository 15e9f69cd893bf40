//! # WMS Calculation Engine
//!
//! 批次分配核心計算：可出貨判定、FEFO/FIFO 排序、扣量計劃、揀貨分批與庫存彙總。
//!
//! 所有運算都是對呼叫端提供之快照的純函數；參考時間一律由呼叫端傳入。

pub mod allocation;
pub mod classifier;
pub mod engine;
pub mod picking;
pub mod priority;
pub mod summary;
pub mod validation;

// Re-export 主要類型
pub use allocation::{
    AllocationCalculator, AllocationEntry, AllocationResult, ExcludedLot, ShippingPriority,
    NO_ELIGIBLE_LOTS_REASON,
};
pub use classifier::{Eligibility, LotClassifier};
pub use engine::{AllocationRequest, LotEngine, PickingPlan};
pub use picking::{PickLine, PickingBatch, PickingBatcher};
pub use priority::PriorityComparator;
pub use summary::{InventorySummarizer, InventorySummary};
pub use validation::{IssueKind, SnapshotIssue, SnapshotValidator};
