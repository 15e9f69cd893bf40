//! 出貨優先順序（設計版本 → FEFO → FIFO）

use std::cmp::Ordering;

use wms_core::Lot;

/// 小於此長度的區段改用插入排序
const INSERTION_SORT_THRESHOLD: usize = 16;

/// 優先順序比較器
pub struct PriorityComparator;

impl PriorityComparator {
    /// 比較兩個同產品的可分配批次，`Less` 表示 `a` 先出
    ///
    /// 1. 兩者都有設計版本且不同時，版本字典序小者先出；任一缺少則跳過此步
    /// 2. 到期日早者先出（FEFO）
    /// 3. 到期日相同時，收貨日早者先出（FIFO）
    pub fn compare(a: &Lot, b: &Lot) -> Ordering {
        if let (Some(tag_a), Some(tag_b)) = (a.design_tag(), b.design_tag()) {
            if tag_a != tag_b {
                return tag_a.cmp(tag_b);
            }
        }

        a.expiry_date
            .cmp(&b.expiry_date)
            .then_with(|| a.received_date.cmp(&b.received_date))
    }

    /// 依優先順序穩定排序，O(n log n)
    ///
    /// 設計版本規則在有版本與無版本批次之間不具遞移性，不可交給 `slice::sort_by`。
    /// 自行實作的合併排序：相等時取左側元素，結果只取決於輸入順序。
    pub fn sort(lots: &mut [&Lot]) {
        if lots.len() < 2 {
            return;
        }
        let mut buffer = lots.to_vec();
        Self::merge_sort(lots, &mut buffer);
    }

    fn merge_sort<'a>(lots: &mut [&'a Lot], buffer: &mut [&'a Lot]) {
        let len = lots.len();
        if len <= INSERTION_SORT_THRESHOLD {
            Self::insertion_sort(lots);
            return;
        }

        let mid = len / 2;
        Self::merge_sort(&mut lots[..mid], &mut buffer[..mid]);
        Self::merge_sort(&mut lots[mid..], &mut buffer[mid..]);

        buffer.copy_from_slice(lots);
        let (left, right) = buffer.split_at(mid);
        let (mut i, mut j) = (0, 0);
        for slot in lots.iter_mut() {
            let take_left = j == right.len()
                || (i < left.len() && Self::compare(left[i], right[j]) != Ordering::Greater);
            if take_left {
                *slot = left[i];
                i += 1;
            } else {
                *slot = right[j];
                j += 1;
            }
        }
    }

    fn insertion_sort(lots: &mut [&Lot]) {
        for i in 1..lots.len() {
            let mut j = i;
            while j > 0 && Self::compare(lots[j - 1], lots[j]) == Ordering::Greater {
                lots.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}
