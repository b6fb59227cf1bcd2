//! 髒標記追蹤

use bom_core::PartNumber;
use std::collections::BTreeSet;

/// 髒標記追蹤器
///
/// 記錄自上次重新計算後被修改過的料件。
#[derive(Debug, Default)]
pub struct DirtyTracker {
    dirty_parts: BTreeSet<PartNumber>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記料件為髒
    pub fn mark_dirty(&mut self, part: PartNumber) {
        self.dirty_parts.insert(part);
    }

    /// 檢查料件是否為髒
    pub fn is_dirty(&self, part: &PartNumber) -> bool {
        self.dirty_parts.contains(part)
    }

    /// 清除單一料件的髒標記
    pub fn clear_part(&mut self, part: &PartNumber) -> bool {
        self.dirty_parts.remove(part)
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_parts.clear();
    }

    /// 獲取所有髒料件（依料號排序）
    pub fn dirty_parts(&self) -> Vec<PartNumber> {
        self.dirty_parts.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.dirty_parts.is_empty()
    }
}
