//! 平展 BOM（合併相同料件）

use bom_core::{BomError, ExplodedLine, PartNumber};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 平展 BOM 行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatLine {
    /// 料號
    pub part: PartNumber,

    /// 每個頂層件所需總數量
    pub quantity: u64,

    /// 在展開結果中出現的次數
    pub occurrences: usize,

    /// 最淺出現層級
    pub min_level: usize,
}

/// 將展開結果合併為每個料件一行，依首次出現順序排列
pub fn summarize(lines: &[ExplodedLine]) -> bom_core::Result<Vec<FlatLine>> {
    let mut index: HashMap<&PartNumber, usize> = HashMap::new();
    let mut flat: Vec<FlatLine> = Vec::new();

    for line in lines {
        match index.get(&line.part) {
            Some(&i) => {
                let entry = &mut flat[i];
                entry.quantity = entry.quantity.checked_add(line.quantity).ok_or_else(|| {
                    BomError::QuantityOverflow {
                        part: line.part.clone(),
                    }
                })?;
                entry.occurrences += 1;
                entry.min_level = entry.min_level.min(line.level);
            }
            None => {
                index.insert(&line.part, flat.len());
                flat.push(FlatLine {
                    part: line.part.clone(),
                    quantity: line.quantity,
                    occurrences: 1,
                    min_level: line.level,
                });
            }
        }
    }

    Ok(flat)
}
