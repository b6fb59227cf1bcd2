//! # BOM Calculation Engine
//!
//! BOM 展開與成本彙總引擎

pub mod engine;
pub mod explosion;
pub mod rollup;
pub mod selection;
pub mod summary;

// Re-export 主要類型
pub use engine::BomEngine;
pub use explosion::ExplosionCalculator;
pub use rollup::CostRollup;
pub use selection::{OfferSelection, OfferSelector};
pub use summary::{summarize, FlatLine};

use bom_core::{CostedLine, PartNumber, RollupResult};
use serde::Serialize;

/// 單一根料件的成本計算結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostedBom {
    /// 根料件
    pub root: PartNumber,

    /// 成本行（前序展開順序）
    pub lines: Vec<CostedLine>,

    /// 彙總
    pub result: RollupResult,
}

impl CostedBom {
    /// 未定價的行
    pub fn unpriced_lines(&self) -> impl Iterator<Item = &CostedLine> {
        self.lines.iter().filter(|l| !l.is_priced())
    }
}
