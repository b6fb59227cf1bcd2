//! BOM 成本引擎

use bom_core::{
    EngineConfig, ExplodedLine, OfferRepository, PartNumber, PartRepository, RollupResult,
};
use rayon::prelude::*;

use crate::explosion::ExplosionCalculator;
use crate::rollup::CostRollup;
use crate::summary::{self, FlatLine};
use crate::CostedBom;

/// BOM 成本引擎
///
/// 借用料件與報價資料來源，本身不持有可變狀態；
/// 每次展開的路徑追蹤只存在於該次呼叫中。
pub struct BomEngine<'a, P: ?Sized, O: ?Sized> {
    /// 料件資料來源
    parts: &'a P,

    /// 報價資料來源
    offers: &'a O,

    /// 引擎配置
    config: EngineConfig,
}

impl<'a, P, O> BomEngine<'a, P, O>
where
    P: PartRepository + ?Sized,
    O: OfferRepository + ?Sized,
{
    /// 創建新的引擎
    pub fn new(parts: &'a P, offers: &'a O, config: EngineConfig) -> Self {
        Self {
            parts,
            offers,
            config,
        }
    }

    /// 展開根料件
    pub fn explode(&self, root: &PartNumber) -> bom_core::Result<Vec<ExplodedLine>> {
        ExplosionCalculator::explode(self.parts, root, &self.config)
    }

    /// 對展開結果定價並彙總
    pub fn rollup(
        &self,
        lines: &[ExplodedLine],
        build_quantity: u64,
    ) -> bom_core::Result<(Vec<bom_core::CostedLine>, RollupResult)> {
        CostRollup::rollup(self.offers, lines, build_quantity, &self.config)
    }

    /// 展開並定價
    pub fn cost(&self, root: &PartNumber, build_quantity: u64) -> bom_core::Result<CostedBom> {
        if build_quantity < 1 {
            return Err(bom_core::BomError::InvalidQuantity(build_quantity));
        }

        tracing::info!("開始 BOM 成本計算: {} x{}", root, build_quantity);
        let start_time = std::time::Instant::now();

        let exploded = self.explode(root)?;
        let (lines, result) = self.rollup(&exploded, build_quantity)?;

        tracing::info!(
            "BOM 成本計算完成: {} 共 {} 行，總成本 {}，完整: {}，耗時 {:?}",
            root,
            lines.len(),
            result.total_cost,
            result.complete,
            start_time.elapsed()
        );

        Ok(CostedBom {
            root: root.clone(),
            lines,
            result,
        })
    }

    /// 展開並合併相同料件
    pub fn summarize(&self, root: &PartNumber) -> bom_core::Result<Vec<FlatLine>> {
        let exploded = self.explode(root)?;
        summary::summarize(&exploded)
    }

    /// 獲取配置引用
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 獲取料件資料來源引用
    pub fn parts(&self) -> &'a P {
        self.parts
    }
}

impl<'a, P, O> BomEngine<'a, P, O>
where
    P: PartRepository + Sync + ?Sized,
    O: OfferRepository + Sync + ?Sized,
{
    /// 並行計算多筆 (根料件, 生產數量)，結果依輸入順序返回
    ///
    /// 每筆請求獨立成敗，一筆失敗不影響其他筆。
    pub fn cost_many(
        &self,
        requests: &[(PartNumber, u64)],
    ) -> Vec<bom_core::Result<CostedBom>> {
        tracing::info!("開始批次成本計算：{} 筆", requests.len());
        let start_time = std::time::Instant::now();

        let results: Vec<_> = requests
            .par_iter()
            .map(|(root, quantity)| self.cost(root, *quantity))
            .collect();

        tracing::info!(
            "批次成本計算完成：成功 {} 筆，耗時 {:?}",
            results.iter().filter(|r| r.is_ok()).count(),
            start_time.elapsed()
        );

        results
    }
}
