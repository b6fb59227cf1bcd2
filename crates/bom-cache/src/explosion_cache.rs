//! 展開結果快取

use bom_calc::ExplosionCalculator;
use bom_core::{EngineConfig, ExplodedLine, PartNumber, PartRepository};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::dirty_tracking::DirtyTracker;

/// 單一根料件的快取項目
#[derive(Debug)]
struct CachedExplosion {
    lines: Vec<ExplodedLine>,
    /// 展開結果中出現過的所有料件
    members: HashSet<PartNumber>,
}

/// 快取統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// 展開結果快取
///
/// 依根料件快取展開結果。料件被修改時呼叫 [`ExplosionCache::invalidate_part`]，
/// 所有包含該料件的快取項目都會被移除。錯誤結果不會被快取。
#[derive(Debug)]
pub struct ExplosionCache {
    config: EngineConfig,
    entries: HashMap<PartNumber, CachedExplosion>,
    tracker: DirtyTracker,
    hits: u64,
    misses: u64,
}

impl ExplosionCache {
    /// 創建新的快取（所有展開使用同一份配置）
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            tracker: DirtyTracker::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// 取得快取的展開結果，不存在時展開並存入
    pub fn get_or_explode<P>(
        &mut self,
        parts: &P,
        root: &PartNumber,
    ) -> bom_core::Result<&[ExplodedLine]>
    where
        P: PartRepository + ?Sized,
    {
        match self.entries.entry(root.clone()) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                tracing::debug!("展開快取命中: {}", root);
                Ok(&entry.into_mut().lines)
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                tracing::debug!("展開快取未命中: {}", root);

                let lines = ExplosionCalculator::explode(parts, root, &self.config)?;
                let members: HashSet<PartNumber> =
                    lines.iter().map(|l| l.part.clone()).collect();
                for part in &members {
                    self.tracker.clear_part(part);
                }

                Ok(&entry.insert(CachedExplosion { lines, members }).lines)
            }
        }
    }

    /// 料件被修改：標記為髒並移除所有包含它的快取項目，返回移除數量
    pub fn invalidate_part(&mut self, part: &PartNumber) -> usize {
        self.tracker.mark_dirty(part.clone());

        let before = self.entries.len();
        self.entries.retain(|_, cached| !cached.members.contains(part));
        let evicted = before - self.entries.len();

        tracing::debug!("料件 {} 失效，移除 {} 個快取項目", part, evicted);
        evicted
    }

    /// 清除所有快取與髒標記
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.tracker.clear();
    }

    /// 根料件是否已快取
    pub fn contains(&self, root: &PartNumber) -> bool {
        self.entries.contains_key(root)
    }

    /// 自上次重新展開後被修改過的料件
    pub fn dirty_parts(&self) -> Vec<PartNumber> {
        self.tracker.dirty_parts()
    }

    /// 快取統計
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for ExplosionCache {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
