//! BOM 展開
//!
//! 前序深度優先展開：根先輸出，再依子件關係的建立順序，
//! 將每個子件的完整子樹連續輸出。使用顯式堆疊，深層 BOM 不會耗盡呼叫堆疊。

use bom_core::{
    BomError, DuplicateSubpartPolicy, EngineConfig, ExplodedLine, PartNumber, PartRepository,
};
use std::collections::HashSet;

/// 展開中的一層（目前路徑上的一個節點）
struct Frame {
    /// 該節點的子件（已依重複策略處理）
    edges: Vec<(PartNumber, u64)>,
    /// 下一個要走訪的子件索引
    next: usize,
    /// 該節點每個頂層件所需數量
    quantity: u64,
}

/// BOM 展開計算器
pub struct ExplosionCalculator;

impl ExplosionCalculator {
    /// 展開根料件
    ///
    /// 遇到自身為祖先的料件時返回 `CyclicBom`，不返回部分結果。
    pub fn explode<R>(
        parts: &R,
        root: &PartNumber,
        config: &EngineConfig,
    ) -> bom_core::Result<Vec<ExplodedLine>>
    where
        R: PartRepository + ?Sized,
    {
        if parts.part(root).is_none() {
            return Err(BomError::PartNotFound(root.clone()));
        }

        tracing::info!("開始 BOM 展開: {}", root);

        let mut lines = vec![ExplodedLine::new(root.clone(), 1, 0)];

        // 目前路徑（根到當前節點），與其集合版本供 O(1) 查詢
        let mut path = vec![root.clone()];
        let mut on_path: HashSet<PartNumber> = HashSet::from([root.clone()]);

        let mut frames = vec![Frame {
            edges: Self::child_edges(parts, root, config.duplicate_subparts)?,
            next: 0,
            quantity: 1,
        }];

        loop {
            let step = match frames.last_mut() {
                None => break,
                Some(frame) if frame.next < frame.edges.len() => {
                    let (child, count) = frame.edges[frame.next].clone();
                    frame.next += 1;
                    Some((child, count, frame.quantity))
                }
                Some(_) => None,
            };

            let Some((child, count, parent_quantity)) = step else {
                frames.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(&done);
                }
                continue;
            };

            if on_path.contains(&child) {
                path.push(child.clone());
                tracing::warn!(
                    "偵測到 BOM 循環: {} (深度 {})",
                    child,
                    path.len() - 1
                );
                return Err(BomError::CyclicBom { part: child, path });
            }

            if parts.part(&child).is_none() {
                return Err(BomError::PartNotFound(child));
            }

            let quantity = parent_quantity
                .checked_mul(count)
                .ok_or_else(|| BomError::QuantityOverflow {
                    part: child.clone(),
                })?;
            let level = path.len();

            tracing::debug!("展開: {} x{} (層級 {})", child, quantity, level);

            lines.push(ExplodedLine::new(child.clone(), quantity, level));

            let edges = Self::child_edges(parts, &child, config.duplicate_subparts)?;
            path.push(child.clone());
            on_path.insert(child);
            frames.push(Frame {
                edges,
                next: 0,
                quantity,
            });
        }

        tracing::info!("BOM 展開完成: {} 共 {} 行", root, lines.len());

        Ok(lines)
    }

    /// 取得直接子件，並依重複子件策略處理
    fn child_edges<R>(
        parts: &R,
        parent: &PartNumber,
        policy: DuplicateSubpartPolicy,
    ) -> bom_core::Result<Vec<(PartNumber, u64)>>
    where
        R: PartRepository + ?Sized,
    {
        let subparts = parts.direct_subparts(parent);
        let mut edges: Vec<(PartNumber, u64)> = Vec::with_capacity(subparts.len());

        for subpart in subparts {
            let count = u64::from(subpart.count);

            match policy {
                DuplicateSubpartPolicy::KeepDistinct => {
                    edges.push((subpart.child.clone(), count));
                }
                DuplicateSubpartPolicy::Sum => {
                    match edges.iter_mut().find(|(child, _)| child == &subpart.child) {
                        Some((_, total)) => *total += count,
                        None => edges.push((subpart.child.clone(), count)),
                    }
                }
                DuplicateSubpartPolicy::Reject => {
                    if edges.iter().any(|(child, _)| child == &subpart.child) {
                        return Err(BomError::DuplicateSubpart {
                            parent: parent.clone(),
                            child: subpart.child.clone(),
                        });
                    }
                    edges.push((subpart.child.clone(), count));
                }
            }
        }

        Ok(edges)
    }
}
