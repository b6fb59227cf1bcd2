//! 展開行與成本彙總結果

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BomError, PartNumber, SellerOffer};

/// 展開行（BOM 展開結果）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplodedLine {
    /// 料號
    pub part: PartNumber,

    /// 每生產一個頂層件所需的數量（路徑上用量的累乘）
    pub quantity: u64,

    /// 縮排層級（根 = 0）
    pub level: usize,
}

impl ExplodedLine {
    pub fn new(part: PartNumber, quantity: u64, level: usize) -> Self {
        Self {
            part,
            quantity,
            level,
        }
    }

    /// 是否為根（頂層件）
    pub fn is_root(&self) -> bool {
        self.level == 0
    }
}

/// 成本行（展開行 + 定價）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostedLine {
    /// 料號
    pub part: PartNumber,

    /// 每個頂層件所需數量
    pub quantity: u64,

    /// 縮排層級
    pub level: usize,

    /// 展開數量 = 數量 × 生產數量
    pub extended_quantity: u64,

    /// 實際訂購量（滿足 MOQ，必要時按 MPQ 取整）
    pub order_quantity: u64,

    /// 選中的報價
    pub offer: Option<SellerOffer>,

    /// 單價（None 表示無可用價格）
    pub unit_price: Option<Decimal>,

    /// 展開成本 = 展開數量 × 單價
    pub extended_cost: Option<Decimal>,

    /// 訂購成本 = 訂購量 × 單價
    pub order_cost: Option<Decimal>,
}

impl CostedLine {
    /// 是否已定價
    pub fn is_priced(&self) -> bool {
        self.unit_price.is_some()
    }

    /// 選中報價的供應商名稱
    pub fn seller(&self) -> Option<&str> {
        self.offer.as_ref().map(|o| o.seller.as_str())
    }
}

/// 定價警告類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingWarningKind {
    /// 沒有任何報價
    NoOffers,
    /// 有報價但都沒有單價
    NoPricedOffer,
    /// 沒有符合 MOQ 的報價，使用後備報價
    MoqFallback,
}

/// 定價警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingWarning {
    pub part: PartNumber,
    pub level: usize,
    pub kind: PricingWarningKind,
}

impl PricingWarning {
    pub fn new(part: PartNumber, level: usize, kind: PricingWarningKind) -> Self {
        Self { part, level, kind }
    }
}

/// 成本彙總結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupResult {
    /// 生產數量
    pub build_quantity: u64,

    /// 總成本（各行展開成本之和）
    pub total_cost: Decimal,

    /// 總訂購成本（各行訂購成本之和）
    pub total_order_cost: Decimal,

    /// 是否每一行都有可用價格
    pub complete: bool,

    /// 未定價行數
    pub unpriced_lines: usize,

    /// 警告信息
    pub warnings: Vec<PricingWarning>,
}

impl RollupResult {
    /// 創建空的彙總結果
    pub fn empty(build_quantity: u64) -> Self {
        Self {
            build_quantity,
            total_cost: Decimal::ZERO,
            total_order_cost: Decimal::ZERO,
            complete: true,
            unpriced_lines: 0,
            warnings: Vec::new(),
        }
    }

    /// 累加一行
    ///
    /// 總額溢位時返回 `QuantityOverflow`，彙總結果保持不變。
    pub fn add_line(&mut self, line: &CostedLine) -> crate::Result<()> {
        match (line.extended_cost, line.order_cost) {
            (Some(extended), Some(order)) => {
                let overflow = || BomError::QuantityOverflow {
                    part: line.part.clone(),
                };
                let total_cost = self.total_cost.checked_add(extended).ok_or_else(overflow)?;
                let total_order_cost = self
                    .total_order_cost
                    .checked_add(order)
                    .ok_or_else(overflow)?;

                self.total_cost = total_cost;
                self.total_order_cost = total_order_cost;
            }
            _ => {
                self.complete = false;
                self.unpriced_lines += 1;
            }
        }
        Ok(())
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PricingWarning) {
        self.warnings.push(warning);
    }

    /// 單位成本（總成本 / 生產數量）
    pub fn unit_cost(&self) -> Decimal {
        if self.build_quantity == 0 {
            return Decimal::ZERO;
        }
        self.total_cost / Decimal::from(self.build_quantity)
    }
}
