//! 供應商報價模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::NullMoqPolicy;

/// 供應商報價（價格級距）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerOffer {
    /// 供應商/經銷商名稱
    pub seller: String,

    /// 最小訂購量（MOQ）
    pub minimum_order_qty: Option<u64>,

    /// 最小包裝量（MPQ）
    pub minimum_pack_qty: Option<u64>,

    /// 單價（None 表示價格未知）
    pub unit_cost: Option<Decimal>,

    /// 交期（天，僅供參考，不參與選擇）
    pub lead_time_days: Option<u32>,
}

impl SellerOffer {
    /// 創建新的報價
    pub fn new(seller: impl Into<String>) -> Self {
        Self {
            seller: seller.into(),
            minimum_order_qty: None,
            minimum_pack_qty: None,
            unit_cost: None,
            lead_time_days: None,
        }
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_minimum_order_qty(mut self, qty: u64) -> Self {
        self.minimum_order_qty = Some(qty);
        self
    }

    /// 建構器模式：設置最小包裝量
    pub fn with_minimum_pack_qty(mut self, qty: u64) -> Self {
        self.minimum_pack_qty = Some(qty);
        self
    }

    /// 建構器模式：設置單價
    pub fn with_unit_cost(mut self, cost: Decimal) -> Self {
        self.unit_cost = Some(cost);
        self
    }

    /// 建構器模式：設置交期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = Some(days);
        self
    }

    /// 在指定的展開數量下是否符合 MOQ
    pub fn qualifies(&self, extended_qty: u64, policy: NullMoqPolicy) -> bool {
        match self.minimum_order_qty {
            Some(moq) => moq <= extended_qty,
            None => policy == NullMoqPolicy::NoMinimum,
        }
    }

    /// 是否有已知單價
    pub fn is_priced(&self) -> bool {
        self.unit_cost.is_some()
    }

    /// 計算實際訂購量：至少為展開數量，且不低於 MOQ
    ///
    /// `round_to_pack` 為 true 時再向上取整至 MPQ 的倍數。
    /// 溢位時返回 None。
    pub fn order_quantity(&self, extended_qty: u64, round_to_pack: bool) -> Option<u64> {
        let mut quantity = extended_qty.max(self.minimum_order_qty.unwrap_or(0));

        if round_to_pack {
            if let Some(pack) = self.minimum_pack_qty.filter(|p| *p > 0) {
                let remainder = quantity % pack;
                if remainder > 0 {
                    quantity = quantity.checked_add(pack - remainder)?;
                }
            }
        }

        Some(quantity)
    }
}
