//! 報價選擇策略
//!
//! 1. 符合 MOQ 且有單價的報價中取最低單價，同價取先出現者；
//! 2. 否則取第一個不符合 MOQ 但有單價的報價（訂購量提高至 MOQ）；
//! 3. 否則取第一個報價（價格未知）。
//!
//! 單價為空的報價永遠不參與最低價比較。

use bom_core::{NullMoqPolicy, SellerOffer};
use rust_decimal::Decimal;

/// 選中的報價
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferSelection<'a> {
    /// 報價在輸入中的索引
    pub index: usize,

    pub offer: &'a SellerOffer,

    /// 是否在展開數量下符合 MOQ
    pub qualifying: bool,
}

impl OfferSelection<'_> {
    /// 是否為 MOQ 後備報價
    pub fn is_fallback(&self) -> bool {
        !self.qualifying
    }
}

/// 報價選擇器
pub struct OfferSelector;

impl OfferSelector {
    /// 依展開數量選擇報價，沒有任何報價時返回 None
    pub fn select(
        offers: &[SellerOffer],
        extended_qty: u64,
        policy: NullMoqPolicy,
    ) -> Option<OfferSelection<'_>> {
        let mut cheapest: Option<(usize, Decimal)> = None;

        for (index, offer) in offers.iter().enumerate() {
            if !offer.qualifies(extended_qty, policy) {
                continue;
            }
            if let Some(cost) = offer.unit_cost {
                // 嚴格小於：同價保留先出現者
                if cheapest.map_or(true, |(_, best)| cost < best) {
                    cheapest = Some((index, cost));
                }
            }
        }

        if let Some((index, _)) = cheapest {
            return Some(OfferSelection {
                index,
                offer: &offers[index],
                qualifying: true,
            });
        }

        let fallback = offers
            .iter()
            .enumerate()
            .find(|(_, o)| o.is_priced() && !o.qualifies(extended_qty, policy));

        if let Some((index, offer)) = fallback {
            tracing::debug!(
                "無符合 MOQ 的報價，後備使用 {} (MOQ {:?})",
                offer.seller,
                offer.minimum_order_qty
            );
            return Some(OfferSelection {
                index,
                offer,
                qualifying: false,
            });
        }

        offers.first().map(|offer| OfferSelection {
            index: 0,
            offer,
            qualifying: offer.qualifies(extended_qty, policy),
        })
    }
}
