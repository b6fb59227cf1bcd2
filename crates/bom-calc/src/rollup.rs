//! 成本彙總

use bom_core::{
    BomError, CostedLine, EngineConfig, ExplodedLine, OfferRepository, PricingWarning,
    PricingWarningKind, RollupResult,
};
use rust_decimal::Decimal;

use crate::selection::OfferSelector;

/// 成本彙總計算器
pub struct CostRollup;

impl CostRollup {
    /// 對展開行定價並彙總
    ///
    /// 缺少報價不是錯誤：該行單價為 None，總成本不計入，`complete` 為 false。
    pub fn rollup<O>(
        offers: &O,
        lines: &[ExplodedLine],
        build_quantity: u64,
        config: &EngineConfig,
    ) -> bom_core::Result<(Vec<CostedLine>, RollupResult)>
    where
        O: OfferRepository + ?Sized,
    {
        if build_quantity < 1 {
            return Err(BomError::InvalidQuantity(build_quantity));
        }

        let mut costed_lines = Vec::with_capacity(lines.len());
        let mut result = RollupResult::empty(build_quantity);

        for line in lines {
            let (costed, warning) = Self::price_line(offers, line, build_quantity, config)?;

            result.add_line(&costed)?;
            if let Some(kind) = warning {
                if config.collect_warnings {
                    result.add_warning(PricingWarning::new(line.part.clone(), line.level, kind));
                }
            }

            costed_lines.push(costed);
        }

        if !result.complete {
            tracing::warn!(
                "成本彙總不完整：{} / {} 行無可用價格",
                result.unpriced_lines,
                costed_lines.len()
            );
        }

        Ok((costed_lines, result))
    }

    /// 對單一展開行定價
    pub fn price_line<O>(
        offers: &O,
        line: &ExplodedLine,
        build_quantity: u64,
        config: &EngineConfig,
    ) -> bom_core::Result<(CostedLine, Option<PricingWarningKind>)>
    where
        O: OfferRepository + ?Sized,
    {
        let overflow = || BomError::QuantityOverflow {
            part: line.part.clone(),
        };

        let extended_quantity = line.quantity.checked_mul(build_quantity).ok_or_else(overflow)?;
        let part_offers = offers.seller_offers(&line.part);
        let selection = OfferSelector::select(part_offers, extended_quantity, config.null_moq_policy);

        let mut costed = CostedLine {
            part: line.part.clone(),
            quantity: line.quantity,
            level: line.level,
            extended_quantity,
            order_quantity: extended_quantity,
            offer: None,
            unit_price: None,
            extended_cost: None,
            order_cost: None,
        };

        let Some(selection) = selection else {
            tracing::debug!("{} 沒有任何報價", line.part);
            return Ok((costed, Some(PricingWarningKind::NoOffers)));
        };

        costed.order_quantity = selection
            .offer
            .order_quantity(extended_quantity, config.round_to_pack_quantity)
            .ok_or_else(overflow)?;
        costed.offer = Some(selection.offer.clone());

        let Some(unit_price) = selection.offer.unit_cost else {
            tracing::debug!("{} 的報價都沒有單價", line.part);
            return Ok((costed, Some(PricingWarningKind::NoPricedOffer)));
        };

        costed.unit_price = Some(unit_price);
        costed.extended_cost = Some(
            Decimal::from(extended_quantity)
                .checked_mul(unit_price)
                .ok_or_else(overflow)?,
        );
        costed.order_cost = Some(
            Decimal::from(costed.order_quantity)
                .checked_mul(unit_price)
                .ok_or_else(overflow)?,
        );

        tracing::debug!(
            "{} 選用 {} 單價 {} 展開數量 {} 訂購量 {}",
            line.part,
            selection.offer.seller,
            unit_price,
            extended_quantity,
            costed.order_quantity
        );

        let warning = selection
            .is_fallback()
            .then_some(PricingWarningKind::MoqFallback);
        Ok((costed, warning))
    }
}
