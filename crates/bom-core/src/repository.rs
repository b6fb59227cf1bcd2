//! 料件與報價資料來源
//!
//! 引擎只讀取資料；資料的擁有權屬於呼叫方提供的資料來源。

use std::collections::HashMap;

use crate::{BomError, Part, PartNumber, SellerOffer, Subpart};

/// 料件資料來源
pub trait PartRepository {
    /// 查詢料件
    fn part(&self, number: &PartNumber) -> Option<&Part>;

    /// 直接子件關係（依建立順序）
    fn direct_subparts(&self, number: &PartNumber) -> &[Subpart];
}

/// 報價資料來源
pub trait OfferRepository {
    /// 料件的所有報價（依建立順序）
    fn seller_offers(&self, number: &PartNumber) -> &[SellerOffer];
}

/// 記憶體內的料件目錄
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    parts: HashMap<PartNumber, Part>,
    subparts: HashMap<PartNumber, Vec<Subpart>>,
    offers: HashMap<PartNumber, Vec<SellerOffer>>,
}

impl Catalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加料件（同料號則覆蓋屬性，保留關係與報價）
    pub fn add_part(&mut self, part: Part) {
        self.parts.insert(part.number.clone(), part);
    }

    /// 添加子件關係
    pub fn add_subpart(
        &mut self,
        parent: &PartNumber,
        child: &PartNumber,
        count: u32,
    ) -> crate::Result<()> {
        self.ensure_exists(parent)?;
        self.ensure_exists(child)?;

        self.subparts
            .entry(parent.clone())
            .or_default()
            .push(Subpart::new(parent.clone(), child.clone(), count));
        Ok(())
    }

    /// 移除組件下指定子件的所有關係，返回移除筆數
    pub fn remove_subpart(&mut self, parent: &PartNumber, child: &PartNumber) -> usize {
        let Some(rows) = self.subparts.get_mut(parent) else {
            return 0;
        };
        let before = rows.len();
        rows.retain(|s| &s.child != child);
        before - rows.len()
    }

    /// 移除組件的全部子件關係，返回移除筆數
    pub fn clear_subparts(&mut self, parent: &PartNumber) -> usize {
        self.subparts.remove(parent).map_or(0, |rows| rows.len())
    }

    /// 移除料件，連同其子件關係、被引用的關係與報價
    pub fn remove_part(&mut self, number: &PartNumber) -> Option<Part> {
        let removed = self.parts.remove(number)?;

        self.subparts.remove(number);
        self.offers.remove(number);
        for rows in self.subparts.values_mut() {
            rows.retain(|s| &s.child != number);
        }

        Some(removed)
    }

    /// 添加報價
    pub fn add_offer(&mut self, number: &PartNumber, offer: SellerOffer) -> crate::Result<()> {
        self.ensure_exists(number)?;
        self.offers.entry(number.clone()).or_default().push(offer);
        Ok(())
    }

    /// 所有料件（依料號排序）
    pub fn parts(&self) -> Vec<&Part> {
        let mut parts: Vec<&Part> = self.parts.values().collect();
        parts.sort_by(|a, b| a.number.cmp(&b.number));
        parts
    }

    /// 料件數量
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// 子件關係數量
    pub fn subpart_count(&self) -> usize {
        self.subparts.values().map(Vec::len).sum()
    }

    fn ensure_exists(&self, number: &PartNumber) -> crate::Result<()> {
        if self.parts.contains_key(number) {
            Ok(())
        } else {
            Err(BomError::PartNotFound(number.clone()))
        }
    }
}

impl PartRepository for Catalog {
    fn part(&self, number: &PartNumber) -> Option<&Part> {
        self.parts.get(number)
    }

    fn direct_subparts(&self, number: &PartNumber) -> &[Subpart] {
        self.subparts.get(number).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl OfferRepository for Catalog {
    fn seller_offers(&self, number: &PartNumber) -> &[SellerOffer] {
        self.offers.get(number).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn pn(s: &str) -> PartNumber {
        s.parse().unwrap()
    }

    fn catalog_with(numbers: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        for n in numbers {
            catalog.add_part(Part::new(pn(n), format!("part {}", n)));
        }
        catalog
    }

    #[test]
    fn test_subparts_keep_definition_order() {
        let mut catalog = catalog_with(&["100-0001-01", "300-0001-01", "200-0001-01"]);
        catalog.add_subpart(&pn("100-0001-01"), &pn("300-0001-01"), 2).unwrap();
        catalog.add_subpart(&pn("100-0001-01"), &pn("200-0001-01"), 5).unwrap();

        let children: Vec<String> = catalog
            .direct_subparts(&pn("100-0001-01"))
            .iter()
            .map(|s| s.child.to_string())
            .collect();
        assert_eq!(children, vec!["300-0001-01", "200-0001-01"]);
        assert_eq!(catalog.subpart_count(), 2);
    }

    #[test]
    fn test_add_subpart_requires_both_parts() {
        let mut catalog = catalog_with(&["100-0001-01"]);

        let err = catalog
            .add_subpart(&pn("100-0001-01"), &pn("999-0001-01"), 1)
            .unwrap_err();
        assert_eq!(err, BomError::PartNotFound(pn("999-0001-01")));

        let err = catalog
            .add_offer(&pn("999-0001-01"), SellerOffer::new("Mouser"))
            .unwrap_err();
        assert_eq!(err, BomError::PartNotFound(pn("999-0001-01")));
    }

    #[test]
    fn test_remove_part_drops_relationships() {
        let mut catalog = catalog_with(&["100-0001-01", "200-0001-01", "300-0001-01"]);
        catalog.add_subpart(&pn("100-0001-01"), &pn("200-0001-01"), 1).unwrap();
        catalog.add_subpart(&pn("200-0001-01"), &pn("300-0001-01"), 1).unwrap();
        catalog
            .add_offer(
                &pn("200-0001-01"),
                SellerOffer::new("Mouser").with_unit_cost(Decimal::ONE),
            )
            .unwrap();

        assert!(catalog.remove_part(&pn("200-0001-01")).is_some());

        assert!(catalog.part(&pn("200-0001-01")).is_none());
        assert!(catalog.direct_subparts(&pn("100-0001-01")).is_empty());
        assert!(catalog.direct_subparts(&pn("200-0001-01")).is_empty());
        assert!(catalog.seller_offers(&pn("200-0001-01")).is_empty());
        assert_eq!(catalog.subpart_count(), 0);
        assert!(catalog.remove_part(&pn("200-0001-01")).is_none());
    }

    #[test]
    fn test_remove_subpart_removes_all_rows() {
        let mut catalog = catalog_with(&["100-0001-01", "200-0001-01"]);
        catalog.add_subpart(&pn("100-0001-01"), &pn("200-0001-01"), 1).unwrap();
        catalog.add_subpart(&pn("100-0001-01"), &pn("200-0001-01"), 3).unwrap();

        assert_eq!(catalog.remove_subpart(&pn("100-0001-01"), &pn("200-0001-01")), 2);
        assert_eq!(catalog.remove_subpart(&pn("100-0001-01"), &pn("200-0001-01")), 0);
    }

    #[test]
    fn test_clear_subparts_keeps_parts() {
        let mut catalog = catalog_with(&["100-0001-01", "200-0001-01", "300-0001-01"]);
        catalog.add_subpart(&pn("100-0001-01"), &pn("200-0001-01"), 1).unwrap();
        catalog.add_subpart(&pn("100-0001-01"), &pn("300-0001-01"), 2).unwrap();

        assert_eq!(catalog.clear_subparts(&pn("100-0001-01")), 2);
        assert!(catalog.direct_subparts(&pn("100-0001-01")).is_empty());
        assert_eq!(catalog.part_count(), 3);
        assert_eq!(catalog.clear_subparts(&pn("100-0001-01")), 0);
    }

    #[test]
    fn test_parts_sorted_by_number() {
        let catalog = catalog_with(&["503-0003-01", "200-0001-01", "500-0002-01"]);
        let numbers: Vec<String> = catalog.parts().iter().map(|p| p.number.to_string()).collect();
        assert_eq!(numbers, vec!["200-0001-01", "500-0002-01", "503-0003-01"]);
    }
}
