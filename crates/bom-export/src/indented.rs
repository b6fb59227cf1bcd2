//! 縮排 BOM 匯出（含成本）

use bom_core::{BomError, CostedLine, PartRepository};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;

use crate::export_error;

/// 縮排 BOM 的一列，欄位名稱與舊版匯出相容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndentedBomRow {
    pub level: usize,
    pub part_number: String,
    pub part_description: String,
    pub part_revision: String,
    pub quantity: u64,
    pub part_manufacturer: String,
    pub part_manufacturer_part_number: String,
    pub extended_quantity: u64,
    pub order_quantity: u64,
    pub seller_name: Option<String>,
    pub unit_cost: Option<Decimal>,
    pub extended_cost: Option<Decimal>,
}

/// 將成本行轉為匯出列（保持展開順序）
pub fn indented_rows<P>(parts: &P, lines: &[CostedLine]) -> bom_core::Result<Vec<IndentedBomRow>>
where
    P: PartRepository + ?Sized,
{
    lines
        .iter()
        .map(|line| {
            let part = parts
                .part(&line.part)
                .ok_or_else(|| BomError::PartNotFound(line.part.clone()))?;

            Ok(IndentedBomRow {
                level: line.level,
                part_number: part.number.to_string(),
                part_description: part.description.clone(),
                part_revision: part.revision.clone(),
                quantity: line.quantity,
                part_manufacturer: part.manufacturer.clone(),
                part_manufacturer_part_number: part.manufacturer_part_number.clone(),
                extended_quantity: line.extended_quantity,
                order_quantity: line.order_quantity,
                seller_name: line.seller().map(str::to_string),
                unit_cost: line.unit_price,
                extended_cost: line.extended_cost,
            })
        })
        .collect()
}

/// 寫出縮排 BOM CSV（未知價格為空欄位）
pub fn write_indented_bom<W, P>(writer: W, parts: &P, lines: &[CostedLine]) -> bom_core::Result<()>
where
    W: io::Write,
    P: PartRepository + ?Sized,
{
    let rows = indented_rows(parts, lines)?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    if rows.is_empty() {
        // 沒有資料列時仍輸出表頭
        csv_writer.write_record(HEADER).map_err(export_error)?;
    }
    for row in &rows {
        csv_writer.serialize(row).map_err(export_error)?;
    }

    csv_writer.flush().map_err(export_error)
}

/// 以字串形式產生縮排 BOM CSV
pub fn indented_bom_csv<P>(parts: &P, lines: &[CostedLine]) -> bom_core::Result<String>
where
    P: PartRepository + ?Sized,
{
    let mut buffer = Vec::new();
    write_indented_bom(&mut buffer, parts, lines)?;
    String::from_utf8(buffer).map_err(export_error)
}

const HEADER: [&str; 12] = [
    "level",
    "part_number",
    "part_description",
    "part_revision",
    "quantity",
    "part_manufacturer",
    "part_manufacturer_part_number",
    "extended_quantity",
    "order_quantity",
    "seller_name",
    "unit_cost",
    "extended_cost",
];

#[cfg(test)]
mod tests {
    use super::*;
    use bom_calc::BomEngine;
    use bom_core::{Catalog, EngineConfig, Part, PartNumber, SellerOffer};

    fn pn(s: &str) -> PartNumber {
        s.parse().unwrap()
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_part(
            Part::new(pn("200-3333-01"), "Brown dog")
                .with_revision("1")
                .with_manufacturer("STMicroelectronics", "STM32F401CEU6"),
        );
        catalog.add_part(
            Part::new(pn("500-0001-01"), "Switch, tactile").with_manufacturer("", "GRM1555C1H100JA01D"),
        );
        catalog.add_part(
            Part::new(pn("503-0002-01"), "Friendly ghost")
                .with_manufacturer("Nordic Semiconductor", "NRF51822"),
        );
        catalog.add_subpart(&pn("200-3333-01"), &pn("500-0001-01"), 4).unwrap();
        catalog.add_subpart(&pn("200-3333-01"), &pn("503-0002-01"), 10).unwrap();
        catalog
            .add_offer(
                &pn("500-0001-01"),
                SellerOffer::new("Digi-Key")
                    .with_minimum_order_qty(200)
                    .with_minimum_pack_qty(200)
                    .with_unit_cost("0.0500".parse().unwrap())
                    .with_lead_time_days(47),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_indented_bom_csv() {
        let catalog = sample_catalog();
        let engine = BomEngine::new(&catalog, &catalog, EngineConfig::default());
        let costed = engine.cost(&pn("200-3333-01"), 100).unwrap();

        let csv = indented_bom_csv(&catalog, &costed.lines).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], HEADER.join(","));
        assert_eq!(
            lines[1],
            "0,200-3333-01,Brown dog,1,1,STMicroelectronics,STM32F401CEU6,100,100,,,"
        );
        assert_eq!(
            lines[2],
            "1,500-0001-01,\"Switch, tactile\",,4,,GRM1555C1H100JA01D,400,400,Digi-Key,0.0500,20.0000"
        );
        assert_eq!(
            lines[3],
            "1,503-0002-01,Friendly ghost,,10,Nordic Semiconductor,NRF51822,1000,1000,,,"
        );
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_rows_follow_explosion_order() {
        let catalog = sample_catalog();
        let engine = BomEngine::new(&catalog, &catalog, EngineConfig::default());
        let costed = engine.cost(&pn("200-3333-01"), 1).unwrap();

        let rows = indented_rows(&catalog, &costed.lines).unwrap();
        let numbers: Vec<&str> = rows.iter().map(|r| r.part_number.as_str()).collect();
        assert_eq!(numbers, vec!["200-3333-01", "500-0001-01", "503-0002-01"]);

        // 1 x4 = 4 < MOQ 200：後備報價，訂購量提高至 MOQ
        assert_eq!(rows[1].order_quantity, 200);
        assert_eq!(rows[1].seller_name.as_deref(), Some("Digi-Key"));
    }

    #[test]
    fn test_empty_export_has_header() {
        let catalog = Catalog::new();
        let csv = indented_bom_csv(&catalog, &[]).unwrap();
        assert_eq!(csv.trim_end(), HEADER.join(","));
    }

    #[test]
    fn test_unknown_part() {
        let catalog = sample_catalog();
        let engine = BomEngine::new(&catalog, &catalog, EngineConfig::default());
        let costed = engine.cost(&pn("200-3333-01"), 1).unwrap();

        let empty = Catalog::new();
        let err = indented_rows(&empty, &costed.lines).unwrap_err();
        assert_eq!(err, BomError::PartNotFound(pn("200-3333-01")));
    }
}
