//! 縮排 BOM 匯入
//!
//! 讀取 `write_indented_bom` 的欄位格式，依層級與數量重建子件關係。
//! 成本相關欄位只供閱讀，匯入時忽略。

use bom_core::{BomError, Catalog, Part, PartNumber};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::io;

/// 匯入時讀取的欄位
#[derive(Debug, Deserialize)]
struct ImportRow {
    level: usize,
    part_number: PartNumber,
    #[serde(default)]
    part_description: String,
    #[serde(default)]
    part_revision: String,
    quantity: u64,
    #[serde(default)]
    part_manufacturer: String,
    #[serde(default)]
    part_manufacturer_part_number: String,
}

impl ImportRow {
    fn to_part(&self) -> Part {
        Part::new(self.part_number.clone(), self.part_description.clone())
            .with_revision(self.part_revision.clone())
            .with_manufacturer(
                self.part_manufacturer.clone(),
                self.part_manufacturer_part_number.clone(),
            )
    }
}

/// 組件與其子件關係（依檔案順序）
type Edges = Vec<(PartNumber, Vec<(PartNumber, u32)>)>;

/// 自 CSV 匯入縮排 BOM，返回根料件
///
/// 整份檔案驗證通過後才寫入目錄，失敗時目錄不變。
/// 檔案中出現的每個料件會以檔案內容取代其既有的子件關係；
/// 同一料件再次出現（共用子樹）時不重複建立關係。
pub fn read_indented_bom<R: io::Read>(
    reader: R,
    catalog: &mut Catalog,
) -> bom_core::Result<PartNumber> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<ImportRow>().enumerate() {
        rows.push(record.map_err(|e| import_error(index + 2, e))?);
    }

    let (root, edges) = rebuild_edges(&rows)?;

    for row in &rows {
        catalog.add_part(row.to_part());
    }
    for (parent, children) in &edges {
        catalog.clear_subparts(parent);
        for (child, count) in children {
            catalog.add_subpart(parent, child, *count)?;
        }
    }

    tracing::info!(
        "匯入縮排 BOM: {} 共 {} 列，{} 個料件",
        root,
        rows.len(),
        edges.len()
    );

    Ok(root)
}

/// 以字串形式匯入縮排 BOM CSV
pub fn import_indented_bom_csv(
    csv: &str,
    catalog: &mut Catalog,
) -> bom_core::Result<PartNumber> {
    read_indented_bom(csv.as_bytes(), catalog)
}

fn rebuild_edges(rows: &[ImportRow]) -> bom_core::Result<(PartNumber, Edges)> {
    let Some(first) = rows.first() else {
        return Err(BomError::Import("沒有資料列".to_string()));
    };

    // 目前路徑上每一層：(料號, 每頂層件數量, 在 edges 中的位置)
    // 位置為 None 表示該料件先前已出現過，其子件關係已記錄
    let mut path: Vec<(PartNumber, u64, Option<usize>)> = Vec::new();
    let mut seen: HashSet<PartNumber> = HashSet::new();
    let mut edges: Edges = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let line = index + 2;

        if index > 0 && row.level == 0 {
            return Err(import_error(line, "只能有一個層級 0 的根料件"));
        }
        if row.level > path.len() {
            return Err(import_error(line, format!("層級 {} 缺少上層件", row.level)));
        }
        if row.quantity == 0 {
            return Err(import_error(line, "數量必須 >= 1"));
        }

        path.truncate(row.level);

        if path.iter().any(|(part, _, _)| part == &row.part_number) {
            let mut cycle: Vec<PartNumber> =
                path.iter().map(|(part, _, _)| part.clone()).collect();
            cycle.push(row.part_number.clone());
            return Err(BomError::CyclicBom {
                part: row.part_number.clone(),
                path: cycle,
            });
        }

        if let Some((parent, parent_quantity, slot)) = path.last() {
            if row.quantity % parent_quantity != 0 {
                return Err(import_error(
                    line,
                    format!(
                        "{} 的數量 {} 不是上層件 {} 數量 {} 的倍數",
                        row.part_number, row.quantity, parent, parent_quantity
                    ),
                ));
            }
            let count = u32::try_from(row.quantity / parent_quantity)
                .map_err(|_| import_error(line, format!("{} 的用量過大", row.part_number)))?;

            if let Some(slot) = slot {
                edges[*slot].1.push((row.part_number.clone(), count));
            }
        }

        let slot = if seen.insert(row.part_number.clone()) {
            edges.push((row.part_number.clone(), Vec::new()));
            Some(edges.len() - 1)
        } else {
            None
        };
        path.push((row.part_number.clone(), row.quantity, slot));
    }

    Ok((first.part_number.clone(), edges))
}

fn import_error(line: usize, err: impl fmt::Display) -> BomError {
    BomError::Import(format!("第 {} 行: {}", line, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_calc::BomEngine;
    use bom_core::{EngineConfig, PartRepository, SellerOffer};

    use crate::indented_bom_csv;

    fn pn(s: &str) -> PartNumber {
        s.parse().unwrap()
    }

    const HEADER_LINE: &str = "level,part_number,part_description,part_revision,quantity,\
                               part_manufacturer,part_manufacturer_part_number,\
                               extended_quantity,order_quantity,seller_name,unit_cost,extended_cost";

    fn csv_of(rows: &[&str]) -> String {
        let mut text = format!("{}\n", HEADER_LINE);
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_import_rebuilds_counts_from_levels() {
        let text = csv_of(&[
            "0,100-0001-01,Controller,B,1,,,10,10,,,",
            "1,200-0001-01,Sensor module,,2,Acme,SM-1,20,20,,,",
            "2,300-0001-01,\"Resistor, 10k\",,10,Yageo,RC0402,100,100,Mouser,2.00,200.00",
            "1,200-0002-01,Enclosure,,1,,,10,10,,,",
        ]);

        let mut catalog = Catalog::new();
        let root = import_indented_bom_csv(&text, &mut catalog).unwrap();

        assert_eq!(root, pn("100-0001-01"));
        assert_eq!(catalog.part_count(), 4);

        let children: Vec<(String, u32)> = catalog
            .direct_subparts(&pn("100-0001-01"))
            .iter()
            .map(|s| (s.child.to_string(), s.count))
            .collect();
        assert_eq!(
            children,
            vec![("200-0001-01".to_string(), 2), ("200-0002-01".to_string(), 1)]
        );
        assert_eq!(catalog.direct_subparts(&pn("200-0001-01"))[0].count, 5);

        let resistor = catalog.part(&pn("300-0001-01")).unwrap();
        assert_eq!(resistor.description, "Resistor, 10k");
        assert_eq!(resistor.manufacturer_part_number, "RC0402");
        assert_eq!(catalog.part(&pn("100-0001-01")).unwrap().revision, "B");
    }

    #[test]
    fn test_shared_subtree_is_not_duplicated() {
        // 200-0001-01 同時出現在兩個組件下，其子件只記錄一次
        let text = csv_of(&[
            "0,100-0001-01,Root,,1,,,,,,,",
            "1,150-0001-01,Left,,1,,,,,,,",
            "2,200-0001-01,Shared,,2,,,,,,,",
            "3,300-0001-01,Leaf,,6,,,,,,,",
            "1,150-0002-01,Right,,1,,,,,,,",
            "2,200-0001-01,Shared,,1,,,,,,,",
            "3,300-0001-01,Leaf,,3,,,,,,,",
        ]);

        let mut catalog = Catalog::new();
        import_indented_bom_csv(&text, &mut catalog).unwrap();

        assert_eq!(catalog.direct_subparts(&pn("200-0001-01")).len(), 1);
        assert_eq!(catalog.direct_subparts(&pn("200-0001-01"))[0].count, 3);
        assert_eq!(catalog.subpart_count(), 5);
    }

    #[test]
    fn test_import_replaces_existing_children() {
        let mut catalog = Catalog::new();
        catalog.add_part(Part::new(pn("100-0001-01"), "Old"));
        catalog.add_part(Part::new(pn("900-0001-01"), "Obsolete"));
        catalog.add_subpart(&pn("100-0001-01"), &pn("900-0001-01"), 4).unwrap();

        let text = csv_of(&["0,100-0001-01,New,,1,,,,,,,", "1,200-0001-01,Fresh,,3,,,,,,,"]);
        import_indented_bom_csv(&text, &mut catalog).unwrap();

        let children = catalog.direct_subparts(&pn("100-0001-01"));
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].child, pn("200-0001-01"));
        assert_eq!(catalog.part(&pn("100-0001-01")).unwrap().description, "New");
        // 不在檔案中的料件保留
        assert!(catalog.part(&pn("900-0001-01")).is_some());
    }

    #[test]
    fn test_exported_bom_imports_to_same_explosion() {
        let mut source = Catalog::new();
        for (n, desc) in [
            ("100-0001-01", "Light"),
            ("300-0007-01", "LED, white"),
            ("500-0001-01", "Switch"),
        ] {
            source.add_part(Part::new(pn(n), desc));
        }
        source.add_subpart(&pn("100-0001-01"), &pn("300-0007-01"), 6).unwrap();
        source.add_subpart(&pn("100-0001-01"), &pn("500-0001-01"), 1).unwrap();
        source
            .add_offer(
                &pn("300-0007-01"),
                SellerOffer::new("Digi-Key")
                    .with_minimum_order_qty(1)
                    .with_unit_cost("0.85".parse().unwrap()),
            )
            .unwrap();

        let engine = BomEngine::new(&source, &source, EngineConfig::default());
        let costed = engine.cost(&pn("100-0001-01"), 40).unwrap();
        let text = indented_bom_csv(&source, &costed.lines).unwrap();

        let mut imported = Catalog::new();
        let root = import_indented_bom_csv(&text, &mut imported).unwrap();

        let reimported = BomEngine::new(&imported, &imported, EngineConfig::default());
        assert_eq!(
            reimported.explode(&root).unwrap(),
            engine.explode(&pn("100-0001-01")).unwrap()
        );
    }

    #[test]
    fn test_invalid_file_leaves_catalog_untouched() {
        let mut catalog = Catalog::new();
        catalog.add_part(Part::new(pn("100-0001-01"), "Keep me"));

        // 第二層缺少上層件
        let text = csv_of(&["0,100-0001-01,Root,,1,,,,,,,", "2,300-0001-01,Leaf,,4,,,,,,,"]);
        let err = import_indented_bom_csv(&text, &mut catalog).unwrap_err();

        assert!(matches!(err, BomError::Import(ref m) if m.contains("第 3 行")));
        assert_eq!(catalog.part_count(), 1);
        assert_eq!(catalog.part(&pn("100-0001-01")).unwrap().description, "Keep me");
    }

    #[test]
    fn test_indivisible_quantity_rejected() {
        let text = csv_of(&[
            "0,100-0001-01,Root,,1,,,,,,,",
            "1,200-0001-01,Module,,3,,,,,,,",
            "2,300-0001-01,Leaf,,7,,,,,,,",
        ]);

        let err = import_indented_bom_csv(&text, &mut Catalog::new()).unwrap_err();
        assert!(matches!(err, BomError::Import(ref m) if m.contains("第 4 行")));
    }

    #[test]
    fn test_malformed_part_number_rejected() {
        let text = csv_of(&["0,ABC-1,Root,,1,,,,,,,"]);
        let err = import_indented_bom_csv(&text, &mut Catalog::new()).unwrap_err();
        assert!(matches!(err, BomError::Import(ref m) if m.contains("第 2 行")));
    }

    #[test]
    fn test_empty_and_multi_root_files_rejected() {
        let empty = import_indented_bom_csv(&csv_of(&[]), &mut Catalog::new()).unwrap_err();
        assert!(matches!(empty, BomError::Import(_)));

        let two_roots = csv_of(&["0,100-0001-01,A,,1,,,,,,,", "0,100-0002-01,B,,1,,,,,,,"]);
        let err = import_indented_bom_csv(&two_roots, &mut Catalog::new()).unwrap_err();
        assert!(matches!(err, BomError::Import(ref m) if m.contains("第 3 行")));
    }

    #[test]
    fn test_cycle_in_file_rejected() {
        let text = csv_of(&[
            "0,100-0001-01,Root,,1,,,,,,,",
            "1,200-0001-01,Module,,1,,,,,,,",
            "2,100-0001-01,Root,,1,,,,,,,",
        ]);

        let err = import_indented_bom_csv(&text, &mut Catalog::new()).unwrap_err();
        assert_eq!(
            err,
            BomError::CyclicBom {
                part: pn("100-0001-01"),
                path: vec![pn("100-0001-01"), pn("200-0001-01"), pn("100-0001-01")],
            }
        );
    }
}
