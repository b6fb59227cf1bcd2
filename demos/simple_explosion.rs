//! 簡單 BOM 展開示例

use anyhow::Result;
use bom::prelude::*;

fn main() -> Result<()> {
    println!("=== 簡單 BOM 展開示例 ===\n");

    let mut catalog = Catalog::new();
    let root: PartNumber = "100-0001-01".parse()?;
    let module: PartNumber = "200-0001-01".parse()?;
    let screw: PartNumber = "300-0001-01".parse()?;

    catalog.add_part(Part::new(root.clone(), "Assembly"));
    catalog.add_part(Part::new(module.clone(), "Module"));
    catalog.add_part(Part::new(screw.clone(), "Screw M2"));

    // 螺絲同時出現在組件與模組下
    catalog.add_subpart(&root, &module, 2)?;
    catalog.add_subpart(&root, &screw, 4)?;
    catalog.add_subpart(&module, &screw, 3)?;

    let engine = BomEngine::new(&catalog, &catalog, EngineConfig::default());

    println!("展開結果:");
    for line in engine.explode(&root)? {
        println!(
            "  {}- {} x{}",
            "  ".repeat(line.level),
            line.part,
            line.quantity
        );
    }

    println!("\n合併後:");
    for flat in engine.summarize(&root)? {
        println!("  - {} x{}", flat.part, flat.quantity);
    }

    // 製造循環
    catalog.add_subpart(&screw, &root, 1)?;
    let engine = BomEngine::new(&catalog, &catalog, EngineConfig::default());
    if let Err(e) = engine.explode(&root) {
        println!("\n加入循環後: {}", e);
    }

    Ok(())
}
