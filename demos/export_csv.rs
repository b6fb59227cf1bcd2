//! 匯出縮排 BOM 與料件清單 CSV，並將縮排 BOM 匯入新目錄
//!
//! 用法：`cargo run --example export_csv -- [config.json]`

use anyhow::{Context, Result};
use bom::export::{import_indented_bom_csv, indented_bom_csv, part_list_csv};
use bom::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_json_file(&path)
            .with_context(|| format!("無法載入配置: {}", path))?,
        None => EngineConfig::default(),
    };

    let mut catalog = Catalog::new();
    let light: PartNumber = "100-0042-01".parse()?;
    let led: PartNumber = "300-0007-01".parse()?;
    let switch: PartNumber = "500-0001-01".parse()?;

    catalog.add_part(Part::new(light.clone(), "Desk light").with_revision("A"));
    catalog.add_part(
        Part::new(led.clone(), "LED, white").with_manufacturer("Cree", "XPEBWT-L1-0000-00E51"),
    );
    catalog.add_part(
        Part::new(switch.clone(), "Switch, tactile").with_manufacturer("C&K", "PTS645SM43SMTR92"),
    );
    catalog.add_subpart(&light, &led, 6)?;
    catalog.add_subpart(&light, &switch, 1)?;

    catalog.add_offer(
        &led,
        SellerOffer::new("Digi-Key")
            .with_minimum_order_qty(1)
            .with_unit_cost("0.85".parse()?),
    )?;
    catalog.add_offer(
        &switch,
        SellerOffer::new("Mouser")
            .with_minimum_order_qty(10)
            .with_unit_cost("0.12".parse()?),
    )?;

    let engine = BomEngine::new(&catalog, &catalog, config);
    let costed = engine.cost(&light, 40)?;

    println!("# indented BOM");
    let indented = indented_bom_csv(&catalog, &costed.lines)?;
    print!("{}", indented);
    println!();
    println!("# part list");
    print!("{}", part_list_csv(catalog.parts())?);

    let mut imported = Catalog::new();
    let root = import_indented_bom_csv(&indented, &mut imported)?;
    println!();
    println!(
        "# re-imported {}: {} parts, {} subparts",
        root,
        imported.part_count(),
        imported.subpart_count()
    );

    Ok(())
}
