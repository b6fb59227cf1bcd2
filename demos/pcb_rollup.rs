//! # 控制板成本彙總完整範例
//!
//! 這個範例展示完整的 BOM 成本計算流程：
//! - 產品：感測控制板
//! - 零件：MCU、被動元件、連接器、外殼
//! - 報價：多家通路商，各有不同的最小訂購量
//! - 結果：逐行成本、實際下單成本與定價警告

use anyhow::Result;
use bom::calc::summarize;
use bom::core::PricingWarningKind;
use bom::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🔌 ===== 控制板成本彙總範例 =====");
    println!();

    // ========== 1. 料件目錄 ==========
    println!("📚 步驟 1: 建立料件目錄");
    let catalog = create_catalog()?;
    println!("   ✓ 料件數: {}", catalog.part_count());
    println!("   ✓ 子件關係數: {}", catalog.subpart_count());
    println!();

    // ========== 2. 引擎配置 ==========
    println!("⚙️  步驟 2: 設定引擎");
    let config = EngineConfig::new()
        .with_round_to_pack_quantity(true)
        .with_collect_warnings(true);
    println!("   ✓ 無 MOQ 報價: {:?}", config.null_moq_policy);
    println!("   ✓ 重複子件: {:?}", config.duplicate_subparts);
    println!("   ✓ 包裝倍數進位: {}", config.round_to_pack_quantity);
    println!();

    let engine = BomEngine::new(&catalog, &catalog, config);
    let root: PartNumber = "100-0001-01".parse()?;

    // ========== 3. 展開 ==========
    println!("🌲 步驟 3: 展開 BOM");
    let exploded = engine.explode(&root)?;
    for line in &exploded {
        let description = catalog
            .part(&line.part)
            .map(|p| p.description.as_str())
            .unwrap_or("");
        println!(
            "   {}├─ {} x{} {}",
            "  ".repeat(line.level),
            line.part,
            line.quantity,
            description
        );
    }
    println!();

    // ========== 4. 成本計算 ==========
    let build_quantity = 250;
    println!("🚀 步驟 4: 計算 {} 片的成本", build_quantity);
    let costed = engine.cost(&root, build_quantity)?;
    println!("----------------------------------------");
    for line in &costed.lines {
        println!(
            "  L{} {} | 需求: {} | 下單: {} | 通路: {} | 單價: {} | 成本: {}",
            line.level,
            line.part,
            line.extended_quantity,
            line.order_quantity,
            line.seller().unwrap_or("-"),
            display_money(line.unit_price),
            display_money(line.extended_cost),
        );
    }
    println!("----------------------------------------");
    println!("展開總成本: {}", costed.result.total_cost);
    println!("下單總成本: {}", costed.result.total_order_cost);
    println!("每片成本:   {}", costed.result.unit_cost().round_dp(4));
    println!("定價完整:   {}", costed.result.complete);
    println!();

    // ========== 5. 合併料件 ==========
    println!("🧮 步驟 5: 合併相同料件");
    for flat in summarize(&exploded)? {
        println!(
            "   {} x{}（出現 {} 次，最淺層級 {}）",
            flat.part, flat.quantity, flat.occurrences, flat.min_level
        );
    }
    println!();

    // ========== 6. 警告訊息 ==========
    if !costed.result.warnings.is_empty() {
        println!("⚠️  定價警告:");
        for warning in &costed.result.warnings {
            let message = match warning.kind {
                PricingWarningKind::NoOffers => "沒有任何報價",
                PricingWarningKind::NoPricedOffer => "報價皆無單價",
                PricingWarningKind::MoqFallback => "沒有符合 MOQ 的報價，使用後備報價",
            };
            println!("  - [{}] L{} {}", warning.part, warning.level, message);
        }
        println!();
    }

    println!("✅ 成本彙總完成！");
    println!();

    Ok(())
}

fn display_money(value: Option<Decimal>) -> String {
    value
        .map(|v| v.round_dp(4).to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// 建立控制板 BOM 與報價
///
/// ```text
/// 100-0001-01 控制板
///   ├── 200-0001-01 主板 PCBA x1
///   │   ├── 300-0001-01 MCU x1
///   │   ├── 300-0002-01 電阻 10k x12
///   │   └── 300-0003-01 電容 100nF x20
///   ├── 200-0002-01 外殼 x1
///   └── 400-0001-01 連接器 x2
/// ```
fn create_catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();

    let board: PartNumber = "100-0001-01".parse()?;
    let pcba: PartNumber = "200-0001-01".parse()?;
    let enclosure: PartNumber = "200-0002-01".parse()?;
    let mcu: PartNumber = "300-0001-01".parse()?;
    let resistor: PartNumber = "300-0002-01".parse()?;
    let capacitor: PartNumber = "300-0003-01".parse()?;
    let connector: PartNumber = "400-0001-01".parse()?;

    catalog.add_part(Part::new(board.clone(), "Sensor controller").with_revision("B"));
    catalog.add_part(Part::new(pcba.clone(), "Main PCBA").with_revision("3"));
    catalog.add_part(
        Part::new(enclosure.clone(), "Enclosure, ABS").with_manufacturer("Hammond", "1551K"),
    );
    catalog.add_part(
        Part::new(mcu.clone(), "MCU, Cortex-M4")
            .with_manufacturer("STMicroelectronics", "STM32F401CEU6"),
    );
    catalog.add_part(
        Part::new(resistor.clone(), "Resistor 10k 0402")
            .with_manufacturer("Yageo", "RC0402FR-0710KL"),
    );
    catalog.add_part(
        Part::new(capacitor.clone(), "Capacitor 100nF 0402")
            .with_manufacturer("Murata", "GRM155R71C104KA88D"),
    );
    catalog.add_part(
        Part::new(connector.clone(), "Connector, 4 pin").with_manufacturer("JST", "B4B-PH-K-S"),
    );

    catalog.add_subpart(&board, &pcba, 1)?;
    catalog.add_subpart(&pcba, &mcu, 1)?;
    catalog.add_subpart(&pcba, &resistor, 12)?;
    catalog.add_subpart(&pcba, &capacitor, 20)?;
    catalog.add_subpart(&board, &enclosure, 1)?;
    catalog.add_subpart(&board, &connector, 2)?;

    catalog.add_offer(
        &mcu,
        SellerOffer::new("Digi-Key")
            .with_minimum_order_qty(1)
            .with_unit_cost("6.12".parse()?)
            .with_lead_time_days(3),
    )?;
    catalog.add_offer(
        &mcu,
        SellerOffer::new("Mouser")
            .with_minimum_order_qty(500)
            .with_unit_cost("4.98".parse()?)
            .with_lead_time_days(5),
    )?;

    // 大量包裝才便宜
    catalog.add_offer(
        &resistor,
        SellerOffer::new("Mouser")
            .with_minimum_order_qty(10_000)
            .with_unit_cost("0.0008".parse()?),
    )?;
    catalog.add_offer(
        &resistor,
        SellerOffer::new("Digi-Key")
            .with_minimum_order_qty(1)
            .with_minimum_pack_qty(100)
            .with_unit_cost("0.0100".parse()?),
    )?;

    catalog.add_offer(
        &capacitor,
        SellerOffer::new("LCSC")
            .with_minimum_order_qty(10_000)
            .with_unit_cost("0.0020".parse()?),
    )?;

    catalog.add_offer(&enclosure, SellerOffer::new("Hammond"))?;

    catalog.add_offer(
        &connector,
        SellerOffer::new("Arrow")
            .with_minimum_order_qty(100)
            .with_unit_cost("0.21".parse()?),
    )?;

    Ok(catalog)
}
