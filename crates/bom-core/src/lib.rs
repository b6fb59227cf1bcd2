//! # BOM Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod line;
pub mod offer;
pub mod part;
pub mod repository;

// Re-export 主要類型
pub use config::{DuplicateSubpartPolicy, EngineConfig, NullMoqPolicy};
pub use line::{CostedLine, ExplodedLine, PricingWarning, PricingWarningKind, RollupResult};
pub use offer::SellerOffer;
pub use part::{Part, PartNumber, Subpart};
pub use repository::{Catalog, OfferRepository, PartRepository};

/// BOM 錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BomError {
    #[error("找不到料號: {0}")]
    PartNotFound(PartNumber),

    #[error("BOM 循環: {part} 是自身的上層件（路徑: {}）", format_path(.path))]
    CyclicBom {
        part: PartNumber,
        path: Vec<PartNumber>,
    },

    #[error("無效的生產數量: {0}（必須 >= 1）")]
    InvalidQuantity(u64),

    #[error("重複的子件關係: {parent} -> {child}")]
    DuplicateSubpart {
        parent: PartNumber,
        child: PartNumber,
    },

    #[error("數量溢位: {part}")]
    QuantityOverflow { part: PartNumber },

    #[error("無效的料號: {0}")]
    InvalidPartNumber(String),

    #[error("配置錯誤: {0}")]
    Config(String),

    #[error("匯出錯誤: {0}")]
    Export(String),

    #[error("匯入錯誤: {0}")]
    Import(String),
}

pub type Result<T> = std::result::Result<T, BomError>;

fn format_path(path: &[PartNumber]) -> String {
    path.iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
