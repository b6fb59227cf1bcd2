//! # BOM
//!
//! 電子料件 BOM 展開與成本彙總

pub use bom_cache as cache;
pub use bom_calc as calc;
pub use bom_core as core;
pub use bom_export as export;

pub use bom_calc::{BomEngine, CostedBom, FlatLine};
pub use bom_core::{
    BomError, Catalog, CostedLine, EngineConfig, ExplodedLine, Part, PartNumber, Result,
    RollupResult, SellerOffer,
};

/// 常用類型
pub mod prelude {
    pub use bom_cache::ExplosionCache;
    pub use bom_calc::{BomEngine, CostedBom};
    pub use bom_core::{
        BomError, Catalog, DuplicateSubpartPolicy, EngineConfig, NullMoqPolicy, OfferRepository,
        Part, PartNumber, PartRepository, SellerOffer,
    };
    pub use rust_decimal::Decimal;
}
