//! # BOM Export
//!
//! 縮排 BOM 與料件清單的 CSV 匯出，以及縮排 BOM 的匯入

pub mod import;
pub mod indented;
pub mod part_list;

// Re-export 主要類型
pub use import::{import_indented_bom_csv, read_indented_bom};
pub use indented::{indented_bom_csv, indented_rows, write_indented_bom, IndentedBomRow};
pub use part_list::{part_list_csv, write_part_list, PartListRow};

use bom_core::BomError;

pub(crate) fn export_error(err: impl std::fmt::Display) -> BomError {
    BomError::Export(err.to_string())
}

