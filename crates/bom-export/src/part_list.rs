//! 料件清單匯出

use bom_core::Part;
use serde::Serialize;
use std::io;

use crate::export_error;

/// 料件清單的一列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartListRow {
    pub part_number: String,
    pub part_description: String,
    pub part_revision: String,
    pub part_manufacturer: String,
    pub part_manufacturer_part_number: String,
}

impl From<&Part> for PartListRow {
    fn from(part: &Part) -> Self {
        Self {
            part_number: part.number.to_string(),
            part_description: part.description.clone(),
            part_revision: part.revision.clone(),
            part_manufacturer: part.manufacturer.clone(),
            part_manufacturer_part_number: part.manufacturer_part_number.clone(),
        }
    }
}

/// 寫出料件清單 CSV（依料號排序）
pub fn write_part_list<'a, W, I>(writer: W, parts: I) -> bom_core::Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Part>,
{
    let mut parts: Vec<&Part> = parts.into_iter().collect();
    parts.sort_by(|a, b| a.number.cmp(&b.number));

    let mut csv_writer = csv::Writer::from_writer(writer);
    if parts.is_empty() {
        csv_writer.write_record(HEADER).map_err(export_error)?;
    }
    for part in parts {
        csv_writer
            .serialize(PartListRow::from(part))
            .map_err(export_error)?;
    }

    csv_writer.flush().map_err(export_error)
}

/// 以字串形式產生料件清單 CSV
pub fn part_list_csv<'a, I>(parts: I) -> bom_core::Result<String>
where
    I: IntoIterator<Item = &'a Part>,
{
    let mut buffer = Vec::new();
    write_part_list(&mut buffer, parts)?;
    String::from_utf8(buffer).map_err(export_error)
}

const HEADER: [&str; 5] = [
    "part_number",
    "part_description",
    "part_revision",
    "part_manufacturer",
    "part_manufacturer_part_number",
];
