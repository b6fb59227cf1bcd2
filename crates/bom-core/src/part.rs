//! 料件模型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::BomError;

/// 料號（分類碼-流水號-變體）
///
/// 字串格式為 `CCC-NNNN-VV`，例如 `200-3333-01`。
/// 排序依 (分類碼, 流水號, 變體) 字典序，與料件清單的排序一致。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartNumber {
    class_code: String,
    item: String,
    variation: String,
}

impl PartNumber {
    /// 分類碼最大長度
    pub const CLASS_CODE_LEN: usize = 3;
    /// 流水號最大長度
    pub const ITEM_LEN: usize = 4;
    /// 變體最大長度
    pub const VARIATION_LEN: usize = 2;

    /// 由三個欄位創建料號
    pub fn new(
        class_code: impl Into<String>,
        item: impl Into<String>,
        variation: impl Into<String>,
    ) -> crate::Result<Self> {
        let number = Self {
            class_code: class_code.into(),
            item: item.into(),
            variation: variation.into(),
        };
        number.validate()?;
        Ok(number)
    }

    pub fn class_code(&self) -> &str {
        &self.class_code
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn variation(&self) -> &str {
        &self.variation
    }

    fn validate(&self) -> crate::Result<()> {
        let segments = [
            (&self.class_code, Self::CLASS_CODE_LEN),
            (&self.item, Self::ITEM_LEN),
            (&self.variation, Self::VARIATION_LEN),
        ];

        for (segment, max_len) in segments {
            let valid = !segment.is_empty()
                && segment.len() <= max_len
                && segment.bytes().all(|b| b.is_ascii_digit());
            if !valid {
                return Err(BomError::InvalidPartNumber(self.to_string()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for PartNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.class_code, self.item, self.variation)
    }
}

impl FromStr for PartNumber {
    type Err = BomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.trim().split('-');
        match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(class_code), Some(item), Some(variation), None) => {
                Self::new(class_code, item, variation)
                    .map_err(|_| BomError::InvalidPartNumber(s.to_string()))
            }
            _ => Err(BomError::InvalidPartNumber(s.to_string())),
        }
    }
}

impl TryFrom<String> for PartNumber {
    type Error = BomError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PartNumber> for String {
    fn from(number: PartNumber) -> Self {
        number.to_string()
    }
}

/// 料件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// 料號
    pub number: PartNumber,

    /// 描述
    pub description: String,

    /// 版次
    pub revision: String,

    /// 製造商
    pub manufacturer: String,

    /// 製造商料號
    pub manufacturer_part_number: String,
}

impl Part {
    /// 創建新的料件
    pub fn new(number: PartNumber, description: impl Into<String>) -> Self {
        Self {
            number,
            description: description.into(),
            revision: String::new(),
            manufacturer: String::new(),
            manufacturer_part_number: String::new(),
        }
    }

    /// 建構器模式：設置版次
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// 建構器模式：設置製造商與製造商料號
    pub fn with_manufacturer(
        mut self,
        manufacturer: impl Into<String>,
        manufacturer_part_number: impl Into<String>,
    ) -> Self {
        self.manufacturer = manufacturer.into();
        self.manufacturer_part_number = manufacturer_part_number.into();
        self
    }
}

/// 子件關係（BOM 邊）
///
/// 表示「每一個 `parent` 直接需要 `count` 個 `child`」。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subpart {
    /// 組件（上層件）
    pub parent: PartNumber,

    /// 子件
    pub child: PartNumber,

    /// 用量
    pub count: u32,
}

impl Subpart {
    pub fn new(parent: PartNumber, child: PartNumber, count: u32) -> Self {
        Self {
            parent,
            child,
            count,
        }
    }
}
