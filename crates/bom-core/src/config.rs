//! 引擎配置

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::BomError;

/// BOM 展開與成本彙總配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// MOQ 為空的報價如何判定
    pub null_moq_policy: NullMoqPolicy,

    /// 同一組件下重複子件關係的處理方式
    pub duplicate_subparts: DuplicateSubpartPolicy,

    /// 訂購量是否向上取整至 MPQ 倍數
    pub round_to_pack_quantity: bool,

    /// 是否在彙總結果中收集定價警告
    pub collect_warnings: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            null_moq_policy: NullMoqPolicy::NoMinimum,
            duplicate_subparts: DuplicateSubpartPolicy::KeepDistinct,
            round_to_pack_quantity: false,
            collect_warnings: true,
        }
    }
}

impl EngineConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置空 MOQ 策略
    pub fn with_null_moq_policy(mut self, policy: NullMoqPolicy) -> Self {
        self.null_moq_policy = policy;
        self
    }

    /// 建構器模式：設置重複子件策略
    pub fn with_duplicate_subparts(mut self, policy: DuplicateSubpartPolicy) -> Self {
        self.duplicate_subparts = policy;
        self
    }

    /// 建構器模式：設置是否按 MPQ 取整
    pub fn with_round_to_pack_quantity(mut self, round: bool) -> Self {
        self.round_to_pack_quantity = round;
        self
    }

    /// 建構器模式：設置是否收集警告
    pub fn with_collect_warnings(mut self, collect: bool) -> Self {
        self.collect_warnings = collect;
        self
    }

    /// 從 JSON 字串載入配置（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| BomError::Config(e.to_string()))
    }

    /// 從 JSON 檔案載入配置
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BomError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }
}

/// 空 MOQ 策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullMoqPolicy {
    /// 視為無最小訂購量，永遠符合
    NoMinimum,
    /// 永不符合，只能作為後備報價
    NeverQualifies,
}

/// 重複子件關係策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSubpartPolicy {
    /// 每筆關係獨立展開
    KeepDistinct,
    /// 合併為一筆（位置取第一筆，用量相加）
    Sum,
    /// 視為資料錯誤
    Reject,
}
