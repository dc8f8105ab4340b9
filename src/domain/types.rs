// ==========================================
// 配合比导入转换器 - 领域类型定义
// ==========================================
// 职责: 调度系统 / 实体类型（转换器注册表的键）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 名称归一化：忽略大小写、空白、连字符与下划线
fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

// ==========================================
// 调度系统 (Dispatch System)
// ==========================================
// 源导出表的厂商格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchSystem {
    Mpaq,          // MPAQ
    CommandSeries, // Command Series
    Bcmi,          // BCMI
    Integra,       // Integra
}

impl DispatchSystem {
    pub const ALL: [DispatchSystem; 4] = [
        DispatchSystem::Mpaq,
        DispatchSystem::CommandSeries,
        DispatchSystem::Bcmi,
        DispatchSystem::Integra,
    ];
}

impl fmt::Display for DispatchSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchSystem::Mpaq => write!(f, "MPAQ"),
            DispatchSystem::CommandSeries => write!(f, "Command Series"),
            DispatchSystem::Bcmi => write!(f, "BCMI"),
            DispatchSystem::Integra => write!(f, "Integra"),
        }
    }
}

impl FromStr for DispatchSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "mpaq" => Ok(DispatchSystem::Mpaq),
            "commandseries" | "command" => Ok(DispatchSystem::CommandSeries),
            "bcmi" => Ok(DispatchSystem::Bcmi),
            "integra" => Ok(DispatchSystem::Integra),
            _ => Err(s.to_string()),
        }
    }
}

// ==========================================
// 实体类型 (Entity Type)
// ==========================================
// 对应界面上的实体页签
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Mixes,     // 配合比
    Materials, // 物料
}

impl EntityType {
    /// 输出工作表名称
    pub fn sheet_name(&self) -> &'static str {
        match self {
            EntityType::Mixes => "Mix Import",
            EntityType::Materials => "Material Import",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Mixes => write!(f, "Mixes"),
            EntityType::Materials => write!(f, "Materials"),
        }
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "mix" | "mixes" => Ok(EntityType::Mixes),
            "material" | "materials" => Ok(EntityType::Materials),
            _ => Err(s.to_string()),
        }
    }
}
