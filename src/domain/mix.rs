// ==========================================
// 配合比导入转换器 - 配合比领域模型
// ==========================================
// 职责: 源配合比记录 / 物料块 / 组分
// 生命周期: 仅在单次转换调用内
// ==========================================

use crate::domain::table::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// MaterialType - 组分物料类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    Aggregate, // 骨料
    Cement,    // 胶凝材料
    Admixture, // 外加剂
    Water,     // 水（隐式组分）
}

impl MaterialType {
    /// 目标系统单位名称
    pub fn unit_name(&self) -> &'static str {
        match self {
            MaterialType::Aggregate => "kg/m^3",
            MaterialType::Cement => "kg/m^3",
            MaterialType::Admixture => "mL/100kg CM",
            MaterialType::Water => "L",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Aggregate => "Aggregate",
            MaterialType::Cement => "Cement",
            MaterialType::Admixture => "Admixture",
            MaterialType::Water => "Water",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Aggregate" => Ok(MaterialType::Aggregate),
            "Cement" => Ok(MaterialType::Cement),
            "Admixture" => Ok(MaterialType::Admixture),
            "Water" => Ok(MaterialType::Water),
            other => Err(format!("未知物料类型: {}", other)),
        }
    }
}

// ==========================================
// MaterialBlock - 编号物料槽位 {Id, Name, Target}
// ==========================================
// 缺失的列以 Empty 表示
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialBlock {
    pub slot: usize, // 槽位号（从 1 开始）
    pub id: CellValue,
    pub name: CellValue,
    pub target: CellValue,
}

// ==========================================
// SourceMixRecord - 源配合比记录
// ==========================================
// 用途: 源表一行 + 表头 → 命名字段
// 构造: 解析期按列名定位，使用期不再查列
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceMixRecord {
    // 必需列
    pub mix_id: CellValue,
    pub name: CellValue,
    pub water_target: CellValue,

    // 可选列
    pub external_id: CellValue,
    pub air_factor: CellValue,
    pub slump: CellValue,

    // 物料槽位（按槽位号顺序）
    pub aggregates: Vec<MaterialBlock>,
    pub cements: Vec<MaterialBlock>,
    pub admixtures: Vec<MaterialBlock>,

    // 元信息
    pub row_number: usize, // 源表行号（表头为第 1 行）
}

impl SourceMixRecord {
    /// 按固定扫描顺序返回 (物料类型, 槽位列表)
    pub fn blocks_in_scan_order(&self) -> [(MaterialType, &[MaterialBlock]); 3] {
        [
            (MaterialType::Aggregate, self.aggregates.as_slice()),
            (MaterialType::Cement, self.cements.as_slice()),
            (MaterialType::Admixture, self.admixtures.as_slice()),
        ]
    }
}

// ==========================================
// Constituent - 派生组分
// ==========================================
// 来源: 物料槽位扫描 + 每个有效配合比一个隐式水组分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constituent {
    pub material_type: MaterialType,
    pub material_id: CellValue, // 源单元格原值（数字物料号保持数字）
    pub material_name: String,
    pub quantity: CellValue,
}
