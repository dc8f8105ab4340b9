// ==========================================
// 配合比导入转换器 - 厂商转换配置
// ==========================================
// 职责: 固定业务常量（厂站代码 / 槽位数量 / 目标列顺序）
// 红线: 目标表头是下游导入系统的兼容契约，逐字保持
// 红线: 不对用户开放配置；新增厂商 = 新增一份 Profile
// ==========================================

use crate::domain::table::{header_row, Row};

// ==========================================
// 目标配合比导入表头（25 列）
// ==========================================
pub const DESTINATION_MIX_HEADER: [&str; 25] = [
    "Plant Code",
    "Mix Name",
    "Description",
    "Short Description",
    "Item Category",
    "Strength Age",
    "Strength(MPA)",
    "Design Air%",
    "Min Air%",
    "Max Air%",
    "Design Slump (in)",
    "Min Slump (in)",
    "Max Slump (in)",
    "Max Batch Size",
    "Max Water",
    "Max W/C+P",
    "Max W/C",
    "Mix Class Names",
    "Mix Usage",
    "Dispatch Slump Range",
    "Dispatch",
    "Constituent Item Code",
    "Constituent Item Description",
    "Quantity",
    "Unit Name",
];

/// 目标配合比表列号
pub mod mix_columns {
    pub const PLANT_CODE: usize = 0;
    pub const MIX_NAME: usize = 1;
    pub const DESCRIPTION: usize = 2;
    pub const SHORT_DESCRIPTION: usize = 3;
    pub const ITEM_CATEGORY: usize = 4;
    pub const STRENGTH_AGE: usize = 5;
    pub const STRENGTH_MPA: usize = 6;
    pub const DESIGN_AIR: usize = 7;
    pub const MIN_AIR: usize = 8;
    pub const MAX_AIR: usize = 9;
    pub const DESIGN_SLUMP: usize = 10;
    pub const MIN_SLUMP: usize = 11;
    pub const MAX_SLUMP: usize = 12;
    pub const DISPATCH_SLUMP_RANGE: usize = 19;
    pub const DISPATCH: usize = 20;
    pub const CONSTITUENT_ITEM_CODE: usize = 21;
    pub const CONSTITUENT_ITEM_DESCRIPTION: usize = 22;
    pub const QUANTITY: usize = 23;
    pub const UNIT_NAME: usize = 24;
}

// ==========================================
// 目标物料导入表头（8 列）
// ==========================================
// 输出可直接作为配合比转换的物料查找表
pub const DESTINATION_MATERIAL_HEADER: [&str; 8] = [
    "Item Code",
    "Item Description",
    "Short Description",
    "Item Category",
    "Material Type (Required)",
    "Unit Name",
    "Specific Gravity",
    "Production Item Code",
];

/// 目标物料表列号
pub mod material_columns {
    pub const ITEM_CODE: usize = 0;
    pub const ITEM_DESCRIPTION: usize = 1;
    pub const SHORT_DESCRIPTION: usize = 2;
    pub const ITEM_CATEGORY: usize = 3;
    pub const MATERIAL_TYPE: usize = 4;
    pub const UNIT_NAME: usize = 5;
    pub const SPECIFIC_GRAVITY: usize = 6;
    pub const PRODUCTION_ITEM_CODE: usize = 7;
}

// ==========================================
// MixProfile - 配合比展开配置
// ==========================================
// 用途: 注入到配合比转换管道，替代散落的字面量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixProfile {
    pub name: &'static str,
    pub plant_codes: &'static [&'static str], // 展开的厂站代码（外层循环顺序）
    pub aggregate_slots: usize,               // 骨料槽位数
    pub cement_slots: usize,                  // 胶凝材料槽位数
    pub admixture_slots: usize,               // 外加剂槽位数
    pub strength_age_days: f64,               // 强度龄期（天）
    pub item_category: &'static str,
    pub dispatch_flag: &'static str,
    pub water_material_id: &'static str,   // 隐式水组分物料号
    pub water_material_name: &'static str, // 隐式水组分名称
    pub destination_header: &'static [&'static str],
}

impl MixProfile {
    /// 目标表头行
    pub fn header_row(&self) -> Row {
        header_row(self.destination_header)
    }

    /// 目标表列数
    pub fn column_count(&self) -> usize {
        self.destination_header.len()
    }
}

/// MPAQ 配合比转换配置
pub const MPAQ_MIX_PROFILE: MixProfile = MixProfile {
    name: "MPAQ",
    plant_codes: &["01", "02", "03", "05", "06"],
    aggregate_slots: 6,
    cement_slots: 4,
    admixture_slots: 8,
    strength_age_days: 28.0,
    item_category: "Mix",
    dispatch_flag: "Yes",
    water_material_id: "WATER",
    water_material_name: "Water",
    destination_header: &DESTINATION_MIX_HEADER,
};

// ==========================================
// ProjectionProfile - 单趟列投影配置
// ==========================================
// 用途: 无展开、无查找的厂商转换只需要表头与固定填充值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionProfile {
    pub name: &'static str,
    pub strength_age_days: f64,
    pub item_category: &'static str,
    pub dispatch_flag: &'static str,
    pub destination_header: &'static [&'static str],
}

impl ProjectionProfile {
    /// 目标表头行
    pub fn header_row(&self) -> Row {
        header_row(self.destination_header)
    }

    /// 目标表列数
    pub fn column_count(&self) -> usize {
        self.destination_header.len()
    }
}

/// Command Series 配合比转换配置
///
/// 源表已按组分逐行导出，厂站代码取自源表，不做展开
pub const COMMAND_SERIES_MIX_PROFILE: ProjectionProfile = ProjectionProfile {
    name: "Command Series",
    strength_age_days: 28.0,
    item_category: "Mix",
    dispatch_flag: "Yes",
    destination_header: &DESTINATION_MIX_HEADER,
};
