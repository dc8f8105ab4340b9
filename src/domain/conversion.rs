// ==========================================
// 配合比导入转换器 - 转换结果模型
// ==========================================
// 职责: 转换输出表 + 诊断轨迹 + 汇总统计
// 红线: 诊断只记录非致命问题，致命问题走 ConvertError
// ==========================================

use crate::domain::table::Table;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Diagnostic - 非致命诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Diagnostic {
    /// 物料查找表未命中，已回退为原始物料号
    UnresolvedMaterial {
        mix_id: String,
        material_id: String,
        material_name: String,
    },

    /// 提供了物料表，但未找到所需列，查找表为空
    MaterialsLookupUnavailable,

    /// 被业务规则过滤掉的源行数
    RowsSkipped { count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedMaterial {
                mix_id,
                material_id,
                material_name,
            } => write!(
                f,
                "配合比 {} 的物料 '{}' 未在物料表中找到，使用原始物料号 {}",
                mix_id, material_name, material_id
            ),
            Diagnostic::MaterialsLookupUnavailable => {
                write!(f, "物料表缺少 Material Type (Required) 或 Production Item Code 列")
            }
            Diagnostic::RowsSkipped { count } => write!(f, "已跳过 {} 行源数据", count),
        }
    }
}

// ==========================================
// ConversionStats - 汇总统计
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    pub source_rows: usize, // 源数据行数（不含表头）
    pub valid_rows: usize,  // 通过过滤的源行数
    pub output_rows: usize, // 输出数据行数（不含表头）
}

// ==========================================
// ConversionOutput - 转换输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutput {
    pub table: Table, // 表头 + 数据行
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// 未解析物料诊断数量
    pub fn unresolved_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnresolvedMaterial { .. }))
            .count()
    }

    /// 数据行（跳过表头）
    pub fn data_rows(&self) -> &[crate::domain::table::Row] {
        self.table.get(1..).unwrap_or(&[])
    }
}
