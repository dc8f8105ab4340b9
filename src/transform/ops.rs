// ==========================================
// 配合比导入转换器 - 变换操作定义
// ==========================================
// 职责: 封闭的表格变换 DSL（只含命名操作，不执行任意代码）
// 格式: JSON，例如
//   [{"op": "map_column", "column": "Quantity", "map": {"kind": "scale", "factor": 0.5}}]
// ==========================================

use crate::domain::table::CellValue;
use serde::{Deserialize, Serialize};

// ==========================================
// TransformOp - 变换操作
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOp {
    /// 整列赋值（列不存在时追加）
    SetColumn { column: String, value: CellValue },

    /// 逐格映射
    MapColumn { column: String, map: ColumnMap },

    /// 按谓词保留数据行（表头始终保留）
    FilterRows {
        column: String,
        predicate: RowPredicate,
    },

    /// 表头改名
    RenameHeader { from: String, to: String },
}

// ==========================================
// ColumnMap - 单元格映射
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnMap {
    Trim,
    Uppercase,
    Lowercase,
    Replace { from: String, to: String },
    Prefix { text: String },
    Suffix { text: String },
    /// 仅作用于数字单元格（如显式 mm → in 换算）
    Scale { factor: f64 },
}

// ==========================================
// RowPredicate - 行谓词
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowPredicate {
    Equals { value: CellValue },
    NotEquals { value: CellValue },
    Contains { text: String },
    IsEmpty,
    NotEmpty,
    GreaterThan { value: f64 },
    LessThan { value: f64 },
}
