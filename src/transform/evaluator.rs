// ==========================================
// 配合比导入转换器 - 变换求值器
// ==========================================
// 职责: 按顺序解释 TransformOp，输出新表
// 红线: 纯函数，不修改输入表；第 0 行恒为表头
// ==========================================

use crate::domain::table::{cell_at, CellValue, Table};
use crate::transform::error::{TransformError, TransformResult};
use crate::transform::ops::{ColumnMap, RowPredicate, TransformOp};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// TransformProgram - 变换程序
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformProgram {
    pub ops: Vec<TransformOp>,
}

impl TransformProgram {
    pub fn new(ops: Vec<TransformOp>) -> Self {
        Self { ops }
    }

    /// 从 JSON 数组解析
    pub fn from_json(json: &str) -> TransformResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// 依次执行全部操作
    pub fn apply(&self, table: &Table) -> TransformResult<Table> {
        if table.is_empty() {
            return Err(TransformError::EmptyTable);
        }

        let mut current = table.clone();
        for (idx, op) in self.ops.iter().enumerate() {
            current = apply_op(current, op)?;
            debug!(step = idx + 1, rows = current.len(), "变换操作完成");
        }
        Ok(current)
    }
}

/// 按表头文本（去空白）定位列，取首个匹配
fn column_index(table: &Table, column: &str) -> Option<usize> {
    table
        .first()?
        .iter()
        .position(|h| h.trimmed_text() == column.trim())
}

fn require_column(table: &Table, column: &str) -> TransformResult<usize> {
    column_index(table, column).ok_or_else(|| TransformError::UnknownColumn {
        column: column.to_string(),
    })
}

/// 执行单个操作
pub fn apply_op(mut table: Table, op: &TransformOp) -> TransformResult<Table> {
    if table.is_empty() {
        return Err(TransformError::EmptyTable);
    }

    match op {
        TransformOp::SetColumn { column, value } => {
            let idx = match column_index(&table, column) {
                Some(idx) => idx,
                None => {
                    let header = &mut table[0];
                    header.push(CellValue::from(column.as_str()));
                    header.len() - 1
                }
            };
            for row in table.iter_mut().skip(1) {
                if row.len() <= idx {
                    row.resize(idx + 1, CellValue::Empty);
                }
                row[idx] = value.clone();
            }
        }
        TransformOp::MapColumn { column, map } => {
            let idx = require_column(&table, column)?;
            for row in table.iter_mut().skip(1) {
                if let Some(cell) = row.get_mut(idx) {
                    *cell = map_cell(cell, map);
                }
            }
        }
        TransformOp::FilterRows { column, predicate } => {
            let idx = require_column(&table, column)?;
            let mut rows = table.into_iter();
            let mut kept: Table = rows.next().into_iter().collect();
            kept.extend(rows.filter(|row| matches_predicate(cell_at(row, idx), predicate)));
            table = kept;
        }
        TransformOp::RenameHeader { from, to } => {
            let idx = require_column(&table, from)?;
            table[0][idx] = CellValue::from(to.as_str());
        }
    }
    Ok(table)
}

/// 单元格映射
pub fn map_cell(cell: &CellValue, map: &ColumnMap) -> CellValue {
    match (cell, map) {
        (CellValue::Empty, _) => CellValue::Empty,
        (_, ColumnMap::Scale { factor }) => match cell.as_number() {
            Some(n) => CellValue::Number(n * factor),
            None => cell.clone(),
        },
        (CellValue::Number(_), ColumnMap::Trim | ColumnMap::Uppercase | ColumnMap::Lowercase) => {
            cell.clone()
        }
        (_, ColumnMap::Trim) => CellValue::from(cell.trimmed_text()),
        (_, ColumnMap::Uppercase) => CellValue::from(cell.as_text().to_uppercase()),
        (_, ColumnMap::Lowercase) => CellValue::from(cell.as_text().to_lowercase()),
        (_, ColumnMap::Replace { from, to }) => {
            CellValue::from(cell.as_text().replace(from.as_str(), to))
        }
        (_, ColumnMap::Prefix { text }) => CellValue::from(format!("{}{}", text, cell.as_text())),
        (_, ColumnMap::Suffix { text }) => CellValue::from(format!("{}{}", cell.as_text(), text)),
    }
}

/// 值相等：两侧均可解析为数字时按数值比较，否则按去空白文本比较
fn values_equal(cell: &CellValue, expected: &CellValue) -> bool {
    match (cell.as_number(), expected.as_number()) {
        (Some(a), Some(b)) => a == b,
        _ => cell.trimmed_text() == expected.trimmed_text(),
    }
}

/// 行谓词求值
pub fn matches_predicate(cell: &CellValue, predicate: &RowPredicate) -> bool {
    match predicate {
        RowPredicate::Equals { value } => values_equal(cell, value),
        RowPredicate::NotEquals { value } => !values_equal(cell, value),
        RowPredicate::Contains { text } => cell.as_text().contains(text.as_str()),
        RowPredicate::IsEmpty => cell.is_blank(),
        RowPredicate::NotEmpty => !cell.is_blank(),
        RowPredicate::GreaterThan { value } => cell.as_number().map(|n| n > *value).unwrap_or(false),
        RowPredicate::LessThan { value } => cell.as_number().map(|n| n < *value).unwrap_or(false),
    }
}
