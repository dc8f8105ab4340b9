// ==========================================
// 配合比导入转换器 - 单元格清洗
// ==========================================
// 职责: TRIM / 空值判定 / 数量透传 / 过滤规则
// ==========================================

use crate::domain::table::CellValue;

/// 是否为"零或空"
///
/// # 规则
/// - Empty / 空字符串 / 字符串 "0" / 数字 0 / NaN → true
/// - 其他 → false（"0.0"、纯空白、不可解析文本均不算）
pub fn is_zero_or_empty(value: &CellValue) -> bool {
    match value {
        CellValue::Empty => true,
        CellValue::Number(n) => *n == 0.0 || n.is_nan(),
        CellValue::Text(s) => s.is_empty() || s == "0",
    }
}

/// 是否为空单元格（Empty 或空字符串，不去空白）
pub fn is_empty_cell(value: &CellValue) -> bool {
    match value {
        CellValue::Empty => true,
        CellValue::Text(s) => s.is_empty(),
        CellValue::Number(_) => false,
    }
}

/// 是否为正数（过滤规则: 严格大于 0）
pub fn is_positive(value: &CellValue) -> bool {
    value.as_number().map(|n| n > 0.0).unwrap_or(false)
}

/// 数量透传：可解析为数字则转为数字，否则保持原文本
///
/// 不做取整，不做单位换算
pub fn quantity_value(value: &CellValue) -> CellValue {
    match value.as_number() {
        Some(n) => CellValue::Number(n),
        None => value.clone(),
    }
}

/// 标准化 NULL（空白 → None），否则返回去空白文本
pub fn normalize_null(value: &CellValue) -> Option<String> {
    let trimmed = value.trimmed_text();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// 去空白后不区分大小写比较
pub fn equals_ignore_case(value: &CellValue, expected: &str) -> bool {
    value.trimmed_text().eq_ignore_ascii_case(expected)
}
