// ==========================================
// 配合比导入转换器 - 表格值模型
// ==========================================
// 职责: 编解码边界之内唯一的数据形态
// 形态: Table = 有序行序列, Row = 有序单元格序列
// 红线: 核心层不接触任何原生表格文件格式
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
// 序列化: JSON 字符串 / 数字 / null
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

/// 行: 列含义由位置决定
pub type Row = Vec<CellValue>;

/// 表: 第 0 行是否为表头由转换器决定
pub type Table = Vec<Row>;

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// 文本构造，空字符串视为 Empty
    pub fn from_text<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// 是否为空（Empty 或全空白文本）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 渲染为文本（整数值不带 ".0"）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }

    /// 渲染为去空白文本
    pub fn trimmed_text(&self) -> String {
        self.as_text().trim().to_string()
    }

    /// 解析为有限浮点数
    ///
    /// # 返回
    /// - Some(f64): 数字单元格，或整段文本可解析为数字
    /// - None: 空值 / NaN / 无穷 / 不可解析文本
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Empty => return None,
        };
        if n.is_finite() {
            Some(n)
        } else {
            None
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::from_text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from_text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map(CellValue::Number).unwrap_or(CellValue::Empty)
    }
}

/// 按列号取单元格，短行越界返回 Empty
pub fn cell_at(row: &[CellValue], idx: usize) -> &CellValue {
    row.get(idx).unwrap_or(&EMPTY_CELL)
}

/// 将字面量表头转换为一行
pub fn header_row(titles: &[&str]) -> Row {
    titles.iter().map(|t| CellValue::Text((*t).to_string())).collect()
}
