// ==========================================
// 配合比导入转换器 - 物料查找表
// ==========================================
// 职责: 物料名称 → 目标系统物料号
// 来源: 第二个上传文件（第 0 行为表头，列位置靠表头模糊匹配）
// 红线: 键区分大小写，只去首尾空白；同名先到先得
// ==========================================

use crate::converter::cell_cleaner::normalize_null;
use crate::converter::converter_trait::LookupBuilder;
use crate::domain::table::{cell_at, CellValue, Row};
use std::collections::HashMap;
use tracing::debug;

/// 表头匹配关键字
pub mod lookup_headers {
    pub const MATERIAL_TYPE: &str = "Material Type";
    pub const REQUIRED: &str = "Required";
    pub const PRODUCTION_ITEM_CODE: &str = "Production Item Code";
}

// ==========================================
// MaterialsLookup
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialsLookup {
    codes: HashMap<String, String>,
}

impl MaterialsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入映射（键已存在时忽略，先到先得）
    ///
    /// # 返回
    /// - true: 新插入
    /// - false: 键已存在，未覆盖
    pub fn insert(&mut self, name: &str, code: &str) -> bool {
        let key = name.trim();
        if self.codes.contains_key(key) {
            return false;
        }
        self.codes.insert(key.to_string(), code.trim().to_string());
        true
    }

    /// 按去空白名称查找
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.codes.get(name.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// 表头扫描：返回 (物料类型列, 生产物料号列)
///
/// # 规则
/// - 物料类型列: 同时包含 "Material Type" 与 "Required"（区分大小写）
/// - 生产物料号列: 包含 "Production Item Code"
/// - 各取首个匹配；任一缺失返回 None
pub fn locate_lookup_columns(header: &[CellValue]) -> Option<(usize, usize)> {
    let texts: Vec<String> = header.iter().map(CellValue::as_text).collect();

    let type_col = texts.iter().position(|h| {
        h.contains(lookup_headers::MATERIAL_TYPE) && h.contains(lookup_headers::REQUIRED)
    })?;
    let code_col = texts
        .iter()
        .position(|h| h.contains(lookup_headers::PRODUCTION_ITEM_CODE))?;

    Some((type_col, code_col))
}

// ==========================================
// HeaderScanLookupBuilder
// ==========================================
pub struct HeaderScanLookupBuilder;

impl LookupBuilder for HeaderScanLookupBuilder {
    fn build(&self, table: &[Row]) -> Option<MaterialsLookup> {
        let header = table.first()?;
        let (type_col, code_col) = match locate_lookup_columns(header) {
            Some(cols) => cols,
            None => {
                debug!("物料表未找到所需列，查找表为空");
                return None;
            }
        };

        let mut lookup = MaterialsLookup::new();
        let mut duplicates = 0usize;
        for row in table.iter().skip(1) {
            let name = normalize_null(cell_at(row, type_col));
            let code = normalize_null(cell_at(row, code_col));
            if let (Some(name), Some(code)) = (name, code) {
                if !lookup.insert(&name, &code) {
                    duplicates += 1;
                }
            }
        }

        debug!(
            entries = lookup.len(),
            duplicates = duplicates,
            type_col = type_col,
            code_col = code_col,
            "物料查找表构建完成"
        );
        Some(lookup)
    }
}

/// 构建查找表（无辅助表或缺列时为空）
pub fn build_materials_lookup(table: Option<&[Row]>) -> MaterialsLookup {
    table
        .and_then(|t| HeaderScanLookupBuilder.build(t))
        .unwrap_or_default()
}
