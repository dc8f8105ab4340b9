// ==========================================
// 配合比导入转换器 - 字段抽取器实现
// ==========================================
// 职责: 强度 / 坍落度 / 单位 抽取
// 红线: 坍落度规则顺序固定，裸数字规则必须最后尝试
// ==========================================

use crate::converter::converter_trait::FieldExtractor;
use crate::domain::mix::MaterialType;
use crate::domain::table::CellValue;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 名称开头的数字（可带一个小数点）
    static ref STRENGTH_PREFIX: Regex = Regex::new(r"^\d*\.?\d*").unwrap();
    // 规则 a: 'NN'mm
    static ref SLUMP_QUOTED_MM: Regex = Regex::new(r"'(\d+)'mm").unwrap();
    // 规则 b: Slump NNmm（不区分大小写）
    static ref SLUMP_WORD_MM: Regex = Regex::new(r"(?i)Slump\s+(\d+)mm").unwrap();
}

/// 抽取强度（MPa）：名称开头的十进制数
///
/// # 示例
/// - "25 MPA Mix" → Some(25.0)
/// - "Special Mix" → None
pub fn extract_strength(name: &CellValue) -> Option<f64> {
    let text = name.as_text();
    let matched = STRENGTH_PREFIX.find(&text)?.as_str();
    if matched.is_empty() {
        return None;
    }
    matched.parse::<f64>().ok()
}

/// 抽取坍落度（mm）
///
/// # 规则（按顺序，首个命中即返回）
/// 1. 'NN'mm
/// 2. Slump NNmm（不区分大小写）
/// 3. 整段去空白文本作为裸数字
pub fn extract_slump(slump: &CellValue) -> Option<f64> {
    if let CellValue::Number(n) = slump {
        return Some(*n).filter(|n| n.is_finite());
    }

    let text = slump.as_text();

    if let Some(caps) = SLUMP_QUOTED_MM.captures(&text) {
        if let Ok(v) = caps[1].parse::<f64>() {
            return Some(v);
        }
    }

    if let Some(caps) = SLUMP_WORD_MM.captures(&text) {
        if let Ok(v) = caps[1].parse::<f64>() {
            return Some(v);
        }
    }

    slump.as_number()
}

/// 物料类型名称 → 单位名称，未知类型返回空字符串
pub fn unit_for_material_type(material_type: &str) -> &'static str {
    material_type
        .parse::<MaterialType>()
        .map(|t| t.unit_name())
        .unwrap_or("")
}

// ==========================================
// MpaqFieldExtractor
// ==========================================
pub struct MpaqFieldExtractor;

impl FieldExtractor for MpaqFieldExtractor {
    fn strength(&self, name: &CellValue) -> Option<f64> {
        extract_strength(name)
    }

    fn slump(&self, slump: &CellValue) -> Option<f64> {
        extract_slump(slump)
    }
}
