// ==========================================
// 配合比导入转换器 - 记录映射器
// ==========================================
// 职责: 源表头 → 列号索引；源行 → SourceMixRecord
// 红线: 列定位在解析期完成，后续只访问命名字段
// ==========================================

use crate::config::profile::MixProfile;
use crate::domain::mix::{MaterialBlock, SourceMixRecord};
use crate::domain::table::{cell_at, CellValue};
use std::collections::HashMap;

/// MPAQ 源列名
pub mod source_columns {
    pub const MIX_ID: &str = "MixId";
    pub const NAME: &str = "Name";
    pub const WATER_TARGET: &str = "WaterTarget";
    pub const EXTERNAL_ID: &str = "ExternalId";
    pub const AIR_FACTOR: &str = "AirFactor";
    pub const SLUMP: &str = "Slump";

    // 物料槽位列前缀：{prefix}{n}Id / {prefix}{n}Name / {prefix}{n}Target
    pub const AGGREGATE_PREFIX: &str = "Agg";
    pub const CEMENT_PREFIX: &str = "Cem";
    pub const ADMIXTURE_PREFIX: &str = "Adm";

    /// 必需列（缺失即致命）
    pub const REQUIRED: [&str; 2] = [MIX_ID, NAME];
}

// ==========================================
// HeaderIndex - 表头列号索引
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    /// 由表头行构建（表头去空白；重名时后出现的列覆盖前者）
    pub fn from_header(header: &[CellValue]) -> Self {
        let mut columns = HashMap::new();
        for (idx, cell) in header.iter().enumerate() {
            let name = cell.trimmed_text();
            if !name.is_empty() {
                columns.insert(name, idx);
            }
        }
        Self { columns }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// 按列名取值，列不存在时返回 Empty
    pub fn value(&self, row: &[CellValue], name: &str) -> CellValue {
        match self.index_of(name) {
            Some(idx) => cell_at(row, idx).clone(),
            None => CellValue::Empty,
        }
    }

    /// 返回缺失的列名（保持入参顺序）
    pub fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect()
    }
}

// ==========================================
// MixRecordMapper - 源行映射
// ==========================================
pub struct MixRecordMapper<'a> {
    profile: &'a MixProfile,
}

impl<'a> MixRecordMapper<'a> {
    pub fn new(profile: &'a MixProfile) -> Self {
        Self { profile }
    }

    /// 将源行映射为 SourceMixRecord
    ///
    /// # 参数
    /// - header: 源表头索引
    /// - row: 源数据行
    /// - row_number: 源表行号（表头为第 1 行）
    pub fn map_record(
        &self,
        header: &HeaderIndex,
        row: &[CellValue],
        row_number: usize,
    ) -> SourceMixRecord {
        use source_columns::*;

        SourceMixRecord {
            mix_id: header.value(row, MIX_ID),
            name: header.value(row, NAME),
            water_target: header.value(row, WATER_TARGET),
            external_id: header.value(row, EXTERNAL_ID),
            air_factor: header.value(row, AIR_FACTOR),
            slump: header.value(row, SLUMP),
            aggregates: self.map_blocks(header, row, AGGREGATE_PREFIX, self.profile.aggregate_slots),
            cements: self.map_blocks(header, row, CEMENT_PREFIX, self.profile.cement_slots),
            admixtures: self.map_blocks(header, row, ADMIXTURE_PREFIX, self.profile.admixture_slots),
            row_number,
        }
    }

    fn map_blocks(
        &self,
        header: &HeaderIndex,
        row: &[CellValue],
        prefix: &str,
        slots: usize,
    ) -> Vec<MaterialBlock> {
        (1..=slots)
            .map(|slot| MaterialBlock {
                slot,
                id: header.value(row, &format!("{}{}Id", prefix, slot)),
                name: header.value(row, &format!("{}{}Name", prefix, slot)),
                target: header.value(row, &format!("{}{}Target", prefix, slot)),
            })
            .collect()
    }
}
