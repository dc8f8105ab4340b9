// ==========================================
// 配合比导入转换器 - 转换层
// ==========================================
// 职责: 源表 → 目标导入表
// 组成: 字段抽取 / 单元格清洗 / 记录映射 / 物料查找 / 转换器 / 注册表
// ==========================================

// 模块声明
pub mod cell_cleaner;
pub mod command_series;
pub mod converter_trait;
pub mod error;
pub mod field_extractor;
pub mod materials_lookup;
pub mod mpaq_mix;
pub mod record_mapper;
pub mod registry;

// 重导出核心类型
pub use command_series::{split_range, CommandSeriesMaterialConverter, CommandSeriesMixConverter};
pub use error::{ConvertError, ConvertResult};
pub use field_extractor::{extract_slump, extract_strength, unit_for_material_type, MpaqFieldExtractor};
pub use materials_lookup::{build_materials_lookup, HeaderScanLookupBuilder, MaterialsLookup};
pub use mpaq_mix::MpaqMixConverter;
pub use record_mapper::{HeaderIndex, MixRecordMapper};
pub use registry::ConverterRegistry;

// 重导出 Trait 接口
pub use converter_trait::{Converter, FieldExtractor, LookupBuilder};
