// ==========================================
// 配合比导入转换器 - 转换 Trait
// ==========================================
// 职责: 定义转换器 / 字段抽取 / 查找表构建接口（不包含实现）
// ==========================================

use crate::converter::error::ConvertResult;
use crate::converter::materials_lookup::MaterialsLookup;
use crate::domain::conversion::ConversionOutput;
use crate::domain::table::{CellValue, Row, Table};

// ==========================================
// Converter Trait
// ==========================================
// 用途: 每个 (调度系统, 实体类型) 一个实现
// 实现者: MpaqMixConverter, CommandSeriesMixConverter, CommandSeriesMaterialConverter
pub trait Converter: Send + Sync {
    /// 转换器显示名称
    fn name(&self) -> &'static str;

    /// 将源表转换为目标表
    ///
    /// # 参数
    /// - primary: 主表（第 0 行为表头）
    /// - auxiliary: 辅助表列表（如物料表），可为空
    ///
    /// # 返回
    /// - Ok(ConversionOutput): 目标表（含表头）+ 诊断
    /// - Err: EmptyInput / MissingRequiredColumns / NoValidRows
    ///
    /// # 说明
    /// - 纯函数：同样的输入必然得到同样的输出
    /// - 无部分提交：要么返回完整目标表，要么返回错误
    fn convert(&self, primary: &[Row], auxiliary: &[Table]) -> ConvertResult<ConversionOutput>;
}

// ==========================================
// FieldExtractor Trait
// ==========================================
// 用途: 从自由文本单元格中抽取数值
// 实现者: MpaqFieldExtractor
pub trait FieldExtractor: Send + Sync {
    /// 抽取强度（MPa）
    ///
    /// # 返回
    /// - None: 无匹配（不是错误）
    fn strength(&self, name: &CellValue) -> Option<f64>;

    /// 抽取坍落度（mm）
    ///
    /// # 返回
    /// - None: 所有规则均无匹配（不是错误）
    fn slump(&self, slump: &CellValue) -> Option<f64>;
}

// ==========================================
// LookupBuilder Trait
// ==========================================
// 用途: 从辅助表构建物料查找表
// 实现者: HeaderScanLookupBuilder
pub trait LookupBuilder: Send + Sync {
    /// 构建查找表
    ///
    /// # 返回
    /// - Some(MaterialsLookup): 找到所需列（可能为空表）
    /// - None: 未找到所需列，视为配置状态而非错误
    fn build(&self, table: &[Row]) -> Option<MaterialsLookup>;
}
