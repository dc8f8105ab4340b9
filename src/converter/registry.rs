// ==========================================
// 配合比导入转换器 - 转换器注册表
// ==========================================
// 职责: (调度系统, 实体类型) → 转换器
// 红线: 未注册组合在转换前即失败，不尝试转换
// ==========================================

use crate::converter::command_series::{CommandSeriesMaterialConverter, CommandSeriesMixConverter};
use crate::converter::converter_trait::Converter;
use crate::converter::error::{ConvertError, ConvertResult};
use crate::converter::mpaq_mix::MpaqMixConverter;
use crate::domain::conversion::ConversionOutput;
use crate::domain::table::{Row, Table};
use crate::domain::types::{DispatchSystem, EntityType};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

pub struct ConverterRegistry {
    converters: BTreeMap<(DispatchSystem, EntityType), Box<dyn Converter>>,
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ConverterRegistry {
    /// 空注册表
    pub fn new() -> Self {
        Self {
            converters: BTreeMap::new(),
        }
    }

    /// 注册全部内置转换器
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            DispatchSystem::Mpaq,
            EntityType::Mixes,
            Box::new(MpaqMixConverter::new()),
        );
        registry.register(
            DispatchSystem::CommandSeries,
            EntityType::Mixes,
            Box::new(CommandSeriesMixConverter::new()),
        );
        registry.register(
            DispatchSystem::CommandSeries,
            EntityType::Materials,
            Box::new(CommandSeriesMaterialConverter),
        );
        registry
    }

    /// 注册（同键覆盖）
    pub fn register(
        &mut self,
        system: DispatchSystem,
        entity: EntityType,
        converter: Box<dyn Converter>,
    ) {
        self.converters.insert((system, entity), converter);
    }

    /// 获取转换器
    pub fn get(&self, system: DispatchSystem, entity: EntityType) -> ConvertResult<&dyn Converter> {
        self.converters
            .get(&(system, entity))
            .map(|c| c.as_ref())
            .ok_or(ConvertError::UnimplementedFormat { system, entity })
    }

    /// 按界面名称获取转换器
    pub fn get_by_name(&self, system: &str, entity: &str) -> ConvertResult<&dyn Converter> {
        let system = system
            .parse::<DispatchSystem>()
            .map_err(ConvertError::UnknownDispatchSystem)?;
        let entity = entity
            .parse::<EntityType>()
            .map_err(ConvertError::UnknownEntityType)?;
        self.get(system, entity)
    }

    /// 选择并执行转换
    #[instrument(skip(self, primary, auxiliary), fields(rows = primary.len()))]
    pub fn convert(
        &self,
        system: DispatchSystem,
        entity: EntityType,
        primary: &[Row],
        auxiliary: &[Table],
    ) -> ConvertResult<ConversionOutput> {
        let converter = self.get(system, entity)?;
        debug!(converter = converter.name(), "已选择转换器");
        converter.convert(primary, auxiliary)
    }

    /// 已实现的组合（有序）
    pub fn available(&self) -> Vec<(DispatchSystem, EntityType)> {
        self.converters.keys().copied().collect()
    }

    pub fn is_implemented(&self, system: DispatchSystem, entity: EntityType) -> bool {
        self.converters.contains_key(&(system, entity))
    }
}
