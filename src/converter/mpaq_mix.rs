// ==========================================
// 配合比导入转换器 - MPAQ 配合比转换器
// ==========================================
// 流程: 查找表 → 记录映射 → 过滤 → 抽取 → 组分派生 → 厂站×组分展开 → 物料号解析
// 红线: 厂站为外层循环、组分为内层循环（同厂站组分连续）
// 红线: 物料查找未命中回退原始物料号，不中断转换
// ==========================================

use crate::config::profile::{mix_columns, MixProfile, MPAQ_MIX_PROFILE};
use crate::converter::cell_cleaner::{is_empty_cell, is_positive, is_zero_or_empty, quantity_value};
use crate::converter::converter_trait::{Converter, FieldExtractor, LookupBuilder};
use crate::converter::error::{ConvertError, ConvertResult};
use crate::converter::field_extractor::MpaqFieldExtractor;
use crate::converter::materials_lookup::{HeaderScanLookupBuilder, MaterialsLookup};
use crate::converter::record_mapper::{source_columns, HeaderIndex, MixRecordMapper};
use crate::domain::conversion::{ConversionOutput, ConversionStats, Diagnostic};
use crate::domain::mix::{Constituent, MaterialType, SourceMixRecord};
use crate::domain::table::{CellValue, Row, Table};
use std::collections::HashSet;
use tracing::{debug, info, warn};

// ==========================================
// MpaqMixConverter
// ==========================================
pub struct MpaqMixConverter {
    profile: MixProfile,
    extractor: Box<dyn FieldExtractor>,
    lookup_builder: Box<dyn LookupBuilder>,
}

impl Default for MpaqMixConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MpaqMixConverter {
    /// 使用 MPAQ 默认配置创建
    pub fn new() -> Self {
        Self::with_components(
            MPAQ_MIX_PROFILE,
            Box::new(MpaqFieldExtractor),
            Box::new(HeaderScanLookupBuilder),
        )
    }

    /// 使用自定义配置与抽取器创建（同一管道形态的其他厂商）
    pub fn with_components(
        profile: MixProfile,
        extractor: Box<dyn FieldExtractor>,
        lookup_builder: Box<dyn LookupBuilder>,
    ) -> Self {
        Self {
            profile,
            extractor,
            lookup_builder,
        }
    }

    pub fn profile(&self) -> &MixProfile {
        &self.profile
    }

    /// 派生组分
    ///
    /// # 规则
    /// - 按 骨料 1..N → 胶凝材料 1..N → 外加剂 1..N 顺序扫描
    /// - 槽位 Id 非空且 Target 非零非空才计入
    /// - 最后追加一个水组分（WaterTarget 非零非空时）
    pub fn derive_constituents(&self, record: &SourceMixRecord) -> Vec<Constituent> {
        let mut constituents = Vec::new();

        for (material_type, blocks) in record.blocks_in_scan_order() {
            for block in blocks {
                if is_empty_cell(&block.id) || is_zero_or_empty(&block.target) {
                    continue;
                }
                constituents.push(Constituent {
                    material_type,
                    material_id: block.id.clone(),
                    material_name: block.name.as_text(),
                    quantity: quantity_value(&block.target),
                });
            }
        }

        if !is_zero_or_empty(&record.water_target) {
            constituents.push(Constituent {
                material_type: MaterialType::Water,
                material_id: CellValue::from(self.profile.water_material_id),
                material_name: self.profile.water_material_name.to_string(),
                quantity: quantity_value(&record.water_target),
            });
        }

        constituents
    }

    /// 构建查找表，并在辅助表缺列时记录诊断
    fn build_lookup(
        &self,
        auxiliary: &[Table],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> MaterialsLookup {
        match auxiliary.first() {
            None => MaterialsLookup::new(),
            Some(table) => match self.lookup_builder.build(table) {
                Some(lookup) => lookup,
                None => {
                    warn!("物料表缺少所需列，使用原始物料号");
                    diagnostics.push(Diagnostic::MaterialsLookupUnavailable);
                    MaterialsLookup::new()
                }
            },
        }
    }

    /// 构造一行目标数据
    fn destination_row(
        &self,
        record: &SourceMixRecord,
        plant_code: &str,
        constituent: &Constituent,
        item_code: &CellValue,
        strength_mpa: Option<f64>,
        slump_mm: Option<f64>,
    ) -> Row {
        let mut row = vec![CellValue::Empty; self.profile.column_count()];

        row[mix_columns::PLANT_CODE] = CellValue::from(plant_code);
        row[mix_columns::MIX_NAME] = record.mix_id.clone();
        row[mix_columns::DESCRIPTION] = record.name.clone();
        row[mix_columns::SHORT_DESCRIPTION] = record.external_id.clone();
        row[mix_columns::ITEM_CATEGORY] = CellValue::from(self.profile.item_category);
        row[mix_columns::STRENGTH_AGE] = CellValue::Number(self.profile.strength_age_days);
        row[mix_columns::STRENGTH_MPA] = CellValue::from(strength_mpa);
        row[mix_columns::DESIGN_AIR] = quantity_value(&record.air_factor);
        // 坍落度保持毫米值，不换算为英寸
        row[mix_columns::DESIGN_SLUMP] = CellValue::from(slump_mm);
        row[mix_columns::DISPATCH] = CellValue::from(self.profile.dispatch_flag);
        row[mix_columns::CONSTITUENT_ITEM_CODE] = item_code.clone();
        row[mix_columns::CONSTITUENT_ITEM_DESCRIPTION] =
            CellValue::from(constituent.material_name.as_str());
        row[mix_columns::QUANTITY] = constituent.quantity.clone();
        row[mix_columns::UNIT_NAME] = CellValue::from(constituent.material_type.unit_name());

        row
    }
}

impl Converter for MpaqMixConverter {
    fn name(&self) -> &'static str {
        "MPAQ Mixes"
    }

    fn convert(&self, primary: &[Row], auxiliary: &[Table]) -> ConvertResult<ConversionOutput> {
        // === 步骤 1: 输入检查 ===
        let header_row = primary.first().ok_or(ConvertError::EmptyInput)?;

        // === 步骤 2: 物料查找表 ===
        let mut diagnostics = Vec::new();
        let lookup = self.build_lookup(auxiliary, &mut diagnostics);
        debug!(lookup_entries = lookup.len(), "步骤 2: 物料查找表就绪");

        // === 步骤 3: 表头校验 + 记录映射 ===
        let header = HeaderIndex::from_header(header_row);
        let missing = header.missing(&source_columns::REQUIRED);
        if !missing.is_empty() {
            return Err(ConvertError::MissingRequiredColumns { missing });
        }

        let mapper = MixRecordMapper::new(&self.profile);
        let source_rows = primary.len() - 1;
        let records: Vec<SourceMixRecord> = primary
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| mapper.map_record(&header, row, idx + 1))
            .collect();
        debug!(source_rows = source_rows, "步骤 3: 记录映射完成");

        // === 步骤 4: 过滤（WaterTarget > 0）===
        let valid: Vec<&SourceMixRecord> = records
            .iter()
            .filter(|r| is_positive(&r.water_target))
            .collect();
        if valid.is_empty() {
            return Err(ConvertError::NoValidRows);
        }
        let skipped = source_rows - valid.len();
        if skipped > 0 {
            debug!(skipped = skipped, "步骤 4: 已过滤无用水量的行");
            diagnostics.push(Diagnostic::RowsSkipped { count: skipped });
        }

        // === 步骤 5: 抽取 + 展开 + 解析 ===
        let mut table: Table = vec![self.profile.header_row()];
        let mut reported: HashSet<Diagnostic> = HashSet::new();

        for record in valid.iter().copied() {
            let strength_mpa = self.extractor.strength(&record.name);
            let slump_mm = self.extractor.slump(&record.slump);
            let constituents = self.derive_constituents(record);

            // 物料号对每个组分只解析一次；未命中时原样保留源单元格
            let item_codes: Vec<CellValue> = constituents
                .iter()
                .map(|c| match lookup.resolve(&c.material_name) {
                    Some(code) => CellValue::from(code),
                    None => {
                        let diagnostic = Diagnostic::UnresolvedMaterial {
                            mix_id: record.mix_id.trimmed_text(),
                            material_id: c.material_id.as_text(),
                            material_name: c.material_name.trim().to_string(),
                        };
                        if reported.insert(diagnostic.clone()) {
                            warn!(
                                row_number = record.row_number,
                                material_id = %c.material_id,
                                material_name = %c.material_name,
                                "物料未在查找表中找到，回退原始物料号"
                            );
                            diagnostics.push(diagnostic);
                        }
                        c.material_id.clone()
                    }
                })
                .collect();

            for plant_code in self.profile.plant_codes {
                for (constituent, item_code) in constituents.iter().zip(&item_codes) {
                    table.push(self.destination_row(
                        record,
                        plant_code,
                        constituent,
                        item_code,
                        strength_mpa,
                        slump_mm,
                    ));
                }
            }
        }

        // === 步骤 6: 汇总 ===
        let stats = ConversionStats {
            source_rows,
            valid_rows: valid.len(),
            output_rows: table.len() - 1,
        };
        info!(
            converter = self.name(),
            source_rows = stats.source_rows,
            valid_mixes = stats.valid_rows,
            output_rows = stats.output_rows,
            unresolved = reported.len(),
            "配合比转换完成"
        );

        Ok(ConversionOutput {
            table,
            diagnostics,
            stats,
        })
    }
}
