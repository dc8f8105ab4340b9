// ==========================================
// 配合比导入转换器 - Command Series 转换器
// ==========================================
// 职责: 单趟列投影（无交叉展开，无辅助表查找）
// 流程: 读表头 → 逐行定长投影 → 区间拆分 → 行级排除
// ==========================================

use crate::config::profile::{
    material_columns, mix_columns, ProjectionProfile, COMMAND_SERIES_MIX_PROFILE,
    DESTINATION_MATERIAL_HEADER,
};
use crate::converter::cell_cleaner::{equals_ignore_case, quantity_value};
use crate::converter::converter_trait::Converter;
use crate::converter::error::{ConvertError, ConvertResult};
use crate::converter::field_extractor::{extract_strength, unit_for_material_type};
use crate::converter::record_mapper::HeaderIndex;
use crate::domain::conversion::{ConversionOutput, ConversionStats, Diagnostic};
use crate::domain::table::{header_row, CellValue, Row, Table};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

lazy_static! {
    // 严格的 "数字 - 数字"
    static ref RANGE_PATTERN: Regex =
        Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)\s*$").unwrap();
}

/// 被排除的占位物料标记
const AIR_MARKER: &str = "AIR";

/// Command Series 源列名
pub mod command_series_columns {
    // 配合比导出
    pub const PLANT: &str = "Plant";
    pub const MIX_CODE: &str = "Mix Code";
    pub const DESCRIPTION: &str = "Description";
    pub const STRENGTH: &str = "Strength";
    pub const SLUMP: &str = "Slump";
    pub const AIR: &str = "Air";
    pub const ITEM_CODE: &str = "Item Code";
    pub const ITEM_DESCRIPTION: &str = "Item Description";
    pub const QUANTITY: &str = "Quantity";
    pub const UNIT: &str = "Unit";

    // 物料导出（另含 ITEM_CODE / DESCRIPTION / UNIT）
    pub const SHORT_DESCRIPTION: &str = "Short Description";
    pub const CATEGORY: &str = "Category";
    pub const MATERIAL_TYPE: &str = "Material Type";
    pub const SPECIFIC_GRAVITY: &str = "Specific Gravity";
}

/// 区间拆分："10-20" → (10, 20)；不符合严格格式时两端均为空
pub fn split_range(value: &CellValue) -> (CellValue, CellValue) {
    let text = value.as_text();
    match RANGE_PATTERN.captures(&text) {
        Some(caps) => {
            let min = caps[1].parse::<f64>().ok();
            let max = caps[2].parse::<f64>().ok();
            (CellValue::from(min), CellValue::from(max))
        }
        None => (CellValue::Empty, CellValue::Empty),
    }
}

/// 单值：纯数字时返回数字，否则为空
fn single_value(value: &CellValue) -> CellValue {
    CellValue::from(value.as_number())
}

/// 通用前置校验：非空 + 必需列
fn read_header(primary: &[Row], required: &str) -> ConvertResult<HeaderIndex> {
    let header_row = primary.first().ok_or(ConvertError::EmptyInput)?;
    let header = HeaderIndex::from_header(header_row);
    let missing = header.missing(&[required]);
    if !missing.is_empty() {
        return Err(ConvertError::MissingRequiredColumns { missing });
    }
    Ok(header)
}

/// 组装输出（无有效行即失败）
fn finish(
    name: &str,
    table: Table,
    source_rows: usize,
) -> ConvertResult<ConversionOutput> {
    let output_rows = table.len() - 1;
    if output_rows == 0 {
        return Err(ConvertError::NoValidRows);
    }

    let mut diagnostics = Vec::new();
    let skipped = source_rows - output_rows;
    if skipped > 0 {
        diagnostics.push(Diagnostic::RowsSkipped { count: skipped });
    }

    info!(
        converter = name,
        source_rows = source_rows,
        output_rows = output_rows,
        skipped = skipped,
        "列投影转换完成"
    );

    Ok(ConversionOutput {
        table,
        diagnostics,
        stats: ConversionStats {
            source_rows,
            valid_rows: output_rows,
            output_rows,
        },
    })
}

// ==========================================
// CommandSeriesMixConverter
// ==========================================
pub struct CommandSeriesMixConverter {
    profile: ProjectionProfile,
}

impl Default for CommandSeriesMixConverter {
    fn default() -> Self {
        Self {
            profile: COMMAND_SERIES_MIX_PROFILE,
        }
    }
}

impl CommandSeriesMixConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 排除规则：Item Code 与 Item Description 均为 AIR
    fn is_excluded(header: &HeaderIndex, row: &[CellValue]) -> bool {
        use command_series_columns::*;
        equals_ignore_case(&header.value(row, ITEM_CODE), AIR_MARKER)
            && equals_ignore_case(&header.value(row, ITEM_DESCRIPTION), AIR_MARKER)
    }

    fn project(&self, header: &HeaderIndex, row: &[CellValue]) -> Row {
        use command_series_columns::*;

        let mut out = vec![CellValue::Empty; self.profile.column_count()];
        let slump = header.value(row, SLUMP);
        let air = header.value(row, AIR);
        let (min_slump, max_slump) = split_range(&slump);
        let (min_air, max_air) = split_range(&air);

        out[mix_columns::PLANT_CODE] = CellValue::from(header.value(row, PLANT).trimmed_text());
        out[mix_columns::MIX_NAME] = CellValue::from(header.value(row, MIX_CODE).trimmed_text());
        out[mix_columns::DESCRIPTION] = header.value(row, DESCRIPTION);
        out[mix_columns::ITEM_CATEGORY] = CellValue::from(self.profile.item_category);
        out[mix_columns::STRENGTH_AGE] = CellValue::Number(self.profile.strength_age_days);
        out[mix_columns::STRENGTH_MPA] = CellValue::from(extract_strength(&header.value(row, STRENGTH)));
        out[mix_columns::DESIGN_AIR] = single_value(&air);
        out[mix_columns::MIN_AIR] = min_air;
        out[mix_columns::MAX_AIR] = max_air;
        out[mix_columns::DESIGN_SLUMP] = single_value(&slump);
        out[mix_columns::MIN_SLUMP] = min_slump;
        out[mix_columns::MAX_SLUMP] = max_slump;
        out[mix_columns::DISPATCH_SLUMP_RANGE] = CellValue::from(slump.trimmed_text());
        out[mix_columns::DISPATCH] = CellValue::from(self.profile.dispatch_flag);
        out[mix_columns::CONSTITUENT_ITEM_CODE] =
            CellValue::from(header.value(row, ITEM_CODE).trimmed_text());
        out[mix_columns::CONSTITUENT_ITEM_DESCRIPTION] = header.value(row, ITEM_DESCRIPTION);
        out[mix_columns::QUANTITY] = quantity_value(&header.value(row, QUANTITY));
        out[mix_columns::UNIT_NAME] = CellValue::from(header.value(row, UNIT).trimmed_text());

        out
    }
}

impl Converter for CommandSeriesMixConverter {
    fn name(&self) -> &'static str {
        "Command Series Mixes"
    }

    fn convert(&self, primary: &[Row], _auxiliary: &[Table]) -> ConvertResult<ConversionOutput> {
        let header = read_header(primary, command_series_columns::MIX_CODE)?;

        let mut table: Table = vec![self.profile.header_row()];
        for row in primary.iter().skip(1) {
            if header.value(row, command_series_columns::MIX_CODE).is_blank() {
                continue;
            }
            if Self::is_excluded(&header, row) {
                debug!("跳过 AIR 占位行");
                continue;
            }
            table.push(self.project(&header, row));
        }

        finish(self.name(), table, primary.len() - 1)
    }
}

// ==========================================
// CommandSeriesMaterialConverter
// ==========================================
pub struct CommandSeriesMaterialConverter;

impl CommandSeriesMaterialConverter {
    /// 排除规则：Item Code 与 Material Type 均为 AIR
    fn is_excluded(header: &HeaderIndex, row: &[CellValue]) -> bool {
        use command_series_columns::*;
        equals_ignore_case(&header.value(row, ITEM_CODE), AIR_MARKER)
            && equals_ignore_case(&header.value(row, MATERIAL_TYPE), AIR_MARKER)
    }

    fn project(header: &HeaderIndex, row: &[CellValue]) -> Row {
        use command_series_columns::*;

        let mut out = vec![CellValue::Empty; DESTINATION_MATERIAL_HEADER.len()];
        let item_code = header.value(row, ITEM_CODE).trimmed_text();
        let material_type = header.value(row, MATERIAL_TYPE).trimmed_text();
        let unit = header.value(row, UNIT).trimmed_text();
        let unit = if unit.is_empty() {
            unit_for_material_type(&material_type).to_string()
        } else {
            unit
        };

        out[material_columns::ITEM_CODE] = CellValue::from(item_code.as_str());
        out[material_columns::ITEM_DESCRIPTION] = header.value(row, DESCRIPTION);
        out[material_columns::SHORT_DESCRIPTION] = header.value(row, SHORT_DESCRIPTION);
        out[material_columns::ITEM_CATEGORY] = header.value(row, CATEGORY);
        out[material_columns::MATERIAL_TYPE] = CellValue::from(material_type);
        out[material_columns::UNIT_NAME] = CellValue::from(unit);
        out[material_columns::SPECIFIC_GRAVITY] = quantity_value(&header.value(row, SPECIFIC_GRAVITY));
        out[material_columns::PRODUCTION_ITEM_CODE] = CellValue::from(item_code);

        out
    }
}

impl Converter for CommandSeriesMaterialConverter {
    fn name(&self) -> &'static str {
        "Command Series Materials"
    }

    fn convert(&self, primary: &[Row], _auxiliary: &[Table]) -> ConvertResult<ConversionOutput> {
        let header = read_header(primary, command_series_columns::ITEM_CODE)?;

        let mut table: Table = vec![header_row(&DESTINATION_MATERIAL_HEADER)];
        for row in primary.iter().skip(1) {
            if header.value(row, command_series_columns::ITEM_CODE).is_blank()
                || Self::is_excluded(&header, row)
            {
                continue;
            }
            table.push(Self::project(&header, row));
        }

        finish(self.name(), table, primary.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Row {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn test_split_range() {
        assert_eq!(
            split_range(&CellValue::from("10-20")),
            (CellValue::Number(10.0), CellValue::Number(20.0))
        );
        assert_eq!(
            split_range(&CellValue::from(" 4.5 - 7.5 ")),
            (CellValue::Number(4.5), CellValue::Number(7.5))
        );
        assert_eq!(
            split_range(&CellValue::from("10 to 20")),
            (CellValue::Empty, CellValue::Empty)
        );
        assert_eq!(
            split_range(&CellValue::from("10-20mm")),
            (CellValue::Empty, CellValue::Empty)
        );
        assert_eq!(
            split_range(&CellValue::Number(80.0)),
            (CellValue::Empty, CellValue::Empty)
        );
    }

    #[test]
    fn test_mix_projection_and_air_exclusion() {
        let primary = vec![
            row(&[
                "Plant", "Mix Code", "Description", "Strength", "Slump", "Air", "Item Code",
                "Item Description", "Quantity", "Unit",
            ]),
            row(&[
                "01", "CS32", "32 MPa Pump", "32", "75-125", "4-7", "GP", "Cement", "350", "kg",
            ]),
            row(&["01", "CS32", "32 MPa Pump", "32", "75-125", "4-7", " air ", "Air", "", ""]),
            row(&["01", "CS32", "32 MPa Pump", "32", "100", "", "AIR", "Air Entrainer", "50", "mL"]),
        ];

        let output = CommandSeriesMixConverter::new().convert(&primary, &[]).unwrap();
        let rows = output.data_rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(output.table[0].len(), 25);
        assert_eq!(rows[0][mix_columns::STRENGTH_MPA], CellValue::Number(32.0));
        assert_eq!(rows[0][mix_columns::MIN_SLUMP], CellValue::Number(75.0));
        assert_eq!(rows[0][mix_columns::MAX_SLUMP], CellValue::Number(125.0));
        assert_eq!(rows[0][mix_columns::DESIGN_SLUMP], CellValue::Empty);
        assert_eq!(rows[0][mix_columns::DISPATCH_SLUMP_RANGE], CellValue::from("75-125"));
        assert_eq!(rows[0][mix_columns::MIN_AIR], CellValue::Number(4.0));
        assert_eq!(rows[0][mix_columns::QUANTITY], CellValue::Number(350.0));
        assert_eq!(rows[1][mix_columns::DESIGN_SLUMP], CellValue::Number(100.0));
        assert_eq!(rows[1][mix_columns::CONSTITUENT_ITEM_CODE], CellValue::from("AIR"));
        assert_eq!(output.diagnostics, vec![Diagnostic::RowsSkipped { count: 1 }]);
    }

    #[test]
    fn test_mix_missing_mix_code_column() {
        let primary = vec![row(&["Plant", "Item Code"]), row(&["01", "GP"])];
        let result = CommandSeriesMixConverter::new().convert(&primary, &[]);
        assert!(matches!(
            result,
            Err(ConvertError::MissingRequiredColumns { .. })
        ));
    }

    #[test]
    fn test_mix_all_rows_excluded() {
        let primary = vec![
            row(&["Mix Code", "Item Code", "Item Description"]),
            row(&["CS32", "AIR", "AIR"]),
        ];
        let result = CommandSeriesMixConverter::new().convert(&primary, &[]);
        assert_eq!(result, Err(ConvertError::NoValidRows));
    }

    #[test]
    fn test_material_projection() {
        let primary = vec![
            row(&[
                "Item Code", "Description", "Short Description", "Category", "Material Type",
                "Unit", "Specific Gravity",
            ]),
            row(&["GP01", "GP Cement", "GP", "Cementitious", "Cement", "", "3.15"]),
            row(&["AIR", "Entrapped air", "", "", "air", "", ""]),
            row(&["", "Orphan", "", "", "", "", ""]),
        ];

        let output = CommandSeriesMaterialConverter.convert(&primary, &[]).unwrap();
        let rows = output.data_rows();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][material_columns::UNIT_NAME], CellValue::from("kg/m^3"));
        assert_eq!(rows[0][material_columns::SPECIFIC_GRAVITY], CellValue::Number(3.15));
        assert_eq!(
            rows[0][material_columns::PRODUCTION_ITEM_CODE],
            CellValue::from("GP01")
        );
        assert_eq!(output.stats.source_rows, 3);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            CommandSeriesMaterialConverter.convert(&[], &[]),
            Err(ConvertError::EmptyInput)
        );
    }
}
