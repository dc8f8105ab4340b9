// ==========================================
// MPAQ 配合比转换器 集成测试
// ==========================================
// 测试目标: 过滤 → 抽取 → 厂站×组分展开 → 物料号解析 全流程
// ==========================================


use mix_import_converter::config::{mix_columns, DESTINATION_MIX_HEADER, MPAQ_MIX_PROFILE};
use mix_import_converter::converter::{
    Converter, ConvertError, FieldExtractor, HeaderScanLookupBuilder, MpaqMixConverter,
};
use mix_import_converter::domain::header_row;
use mix_import_converter::{logging, CellValue, Diagnostic, Table};
use test_helpers::{column, full_mix_header, materials_table, table, water_only_mix_table};

const PLANTS: [&str; 5] = ["01", "02", "03", "05", "06"];

/// 含 1 个零用量骨料槽位的完整配合比
fn full_mix_table() -> Table {
    let header = full_mix_header();
    table(
        &header,
        &[&[
            "M1", "32 MPa Pump", "175", "EXT-1", "5.5", "Slump '80'mm", "A10", "20mm Stone", "1000",
            "A11", "Sand", "0", "C1", "Cement", "320", "C2", "Fly Ash", "80", "AD1", "WR", "400",
        ]],
    )
}

fn text(value: &str) -> CellValue {
    CellValue::from(value)
}

// ==========================================
// 场景测试
// ==========================================

#[test]
fn test_water_only_scenario() {
    logging::init_test();

    let primary = water_only_mix_table(&[&["M1", "30 MPA", "180", "Slump 90mm"]]);
    let output = MpaqMixConverter::new().convert(&primary, &[]).unwrap();

    assert_eq!(output.table.len(), 6);
    assert_eq!(output.table[0], header_row(&DESTINATION_MIX_HEADER));

    for (row, plant) in output.data_rows().iter().zip(PLANTS) {
        assert_eq!(row.len(), 25);
        assert_eq!(row[mix_columns::PLANT_CODE], text(plant));
        assert_eq!(row[mix_columns::MIX_NAME], text("M1"));
        assert_eq!(row[mix_columns::STRENGTH_MPA], CellValue::Number(30.0));
        assert_eq!(row[mix_columns::DESIGN_SLUMP], CellValue::Number(90.0));
        assert_eq!(row[mix_columns::CONSTITUENT_ITEM_CODE], text("WATER"));
        assert_eq!(row[mix_columns::QUANTITY], CellValue::Number(180.0));
        assert_eq!(row[mix_columns::UNIT_NAME], text("L"));
    }
}

#[test]
fn test_plant_fan_out_rows_identical_except_plant() {
    let primary = water_only_mix_table(&[&["M7", "25 MPA", "160", "100"]]);
    let output = MpaqMixConverter::new().convert(&primary, &[]).unwrap();
    let rows = output.data_rows();

    assert_eq!(column(&output.table, mix_columns::PLANT_CODE), PLANTS.map(text).to_vec());
    for row in rows {
        assert_eq!(row[1..], rows[0][1..]);
    }
}

#[test]
fn test_full_mix_expansion_and_lookup() {
    let primary = full_mix_table();
    let materials = materials_table(&[
        ("Cement", "GP-CEM"),
        ("Cement", "GP-DUP"),
        ("20mm Stone", "AGG20"),
    ]);

    let output = MpaqMixConverter::new().convert(&primary, &[materials]).unwrap();
    let rows = output.data_rows();

    // 4 个有效槽位 + 水 = 5 组分，× 5 厂站
    assert_eq!(rows.len(), 25);
    assert_eq!(output.stats.output_rows, 25);
    assert_eq!(output.stats.valid_rows, 1);

    let first_plant: Vec<&str> = rows[..5]
        .iter()
        .map(|r| match &r[mix_columns::CONSTITUENT_ITEM_CODE] {
            CellValue::Text(s) => s.as_str(),
            _ => "",
        })
        .collect();
    // 首次出现的 Cement 优先；Fly Ash / WR 回退原始物料号
    assert_eq!(first_plant, vec!["AGG20", "GP-CEM", "C2", "AD1", "WATER"]);

    let units: Vec<CellValue> = rows[..5].iter().map(|r| r[mix_columns::UNIT_NAME].clone()).collect();
    assert_eq!(
        units,
        vec![text("kg/m^3"), text("kg/m^3"), text("kg/m^3"), text("mL/100kg CM"), text("L")]
    );

    let row = &rows[0];
    assert_eq!(row[mix_columns::DESCRIPTION], text("32 MPa Pump"));
    assert_eq!(row[mix_columns::SHORT_DESCRIPTION], text("EXT-1"));
    assert_eq!(row[mix_columns::STRENGTH_MPA], CellValue::Number(32.0));
    assert_eq!(row[mix_columns::DESIGN_SLUMP], CellValue::Number(80.0));
    assert_eq!(row[mix_columns::DESIGN_AIR], CellValue::Number(5.5));
    assert_eq!(row[mix_columns::STRENGTH_AGE], CellValue::Number(28.0));
    assert_eq!(row[mix_columns::CONSTITUENT_ITEM_DESCRIPTION], text("20mm Stone"));
    assert_eq!(row[mix_columns::QUANTITY], CellValue::Number(1000.0));
}

#[test]
fn test_plant_groups_are_contiguous() {
    let primary = full_mix_table();
    let output = MpaqMixConverter::new().convert(&primary, &[]).unwrap();

    let plants = column(&output.table, mix_columns::PLANT_CODE);
    for (idx, plant) in PLANTS.iter().enumerate() {
        let group = &plants[idx * 5..idx * 5 + 5];
        assert!(group.iter().all(|p| *p == text(plant)));
    }
}

#[test]
fn test_unresolved_diagnostics_deduplicated_across_plants() {
    let primary = full_mix_table();
    let materials = materials_table(&[("Cement", "GP-CEM"), ("20mm Stone", "AGG20")]);

    let output = MpaqMixConverter::new().convert(&primary, &[materials]).unwrap();

    assert_eq!(output.unresolved_count(), 3);
    assert!(output.diagnostics.contains(&Diagnostic::UnresolvedMaterial {
        mix_id: "M1".to_string(),
        material_id: "C2".to_string(),
        material_name: "Fly Ash".to_string(),
    }));
}

#[test]
fn test_lookup_fallback_without_materials_table() {
    let primary = full_mix_table();
    let output = MpaqMixConverter::new().convert(&primary, &[]).unwrap();

    let codes = column(&output.table, mix_columns::CONSTITUENT_ITEM_CODE);
    assert_eq!(codes[..5], [text("A10"), text("C1"), text("C2"), text("AD1"), text("WATER")]);
    assert!(!output.diagnostics.contains(&Diagnostic::MaterialsLookupUnavailable));
}

#[test]
fn test_materials_table_without_lookup_columns() {
    let primary = full_mix_table();
    let materials = table(&["Name", "Code"], &[&["Cement", "GP-CEM"]]);

    let output = MpaqMixConverter::new().convert(&primary, &[materials]).unwrap();

    assert!(output.diagnostics.contains(&Diagnostic::MaterialsLookupUnavailable));
    assert_eq!(output.data_rows()[1][mix_columns::CONSTITUENT_ITEM_CODE], text("C1"));
}

// ==========================================
// 过滤规则
// ==========================================

#[test]
fn test_filter_excludes_zero_or_empty_water() {
    let primary = table(
        &["MixId", "Name", "WaterTarget"],
        &[
            &["ZERO", "20 MPA", "0"],
            &["EMPTY", "20 MPA", ""],
            &["OK", "20 MPA", "150"],
            &["MISSING", "20 MPA"],
            &["DECIMAL_ZERO", "20 MPA", "0.0"],
        ],
    );

    let output = MpaqMixConverter::new().convert(&primary, &[]).unwrap();

    let names = column(&output.table, mix_columns::MIX_NAME);
    assert_eq!(names.len(), 5);
    assert!(names.iter().all(|n| *n == text("OK")));
    assert!(output.diagnostics.contains(&Diagnostic::RowsSkipped { count: 4 }));
    assert_eq!(output.stats.source_rows, 5);
}

#[test]
fn test_row_count_law() {
    let mut header = full_mix_header();
    header.truncate(9);
    // MixId, Name, WaterTarget, ExternalId, AirFactor, Slump, Agg1Id, Agg1Name, Agg1Target
    let primary = table(
        &header,
        &[
            &["M1", "20", "150", "", "", "", "A1", "Stone", "900"],
            &["M2", "25", "160", "", "", "", "", "", ""],
            &["M3", "30", "0", "", "", "", "A1", "Stone", "900"],
        ],
    );

    let output = MpaqMixConverter::new().convert(&primary, &[]).unwrap();

    // M1: 2 组分，M2: 1 组分，M3 被过滤
    assert_eq!(output.data_rows().len(), 5 * 2 + 5);
    assert_eq!(output.stats.valid_rows, 2);
}

// ==========================================
// 纯函数 / 错误
// ==========================================

#[test]
fn test_conversion_is_deterministic() {
    let primary = full_mix_table();
    let materials = materials_table(&[("Cement", "GP-CEM")]);
    let converter = MpaqMixConverter::new();

    let first = converter.convert(&primary, &[materials.clone()]).unwrap();
    let second = converter.convert(&primary, &[materials]).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_input() {
    let result = MpaqMixConverter::new().convert(&[], &[]);
    assert_eq!(result, Err(ConvertError::EmptyInput));
}

#[test]
fn test_missing_required_columns() {
    let primary = table(&["MixId", "WaterTarget"], &[&["M1", "150"]]);
    let result = MpaqMixConverter::new().convert(&primary, &[]);
    assert_eq!(
        result,
        Err(ConvertError::MissingRequiredColumns {
            missing: vec!["Name".to_string()]
        })
    );
}

#[test]
fn test_no_valid_rows() {
    let primary = water_only_mix_table(&[&["M1", "30 MPA", "0", ""], &["M2", "30 MPA", "", ""]]);
    let result = MpaqMixConverter::new().convert(&primary, &[]);
    assert_eq!(result, Err(ConvertError::NoValidRows));

    // 缺少 WaterTarget 列时所有行均不合格
    let primary = table(&["MixId", "Name"], &[&["M1", "30 MPA"]]);
    let result = MpaqMixConverter::new().convert(&primary, &[]);
    assert_eq!(result, Err(ConvertError::NoValidRows));
}

// ==========================================
// 自定义抽取器（同一管道形态）
// ==========================================

struct FixedExtractor;

impl FieldExtractor for FixedExtractor {
    fn strength(&self, _name: &CellValue) -> Option<f64> {
        Some(40.0)
    }

    fn slump(&self, _slump: &CellValue) -> Option<f64> {
        None
    }
}

#[test]
fn test_custom_extractor_and_profile() {
    let mut profile = MPAQ_MIX_PROFILE;
    profile.plant_codes = &["10", "20"];

    let converter = MpaqMixConverter::with_components(
        profile,
        Box::new(FixedExtractor),
        Box::new(HeaderScanLookupBuilder),
    );
    let primary = water_only_mix_table(&[&["M1", "Special Mix", "180", "Slump 90mm"]]);
    let output = converter.convert(&primary, &[]).unwrap();

    assert_eq!(output.data_rows().len(), 2);
    assert_eq!(output.data_rows()[0][mix_columns::STRENGTH_MPA], CellValue::Number(40.0));
    assert_eq!(output.data_rows()[1][mix_columns::DESIGN_SLUMP], CellValue::Empty);
    assert_eq!(output.data_rows()[1][mix_columns::PLANT_CODE], text("20"));
}

// ==========================================
// 源单元格原值保留
// ==========================================

#[test]
fn test_numeric_item_code_fallback_unchanged() {
    let mut primary = table(
        &["MixId", "Name", "WaterTarget", "Agg1Id", "Agg1Name", "Agg1Target"],
        &[&["M1", "30 MPA", "180", "", "Stone", "900"]],
    );
    primary[1][3] = CellValue::Number(4001.0);

    let output = MpaqMixConverter::new().convert(&primary, &[]).unwrap();

    let codes = column(&output.table, mix_columns::CONSTITUENT_ITEM_CODE);
    assert_eq!(codes[..2], [CellValue::Number(4001.0), text("WATER")]);
}

#[test]
fn test_decimal_zero_slot_target_is_not_excluded() {
    let primary = table(
        &["MixId", "Name", "WaterTarget", "Agg1Id", "Agg1Name", "Agg1Target"],
        &[&["M1", "30 MPA", "180", "A1", "Stone", "0.0"]],
    );

    let output = MpaqMixConverter::new().convert(&primary, &[]).unwrap();

    // 骨料 + 水 = 2 组分，× 5 厂站
    assert_eq!(output.data_rows().len(), 10);
    assert_eq!(output.data_rows()[0][mix_columns::CONSTITUENT_ITEM_CODE], text("A1"));
    assert_eq!(output.data_rows()[0][mix_columns::QUANTITY], CellValue::Number(0.0));
}
