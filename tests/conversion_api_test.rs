// ==========================================
// ConversionApi 集成测试
// ==========================================
// 测试目标: 文件加载 → 转换 → 变换 → 写出 全流程（异步）
// ==========================================


use mix_import_converter::api::ApiError;
use mix_import_converter::codec::UniversalTableReader;
use mix_import_converter::config::mix_columns;
use mix_import_converter::converter::ConvertError;
use mix_import_converter::transform::{ColumnMap, RowPredicate, TransformOp};
use mix_import_converter::{
    logging, AppConfig, CellValue, ConversionApi, ConversionRequest, ConversionService,
    Diagnostic, DispatchSystem, EntityType, TransformProgram,
};
use std::path::Path;
use tempfile::TempDir;
use test_helpers::{column, materials_table, water_only_mix_table, write_csv_file};

fn test_api(output_dir: &Path, also_write_csv: bool) -> ConversionApi {
    ConversionApi::new(AppConfig {
        output_dir: output_dir.to_path_buf(),
        log_filter: "debug".to_string(),
        also_write_csv,
    })
}

fn write_mixes(dir: &Path) -> std::path::PathBuf {
    write_csv_file(
        dir,
        "mixes.csv",
        &[
            &["MixId", "Name", "WaterTarget", "Slump", "Cem1Id", "Cem1Name", "Cem1Target"],
            &["M1", "30 MPA", "180", "Slump 90mm", "C1", "Cement", "320"],
            &["M2", "25 MPA", "0", "", "", "", ""],
        ],
    )
}

fn write_materials(dir: &Path) -> std::path::PathBuf {
    write_csv_file(
        dir,
        "materials.csv",
        &[
            &["Item Code", "Material Type (Required)", "Production Item Code"],
            &["", "Cement", "GP-CEM"],
            &["", "Water", "WTR"],
        ],
    )
}

#[tokio::test]
async fn test_convert_files_with_materials() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let api = test_api(dir.path(), true);
    let request = ConversionRequest::new(DispatchSystem::Mpaq, EntityType::Mixes, write_mixes(dir.path()))
        .with_auxiliary(write_materials(dir.path()));

    let response = api.convert_files(request).await.unwrap();

    assert_eq!(response.output_rows, 10);
    assert_eq!(response.stats.valid_rows, 1);
    assert_eq!(response.diagnostics, vec![Diagnostic::RowsSkipped { count: 1 }]);
    assert!(response.output_path.starts_with(dir.path()));
    assert_eq!(response.output_path.extension().and_then(|e| e.to_str()), Some("xlsx"));
    assert!(!response.run_id.is_empty());

    let csv_path = response.csv_path.clone().unwrap();
    assert!(csv_path.exists());

    let written = UniversalTableReader.read(&response.output_path).unwrap();
    assert_eq!(
        column(&written, mix_columns::CONSTITUENT_ITEM_CODE)[..2],
        [CellValue::from("GP-CEM"), CellValue::from("WTR")]
    );
}

#[tokio::test]
async fn test_convert_files_with_transform_to_csv() {
    let dir = TempDir::new().unwrap();
    let api = test_api(dir.path(), false);
    let program = TransformProgram::new(vec![
        TransformOp::FilterRows {
            column: "Plant Code".to_string(),
            predicate: RowPredicate::Equals {
                value: CellValue::from("01"),
            },
        },
        TransformOp::MapColumn {
            column: "Design Slump (in)".to_string(),
            map: ColumnMap::Scale { factor: 0.5 },
        },
    ]);
    let output = dir.path().join("nested").join("mpaq.csv");
    let request = ConversionRequest::new(DispatchSystem::Mpaq, EntityType::Mixes, write_mixes(dir.path()))
        .with_output(&output)
        .with_transform(program);

    let response = api.convert_files(request).await.unwrap();

    assert_eq!(response.output_path, output);
    assert_eq!(response.csv_path, None);
    // 变换后只保留厂站 01 的 2 个组分
    assert_eq!(response.output_rows, 2);
    assert_eq!(response.stats.output_rows, 10);

    let written = UniversalTableReader.read(&output).unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written[1][mix_columns::DESIGN_SLUMP], CellValue::from("45"));
}

#[tokio::test]
async fn test_unimplemented_pair_does_not_read_files() {
    let dir = TempDir::new().unwrap();
    let api = test_api(dir.path(), false);
    let request = ConversionRequest::new(DispatchSystem::Integra, EntityType::Mixes, "missing.csv");

    let result = api.convert_files(request).await;

    assert!(matches!(
        result,
        Err(ApiError::Convert(ConvertError::UnimplementedFormat { .. }))
    ));
}

#[tokio::test]
async fn test_batch_convert_is_independent_per_job() {
    let dir = TempDir::new().unwrap();
    let api = test_api(dir.path(), false);
    let mixes = write_mixes(dir.path());
    let empty = write_csv_file(dir.path(), "empty.csv", &[&["MixId", "Name", "WaterTarget"]]);

    let results = api
        .batch_convert(vec![
            ConversionRequest::new(DispatchSystem::Mpaq, EntityType::Mixes, &mixes),
            ConversionRequest::new(DispatchSystem::Mpaq, EntityType::Mixes, &empty),
            ConversionRequest::new(DispatchSystem::Mpaq, EntityType::Mixes, dir.path().join("absent.csv")),
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().output_rows, 10);
    assert!(matches!(
        results[1],
        Err(ApiError::Convert(ConvertError::NoValidRows))
    ));
    assert!(matches!(results[2], Err(ApiError::Codec(_))));
}

#[test]
fn test_convert_tables_in_memory() {
    let dir = TempDir::new().unwrap();
    let api = test_api(dir.path(), false);
    let primary = water_only_mix_table(&[&["M1", "30 MPA", "180", "Slump 90mm"]]);
    let materials = materials_table(&[("Water", "WTR")]);
    let program = TransformProgram::from_json(
        r#"[{"op": "rename_header", "from": "Mix Name", "to": "Mix Code"}]"#,
    )
    .unwrap();

    let output = api
        .convert_tables(DispatchSystem::Mpaq, EntityType::Mixes, &primary, &[materials], Some(&program))
        .unwrap();

    assert_eq!(output.table[0][mix_columns::MIX_NAME], CellValue::from("Mix Code"));
    assert_eq!(output.data_rows()[0][mix_columns::CONSTITUENT_ITEM_CODE], CellValue::from("WTR"));
}
