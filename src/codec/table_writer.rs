// ==========================================
// 配合比导入转换器 - 表格写出器实现
// ==========================================
// 职责: Table → 可下载的 .xlsx / .csv
// 红线: 第 0 行按表头写出（加粗），其余行原样写出
// ==========================================

use crate::codec::error::{CodecError, CodecResult};
use crate::domain::table::{CellValue, Table};
use csv::WriterBuilder;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::debug;

/// 构建单工作表工作簿
fn build_workbook(table: &Table, sheet_name: &str) -> CodecResult<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (row_idx, row) in table.iter().enumerate() {
        let r = u32::try_from(row_idx)
            .map_err(|_| CodecError::XlsxWriteError(format!("行号超出范围: {}", row_idx)))?;

        for (col_idx, cell) in row.iter().enumerate() {
            let c = u16::try_from(col_idx)
                .map_err(|_| CodecError::XlsxWriteError(format!("列号超出范围: {}", col_idx)))?;

            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) if !n.is_finite() => {}
                CellValue::Number(n) => {
                    worksheet.write_number(r, c, *n)?;
                }
                CellValue::Text(s) if row_idx == 0 => {
                    worksheet.write_string_with_format(r, c, s, &header_format)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(r, c, s)?;
                }
            }
        }
    }

    Ok(workbook)
}

/// 写出 .xlsx 文件
pub fn write_xlsx(table: &Table, sheet_name: &str, path: &Path) -> CodecResult<()> {
    let mut workbook = build_workbook(table, sheet_name)?;
    workbook.save(path)?;
    debug!(path = %path.display(), rows = table.len(), "Excel 写出完成");
    Ok(())
}

/// 生成 .xlsx 字节（供下载）
pub fn xlsx_bytes(table: &Table, sheet_name: &str) -> CodecResult<Vec<u8>> {
    let mut workbook = build_workbook(table, sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}

/// 写出 .csv 文件
pub fn write_csv(table: &Table, path: &Path) -> CodecResult<()> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| CodecError::CsvWriteError(e.to_string()))?;

    for row in table {
        writer
            .write_record(row.iter().map(CellValue::as_text))
            .map_err(|e| CodecError::CsvWriteError(e.to_string()))?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = table.len(), "CSV 写出完成");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::table_reader::{CsvTableReader, TableReader};
    use tempfile::Builder;

    fn sample() -> Table {
        vec![
            vec![CellValue::from("Plant Code"), CellValue::from("Quantity")],
            vec![CellValue::from("01"), CellValue::Number(180.0)],
            vec![CellValue::from("02")],
        ]
    }

    #[test]
    fn test_write_csv_ragged_rows() {
        let temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        write_csv(&sample(), temp_file.path()).unwrap();

        let table = CsvTableReader.read_table(temp_file.path()).unwrap();
        assert_eq!(table[1], vec![CellValue::from("01"), CellValue::from("180")]);
        assert_eq!(table[2], vec![CellValue::from("02")]);
    }

    #[test]
    fn test_xlsx_bytes_not_empty() {
        let bytes = xlsx_bytes(&sample(), "Mix Import").unwrap();
        // xlsx 为 zip 容器
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_invalid_sheet_name() {
        let result = xlsx_bytes(&sample(), "Bad/Name");
        assert!(matches!(result, Err(CodecError::XlsxWriteError(_))));
    }
}
