// ==========================================
// 配合比导入转换器 - 表格读取器实现
// ==========================================
// 职责: 文件字节 → Table（有序行 / 有序单元格）
// 支持: Excel (.xlsx/.xls/.xlsm/.ods) / CSV (.csv)
// 红线: 只读取第一个工作表；完全空白的行跳过
// ==========================================

use crate::codec::error::{CodecError, CodecResult};
use crate::domain::table::{CellValue, Row, Table};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use csv::ReaderBuilder;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

/// 支持的 Excel 扩展名
const EXCEL_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "xlsm", "ods"];

// ==========================================
// TableReader Trait
// ==========================================
// 实现者: CsvTableReader, ExcelTableReader
pub trait TableReader: Send + Sync {
    /// 读取文件为表格（第 0 行为原始表头，不做解释）
    fn read_table(&self, file_path: &Path) -> CodecResult<Table>;
}

/// 小写扩展名
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> CodecResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CodecError::FileNotFound(path.display().to_string()))
    }
}

/// 跳过完全空白的行
fn push_non_blank(table: &mut Table, row: Row) {
    if !row.iter().all(CellValue::is_blank) {
        table.push(row);
    }
}

// ==========================================
// CSV Reader 实现
// ==========================================
pub struct CsvTableReader;

impl CsvTableReader {
    /// 从任意 Read 读取（字段一律按文本保留，空字段为 Empty）
    pub fn read_from<R: Read>(&self, reader: R) -> CodecResult<Table> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        let mut table = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Row = record.iter().map(CellValue::from).collect();
            push_non_blank(&mut table, row);
        }

        // 去除 UTF-8 BOM
        if let Some(CellValue::Text(first)) = table.first_mut().and_then(|r| r.first_mut()) {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }

        debug!(rows = table.len(), "CSV 解析完成");
        Ok(table)
    }
}

impl TableReader for CsvTableReader {
    fn read_table(&self, file_path: &Path) -> CodecResult<Table> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(CodecError::UnsupportedFormat(ext));
        }

        let file = std::fs::File::open(file_path)?;
        self.read_from(file)
    }
}

// ==========================================
// Excel Reader 实现
// ==========================================
pub struct ExcelTableReader;

impl ExcelTableReader {
    /// calamine 单元格 → CellValue
    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::from(s.as_str()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::from(if *b { "TRUE" } else { "FALSE" }),
            other => CellValue::from(other.to_string()),
        }
    }

    /// 区域 → 表格；区域不从 A 列开始时左侧补空，保持列位置
    fn range_to_table(range: &Range<Data>) -> Table {
        let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let mut table = Vec::new();
        for data_row in range.rows() {
            let mut row: Row = vec![CellValue::Empty; col_offset];
            row.extend(data_row.iter().map(Self::convert_cell));
            push_non_blank(&mut table, row);
        }
        table
    }

    /// 读取第一个工作表
    fn first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> CodecResult<Table> {
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(CodecError::NoWorksheet)?;

        let range = workbook.worksheet_range(&sheet_name)?;
        let table = Self::range_to_table(&range);
        debug!(sheet = %sheet_name, rows = table.len(), "Excel 解析完成");
        Ok(table)
    }

    /// 从内存字节读取（上传文件）
    pub fn read_bytes(&self, bytes: Vec<u8>) -> CodecResult<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        Self::first_sheet(&mut workbook)
    }
}

impl TableReader for ExcelTableReader {
    fn read_table(&self, file_path: &Path) -> CodecResult<Table> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(CodecError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;
        Self::first_sheet(&mut workbook)
    }
}

// ==========================================
// 通用表格读取器（根据扩展名自动选择）
// ==========================================
pub struct UniversalTableReader;

impl UniversalTableReader {
    pub fn read<P: AsRef<Path>>(&self, file_path: P) -> CodecResult<Table> {
        self.read_table(file_path.as_ref())
    }
}

impl TableReader for UniversalTableReader {
    fn read_table(&self, file_path: &Path) -> CodecResult<Table> {
        let ext = extension_of(file_path);
        match ext.as_str() {
            "csv" => CsvTableReader.read_table(file_path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelTableReader.read_table(file_path),
            _ => Err(CodecError::UnsupportedFormat(ext)),
        }
    }
}

/// 从内存字节读取（按文件名扩展名选择解码器）
pub fn read_table_from_bytes(bytes: Vec<u8>, file_name: &str) -> CodecResult<Table> {
    let ext = extension_of(Path::new(file_name));
    match ext.as_str() {
        "csv" => CsvTableReader.read_from(bytes.as_slice()),
        e if EXCEL_EXTENSIONS.contains(&e) => ExcelTableReader.read_bytes(bytes),
        _ => Err(CodecError::UnsupportedFormat(ext)),
    }
}
