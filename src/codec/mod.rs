// ==========================================
// 配合比导入转换器 - 编解码层
// ==========================================
// 职责: 表格文件 ↔ Table（核心层只见 Table）
// 支持: 读取 Excel / CSV，写出 .xlsx / .csv
// ==========================================

pub mod error;
pub mod table_reader;
pub mod table_writer;

pub use error::{CodecError, CodecResult};
pub use table_reader::{
    read_table_from_bytes, CsvTableReader, ExcelTableReader, TableReader, UniversalTableReader,
};
pub use table_writer::{write_csv, write_xlsx, xlsx_bytes};
