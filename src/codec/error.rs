// ==========================================
// 配合比导入转换器 - 编解码模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 编解码模块错误类型
#[derive(Error, Debug)]
pub enum CodecError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.xlsm/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 解析错误 =====
    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("工作簿中没有工作表")]
    NoWorksheet,

    // ===== 写出错误 =====
    #[error("Excel 写出失败: {0}")]
    XlsxWriteError(String),

    #[error("CSV 写出失败: {0}")]
    CsvWriteError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for CodecError {
    fn from(err: csv::Error) -> Self {
        CodecError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for CodecError {
    fn from(err: calamine::Error) -> Self {
        CodecError::ExcelParseError(err.to_string())
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for CodecError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        CodecError::XlsxWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type CodecResult<T> = Result<T, CodecError>;
