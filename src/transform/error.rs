// ==========================================
// 配合比导入转换器 - 变换模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("变换失败: 表为空（缺少表头）")]
    EmptyTable,

    #[error("变换失败: 列不存在: {column}")]
    UnknownColumn { column: String },

    #[error("变换程序格式错误: {0}")]
    InvalidProgram(String),
}

impl From<serde_json::Error> for TransformError {
    fn from(err: serde_json::Error) -> Self {
        TransformError::InvalidProgram(err.to_string())
    }
}

pub type TransformResult<T> = Result<T, TransformError>;
