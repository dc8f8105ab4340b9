// ==========================================
// 配合比导入转换器 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，对外给出带原因的错误消息
// ==========================================

use crate::codec::error::CodecError;
use crate::config::config_manager::ConfigError;
use crate::converter::error::ConvertError;
use crate::transform::error::TransformError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 分层错误
    // ==========================================
    #[error("转换失败: {0}")]
    Convert(#[from] ConvertError),

    #[error("文件处理失败: {0}")]
    Codec(#[from] CodecError),

    #[error("表格变换失败: {0}")]
    Transform(#[from] TransformError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 请求与运行错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("输出目录不可用 ({path}): {message}")]
    OutputDirUnavailable { path: String, message: String },

    #[error("任务执行失败: {0}")]
    TaskFailed(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::TaskFailed(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
