// ==========================================
// 配合比导入转换器 - 转换模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 只收录致命错误；物料查找未命中走 Diagnostic
// ==========================================

use crate::domain::types::{DispatchSystem, EntityType};
use thiserror::Error;

/// 转换模块错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    // ===== 输入错误 =====
    #[error("输入表为空: 主表没有任何行")]
    EmptyInput,

    #[error("缺少必需列: {}", missing.join(", "))]
    MissingRequiredColumns { missing: Vec<String> },

    #[error("没有有效数据行: 所有行均被过滤规则排除")]
    NoValidRows,

    // ===== 注册表错误 =====
    #[error("{system} / {entity} 转换尚未实现")]
    UnimplementedFormat {
        system: DispatchSystem,
        entity: EntityType,
    },

    #[error("未知调度系统: {0}")]
    UnknownDispatchSystem(String),

    #[error("未知实体类型: {0}")]
    UnknownEntityType(String),
}

/// Result 类型别名
pub type ConvertResult<T> = Result<T, ConvertError>;
