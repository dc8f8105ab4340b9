// ==========================================
// 配合比导入转换器 - 核心库
// ==========================================
// 职责: 调度系统导出表 → 目标系统配合比/物料导入表
// 技术栈: calamine + csv + rust_xlsxwriter + tokio
// 红线: 转换为纯函数，文件读写只在 codec / api 层
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格值模型与实体
pub mod domain;

// 配置层 - 厂商常量与运行配置
pub mod config;

// 转换层 - 核心转换逻辑
pub mod converter;

// 变换层 - 表格变换 DSL
pub mod transform;

// 编解码层 - 表格文件读写
pub mod codec;

// API 层 - 异步转换接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CellValue, Constituent, ConversionOutput, ConversionStats, Diagnostic, DispatchSystem,
    EntityType, MaterialType, Row, SourceMixRecord, Table,
};

// 配置
pub use config::{AppConfig, ConfigManager, MixProfile, MPAQ_MIX_PROFILE};

// 转换器
pub use converter::{
    build_materials_lookup, extract_slump, extract_strength, ConvertError, Converter,
    ConverterRegistry, MaterialsLookup, MpaqMixConverter,
};

// 变换
pub use transform::{TransformOp, TransformProgram};

// API
pub use api::{ApiError, ConversionApi, ConversionRequest, ConversionResponse, ConversionService};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "配合比导入转换器";
