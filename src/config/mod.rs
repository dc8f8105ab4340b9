// ==========================================
// 配合比导入转换器 - 配置层
// ==========================================
// 职责: 厂商转换配置（静态常量）+ 运行配置加载
// ==========================================

pub mod config_manager;
pub mod profile;

// 重导出核心配置
pub use config_manager::{config_keys, AppConfig, ConfigError, ConfigManager, ConfigResult};
pub use profile::{
    material_columns, mix_columns, MixProfile, ProjectionProfile, DESTINATION_MATERIAL_HEADER,
    DESTINATION_MIX_HEADER, COMMAND_SERIES_MIX_PROFILE, MPAQ_MIX_PROFILE,
};
