// ==========================================
// 配合比导入转换器 - 运行配置管理器
// ==========================================
// 职责: 运行期设置加载（输出目录 / 日志级别 / CSV 副本）
// 来源: 默认值 → JSON 配置文件 → 环境变量（后者覆写前者）
// 红线: 业务常量不在此处，见 profile.rs
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置键（环境变量）
pub mod config_keys {
    pub const OUTPUT_DIR: &str = "MIX_CONVERTER_OUTPUT_DIR";
    pub const LOG_FILTER: &str = "MIX_CONVERTER_LOG";
}

/// 配置目录名
const APP_DIR_NAME: &str = "mix-import-converter";

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.json";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// AppConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_dir: PathBuf,    // 输出目录
    pub log_filter: String,     // 默认日志过滤器
    pub also_write_csv: bool,   // 同时写出 CSV 副本
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            log_filter: "info".to_string(),
            also_write_csv: false,
        }
    }
}

// ==========================================
// ConfigManager - 配置加载
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 默认配置文件路径（系统配置目录下）
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径；None 时使用默认路径
    ///
    /// # 返回
    /// - Ok(AppConfig): 文件不存在时返回默认值（仍应用环境变量覆写）
    /// - Err: 文件存在但读取或解析失败
    pub fn load(path: Option<&Path>) -> ConfigResult<AppConfig> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_config_path);

        let mut config = match path {
            Some(p) if p.exists() => {
                let config = Self::read_file(&p)?;
                info!(path = %p.display(), "已加载配置文件");
                config
            }
            _ => {
                debug!("未找到配置文件，使用默认配置");
                AppConfig::default()
            }
        };

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    /// 从 JSON 文件读取配置（缺失字段取默认值）
    pub fn read_file(path: &Path) -> ConfigResult<AppConfig> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写（空值忽略）
    pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(config_keys::OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir.trim());
        }
        if let Some(filter) = lookup(config_keys::LOG_FILTER).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }
    }
}
