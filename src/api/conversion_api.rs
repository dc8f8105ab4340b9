// ==========================================
// 配合比导入转换器 - 转换API
// ==========================================
// 职责: 读取源文件 → 选择转换器 → 可选变换 → 写出导入表
// 红线: 转换本身为纯函数；文件读写只在本层发生
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::codec::table_reader::UniversalTableReader;
use crate::codec::table_writer::{write_csv, write_xlsx};
use crate::config::AppConfig;
use crate::converter::{ConvertError, ConverterRegistry};
use crate::domain::conversion::{ConversionOutput, ConversionStats, Diagnostic};
use crate::domain::table::{Row, Table};
use crate::domain::types::{DispatchSystem, EntityType};
use crate::transform::TransformProgram;
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use futures::future::{join_all, try_join_all};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, Span};
use uuid::Uuid;

/// 转换请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// 源调度系统
    pub system: DispatchSystem,
    /// 实体类型
    pub entity: EntityType,
    /// 主表文件
    pub primary_path: PathBuf,
    /// 辅助表文件（如物料导入表）
    #[serde(default)]
    pub auxiliary_paths: Vec<PathBuf>,
    /// 输出文件（缺省时写入配置的输出目录）
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    /// 转换后执行的变换程序
    #[serde(default)]
    pub transform: Option<TransformProgram>,
}

impl ConversionRequest {
    pub fn new(system: DispatchSystem, entity: EntityType, primary_path: impl Into<PathBuf>) -> Self {
        Self {
            system,
            entity,
            primary_path: primary_path.into(),
            auxiliary_paths: Vec::new(),
            output_path: None,
            transform: None,
        }
    }

    pub fn with_auxiliary(mut self, path: impl Into<PathBuf>) -> Self {
        self.auxiliary_paths.push(path.into());
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_transform(mut self, program: TransformProgram) -> Self {
        self.transform = Some(program);
        self
    }
}

/// 转换响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResponse {
    /// 本次运行ID
    pub run_id: String,
    pub system: DispatchSystem,
    pub entity: EntityType,
    /// 写出的导入表
    pub output_path: PathBuf,
    /// CSV 副本（仅在配置开启时）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<PathBuf>,
    /// 输出数据行数（不含表头，变换之后）
    pub output_rows: usize,
    /// 转换诊断
    pub diagnostics: Vec<Diagnostic>,
    /// 转换器统计（变换之前）
    pub stats: ConversionStats,
    /// 耗时（毫秒）
    pub elapsed_ms: i64,
    pub converted_at: DateTime<Utc>,
}

// ==========================================
// ConversionService Trait
// ==========================================
#[async_trait]
pub trait ConversionService: Send + Sync {
    /// 执行单个转换任务
    async fn convert_files(&self, request: ConversionRequest) -> ApiResult<ConversionResponse>;

    /// 并发执行多个任务，结果顺序与请求一致，单个失败不影响其余任务
    async fn batch_convert(
        &self,
        requests: Vec<ConversionRequest>,
    ) -> Vec<ApiResult<ConversionResponse>>;
}

/// 转换API
pub struct ConversionApi {
    config: AppConfig,
    registry: Arc<ConverterRegistry>,
}

impl ConversionApi {
    /// 使用内置转换器创建
    pub fn new(config: AppConfig) -> Self {
        Self::with_registry(config, ConverterRegistry::with_defaults())
    }

    pub fn with_registry(config: AppConfig, registry: ConverterRegistry) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// 内存转换（不读写文件）
    pub fn convert_tables(
        &self,
        system: DispatchSystem,
        entity: EntityType,
        primary: &[Row],
        auxiliary: &[Table],
        transform: Option<&TransformProgram>,
    ) -> ApiResult<ConversionOutput> {
        run_conversion(&self.registry, system, entity, primary, auxiliary, transform)
    }

    /// 默认输出路径: <output_dir>/<system>_<entity>_<时间戳>_<run_id 前缀>.xlsx
    fn resolve_output_path(&self, request: &ConversionRequest, run_id: &str) -> PathBuf {
        if let Some(path) = &request.output_path {
            return path.clone();
        }

        let file_name = format!(
            "{}_{}_{}_{}.xlsx",
            slug(&request.system.to_string()),
            slug(&request.entity.to_string()),
            Local::now().format("%Y%m%d_%H%M%S"),
            run_id.chars().take(8).collect::<String>()
        );
        self.config.output_dir.join(file_name)
    }

    #[instrument(
        skip(self, request),
        fields(run_id = tracing::field::Empty, system = %request.system, entity = %request.entity)
    )]
    async fn run(&self, request: ConversionRequest) -> ApiResult<ConversionResponse> {
        let started = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        Span::current().record("run_id", run_id.as_str());

        let system = request.system;
        let entity = request.entity;

        // === 步骤 1: 未实现的组合不读取文件 ===
        if !self.registry.is_implemented(system, entity) {
            return Err(ConvertError::UnimplementedFormat { system, entity }.into());
        }

        // === 步骤 2: 并发加载主表与辅助表 ===
        let (primary, auxiliary) = tokio::try_join!(
            load_table(request.primary_path.clone()),
            try_join_all(request.auxiliary_paths.iter().cloned().map(load_table)),
        )?;
        debug!(
            primary_rows = primary.len(),
            auxiliary_tables = auxiliary.len(),
            "源文件加载完成"
        );

        // === 步骤 3: 转换 + 变换 ===
        let registry = Arc::clone(&self.registry);
        let transform = request.transform.clone();
        let output = tokio::task::spawn_blocking(move || {
            run_conversion(
                &registry,
                system,
                entity,
                &primary,
                &auxiliary,
                transform.as_ref(),
            )
        })
        .await??;

        // === 步骤 4: 写出 ===
        let ConversionOutput {
            table,
            diagnostics,
            stats,
        } = output;
        let output_rows = table.len().saturating_sub(1);
        let output_path = self.resolve_output_path(&request, &run_id);
        let also_write_csv = self.config.also_write_csv;
        let target = output_path.clone();
        let csv_path = tokio::task::spawn_blocking(move || {
            write_output(&table, entity.sheet_name(), &target, also_write_csv)
        })
        .await??;

        let elapsed_ms = started.elapsed().as_millis() as i64;
        info!(
            output_rows,
            diagnostics = diagnostics.len(),
            elapsed_ms,
            path = %output_path.display(),
            "转换完成"
        );

        Ok(ConversionResponse {
            run_id,
            system,
            entity,
            output_path,
            csv_path,
            output_rows,
            diagnostics,
            stats,
            elapsed_ms,
            converted_at: Utc::now(),
        })
    }
}

#[async_trait]
impl ConversionService for ConversionApi {
    async fn convert_files(&self, request: ConversionRequest) -> ApiResult<ConversionResponse> {
        self.run(request).await
    }

    async fn batch_convert(
        &self,
        requests: Vec<ConversionRequest>,
    ) -> Vec<ApiResult<ConversionResponse>> {
        info!(jobs = requests.len(), "开始批量转换");
        join_all(requests.into_iter().map(|request| self.run(request))).await
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn run_conversion(
    registry: &ConverterRegistry,
    system: DispatchSystem,
    entity: EntityType,
    primary: &[Row],
    auxiliary: &[Table],
    transform: Option<&TransformProgram>,
) -> ApiResult<ConversionOutput> {
    let mut output = registry.convert(system, entity, primary, auxiliary)?;

    if let Some(program) = transform.filter(|p| !p.is_empty()) {
        output.table = program.apply(&output.table)?;
        debug!(ops = program.ops.len(), rows = output.table.len(), "变换已应用");
    }

    Ok(output)
}

async fn load_table(path: PathBuf) -> ApiResult<Table> {
    let table = tokio::task::spawn_blocking(move || UniversalTableReader.read(&path)).await??;
    Ok(table)
}

fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// 写出导入表；返回 CSV 副本路径（如有）
fn write_output(
    table: &Table,
    sheet_name: &str,
    path: &Path,
    also_write_csv: bool,
) -> ApiResult<Option<PathBuf>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ApiError::OutputDirUnavailable {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }

    if is_csv_path(path) {
        write_csv(table, path)?;
        return Ok(None);
    }

    write_xlsx(table, sheet_name, path)?;
    if !also_write_csv {
        return Ok(None);
    }

    let csv_path = path.with_extension("csv");
    write_csv(table, &csv_path)?;
    Ok(Some(csv_path))
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
