// ==========================================
// 配合比导入转换器 - 领域模型层
// ==========================================
// 职责: 表格值模型、配合比实体、注册表键、转换结果
// 红线: 不含文件编解码逻辑,不含转换逻辑
// ==========================================

pub mod conversion;
pub mod mix;
pub mod table;
pub mod types;

// 重导出核心类型
pub use conversion::{ConversionOutput, ConversionStats, Diagnostic};
pub use mix::{Constituent, MaterialBlock, MaterialType, SourceMixRecord};
pub use table::{cell_at, header_row, CellValue, Row, Table};
pub use types::{DispatchSystem, EntityType};
