// ==========================================
// 配合比导入转换器 - 表格变换层
// ==========================================
// 职责: 以封闭 DSL 描述的表格修改（设置列/映射列/过滤行/表头改名）
// 红线: 只解释固定操作集，不生成也不执行任意代码
// ==========================================

pub mod error;
pub mod evaluator;
pub mod ops;

pub use error::{TransformError, TransformResult};
pub use evaluator::{apply_op, TransformProgram};
pub use ops::{ColumnMap, RowPredicate, TransformOp};
