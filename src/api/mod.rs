// ==========================================
// 配合比导入转换器 - API层
// ==========================================
// 职责: 面向宿主（CLI / 上层应用）的异步转换接口
// ==========================================

pub mod conversion_api;
pub mod error;

pub use conversion_api::{ConversionApi, ConversionRequest, ConversionResponse, ConversionService};
pub use error::{ApiError, ApiResult};
