// ==========================================
// 货代报价比选系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 HTTP 路由与命令行调用
// ==========================================

pub mod analysis_api;
pub mod auth;
pub mod dto;
pub mod error;

// 重导出核心类型
pub use analysis_api::QuoteAnalysisApi;
pub use auth::{Authenticator, CallerIdentity, StaticTokenAuthenticator};
pub use dto::{AnalysisMetaDto, AnalysisResponse};
pub use error::{ApiError, ApiResult};
