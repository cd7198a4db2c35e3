// ==========================================
// 货代报价比选系统 - 应用层
// ==========================================
// 职责: 共享状态装配 + HTTP 接入
// ==========================================

pub mod http;
pub mod state;

// 重导出
pub use http::{create_router, serve};
pub use state::AppState;
pub use crate::config::server_config::get_default_db_path;
