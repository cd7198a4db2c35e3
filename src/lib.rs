// ==========================================
// 货代报价比选系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + axum
// 系统定位: 决策支持系统（空运/海运报价比选与推荐，人工最终决策）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 分析参数与进程配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// SQL 性能观测
pub mod perf;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 接入
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{QuoteStatus, TimelineFlexibility, TransportMode};

// 领域实体
pub use domain::{
    AnalysisFactors, ChartData, ChartPoint, ForwarderSummary, Quote, QuoteAnalysis,
    ShipmentRequest, ValidationError, ValidationResult,
};

// 引擎
pub use engine::{analyze, QuoteAnalysisEngine};

// 配置
pub use config::AnalysisConfig;

// API
pub use api::{AnalysisResponse, QuoteAnalysisApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "货代报价比选系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
