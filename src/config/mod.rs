// ==========================================
// 货代报价比选系统 - 配置层
// ==========================================
// 职责: 分析策略参数 + 进程配置
// 存储: config_kv 表 (策略参数) / 环境变量 (进程配置)
// ==========================================

pub mod analysis_config;
pub mod analysis_config_reader;
pub mod config_manager;
pub mod server_config;

// 重导出核心配置类型
pub use analysis_config::{AnalysisConfig, InvalidConfigError};
pub use analysis_config_reader::{AnalysisConfigReader, StaticConfigReader};
pub use config_manager::{config_keys, ConfigManager};
pub use server_config::{LogFormat, ServerConfig};
