// ==========================================
// 货代报价比选系统 - 分析参数读取 Trait
// ==========================================
// 职责: 定义分析 API 所需的参数读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::analysis_config::AnalysisConfig;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// AnalysisConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）、StaticConfigReader（固定值）
#[async_trait]
pub trait AnalysisConfigReader: Send + Sync {
    /// 读取当前生效的分析参数
    ///
    /// # 返回
    /// - 缺失的键使用默认值
    /// - 无法解析的值使用默认值并记录告警
    async fn get_analysis_config(&self) -> Result<AnalysisConfig, Box<dyn Error + Send + Sync>>;
}

// ==========================================
// StaticConfigReader - 固定参数（CLI/测试）
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaticConfigReader {
    config: AnalysisConfig,
}

impl StaticConfigReader {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AnalysisConfigReader for StaticConfigReader {
    async fn get_analysis_config(&self) -> Result<AnalysisConfig, Box<dyn Error + Send + Sync>> {
        Ok(self.config.clone())
    }
}
