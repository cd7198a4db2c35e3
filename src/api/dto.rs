// ==========================================
// 货代报价比选系统 - API 响应结构
// ==========================================
// 职责: 分析结果 + 生成元信息 → 对外 JSON 形状
// ==========================================

use crate::domain::analysis::{AnalysisFactors, ChartData, QuoteAnalysis};
use crate::domain::quote::Quote;
use crate::domain::types::TransportMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 分析元信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetaDto {
    /// RFC 3339
    pub generated_at: DateTime<Utc>,
    pub quotes_analyzed: usize,
    pub is_reliable: bool,
}

/// 报价分析响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub best_air: Option<Quote>,
    pub best_sea: Option<Quote>,
    pub potential_savings: Option<f64>,
    pub recommendation: Option<TransportMode>,
    pub recommendation_reason: Option<String>,
    pub factors: AnalysisFactors,
    pub chart_data: ChartData,
    pub analysis: AnalysisMetaDto,
}

impl AnalysisResponse {
    /// # 参数
    /// - analysis: 引擎输出
    /// - generated_at: 由调用方提供的生成时间（引擎不读时钟）
    /// - quotes_analyzed: 输入报价条数（含被剔除的运输方式）
    pub fn new(analysis: QuoteAnalysis, generated_at: DateTime<Utc>, quotes_analyzed: usize) -> Self {
        Self {
            best_air: analysis.best_air,
            best_sea: analysis.best_sea,
            potential_savings: analysis.potential_savings,
            recommendation: analysis.recommendation,
            recommendation_reason: analysis.recommendation_reason,
            factors: analysis.factors,
            chart_data: analysis.chart_data,
            analysis: AnalysisMetaDto {
                generated_at,
                quotes_analyzed,
                is_reliable: analysis.is_reliable,
            },
        }
    }
}
