// ==========================================
// 货代报价比选系统 - 报价分析 API
// ==========================================
// 职责: 认证校验 → 归属校验 → 读取报价与参数 → 调用引擎 → 组装响应
// 红线: 不存在与无权访问同样返回 NotFound，不泄露需求是否存在
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::api::auth::CallerIdentity;
use crate::api::dto::AnalysisResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::config::analysis_config_reader::AnalysisConfigReader;
use crate::engine::QuoteAnalysisEngine;
use crate::repository::store::{QuoteStore, ShipmentRequestStore};

// ==========================================
// QuoteAnalysisApi - 报价分析 API
// ==========================================
pub struct QuoteAnalysisApi {
    request_store: Arc<dyn ShipmentRequestStore>,
    quote_store: Arc<dyn QuoteStore>,
    config_reader: Arc<dyn AnalysisConfigReader>,
}

impl QuoteAnalysisApi {
    pub fn new(
        request_store: Arc<dyn ShipmentRequestStore>,
        quote_store: Arc<dyn QuoteStore>,
        config_reader: Arc<dyn AnalysisConfigReader>,
    ) -> Self {
        Self {
            request_store,
            quote_store,
            config_reader,
        }
    }

    /// 获取运输需求的报价分析
    ///
    /// # 参数
    /// - caller: 已认证调用方（None 表示未认证）
    /// - request_id: 运输需求ID
    /// - generated_at: 响应中的生成时间
    ///
    /// # 返回
    /// - Ok(AnalysisResponse): 分析结果（无报价时同样返回，各项为空）
    /// - Err(ApiError::Unauthorized): 未认证
    /// - Err(ApiError::InvalidInput): 需求ID为空
    /// - Err(ApiError::NotFound): 需求不存在或不属于调用方
    /// - Err(ApiError::ValidationError): 报价数据不合法
    #[instrument(skip(self, caller, generated_at), fields(user_id = tracing::field::Empty))]
    pub async fn get_request_analysis(
        &self,
        caller: Option<&CallerIdentity>,
        request_id: &str,
        generated_at: DateTime<Utc>,
    ) -> ApiResult<AnalysisResponse> {
        let caller = caller.ok_or_else(|| {
            tracing::warn!("拒绝未认证的分析请求");
            ApiError::Unauthorized("缺少有效的访问令牌".to_string())
        })?;
        tracing::Span::current().record("user_id", caller.user_id.as_str());

        let request_id = request_id.trim();
        if request_id.is_empty() {
            return Err(ApiError::InvalidInput("运输需求ID不能为空".to_string()));
        }

        let request = self
            .request_store
            .find_owned(request_id, &caller.user_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("ShipmentRequest(id={})不存在", request_id))
            })?;

        let quotes = self.quote_store.list_by_request(request_id).await?;

        let config = self
            .config_reader
            .get_analysis_config()
            .await
            .map_err(|e| ApiError::InternalError(format!("分析参数读取失败: {}", e)))?;

        let analysis = QuoteAnalysisEngine::new(config).analyze(&request, &quotes)?;

        tracing::info!(
            quotes = quotes.len(),
            recommendation = ?analysis.recommendation,
            is_reliable = analysis.is_reliable,
            "报价分析完成"
        );

        Ok(AnalysisResponse::new(analysis, generated_at, quotes.len()))
    }
}
