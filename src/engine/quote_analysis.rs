// ==========================================
// 货代报价比选系统 - 报价分析引擎
// ==========================================
// 职责: 空运/海运报价比选、节省测算、运输方式推荐、时间窗分级
// 输入: 运输需求 + 该需求下的报价快照
// 输出: QuoteAnalysis
// 红线: 纯函数，无 I/O、无时钟、无日志、不修改输入
// ==========================================

use crate::config::analysis_config::{AnalysisConfig, MIN_RELIABLE_QUOTE_FLOOR};
use crate::domain::analysis::{AnalysisFactors, ChartData, ChartPoint, QuoteAnalysis};
use crate::domain::quote::Quote;
use crate::domain::shipment::ShipmentRequest;
use crate::domain::types::TransportMode;
use crate::domain::validation::{ensure_non_negative_amount, ValidationResult};
use crate::engine::recommendation::{recommend, Savings};
use crate::engine::timeline::{classify_timeline, daily_carrying_cost};

// ==========================================
// QuoteAnalysisEngine - 报价分析引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct QuoteAnalysisEngine {
    config: AnalysisConfig,
}

impl QuoteAnalysisEngine {
    /// 使用指定策略参数创建引擎
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 分析一个运输需求下的全部报价
    ///
    /// 步骤:
    /// 1) 按运输方式拆分（非 air/sea 的报价直接剔除）
    /// 2) 各自按 total_amount 升序稳定排序
    /// 3) 取各方式最低价
    /// 4) 两种方式都有报价时计算节省额/节省百分比
    /// 5) 推荐运输方式
    /// 6) 时间窗弹性分级
    /// 7) 在途资金日成本
    /// 8) 样本可信度
    /// 9) 图表序列
    ///
    /// # 错误
    /// - 金额为负/非有限数、货值为负 → ValidationError（指明字段）
    pub fn analyze(
        &self,
        request: &ShipmentRequest,
        quotes: &[Quote],
    ) -> ValidationResult<QuoteAnalysis> {
        if let Some(value) = request.value_usd {
            ensure_non_negative_amount("value_usd", value)?;
        }

        // 1. 拆分
        let mut air_quotes: Vec<&Quote> = Vec::new();
        let mut sea_quotes: Vec<&Quote> = Vec::new();
        for (idx, quote) in quotes.iter().enumerate() {
            let bucket = match quote.mode {
                TransportMode::Air => &mut air_quotes,
                TransportMode::Sea => &mut sea_quotes,
                TransportMode::Other => continue,
            };
            ensure_non_negative_amount(&format!("quotes[{}].total_amount", idx), quote.total_amount)?;
            bucket.push(quote);
        }

        // 2. 稳定排序（金额已校验为有限数）
        air_quotes.sort_by(|a, b| a.total_amount.total_cmp(&b.total_amount));
        sea_quotes.sort_by(|a, b| a.total_amount.total_cmp(&b.total_amount));

        // 3. 各方式最低价
        let best_air = air_quotes.first().copied();
        let best_sea = sea_quotes.first().copied();

        // 4. 节省测算
        let savings = compute_savings(best_air, best_sea);

        // 5. 推荐
        let recommendation = recommend(
            best_air,
            best_sea,
            request.delivery_required_date,
            savings,
            self.config.safe_buffer_days,
        );

        // 6-7. 时间窗 + 资金成本
        let (timeline_flexibility, available_days) = classify_timeline(
            request.cargo_ready_date,
            request.delivery_required_date,
            &self.config,
        );
        let daily_carrying_cost = daily_carrying_cost(request.value_usd, &self.config);

        // 8. 可信度（样本量下限为 2，配置只能调高）
        let min_quotes = self
            .config
            .min_reliable_quote_count
            .max(MIN_RELIABLE_QUOTE_FLOOR);
        let is_reliable = quotes.len() >= min_quotes
            && (!air_quotes.is_empty() || !sea_quotes.is_empty());

        // 9. 图表
        let chart_data = ChartData {
            air: self.chart_series(&air_quotes),
            sea: self.chart_series(&sea_quotes),
        };

        Ok(QuoteAnalysis {
            best_air: best_air.cloned(),
            best_sea: best_sea.cloned(),
            potential_savings: savings.map(|s| s.potential_savings),
            recommendation: recommendation.mode,
            recommendation_reason: recommendation.reason,
            factors: AnalysisFactors {
                timeline_flexibility,
                daily_carrying_cost,
                available_days,
                savings_percentage: savings.and_then(|s| s.savings_percentage),
            },
            chart_data,
            is_reliable,
        })
    }

    /// 生成图表序列（保持排序后的顺序）
    fn chart_series(&self, sorted: &[&Quote]) -> Vec<ChartPoint> {
        sorted
            .iter()
            .map(|quote| ChartPoint {
                forwarder_label: quote
                    .forwarder_name()
                    .unwrap_or(self.config.unknown_forwarder_label.as_str())
                    .to_string(),
                transit_days: quote.transit_days,
                cost: quote.total_amount,
                eta: quote.eta,
            })
            .collect()
    }
}

/// 节省额 = 空运最低价 - 海运最低价；节省百分比以空运价为基数，空运价为 0 时为空
fn compute_savings(best_air: Option<&Quote>, best_sea: Option<&Quote>) -> Option<Savings> {
    let (air, sea) = (best_air?, best_sea?);
    let potential_savings = air.total_amount - sea.total_amount;
    let savings_percentage = if air.total_amount == 0.0 {
        None
    } else {
        // f64::round 为远离零取整
        Some((potential_savings / air.total_amount * 100.0).round() as i64)
    };

    Some(Savings {
        potential_savings,
        savings_percentage,
    })
}

/// 使用默认策略参数分析
pub fn analyze(request: &ShipmentRequest, quotes: &[Quote]) -> ValidationResult<QuoteAnalysis> {
    QuoteAnalysisEngine::default().analyze(request, quotes)
}
