// ==========================================
// 货代报价比选系统 - 原始记录与校验转换
// ==========================================
// 职责: 外部输入（JSON/CSV）原样承载 → 校验后转换为领域对象
// 红线: 每个失败都带字段名（批量数据带下标）
// ==========================================

use crate::domain::quote::{ForwarderSummary, Quote, DEFAULT_CURRENCY};
use crate::domain::shipment::ShipmentRequest;
use crate::domain::validation::ValidationResult;
use crate::importer::field_parser::{
    parse_amount, parse_date, parse_mode, parse_optional_amount, parse_status,
    parse_transit_days, require_text,
};
use serde::{Deserialize, Serialize};

// ==========================================
// RawValue - 数字或字符串
// ==========================================
// JSON 中金额/天数可能是数字也可能是字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn as_text(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

fn raw_text(value: &Option<RawValue>) -> Option<String> {
    value.as_ref().map(RawValue::as_text)
}

// ==========================================
// RawShipmentRequest - 原始运输需求
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawShipmentRequest {
    pub id: Option<String>,
    pub cargo_ready_date: Option<String>,
    pub delivery_required_date: Option<String>,
    pub value_usd: Option<RawValue>,
}

impl RawShipmentRequest {
    /// 校验并转换为领域对象
    pub fn into_domain(self) -> ValidationResult<ShipmentRequest> {
        let value_usd = raw_text(&self.value_usd);
        Ok(ShipmentRequest {
            id: require_text("id", self.id.as_deref())?,
            cargo_ready_date: parse_date("cargo_ready_date", self.cargo_ready_date.as_deref())?,
            delivery_required_date: parse_date(
                "delivery_required_date",
                self.delivery_required_date.as_deref(),
            )?,
            value_usd: parse_optional_amount("value_usd", value_usd.as_deref())?,
        })
    }
}

// ==========================================
// RawQuoteRecord - 原始报价
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuoteRecord {
    pub id: Option<String>,
    pub request_id: Option<String>,
    pub forwarder_id: Option<String>,
    pub forwarder_name: Option<String>,
    pub mode: Option<String>,
    pub total_amount: Option<RawValue>,
    pub currency: Option<String>,
    pub transit_days: Option<RawValue>,
    pub etd: Option<String>,
    pub eta: Option<String>,
    pub status: Option<String>,
}

impl RawQuoteRecord {
    /// 校验并转换为领域对象
    ///
    /// # 参数
    /// - field_prefix: 字段前缀（如 "quotes[2]"），空串表示单条
    /// - default_request_id: 记录未带 request_id 时使用
    pub fn into_domain(self, field_prefix: &str, default_request_id: &str) -> ValidationResult<Quote> {
        let field = |name: &str| {
            if field_prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", field_prefix, name)
            }
        };

        let total_amount = raw_text(&self.total_amount);
        let transit_days = raw_text(&self.transit_days);
        let forwarder_id = require_text(&field("forwarder_id"), self.forwarder_id.as_deref())?;

        let forwarder = self
            .forwarder_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| ForwarderSummary {
                id: forwarder_id.clone(),
                name: name.to_string(),
            });

        let request_id = self
            .request_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(default_request_id)
            .to_string();

        Ok(Quote {
            id: require_text(&field("id"), self.id.as_deref())?,
            request_id,
            forwarder_id,
            forwarder,
            mode: parse_mode(self.mode.as_deref()),
            total_amount: parse_amount(&field("total_amount"), total_amount.as_deref())?,
            currency: self
                .currency
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_uppercase)
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            transit_days: parse_transit_days(&field("transit_days"), transit_days.as_deref())?,
            etd: parse_date(&field("etd"), self.etd.as_deref())?,
            eta: parse_date(&field("eta"), self.eta.as_deref())?,
            status: parse_status(&field("status"), self.status.as_deref())?,
        })
    }
}

/// 批量校验报价，错误字段带 quotes[i] 前缀
pub fn validate_quotes(records: Vec<RawQuoteRecord>, request_id: &str) -> ValidationResult<Vec<Quote>> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| record.into_domain(&format!("quotes[{}]", idx), request_id))
        .collect()
}
