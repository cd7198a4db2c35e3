// ==========================================
// 货代报价比选系统 - 运输需求实体
// ==========================================
// 只保留报价分析所需字段；组织/联系人等由外部服务维护
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ShipmentRequest - 运输需求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub id: String,                                 // 需求ID (不透明)
    pub cargo_ready_date: Option<NaiveDate>,        // 货好日期
    pub delivery_required_date: Option<NaiveDate>,  // 要求到货日期
    pub value_usd: Option<f64>,                     // 货值 (USD, ≥0)
}

impl ShipmentRequest {
    /// 创建只有ID的需求（日期/货值均为空）
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cargo_ready_date: None,
            delivery_required_date: None,
            value_usd: None,
        }
    }
}
