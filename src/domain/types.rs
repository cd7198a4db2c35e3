// ==========================================
// 货代报价比选系统 - 领域类型定义
// ==========================================
// 序列化格式: 小写 (与数据库/前端约定一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 运输方式 (Transport Mode)
// ==========================================
// 红线: 一条报价只对应一种运输方式
// 数据源中出现的其他取值统一落入 Other，分析时剔除
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Air, // 空运
    Sea, // 海运
    #[serde(other)]
    Other, // 非法/未支持的方式
}

impl TransportMode {
    /// 从数据库/文件字符串解析（大小写不敏感，未知值 → Other）
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "air" => TransportMode::Air,
            "sea" => TransportMode::Sea,
            _ => TransportMode::Other,
        }
    }

    /// 数据库存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TransportMode::Air => "air",
            TransportMode::Sea => "sea",
            TransportMode::Other => "other",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 报价状态 (Quote Status)
// ==========================================
// 分析引擎不按状态过滤，由调用方决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Active,   // 有效
    Expired,  // 已过期
    Selected, // 已选定
    Declined, // 已拒绝
}

impl QuoteStatus {
    /// 严格解析，未知取值返回 None（由调用方转换为校验错误）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "active" => Some(QuoteStatus::Active),
            "expired" => Some(QuoteStatus::Expired),
            "selected" => Some(QuoteStatus::Selected),
            "declined" => Some(QuoteStatus::Declined),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            QuoteStatus::Active => "active",
            QuoteStatus::Expired => "expired",
            QuoteStatus::Selected => "selected",
            QuoteStatus::Declined => "declined",
        }
    }
}

impl Default for QuoteStatus {
    fn default() -> Self {
        QuoteStatus::Active
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 时间窗弹性 (Timeline Flexibility)
// ==========================================
// 红线: 等级制 (low < medium < high)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineFlexibility {
    Low,    // 紧张
    Medium, // 一般
    High,   // 宽裕
}

impl fmt::Display for TimelineFlexibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineFlexibility::Low => write!(f, "low"),
            TimelineFlexibility::Medium => write!(f, "medium"),
            TimelineFlexibility::High => write!(f, "high"),
        }
    }
}
