// ==========================================
// 货代报价比选系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod analysis;
pub mod quote;
pub mod shipment;
pub mod types;
pub mod validation;

// 重导出核心类型
pub use analysis::{AnalysisFactors, ChartData, ChartPoint, QuoteAnalysis};
pub use quote::{ForwarderSummary, Quote, DEFAULT_CURRENCY};
pub use shipment::ShipmentRequest;
pub use types::{QuoteStatus, TimelineFlexibility, TransportMode};
pub use validation::{ValidationError, ValidationResult};
