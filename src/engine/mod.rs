// ==========================================
// 货代报价比选系统 - 引擎层
// ==========================================
// 职责: 实现报价比选规则,不拼 SQL,不做 I/O
// 红线: Engine 不拼 SQL, 所有推荐必须输出 reason
// ==========================================

pub mod quote_analysis;
pub mod recommendation;
pub mod timeline;

// 重导出核心引擎
pub use quote_analysis::{analyze, QuoteAnalysisEngine};
pub use recommendation::{Recommendation, Savings};
