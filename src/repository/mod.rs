// ==========================================
// 货代报价比选系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// 说明: 表结构由外部迁移工具维护
// ==========================================

pub mod error;
pub mod quote_repo;
pub mod shipment_repo;
pub mod store;
mod stored_value;

pub use error::{RepositoryError, RepositoryResult};
pub use quote_repo::QuoteRepository;
pub use shipment_repo::ShipmentRequestRepository;
pub use store::{QuoteStore, ShipmentRequestStore};
