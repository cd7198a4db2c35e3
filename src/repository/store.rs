// ==========================================
// 货代报价比选系统 - 数据访问接口
// ==========================================
// 职责: 定义分析所需的只读数据访问接口
// 红线: Repository 不含业务规则，只做数据读取
// ==========================================

use crate::domain::quote::Quote;
use crate::domain::shipment::ShipmentRequest;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ShipmentRequestStore Trait
// ==========================================
// 实现者: ShipmentRequestRepository（使用 rusqlite）
#[async_trait]
pub trait ShipmentRequestStore: Send + Sync {
    /// 按 ID 查询属于指定用户的运输需求
    ///
    /// # 返回
    /// - Ok(Some): 存在且归属该用户
    /// - Ok(None): 不存在，或归属其他用户（两者不区分）
    async fn find_owned(
        &self,
        request_id: &str,
        owner_id: &str,
    ) -> RepositoryResult<Option<ShipmentRequest>>;
}

// ==========================================
// QuoteStore Trait
// ==========================================
// 实现者: QuoteRepository（使用 rusqlite）
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// 查询运输需求下的全部报价（含货代名称，不过滤状态，不保证顺序）
    async fn list_by_request(&self, request_id: &str) -> RepositoryResult<Vec<Quote>>;
}
