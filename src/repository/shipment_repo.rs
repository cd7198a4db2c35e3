// ==========================================
// 货代报价比选系统 - 运输需求仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 归属校验在 SQL 中完成，不存在与无权访问不加区分
// ==========================================

use crate::domain::shipment::ShipmentRequest;
use crate::importer::field_parser::parse_date;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::store::ShipmentRequestStore;
use crate::repository::stored_value::stored_optional_amount;
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 表中原样读出的一行
struct ShipmentRequestRow {
    id: String,
    cargo_ready_date: Option<String>,
    delivery_required_date: Option<String>,
    value_usd: Value,
}

impl ShipmentRequestRow {
    fn into_domain(self) -> RepositoryResult<ShipmentRequest> {
        Ok(ShipmentRequest {
            id: self.id,
            cargo_ready_date: parse_date(
                "shipment_requests.cargo_ready_date",
                self.cargo_ready_date.as_deref(),
            )?,
            delivery_required_date: parse_date(
                "shipment_requests.delivery_required_date",
                self.delivery_required_date.as_deref(),
            )?,
            value_usd: stored_optional_amount("shipment_requests.value_usd", self.value_usd)?,
        })
    }
}

// ==========================================
// ShipmentRequestRepository - 运输需求仓储
// ==========================================
/// 职责: 读取 shipment_requests 表
#[derive(Clone)]
pub struct ShipmentRequestRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ShipmentRequestRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入运输需求（存在则覆盖）
    pub fn upsert(&self, request: &ShipmentRequest, owner_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO shipment_requests (
                id, owner_id, cargo_ready_date, delivery_required_date, value_usd
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                owner_id = excluded.owner_id,
                cargo_ready_date = excluded.cargo_ready_date,
                delivery_required_date = excluded.delivery_required_date,
                value_usd = excluded.value_usd
            "#,
            params![
                request.id,
                owner_id,
                request.cargo_ready_date.map(|d| d.to_string()),
                request.delivery_required_date.map(|d| d.to_string()),
                request.value_usd,
            ],
        )?;
        Ok(())
    }

    /// 按 ID + 归属用户查询
    ///
    /// # 返回
    /// - Ok(Some(ShipmentRequest)): 找到且归属该用户
    /// - Ok(None): 未找到或不归属该用户
    /// - Err: 数据库错误 / 存量字段值非法
    pub fn find_by_id_and_owner(
        &self,
        request_id: &str,
        owner_id: &str,
    ) -> RepositoryResult<Option<ShipmentRequest>> {
        let row = {
            let conn = self.get_conn()?;
            let row = conn.query_row(
                r#"
                SELECT id, cargo_ready_date, delivery_required_date, value_usd
                FROM shipment_requests
                WHERE id = ?1 AND owner_id = ?2
                "#,
                params![request_id, owner_id],
                |row| {
                    Ok(ShipmentRequestRow {
                        id: row.get(0)?,
                        cargo_ready_date: row.get(1)?,
                        delivery_required_date: row.get(2)?,
                        value_usd: row.get(3)?,
                    })
                },
            )
            .optional()?;
            row
        };

        row.map(ShipmentRequestRow::into_domain).transpose()
    }
}

#[async_trait]
impl ShipmentRequestStore for ShipmentRequestRepository {
    async fn find_owned(
        &self,
        request_id: &str,
        owner_id: &str,
    ) -> RepositoryResult<Option<ShipmentRequest>> {
        let repo = self.clone();
        let request_id = request_id.to_string();
        let owner_id = owner_id.to_string();

        crate::perf::run_blocking("repo.shipment_requests.find_owned", move || {
            repo.find_by_id_and_owner(&request_id, &owner_id)
        })
        .await
        .map_err(|e| RepositoryError::InternalError(format!("任务执行失败: {}", e)))?
    }
}
