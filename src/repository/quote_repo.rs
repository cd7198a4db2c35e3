// ==========================================
// 货代报价比选系统 - 报价仓储
// ==========================================
// 红线: Repository 不含业务逻辑，不排序、不过滤状态
// ==========================================

use crate::domain::quote::{ForwarderSummary, Quote, DEFAULT_CURRENCY};
use crate::domain::validation::ValidationError;
use crate::domain::types::TransportMode;
use crate::importer::field_parser::{parse_date, parse_status};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::store::QuoteStore;
use crate::repository::stored_value::stored_amount;
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 表中原样读出的一行（含联表的货代名称）
struct QuoteRow {
    id: String,
    request_id: String,
    forwarder_id: String,
    forwarder_name: Option<String>,
    mode: Option<String>,
    total_amount: Value,
    currency: Option<String>,
    transit_days: Option<i64>,
    etd: Option<String>,
    eta: Option<String>,
    status: Option<String>,
}

impl QuoteRow {
    fn into_domain(self) -> RepositoryResult<Quote> {
        let transit_days = self
            .transit_days
            .map(|days| {
                u32::try_from(days).map_err(|_| {
                    ValidationError::new(
                        "quotes.transit_days",
                        format!("天数必须为非负整数，实际 {}", days),
                    )
                })
            })
            .transpose()?;

        let forwarder = self
            .forwarder_name
            .filter(|name| !name.trim().is_empty())
            .map(|name| ForwarderSummary {
                id: self.forwarder_id.clone(),
                name,
            });

        Ok(Quote {
            id: self.id,
            request_id: self.request_id,
            forwarder_id: self.forwarder_id,
            forwarder,
            mode: self
                .mode
                .as_deref()
                .map(TransportMode::from_str)
                .unwrap_or(TransportMode::Other),
            total_amount: stored_amount("quotes.total_amount", self.total_amount)?,
            currency: self
                .currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            transit_days,
            etd: parse_date("quotes.etd", self.etd.as_deref())?,
            eta: parse_date("quotes.eta", self.eta.as_deref())?,
            status: parse_status("quotes.status", self.status.as_deref())?,
        })
    }
}

// ==========================================
// QuoteRepository - 报价仓储
// ==========================================
/// 职责: 读写 quotes 表，联表 forwarders 取展示名称
#[derive(Clone)]
pub struct QuoteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl QuoteRepository {
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

    /// 写入货代（存在则更新名称）
    pub fn upsert_forwarder(&self, forwarder: &ForwarderSummary) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO forwarders (id, company_name) VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET company_name = excluded.company_name
            "#,
            params![forwarder.id, forwarder.name],
        )?;
        Ok(())
    }

    /// 写入报价
    pub fn insert(&self, quote: &Quote) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO quotes (
                id, request_id, forwarder_id, mode, total_amount, currency,
                transit_days, etd, eta, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                quote.id,
                quote.request_id,
                quote.forwarder_id,
                quote.mode.to_db_str(),
                quote.total_amount,
                quote.currency,
                quote.transit_days,
                quote.etd.map(|d| d.to_string()),
                quote.eta.map(|d| d.to_string()),
                quote.status.to_db_str(),
            ],
        )?;
        Ok(())
    }

    /// 查询运输需求下的全部报价
    ///
    /// # 返回
    /// - Ok(Vec<Quote>): 全部状态的报价（无顺序保证）
    /// - Err: 数据库错误 / 存量字段值非法
    pub fn find_by_request(&self, request_id: &str) -> RepositoryResult<Vec<Quote>> {
        let rows = {
            let conn = self.get_conn()?;
            let mut stmt = conn.prepare(
                r#"
                SELECT
                    q.id, q.request_id, q.forwarder_id, f.company_name,
                    q.mode, q.total_amount, q.currency,
                    q.transit_days, q.etd, q.eta, q.status
                FROM quotes q
                LEFT JOIN forwarders f ON f.id = q.forwarder_id
                WHERE q.request_id = ?1
                "#,
            )?;

            let rows = stmt
                .query_map(params![request_id], |row| {
                    Ok(QuoteRow {
                        id: row.get(0)?,
                        request_id: row.get(1)?,
                        forwarder_id: row.get(2)?,
                        forwarder_name: row.get(3)?,
                        mode: row.get(4)?,
                        total_amount: row.get(5)?,
                        currency: row.get(6)?,
                        transit_days: row.get(7)?,
                        etd: row.get(8)?,
                        eta: row.get(9)?,
                        status: row.get(10)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        rows.into_iter().map(QuoteRow::into_domain).collect()
    }
}

#[async_trait]
impl QuoteStore for QuoteRepository {
    async fn list_by_request(&self, request_id: &str) -> RepositoryResult<Vec<Quote>> {
        let repo = self.clone();
        let request_id = request_id.to_string();

        crate::perf::run_blocking("repo.quotes.list_by_request", move || {
            repo.find_by_request(&request_id)
        })
        .await
        .map_err(|e| RepositoryError::InternalError(format!("任务执行失败: {}", e)))?
    }
}
