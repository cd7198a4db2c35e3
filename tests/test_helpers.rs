// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 测试用户
pub const OWNER: &str = "user-alice";
pub const OTHER_USER: &str = "user-bob";

/// 测试令牌
pub const OWNER_TOKEN: &str = "token-alice";
pub const OTHER_TOKEN: &str = "token-bob";

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();

    let conn = Connection::open(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试连接（应用统一 PRAGMA）
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(freight_quote_analyzer::db::open_sqlite_connection(db_path)?)
}

/// 打开共享测试连接
pub fn open_shared_connection(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    Ok(Arc::new(Mutex::new(open_test_connection(db_path)?)))
}

/// 初始化数据库 schema（生产环境由外部迁移工具维护）
fn init_schema(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS config_scope (
            scope_id TEXT PRIMARY KEY,
            scope_type TEXT NOT NULL,
            scope_key TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(scope_type, scope_key)
        );

        INSERT OR IGNORE INTO config_scope (scope_id, scope_type, scope_key)
        VALUES ('global', 'GLOBAL', 'global');

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL REFERENCES config_scope(scope_id) ON DELETE CASCADE,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS shipment_requests (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            cargo_ready_date TEXT,
            delivery_required_date TEXT,
            value_usd REAL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS forwarders (
            id TEXT PRIMARY KEY,
            company_name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS quotes (
            id TEXT PRIMARY KEY,
            request_id TEXT NOT NULL REFERENCES shipment_requests(id) ON DELETE CASCADE,
            forwarder_id TEXT NOT NULL,
            mode TEXT NOT NULL,
            total_amount REAL NOT NULL,
            currency TEXT NOT NULL DEFAULT 'USD',
            transit_days INTEGER,
            etd TEXT,
            eta TEXT,
            status TEXT NOT NULL DEFAULT 'active',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

/// 插入运输需求
pub fn insert_request(
    conn: &Connection,
    id: &str,
    owner_id: &str,
    cargo_ready_date: Option<&str>,
    delivery_required_date: Option<&str>,
    value_usd: Option<f64>,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO shipment_requests (id, owner_id, cargo_ready_date, delivery_required_date, value_usd)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![id, owner_id, cargo_ready_date, delivery_required_date, value_usd],
    )?;
    Ok(())
}

/// 插入货代
pub fn insert_forwarder(conn: &Connection, id: &str, name: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO forwarders (id, company_name) VALUES (?1, ?2)",
        params![id, name],
    )?;
    Ok(())
}

/// 插入报价（币种 USD，无 etd）
#[allow(clippy::too_many_arguments)]
pub fn insert_quote(
    conn: &Connection,
    id: &str,
    request_id: &str,
    forwarder_id: &str,
    mode: &str,
    total_amount: f64,
    transit_days: Option<i64>,
    eta: Option<&str>,
    status: &str,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO quotes (id, request_id, forwarder_id, mode, total_amount, transit_days, eta, status)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![id, request_id, forwarder_id, mode, total_amount, transit_days, eta, status],
    )?;
    Ok(())
}

/// 插入分析参数
pub fn insert_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT OR REPLACE INTO config_kv (scope_id, key, value, updated_at)
        VALUES ('global', ?1, ?2, datetime('now'))
        "#,
        params![key, value],
    )?;
    Ok(())
}

/// 标准场景: REQ-001 属于 OWNER
/// - 货好 2025-01-01，截止 2025-01-31，货值 100000
/// - 空运 12000 (2025-01-06)，海运 3000 (2025-01-26) / 4500 (2025-01-28)
pub fn seed_standard_scenario(conn: &Connection) -> Result<(), Box<dyn Error>> {
    insert_request(
        conn,
        "REQ-001",
        OWNER,
        Some("2025-01-01"),
        Some("2025-01-31"),
        Some(100_000.0),
    )?;
    insert_forwarder(conn, "FWD-A", "SkyBridge Air Cargo")?;
    insert_forwarder(conn, "FWD-S", "Blue Anchor Logistics")?;

    insert_quote(conn, "Q-AIR-1", "REQ-001", "FWD-A", "air", 12_000.0, Some(5), Some("2025-01-06"), "active")?;
    insert_quote(conn, "Q-SEA-2", "REQ-001", "FWD-S", "sea", 4_500.0, Some(27), Some("2025-01-28"), "active")?;
    insert_quote(conn, "Q-SEA-1", "REQ-001", "FWD-S", "sea", 3_000.0, Some(25), Some("2025-01-26"), "expired")?;
    Ok(())
}
