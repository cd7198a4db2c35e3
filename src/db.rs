// ==========================================
// 货代报价比选系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发读写时的偶发 busy 错误
// 说明: 表结构由外部迁移工具维护，这里只负责连接
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 报价分析依赖的表
pub const REQUIRED_TABLES: [&str; 4] = ["shipment_requests", "forwarders", "quotes", "config_kv"];

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 打开共享连接（仓储/配置管理器共用）
pub fn open_shared_connection(db_path: &str) -> rusqlite::Result<Arc<Mutex<Connection>>> {
    Ok(Arc::new(Mutex::new(open_sqlite_connection(db_path)?)))
}

/// 返回缺失的必需表（用于启动时告警，不做自动建表）
pub fn find_missing_tables(conn: &Connection) -> rusqlite::Result<Vec<&'static str>> {
    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        let exists: bool = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1",
                [table],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if !exists {
            missing.push(table);
        }
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_missing_tables_on_empty_db() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        let missing = find_missing_tables(&conn).unwrap();
        assert_eq!(missing, REQUIRED_TABLES.to_vec());
    }

    #[test]
    fn test_find_missing_tables_partial() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE quotes (id TEXT PRIMARY KEY);").unwrap();
        let missing = find_missing_tables(&conn).unwrap();
        assert!(!missing.contains(&"quotes"));
        assert!(missing.contains(&"forwarders"));
    }
}
