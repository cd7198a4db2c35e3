// ==========================================
// 货代报价比选系统 - 配置管理器
// ==========================================
// 职责: 分析参数加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::analysis_config::AnalysisConfig;
use crate::config::analysis_config_reader::AnalysisConfigReader;
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Clone)]
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_config_value(key)
    }

    /// 覆写 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value = value, "分析参数已覆写");
        Ok(())
    }

    /// 读取并解析配置值；缺失 → 默认值，格式错误 → 告警 + 默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr + Display,
    {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };

        match raw.trim().parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "分析参数格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 排查线上推荐结果时记录当时生效的参数
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 组装分析参数（同步版本，供非异步调用方使用）
    pub fn load_analysis_config(&self) -> ConfigResult<AnalysisConfig> {
        let defaults = AnalysisConfig::default();

        let label = self
            .get_config_value(config_keys::UNKNOWN_FORWARDER_LABEL)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.unknown_forwarder_label);

        let config = AnalysisConfig {
            annual_carrying_cost_rate: self.get_parsed_or_default(
                config_keys::ANNUAL_CARRYING_COST_RATE,
                defaults.annual_carrying_cost_rate,
            )?,
            safe_buffer_days: self
                .get_parsed_or_default(config_keys::SAFE_BUFFER_DAYS, defaults.safe_buffer_days)?,
            high_flexibility_days: self.get_parsed_or_default(
                config_keys::HIGH_FLEXIBILITY_DAYS,
                defaults.high_flexibility_days,
            )?,
            medium_flexibility_days: self.get_parsed_or_default(
                config_keys::MEDIUM_FLEXIBILITY_DAYS,
                defaults.medium_flexibility_days,
            )?,
            min_reliable_quote_count: self.get_parsed_or_default(
                config_keys::MIN_RELIABLE_QUOTE_COUNT,
                defaults.min_reliable_quote_count,
            )?,
            unknown_forwarder_label: label,
        };

        config.validate()?;
        Ok(config)
    }
}

// ==========================================
// AnalysisConfigReader Trait 实现
// ==========================================
#[async_trait]
impl AnalysisConfigReader for ConfigManager {
    async fn get_analysis_config(&self) -> ConfigResult<AnalysisConfig> {
        let manager = self.clone();
        crate::perf::run_blocking("config.load_analysis_config", move || {
            manager.load_analysis_config()
        })
        .await
        .map_err(|e| format!("任务执行失败: {}", e))?
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 在途资金成本
    pub const ANNUAL_CARRYING_COST_RATE: &str = "analysis.annual_carrying_cost_rate";

    // 截止日缓冲
    pub const SAFE_BUFFER_DAYS: &str = "analysis.safe_buffer_days";

    // 时间窗弹性
    pub const HIGH_FLEXIBILITY_DAYS: &str = "analysis.high_flexibility_days";
    pub const MEDIUM_FLEXIBILITY_DAYS: &str = "analysis.medium_flexibility_days";

    // 样本可信度
    pub const MIN_RELIABLE_QUOTE_COUNT: &str = "analysis.min_reliable_quote_count";

    // 图表展示
    pub const UNKNOWN_FORWARDER_LABEL: &str = "analysis.unknown_forwarder_label";
}
