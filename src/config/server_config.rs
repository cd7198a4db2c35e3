// ==========================================
// 货代报价比选系统 - 服务进程配置
// ==========================================
// 职责: 从环境变量读取进程级配置（监听地址、数据库路径、日志格式、令牌）
// 说明: 分析策略参数不在这里，见 config_kv / ConfigManager
// ==========================================

use std::net::SocketAddr;
use std::path::PathBuf;

/// 监听地址环境变量
pub const ENV_BIND_ADDR: &str = "FQA_BIND_ADDR";
/// 数据库路径环境变量
pub const ENV_DB_PATH: &str = "FQA_DB_PATH";
/// 访问令牌环境变量（格式: token1:user1,token2:user2）
pub const ENV_API_TOKENS: &str = "FQA_API_TOKENS";
/// 日志格式环境变量（text | json）
pub const ENV_LOG_FORMAT: &str = "FQA_LOG_FORMAT";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

// ==========================================
// ServerConfig
// ==========================================
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: String,
    pub api_tokens: Vec<(String, String)>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// 从环境变量加载
    ///
    /// # 错误
    /// - 监听地址无法解析
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_raw = std::env::var(ENV_BIND_ADDR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{} 格式错误 ({}): {}", ENV_BIND_ADDR, bind_raw, e))?;

        let api_tokens = std::env::var(ENV_API_TOKENS)
            .map(|raw| parse_api_tokens(&raw))
            .unwrap_or_default();

        let log_format = match std::env::var(ENV_LOG_FORMAT) {
            Ok(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            bind_addr,
            db_path: get_default_db_path(),
            api_tokens,
            log_format,
        })
    }
}

/// 解析令牌映射 "token:user,token:user"，格式不完整的项会被跳过
pub fn parse_api_tokens(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|pair| {
            let (token, user) = pair.split_once(':')?;
            let token = token.trim();
            let user = user.trim();
            if token.is_empty() || user.is_empty() {
                None
            } else {
                Some((token.to_string(), user.to_string()))
            }
        })
        .collect()
}

/// 获取默认数据库路径
///
/// 优先级: FQA_DB_PATH 环境变量 > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./freight_quotes.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("freight-quote-analyzer");
        // 确保目录存在
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("freight_quotes.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_tokens_skips_malformed_pairs() {
        let tokens = parse_api_tokens("abc:user-1, :user-2,broken,def:user-3");
        assert_eq!(
            tokens,
            vec![
                ("abc".to_string(), "user-1".to_string()),
                ("def".to_string(), "user-3".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_api_tokens_empty_input() {
        assert!(parse_api_tokens("").is_empty());
    }
}
