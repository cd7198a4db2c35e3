// ==========================================
// 货代报价比选系统 - HTTP 服务主入口
// ==========================================
// 技术栈: axum + tokio + SQLite
// 系统定位: 决策支持（只给建议，不下单）
// ==========================================

use std::sync::Arc;

use freight_quote_analyzer::api::StaticTokenAuthenticator;
use freight_quote_analyzer::app::{serve, AppState};
use freight_quote_analyzer::config::ServerConfig;
use freight_quote_analyzer::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    logging::init_with_format(config.log_format);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", freight_quote_analyzer::APP_NAME, freight_quote_analyzer::VERSION);
    tracing::info!("==================================================");
    tracing::info!("使用数据库: {}", config.db_path);

    let authenticator = StaticTokenAuthenticator::new(config.api_tokens.clone());
    if authenticator.is_empty() {
        tracing::warn!("未配置任何访问令牌，所有分析请求都将返回 401");
    }

    let state = AppState::new(config.db_path.clone(), Arc::new(authenticator))
        .map_err(|e| anyhow::anyhow!(e))?;

    serve(Arc::new(state), config.bind_addr).await
}
