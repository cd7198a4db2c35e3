// ==========================================
// 货代报价比选系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{Authenticator, QuoteAnalysisApi};
use crate::config::config_manager::ConfigManager;
use crate::repository::{QuoteRepository, ShipmentRequestRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源，由 HTTP 路由以 Arc 共享
pub struct AppState {
    /// 报价分析API
    pub analysis_api: Arc<QuoteAnalysisApi>,

    /// 调用方认证
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - authenticator: 调用方认证实现
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: String, authenticator: Arc<dyn Authenticator>) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let mut conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        crate::perf::install_sqlite_tracing(&mut conn);

        let state = Self::from_connection(Arc::new(Mutex::new(conn)), authenticator)?;

        tracing::info!("AppState初始化完成");
        Ok(state)
    }

    /// 从已有连接创建（测试/嵌入场景）
    pub fn from_connection(
        conn: Arc<Mutex<Connection>>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self, String> {
        {
            let guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            match crate::db::find_missing_tables(&guard) {
                Ok(missing) if !missing.is_empty() => {
                    // 表结构由外部迁移工具维护，缺表只告警
                    tracing::warn!(?missing, "数据库缺少必需表，相关请求将失败");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("检查表结构失败(将继续启动): {}", e),
            }
        }

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法初始化ConfigManager: {}", e))?,
        );
        let request_repo = Arc::new(ShipmentRequestRepository::from_connection(conn.clone()));
        let quote_repo = Arc::new(QuoteRepository::from_connection(conn));

        let analysis_api = Arc::new(QuoteAnalysisApi::new(
            request_repo,
            quote_repo,
            config_manager,
        ));

        Ok(Self {
            analysis_api,
            authenticator,
        })
    }
}
