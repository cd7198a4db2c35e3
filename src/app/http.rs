// ==========================================
// 货代报价比选系统 - HTTP 接入层
// ==========================================
// 职责: 路由、Bearer token 解析、错误 → 状态码映射、优雅停机
// 路由:
// - GET /health
// - GET /api/requests/:id/analysis
// ==========================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api::{AnalysisResponse, ApiError};
use crate::app::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

// ==========================================
// 错误 → HTTP 响应
// ==========================================
impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) | ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "请求处理失败");
            "服务内部错误".to_string()
        } else {
            self.to_string()
        };

        let body = match self.field() {
            Some(field) if !status.is_server_error() => json!({ "error": message, "field": field }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

// ==========================================
// 路由
// ==========================================

/// 构建路由
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/requests/:id/analysis", get(get_request_analysis))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}

async fn health_check() -> &'static str {
    "OK"
}

/// 从 Authorization 头提取 Bearer token
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn get_request_analysis(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let caller = bearer_token(&headers).and_then(|token| state.authenticator.authenticate(token));

    let response = state
        .analysis_api
        .get_request_analysis(caller.as_ref(), &request_id, Utc::now())
        .await?;

    Ok(Json(response))
}

// ==========================================
// 启动与停机
// ==========================================

/// 绑定地址并运行，收到 Ctrl-C / SIGTERM 后等待在途请求结束
pub async fn serve(state: Arc<AppState>, bind_addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("HTTP 服务已启动: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP 服务已退出");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("收到停机信号，开始优雅停机");
}
