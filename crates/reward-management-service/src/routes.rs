//! 路由配置模块

use axum::{
    Router, middleware,
    routing::{get, post},
};
use reward_shared::observability::middleware as obs_middleware;

use crate::{handlers, state::AppState};

/// 业务与探针路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/select-reward", post(handlers::select_reward))
        .route("/healthz", get(handlers::healthz))
        .route("/livez", get(handlers::livez))
}

/// 构建完整应用，包含可观测性中间件
pub fn app(state: AppState) -> Router {
    api_routes()
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
