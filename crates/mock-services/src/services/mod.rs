//! Mock 服务模块
//!
//! 组合积分引擎、身份目录、令牌端点和确认接收端，对外暴露一个路由。

pub mod confirmation_service;
pub mod loyalty_service;
pub mod token_service;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use chrono::Duration;
use reward_shared::observability::middleware as obs_middleware;

pub use confirmation_service::{
    ConfirmationServiceState, ReceivedConfirmation, confirmation_routes,
};
pub use loyalty_service::{LoyaltyServiceState, loyalty_routes};
pub use token_service::{TokenServiceState, token_routes};

/// Mock 服务配置
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub client_id: String,
    pub client_secret: String,
    /// `/user/{id}` 是否要求 Bearer 令牌
    pub require_auth: bool,
    pub token_ttl_secs: i64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            client_id: "reward-client".to_string(),
            client_secret: "reward-secret".to_string(),
            require_auth: true,
            token_ttl_secs: 3600,
        }
    }
}

/// 全部 mock 协作方的共享状态
#[derive(Clone)]
pub struct MockServices {
    pub loyalty: Arc<LoyaltyServiceState>,
    pub tokens: Arc<TokenServiceState>,
    pub confirmations: Arc<ConfirmationServiceState>,
}

impl MockServices {
    /// 按配置创建，目录写入种子数据
    pub fn new(config: &MockConfig) -> Self {
        let tokens = Arc::new(TokenServiceState::new(
            config.client_id.clone(),
            config.client_secret.clone(),
            Duration::seconds(config.token_ttl_secs),
        ));

        let mut loyalty = LoyaltyServiceState::seeded();
        if config.require_auth {
            loyalty = loyalty.with_auth(tokens.clone());
        }

        Self {
            loyalty: Arc::new(loyalty),
            tokens,
            confirmations: Arc::new(ConfirmationServiceState::new()),
        }
    }

    /// 合并全部路由，探针与业务路由共用可观测性中间件
    pub fn router(&self) -> Router {
        Router::new()
            .route("/healthz", get(|| async { "Ready" }))
            .route("/livez", get(|| async { "Alive" }))
            .merge(loyalty_routes().with_state(self.loyalty.clone()))
            .merge(token_routes().with_state(self.tokens.clone()))
            .merge(confirmation_routes().with_state(self.confirmations.clone()))
            .layer(middleware::from_fn(obs_middleware::http_tracing))
            .layer(middleware::from_fn(obs_middleware::request_id))
    }
}
