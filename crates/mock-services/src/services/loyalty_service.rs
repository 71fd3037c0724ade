//! Mock 积分引擎与身份目录
//!
//! 提供奖励商品目录、已有选择记录和用户资料查询。
//! 开启认证后，`/user/{id}` 要求携带令牌端点签发的有效 Bearer 令牌。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
};
use reward_shared::models::{RewardOffer, UserProfile, UserReward};
use serde::Serialize;

use crate::models::{seed_offers, seed_user_rewards, seed_users};
use crate::services::token_service::{TokenServiceState, bearer_token};
use crate::store::MemoryStore;

/// 积分引擎状态
pub struct LoyaltyServiceState {
    pub offers: MemoryStore<RewardOffer>,
    pub user_rewards: MemoryStore<UserReward>,
    pub users: MemoryStore<UserProfile>,
    auth: Option<Arc<TokenServiceState>>,
}

impl Default for LoyaltyServiceState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoyaltyServiceState {
    /// 空目录
    pub fn new() -> Self {
        Self {
            offers: MemoryStore::new(),
            user_rewards: MemoryStore::new(),
            users: MemoryStore::new(),
            auth: None,
        }
    }

    /// 写入种子数据的目录
    pub fn seeded() -> Self {
        let state = Self::new();
        state.offers.insert_many(seed_offers(), |o| o.id.clone());
        state.user_rewards.insert_many(seed_user_rewards(), |r| {
            format!("{}:{}", r.user_id, r.selected_reward_deal_id)
        });
        state.users.insert_many(seed_users(), |u| u.user_id.clone());
        state
    }

    /// 用户查询要求有效令牌
    pub fn with_auth(mut self, tokens: Arc<TokenServiceState>) -> Self {
        self.auth = Some(tokens);
        self
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        match &self.auth {
            None => true,
            Some(tokens) => bearer_token(headers).is_some_and(|t| tokens.is_valid(t)),
        }
    }
}

/// API 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

pub fn loyalty_routes() -> Router<Arc<LoyaltyServiceState>> {
    Router::new()
        .route("/rewards", get(list_offers))
        .route("/rewards/{id}", get(get_offer))
        .route("/user-rewards", get(list_user_rewards))
        .route("/user/{id}", get(get_user))
        .route("/users", get(list_users))
}

async fn list_offers(State(state): State<Arc<LoyaltyServiceState>>) -> Json<Vec<RewardOffer>> {
    Json(state.offers.list())
}

async fn get_offer(
    State(state): State<Arc<LoyaltyServiceState>>,
    Path(id): Path<String>,
) -> Result<Json<RewardOffer>, ApiError> {
    state.offers.get(&id).map(Json).ok_or_else(|| {
        tracing::info!(offer_id = %id, "奖励商品不存在");
        api_error(StatusCode::NOT_FOUND, format!("reward offer {id} not found"))
    })
}

async fn list_user_rewards(
    State(state): State<Arc<LoyaltyServiceState>>,
) -> Json<Vec<UserReward>> {
    Json(state.user_rewards.list())
}

async fn get_user(
    State(state): State<Arc<LoyaltyServiceState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, ApiError> {
    if !state.authorized(&headers) {
        tracing::warn!(user_id = %id, "用户查询缺少有效令牌");
        return Err(api_error(StatusCode::UNAUTHORIZED, "invalid_token"));
    }

    match state.users.get(&id) {
        Some(user) => {
            tracing::info!(user_id = %id, "查询用户资料");
            Ok(Json(user))
        }
        None => {
            tracing::info!(user_id = %id, "用户不存在");
            Err(api_error(StatusCode::NOT_FOUND, format!("user {id} not found")))
        }
    }
}

async fn list_users(State(state): State<Arc<LoyaltyServiceState>>) -> Json<Vec<UserProfile>> {
    Json(state.users.list())
}
