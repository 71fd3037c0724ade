//! Mock 确认接收端
//!
//! 接收供应商网关发出的奖励确认回调并保存，便于测试断言。
//! 可以通过管理接口模拟接收端故障。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use reward_shared::models::RewardConfirmation;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

/// 收到的确认回调
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedConfirmation {
    #[serde(flatten)]
    pub confirmation: RewardConfirmation,
    pub received_at: DateTime<Utc>,
}

/// 模拟故障请求
#[derive(Debug, Deserialize)]
pub struct SimulateFailureRequest {
    pub simulate_failure: bool,
}

/// 确认接收端状态
#[derive(Default)]
pub struct ConfirmationServiceState {
    received: RwLock<Vec<ReceivedConfirmation>>,
    simulate_failure: RwLock<bool>,
}

impl ConfirmationServiceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_simulate_failure(&self, should_fail: bool) {
        *self.simulate_failure.write().await = should_fail;
    }

    /// 按接收顺序返回全部确认
    pub async fn received(&self) -> Vec<ReceivedConfirmation> {
        self.received.read().await.clone()
    }

    pub async fn clear(&self) {
        self.received.write().await.clear();
    }
}

pub fn confirmation_routes() -> Router<Arc<ConfirmationServiceState>> {
    Router::new()
        .route(
            "/confirmations",
            post(receive_confirmation).get(list_confirmations),
        )
        .route("/admin/confirmations/clear", post(clear_confirmations))
        .route("/admin/confirmations/simulate-failure", post(set_failure))
}

async fn receive_confirmation(
    State(state): State<Arc<ConfirmationServiceState>>,
    payload: Result<Json<RewardConfirmation>, JsonRejection>,
) -> Response {
    if *state.simulate_failure.read().await {
        tracing::warn!("模拟接收端故障，拒绝确认回调");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Service temporarily unavailable" })),
        )
            .into_response();
    }

    let Json(confirmation) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "确认回调载荷无效");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid confirmation payload" })),
            )
                .into_response();
        }
    };

    tracing::info!(
        confirmation_number = %confirmation.reward_confirmation_number,
        user_id = %confirmation.user_id,
        reward_id = %confirmation.reward_id,
        "收到奖励确认"
    );

    let record = ReceivedConfirmation {
        confirmation,
        received_at: Utc::now(),
    };
    state.received.write().await.push(record.clone());

    (StatusCode::ACCEPTED, Json(record)).into_response()
}

async fn list_confirmations(
    State(state): State<Arc<ConfirmationServiceState>>,
) -> Json<Vec<ReceivedConfirmation>> {
    Json(state.received().await)
}

/// 清空确认记录（测试用）
async fn clear_confirmations(
    State(state): State<Arc<ConfirmationServiceState>>,
) -> impl IntoResponse {
    state.clear().await;
    StatusCode::OK
}

/// 设置模拟故障（测试用）
async fn set_failure(
    State(state): State<Arc<ConfirmationServiceState>>,
    Json(req): Json<SimulateFailureRequest>,
) -> impl IntoResponse {
    state.set_simulate_failure(req.simulate_failure).await;
    tracing::info!(simulate_failure = req.simulate_failure, "更新接收端故障模拟");
    Json(json!({ "simulate_failure": req.simulate_failure }))
}
