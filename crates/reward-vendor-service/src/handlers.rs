//! HTTP 处理器

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use reward_shared::{models::VendorRewardAssignment, observability::metrics};
use tracing::info;

use crate::{error::VendorError, state::AppState};

/// 记录奖励分配
///
/// POST /rewards
///
/// 写入后立即返回 200 和分配本身，确认回调在后台异步派发。
pub async fn create_reward(
    State(state): State<AppState>,
    payload: Result<Json<VendorRewardAssignment>, JsonRejection>,
) -> Result<Json<VendorRewardAssignment>, VendorError> {
    let Json(assignment) =
        payload.map_err(|rejection| VendorError::InvalidPayload(rejection.body_text()))?;

    let total = state.store.append(assignment.clone());
    metrics::record_vendor_assignment();

    info!(
        reward_id = %assignment.reward_id,
        user_id = %assignment.user_id,
        total,
        "已记录奖励分配"
    );

    state
        .notifier
        .dispatch(&assignment.reward_id, &assignment.user_id);

    Ok(Json(assignment))
}

/// 查询全部分配
///
/// GET /rewards
pub async fn list_rewards(State(state): State<AppState>) -> Json<Vec<VendorRewardAssignment>> {
    Json(state.store.list())
}

/// 就绪探针
pub async fn healthz() -> &'static str {
    "Ready"
}

/// 存活探针
pub async fn livez() -> &'static str {
    "Alive"
}
