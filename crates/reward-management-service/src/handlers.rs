//! HTTP 处理器

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use reward_shared::observability::metrics;

use crate::{dto::RewardSelectionRequest, error::SelectionError, state::AppState};

/// 受理成功时的响应文本
pub const SELECTION_ACCEPTED: &str = "reward selection received successfully";

/// 提交奖励选择
///
/// POST /select-reward
///
/// 转发到供应商后立即返回 202，不等待确认回调。
pub async fn select_reward(
    State(state): State<AppState>,
    payload: Result<Json<RewardSelectionRequest>, JsonRejection>,
) -> Result<(StatusCode, &'static str), SelectionError> {
    let Json(request) = payload.map_err(|rejection| {
        let err = SelectionError::InvalidPayload(rejection.body_text());
        metrics::record_selection_rejected(err.outcome());
        err
    })?;

    state.selection.submit_selection(request).await?;

    Ok((StatusCode::ACCEPTED, SELECTION_ACCEPTED))
}

/// 就绪探针
pub async fn healthz() -> &'static str {
    "Ready"
}

/// 存活探针
pub async fn livez() -> &'static str {
    "Alive"
}
