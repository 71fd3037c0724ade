//! 供应商网关错误类型定义

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reward_shared::error::{RewardError, error_response};

/// 供应商网关请求错误
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    #[error("请求参数无效: {0}")]
    InvalidPayload(String),
}

impl VendorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
        }
    }
}

impl IntoResponse for VendorError {
    fn into_response(self) -> Response {
        let Self::InvalidPayload(ref detail) = self;
        tracing::warn!(detail = %detail, "奖励分配请求体无效");
        error_response(self.status_code(), self.error_code(), "invalid request payload")
    }
}

/// 确认回调投递失败
///
/// 只记录日志和指标，从不返回给调用方。
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("确认回调返回 HTTP {0}")]
    Rejected(u16),

    #[error("确认回调请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Shared(#[from] RewardError),
}

impl DeliveryError {
    /// 指标中使用的结果标签
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "rejected",
            Self::Transport(_) | Self::Shared(_) => "failed",
        }
    }
}
